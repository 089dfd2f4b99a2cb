mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn port_create_returns_location_and_can_be_fetched() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/v1/ports",
            json!({ "unlocode": "NLRTM", "name": "Rotterdam", "country": "Netherlands" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_i64().unwrap();
    assert_eq!(
        response.location.as_deref(),
        Some(format!("/api/v1/ports/{}", id).as_str())
    );

    let fetched = app.get(&format!("/api/v1/ports/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["unlocode"], "NLRTM");
    assert_eq!(fetched.body["name"], "Rotterdam");

    let listed = app.get("/api/v1/ports").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_unlocode_is_a_conflict() {
    let app = TestApp::new().await;
    app.create_port("NLRTM", "Rotterdam").await;

    let response = app
        .post(
            "/api/v1/ports",
            json!({ "unlocode": "NLRTM", "name": "Rotterdam II", "country": "Netherlands" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["status"], 409);
    assert_eq!(response.body["error"], "Conflict");
}

#[tokio::test]
async fn missing_port_uses_standard_error_body() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/ports/999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["status"], 404);
    assert_eq!(response.body["error"], "Not Found");
    assert_eq!(response.body["message"], "Port not found: 999");
    assert!(response.body["timestamp"].is_string());
    assert!(response.body["request_id"].is_string());
}

#[tokio::test]
async fn invalid_port_fields_are_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/v1/ports",
            json!({ "unlocode": "rotterdam", "name": " ", "country": "Netherlands" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["message"].as_str().unwrap();
    assert!(message.contains("unlocode"), "{}", message);
    assert!(message.contains("name"), "{}", message);
}

#[tokio::test]
async fn malformed_json_and_path_are_bad_requests() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/ports")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"unlocode\": "))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);

    let response = app.get("/api/v1/ports/abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Bad Request");
}

#[tokio::test]
async fn duplicate_imo_number_is_a_conflict() {
    let app = TestApp::new().await;
    app.create_vessel("IMO9321483").await;

    let response = app
        .post(
            "/api/v1/vessels",
            json!({ "name": "Other", "imo_number": "IMO9321483", "capacity_teu": 100 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn vessel_capacity_must_be_positive() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/v1/vessels",
            json!({ "name": "Nordic Star", "imo_number": "IMO9321483", "capacity_teu": 0 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .starts_with("capacity_teu"));
}

#[tokio::test]
async fn customer_round_trip_through_the_api() {
    let app = TestApp::new().await;

    let id = app
        .create(
            "/api/v1/customers",
            json!({
                "company_name": "Acme Imports",
                "contact_name": "Mira Stone",
                "email": "mira@acme.example",
                "phone": "+31 10 123 4567"
            }),
        )
        .await;

    let fetched = app.get(&format!("/api/v1/customers/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["company_name"], "Acme Imports");
    assert!(fetched.body["address"].is_null());

    let bad = app
        .post(
            "/api/v1/customers",
            json!({
                "company_name": "Acme Imports",
                "contact_name": "Mira Stone",
                "email": "not-an-email"
            }),
        )
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn container_code_is_validated_and_unique() {
    let app = TestApp::new().await;
    let id = app.create_container("MSCU1234567", "FORTY_FOOT").await;

    let fetched = app.get(&format!("/api/v1/containers/{}", id)).await;
    assert_eq!(fetched.body["size"], "FORTY_FOOT");
    assert_eq!(fetched.body["container_type"], "DRY");

    let duplicate = app
        .post(
            "/api/v1/containers",
            json!({ "container_code": "MSCU1234567", "size": "TWENTY_FOOT", "container_type": "TANK" }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let malformed = app
        .post(
            "/api/v1/containers",
            json!({ "container_code": "MSC-1", "size": "TWENTY_FOOT", "container_type": "TANK" }),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let unknown_size = app
        .post(
            "/api/v1/containers",
            json!({ "container_code": "MSCU7654321", "size": "FIFTY_FOOT", "container_type": "TANK" }),
        )
        .await;
    assert_eq!(unknown_size.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn agents_filter_by_type_and_active() {
    let app = TestApp::new().await;
    app.create_agent("a@forwarders.example", true).await;
    app.create_agent("b@forwarders.example", false).await;
    app.create(
        "/api/v1/agents",
        json!({
            "name": "Desk",
            "email": "desk@freightops.example",
            "commission_percent": "0",
            "agent_type": "INTERNAL"
        }),
    )
    .await;

    let all = app.get("/api/v1/agents").await;
    assert_eq!(all.body.as_array().unwrap().len(), 3);

    let external = app.get("/api/v1/agents?type=EXTERNAL").await;
    assert_eq!(external.body.as_array().unwrap().len(), 2);

    let active = app.get("/api/v1/agents?active=true").await;
    assert_eq!(active.body.as_array().unwrap().len(), 2);

    let both = app.get("/api/v1/agents?type=EXTERNAL&active=false").await;
    let both = both.body.as_array().unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0]["email"], "b@forwarders.example");

    let bad = app.get("/api/v1/agents?type=FREELANCE").await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn agent_patch_updates_only_supplied_fields() {
    let app = TestApp::new().await;
    let id = app.create_agent("jonas@forwarders.example", true).await;

    let response = app
        .patch(
            &format!("/api/v1/agents/{}", id),
            Some(json!({ "active": false })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["active"], false);
    assert_eq!(response.body["commission_percent"], "2.50");
    assert!(response.body["updated_at"].is_string());

    let missing = app
        .patch("/api/v1/agents/999", Some(json!({ "active": true })))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_status_endpoints_respond() {
    let app = TestApp::new().await;

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["database"], "healthy");

    let status = app.get("/status").await;
    assert_eq!(status.status, StatusCode::OK);
    assert_eq!(status.body["service"], "freightops-api");
    assert_eq!(status.body["environment"], "test");
}
