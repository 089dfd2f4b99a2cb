mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

struct Booking {
    voyage: i64,
    container: i64,
    agent: i64,
}

/// Voyage priced at 1000.00 for twenty-foot containers, one container, one active agent
async fn booking(app: &TestApp, voyage_number: &str, code: &str) -> Booking {
    let voyage = app.create_voyage(voyage_number).await;
    let price = app.set_price(voyage, "TWENTY_FOOT", "1000.00").await;
    assert_eq!(price.status, StatusCode::CREATED);
    Booking {
        voyage,
        container: app.create_container(code, "TWENTY_FOOT").await,
        agent: app
            .create_agent(&format!("{}@forwarders.example", code.to_lowercase()), true)
            .await,
    }
}

fn order_body(b: &Booking, discount: Option<&str>) -> Value {
    let mut body = json!({
        "voyage_id": b.voyage,
        "container_id": b.container,
        "agent_id": b.agent,
        "ordered_by": "Mira Stone",
        "notes": "Keep dry"
    });
    if let Some(discount) = discount {
        body["discount_percent"] = json!(discount);
    }
    body
}

#[tokio::test]
async fn order_is_priced_from_voyage_price_and_discount() {
    let app = TestApp::new().await;
    let b = booking(&app, "VOY-101", "MSCU1234567").await;

    let response = app
        .post("/api/v1/freight-orders", order_body(&b, Some("10")))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_i64().unwrap();
    assert_eq!(
        response.location.as_deref(),
        Some(format!("/api/v1/freight-orders/{}", id).as_str())
    );
    assert_eq!(response.body["status"], "PENDING");
    assert_eq!(response.body["base_price_usd"], "1000.00");
    assert_eq!(response.body["discount_percent"], "10.00");
    assert_eq!(response.body["final_price"], "900.00");
    assert_eq!(response.body["voyage_number"], "VOY-101");
    assert_eq!(response.body["container_code"], "MSCU1234567");
    assert_eq!(response.body["agent_name"], "Jonas Berg");
    assert_eq!(response.body["ordered_by"], "Mira Stone");

    let fetched = app.get(&format!("/api/v1/freight-orders/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["final_price"], "900.00");
}

#[tokio::test]
async fn missing_discount_keeps_base_price() {
    let app = TestApp::new().await;
    let b = booking(&app, "VOY-102", "MSCU1234567").await;

    let response = app.post("/api/v1/freight-orders", order_body(&b, None)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["discount_percent"], "0.00");
    assert_eq!(response.body["final_price"], "1000.00");
}

#[tokio::test]
async fn discount_outside_percentage_range_is_rejected() {
    let app = TestApp::new().await;
    let b = booking(&app, "VOY-103", "MSCU1234567").await;

    for discount in ["-1", "100.01"] {
        let response = app
            .post("/api/v1/freight-orders", order_body(&b, Some(discount)))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", discount);
    }

    let full = app
        .post("/api/v1/freight-orders", order_body(&b, Some("100")))
        .await;
    assert_eq!(full.status, StatusCode::CREATED);
    assert_eq!(full.body["final_price"], "0.00");
}

#[tokio::test]
async fn booking_without_price_for_size_is_a_bad_request() {
    let app = TestApp::new().await;
    let b = booking(&app, "VOY-104", "MSCU1234567").await;
    let large = app.create_container("MSCU7654321", "FORTY_FOOT").await;

    let response = app
        .post(
            "/api/v1/freight-orders",
            json!({ "voyage_id": b.voyage, "container_id": large, "agent_id": b.agent }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "No price defined for voyage and container size"
    );
}

#[tokio::test]
async fn inactive_agent_cannot_book() {
    let app = TestApp::new().await;
    let b = booking(&app, "VOY-105", "MSCU1234567").await;
    app.patch(
        &format!("/api/v1/agents/{}", b.agent),
        Some(json!({ "active": false })),
    )
    .await;

    let response = app.post("/api/v1/freight-orders", order_body(&b, None)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        "Cannot place order with inactive agent"
    );
}

#[tokio::test]
async fn cancelled_voyage_cannot_be_booked() {
    let app = TestApp::new().await;
    let b = booking(&app, "VOY-106", "MSCU1234567").await;
    app.patch(&format!("/api/v1/voyages/{}/CANCELLED", b.voyage), None)
        .await;

    let response = app.post("/api/v1/freight-orders", order_body(&b, None)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        "Cannot book freight on a cancelled voyage"
    );

    let orders = app
        .get(&format!("/api/v1/freight-orders?voyage_id={}", b.voyage))
        .await;
    assert_eq!(orders.body["total_elements"], 0);
}

#[tokio::test]
async fn unknown_references_are_not_found() {
    let app = TestApp::new().await;
    let b = booking(&app, "VOY-107", "MSCU1234567").await;

    let bad_voyage = app
        .post(
            "/api/v1/freight-orders",
            json!({ "voyage_id": 999, "container_id": b.container, "agent_id": b.agent }),
        )
        .await;
    assert_eq!(bad_voyage.status, StatusCode::NOT_FOUND);

    let bad_container = app
        .post(
            "/api/v1/freight-orders",
            json!({ "voyage_id": b.voyage, "container_id": 999, "agent_id": b.agent }),
        )
        .await;
    assert_eq!(bad_container.status, StatusCode::NOT_FOUND);

    let bad_agent = app
        .post(
            "/api/v1/freight-orders",
            json!({ "voyage_id": b.voyage, "container_id": b.container, "agent_id": 999 }),
        )
        .await;
    assert_eq!(bad_agent.status, StatusCode::NOT_FOUND);
    assert_eq!(bad_agent.body["message"], "Agent not found: 999");

    let missing = app.get("/api/v1/freight-orders/999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Freight order not found: 999");
}

#[tokio::test]
async fn discount_update_recomputes_final_price() {
    let app = TestApp::new().await;
    let b = booking(&app, "VOY-108", "MSCU1234567").await;
    let id = app
        .create("/api/v1/freight-orders", order_body(&b, Some("10")))
        .await;

    let response = app
        .patch(
            &format!("/api/v1/freight-orders/{}/discount", id),
            Some(json!({ "discount_percent": "12.5", "reason": "Loyal customer" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["discount_percent"], "12.50");
    assert_eq!(response.body["final_price"], "875.00");
    assert_eq!(response.body["discount_reason"], "Loyal customer");

    let cleared = app
        .patch(
            &format!("/api/v1/freight-orders/{}/discount", id),
            Some(json!({})),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.body["final_price"], "1000.00");

    let out_of_range = app
        .patch(
            &format!("/api/v1/freight-orders/{}/discount", id),
            Some(json!({ "discount_percent": "150" })),
        )
        .await;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn closed_orders_reject_discount_changes() {
    let app = TestApp::new().await;
    let b = booking(&app, "VOY-109", "MSCU1234567").await;
    let id = app
        .create("/api/v1/freight-orders", order_body(&b, None))
        .await;

    let delivered = app
        .patch(
            &format!("/api/v1/freight-orders/{}/status", id),
            Some(json!({ "status": "DELIVERED" })),
        )
        .await;
    assert_eq!(delivered.status, StatusCode::OK);
    assert_eq!(delivered.body["status"], "DELIVERED");

    let response = app
        .patch(
            &format!("/api/v1/freight-orders/{}/discount", id),
            Some(json!({ "discount_percent": "5" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        "New discount cannot be applied on the cancelled or delivered freight order"
    );

    let fetched = app.get(&format!("/api/v1/freight-orders/{}", id)).await;
    assert_eq!(fetched.body["final_price"], "1000.00");
}

#[tokio::test]
async fn unknown_order_status_is_rejected() {
    let app = TestApp::new().await;
    let b = booking(&app, "VOY-110", "MSCU1234567").await;
    let id = app
        .create("/api/v1/freight-orders", order_body(&b, None))
        .await;

    let response = app
        .patch(
            &format!("/api/v1/freight-orders/{}/status", id),
            Some(json!({ "status": "LOST" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn orders_are_listed_per_voyage_and_paginated() {
    let app = TestApp::new().await;
    let first = booking(&app, "VOY-201", "MSCU1000001").await;
    let second = booking(&app, "VOY-202", "MSCU1000002").await;

    for _ in 0..3 {
        app.create("/api/v1/freight-orders", order_body(&first, None))
            .await;
    }
    app.create("/api/v1/freight-orders", order_body(&second, None))
        .await;

    let all = app.get("/api/v1/freight-orders").await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["total_elements"], 4);
    assert_eq!(all.body["page"], 0);
    assert_eq!(all.body["size"], 20);

    let per_voyage = app
        .get(&format!(
            "/api/v1/freight-orders?voyage_id={}&page=1&size=2",
            first.voyage
        ))
        .await;
    assert_eq!(per_voyage.body["total_elements"], 3);
    assert_eq!(per_voyage.body["total_pages"], 2);
    let items = per_voyage.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["voyage_number"], "VOY-201");

    let zero_size = app.get("/api/v1/freight-orders?size=0").await;
    assert_eq!(zero_size.body["size"], 1);
    assert_eq!(zero_size.body["items"].as_array().unwrap().len(), 1);

    let unknown_voyage = app.get("/api/v1/freight-orders?voyage_id=999").await;
    assert_eq!(unknown_voyage.status, StatusCode::OK);
    assert_eq!(unknown_voyage.body["total_elements"], 0);
}

#[tokio::test]
async fn order_listing_rejects_page_offsets_past_the_database_range() {
    let app = TestApp::new().await;

    let huge = app
        .get("/api/v1/freight-orders?page=18446744073709551615")
        .await;
    assert_eq!(huge.status, StatusCode::BAD_REQUEST);
    assert_eq!(huge.body["error"], "Bad Request");

    let offset_overflow = app
        .get("/api/v1/freight-orders?page=92233720368547759&size=100")
        .await;
    assert_eq!(offset_overflow.status, StatusCode::BAD_REQUEST);

    let empty = app.get("/api/v1/freight-orders?page=1000").await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body["total_elements"], 0);
}
