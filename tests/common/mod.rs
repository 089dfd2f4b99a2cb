use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use freightops_api::{config::AppConfig, db, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper harness for spinning up the application against an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

/// Status, headers and decoded JSON body of a test request
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

#[allow(dead_code)]
impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single connection keeps the in-memory database alive for the whole test
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.cors_allow_any_origin = true;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = freightops_api::app_router(state.clone());

        Self { router, state }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).expect("request builds")).await
    }

    /// Sends a raw request, for malformed payload tests
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            location,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Option<Value>) -> TestResponse {
        self.request(Method::PATCH, uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Creates a resource and returns its id, asserting a 201
    pub async fn create(&self, uri: &str, body: Value) -> i64 {
        let response = self.post(uri, body).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "POST {} failed: {}",
            uri,
            response.body
        );
        response.body["id"].as_i64().expect("id in response")
    }

    pub async fn create_port(&self, unlocode: &str, name: &str) -> i64 {
        self.create(
            "/api/v1/ports",
            json!({ "unlocode": unlocode, "name": name, "country": "Netherlands" }),
        )
        .await
    }

    pub async fn create_vessel(&self, imo_number: &str) -> i64 {
        self.create(
            "/api/v1/vessels",
            json!({ "name": "Nordic Star", "imo_number": imo_number, "capacity_teu": 8000 }),
        )
        .await
    }

    pub async fn create_agent(&self, email: &str, active: bool) -> i64 {
        self.create(
            "/api/v1/agents",
            json!({
                "name": "Jonas Berg",
                "email": email,
                "commission_percent": "2.50",
                "agent_type": "EXTERNAL",
                "active": active
            }),
        )
        .await
    }

    pub async fn create_container(&self, code: &str, size: &str) -> i64 {
        self.create(
            "/api/v1/containers",
            json!({ "container_code": code, "size": size, "container_type": "DRY" }),
        )
        .await
    }

    /// Voyage departing tomorrow between two fresh ports
    pub async fn create_voyage(&self, voyage_number: &str) -> i64 {
        let suffix = &voyage_number[voyage_number.len().saturating_sub(3)..];
        let origin = self
            .create_port(&format!("NL{}", letters(suffix, 'A')), "Rotterdam")
            .await;
        let destination = self
            .create_port(&format!("SG{}", letters(suffix, 'K')), "Singapore")
            .await;
        let vessel = self.create_vessel(&format!("IMO{}", 9_000_000 + origin)).await;

        self.create(
            "/api/v1/voyages",
            voyage_body(voyage_number, vessel, origin, destination),
        )
        .await
    }

    pub async fn set_price(&self, voyage_id: i64, size: &str, base_price: &str) -> TestResponse {
        self.post(
            &format!("/api/v1/voyages/{}/prices", voyage_id),
            json!({ "container_size": size, "base_price_usd": base_price }),
        )
        .await
    }
}

/// Voyage payload departing in one day and arriving in twelve
#[allow(dead_code)]
pub fn voyage_body(voyage_number: &str, vessel: i64, origin: i64, destination: i64) -> Value {
    let departure = Utc::now() + Duration::days(1);
    let arrival = departure + Duration::days(11);
    json!({
        "voyage_number": voyage_number,
        "vessel_id": vessel,
        "departure_port_id": origin,
        "arrival_port_id": destination,
        "departure_time": departure.to_rfc3339(),
        "arrival_time": arrival.to_rfc3339()
    })
}

/// Maps digits to letters so generated UN/LOCODEs stay valid and unique
#[allow(dead_code)]
fn letters(digits: &str, base: char) -> String {
    let mut code: String = digits
        .chars()
        .map(|c| {
            let offset = c.to_digit(10).unwrap_or(0) as u8;
            (base as u8 + offset) as char
        })
        .collect();
    while code.len() < 3 {
        code.insert(0, base);
    }
    code
}
