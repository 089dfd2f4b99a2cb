//! FreightOps API Library
//!
//! Freight logistics backend: reference data (ports, vessels, customers,
//! agents, containers), voyage scheduling and pricing, and freight order
//! booking over SeaORM.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod common;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod telemetry;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// Routes mounted under `/api/v1`
pub fn api_v1_routes() -> Router<AppState> {
    let reference_data = Router::new()
        .route(
            "/ports",
            get(handlers::ports::list_ports).post(handlers::ports::create_port),
        )
        .route("/ports/:id", get(handlers::ports::get_port))
        .route(
            "/vessels",
            get(handlers::vessels::list_vessels).post(handlers::vessels::create_vessel),
        )
        .route("/vessels/:id", get(handlers::vessels::get_vessel))
        .route(
            "/customers",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route("/customers/:id", get(handlers::customers::get_customer))
        .route(
            "/containers",
            get(handlers::containers::list_containers)
                .post(handlers::containers::create_container),
        )
        .route("/containers/:id", get(handlers::containers::get_container))
        .route(
            "/agents",
            get(handlers::agents::list_agents).post(handlers::agents::create_agent),
        )
        .route(
            "/agents/:id",
            get(handlers::agents::get_agent).patch(handlers::agents::update_agent),
        );

    let voyages = Router::new()
        .route(
            "/voyages",
            get(handlers::voyages::list_voyages).post(handlers::voyages::create_voyage),
        )
        .route(
            "/voyages/:id",
            get(handlers::voyages::get_voyage).delete(handlers::voyages::delete_voyage),
        )
        .route(
            "/voyages/:id/prices",
            get(handlers::voyages::list_voyage_prices)
                .post(handlers::voyages::create_voyage_price),
        )
        .route(
            "/voyages/:id/containers",
            get(handlers::voyages::list_voyage_containers),
        )
        .route(
            "/voyages/:id/:status",
            patch(handlers::voyages::update_voyage_status),
        );

    let freight_orders = Router::new()
        .route(
            "/freight-orders",
            get(handlers::freight_orders::list_freight_orders)
                .post(handlers::freight_orders::create_freight_order),
        )
        .route(
            "/freight-orders/:id",
            get(handlers::freight_orders::get_freight_order),
        )
        .route(
            "/freight-orders/:id/discount",
            patch(handlers::freight_orders::update_freight_order_discount),
        )
        .route(
            "/freight-orders/:id/status",
            patch(handlers::freight_orders::update_freight_order_status),
        );

    Router::new()
        .merge(reference_data)
        .merge(voyages)
        .merge(freight_orders)
}

/// Full application router: API, operational endpoints and Swagger UI
///
/// Request ids and HTTP tracing are applied here; CORS, timeouts and
/// compression are left to the binary.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .route("/health", get(health_check))
        .route("/status", get(api_status))
        .with_state(state)
        .merge(openapi::swagger_ui())
        .layer(telemetry::configure_http_tracing())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
}

async fn api_status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "git": option_env!("GIT_HASH").unwrap_or("unknown"),
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn health_check(State(state): State<AppState>) -> Response {
    match db::check_connection(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "healthy" })),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "database": "unhealthy" })),
            )
                .into_response()
        }
    }
}
