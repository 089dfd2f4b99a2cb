use axum::{extract::State, response::Response, Json};
use validator::Validate;

use super::common::{created_response, JsonBody, PathParams};
use crate::errors::{ErrorResponse, ServiceError};
use crate::services::ports::{CreatePortRequest, PortResponse};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/ports",
    tag = "ports",
    request_body = CreatePortRequest,
    responses(
        (status = 201, description = "Port created", body = PortResponse,
            headers(("Location" = String, description = "URL of the new port"))),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "UN/LOCODE already registered", body = ErrorResponse),
    )
)]
pub async fn create_port(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreatePortRequest>,
) -> Result<Response, ServiceError> {
    request.validate()?;
    let port = state.services.ports.create_port(request).await?;
    Ok(created_response(format!("/api/v1/ports/{}", port.id), port))
}

#[utoipa::path(
    get,
    path = "/api/v1/ports/{id}",
    tag = "ports",
    params(("id" = i32, Path, description = "Port id")),
    responses(
        (status = 200, description = "Port found", body = PortResponse),
        (status = 404, description = "Port not found", body = ErrorResponse),
    )
)]
pub async fn get_port(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<PortResponse>, ServiceError> {
    Ok(Json(state.services.ports.get_port(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/ports",
    tag = "ports",
    responses((status = 200, description = "All ports", body = [PortResponse]))
)]
pub async fn list_ports(
    State(state): State<AppState>,
) -> Result<Json<Vec<PortResponse>>, ServiceError> {
    Ok(Json(state.services.ports.list_ports().await?))
}
