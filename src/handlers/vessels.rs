use axum::{extract::State, response::Response, Json};
use validator::Validate;

use super::common::{created_response, JsonBody, PathParams};
use crate::errors::{ErrorResponse, ServiceError};
use crate::services::vessels::{CreateVesselRequest, VesselResponse};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/vessels",
    tag = "vessels",
    request_body = CreateVesselRequest,
    responses(
        (status = 201, description = "Vessel created", body = VesselResponse,
            headers(("Location" = String, description = "URL of the new vessel"))),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "IMO number already registered", body = ErrorResponse),
    )
)]
pub async fn create_vessel(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateVesselRequest>,
) -> Result<Response, ServiceError> {
    request.validate()?;
    let vessel = state.services.vessels.create_vessel(request).await?;
    Ok(created_response(
        format!("/api/v1/vessels/{}", vessel.id),
        vessel,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/vessels/{id}",
    tag = "vessels",
    params(("id" = i32, Path, description = "Vessel id")),
    responses(
        (status = 200, description = "Vessel found", body = VesselResponse),
        (status = 404, description = "Vessel not found", body = ErrorResponse),
    )
)]
pub async fn get_vessel(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<VesselResponse>, ServiceError> {
    Ok(Json(state.services.vessels.get_vessel(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/vessels",
    tag = "vessels",
    responses((status = 200, description = "All vessels", body = [VesselResponse]))
)]
pub async fn list_vessels(
    State(state): State<AppState>,
) -> Result<Json<Vec<VesselResponse>>, ServiceError> {
    Ok(Json(state.services.vessels.list_vessels().await?))
}
