use axum::{extract::State, response::Response, Json};
use validator::Validate;

use super::common::{created_response, JsonBody, PathParams};
use crate::errors::{ErrorResponse, ServiceError};
use crate::services::containers::{ContainerResponse, CreateContainerRequest};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/containers",
    tag = "containers",
    request_body = CreateContainerRequest,
    responses(
        (status = 201, description = "Container registered", body = ContainerResponse,
            headers(("Location" = String, description = "URL of the new container"))),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Container code already registered", body = ErrorResponse),
    )
)]
pub async fn create_container(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateContainerRequest>,
) -> Result<Response, ServiceError> {
    request.validate()?;
    let container = state.services.containers.create_container(request).await?;
    Ok(created_response(
        format!("/api/v1/containers/{}", container.id),
        container,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/containers/{id}",
    tag = "containers",
    params(("id" = i32, Path, description = "Container id")),
    responses(
        (status = 200, description = "Container found", body = ContainerResponse),
        (status = 404, description = "Container not found", body = ErrorResponse),
    )
)]
pub async fn get_container(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<ContainerResponse>, ServiceError> {
    Ok(Json(state.services.containers.get_container(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/containers",
    tag = "containers",
    responses((status = 200, description = "All containers", body = [ContainerResponse]))
)]
pub async fn list_containers(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContainerResponse>>, ServiceError> {
    Ok(Json(state.services.containers.list_containers().await?))
}
