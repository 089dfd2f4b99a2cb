use axum::{extract::State, http::StatusCode, response::Response, Json};
use validator::Validate;

use super::common::{created_response, page_request, JsonBody, PathParams, QueryParams};
use crate::common::{Page, PageParams};
use crate::entities::VoyageStatus;
use crate::errors::{ErrorResponse, ServiceError};
use crate::services::freight_orders::VoyageContainerResponse;
use crate::services::voyages::{
    CreateVoyagePriceRequest, CreateVoyageRequest, VoyageListParams, VoyagePriceResponse,
    VoyageResponse,
};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/voyages",
    tag = "voyages",
    params(VoyageListParams),
    responses(
        (status = 200, description = "Voyages, optionally filtered by status", body = [VoyageResponse]),
        (status = 400, description = "Unknown status", body = ErrorResponse),
    )
)]
pub async fn list_voyages(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<VoyageListParams>,
) -> Result<Json<Vec<VoyageResponse>>, ServiceError> {
    Ok(Json(state.services.voyages.list_voyages(params).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/voyages",
    tag = "voyages",
    request_body = CreateVoyageRequest,
    responses(
        (status = 201, description = "Voyage scheduled", body = VoyageResponse,
            headers(("Location" = String, description = "URL of the new voyage"))),
        (status = 400, description = "Invalid ports or time window", body = ErrorResponse),
        (status = 404, description = "Vessel or port not found", body = ErrorResponse),
        (status = 409, description = "Voyage number already taken", body = ErrorResponse),
    )
)]
pub async fn create_voyage(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateVoyageRequest>,
) -> Result<Response, ServiceError> {
    request.validate()?;
    let voyage = state.services.voyages.create_voyage(request).await?;
    Ok(created_response(
        format!("/api/v1/voyages/{}", voyage.id),
        voyage,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/voyages/{id}",
    tag = "voyages",
    params(("id" = i32, Path, description = "Voyage id")),
    responses(
        (status = 200, description = "Voyage found", body = VoyageResponse),
        (status = 404, description = "Voyage not found", body = ErrorResponse),
    )
)]
pub async fn get_voyage(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<VoyageResponse>, ServiceError> {
    Ok(Json(state.services.voyages.get_voyage(id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/voyages/{id}",
    tag = "voyages",
    params(("id" = i32, Path, description = "Voyage id")),
    responses(
        (status = 204, description = "Voyage and its prices deleted"),
        (status = 404, description = "Voyage not found", body = ErrorResponse),
        (status = 409, description = "Voyage has freight orders", body = ErrorResponse),
    )
)]
pub async fn delete_voyage(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.voyages.delete_voyage(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/v1/voyages/{id}/{status}",
    tag = "voyages",
    params(
        ("id" = i32, Path, description = "Voyage id"),
        ("status" = VoyageStatus, Path, description = "New voyage status"),
    ),
    responses(
        (status = 200, description = "Status updated", body = VoyageResponse),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Voyage not found", body = ErrorResponse),
    )
)]
pub async fn update_voyage_status(
    State(state): State<AppState>,
    PathParams((id, status)): PathParams<(i32, VoyageStatus)>,
) -> Result<Json<VoyageResponse>, ServiceError> {
    Ok(Json(state.services.voyages.update_status(id, status).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/voyages/{id}/prices",
    tag = "voyages",
    params(("id" = i32, Path, description = "Voyage id")),
    request_body = CreateVoyagePriceRequest,
    responses(
        (status = 201, description = "Price set", body = VoyagePriceResponse,
            headers(("Location" = String, description = "URL of the voyage price list"))),
        (status = 400, description = "Invalid price", body = ErrorResponse),
        (status = 404, description = "Voyage not found", body = ErrorResponse),
        (status = 409, description = "Price already exists for this container size", body = ErrorResponse),
    )
)]
pub async fn create_voyage_price(
    State(state): State<AppState>,
    PathParams(voyage_id): PathParams<i32>,
    JsonBody(request): JsonBody<CreateVoyagePriceRequest>,
) -> Result<Response, ServiceError> {
    let price = state.services.voyages.set_price(voyage_id, request).await?;
    Ok(created_response(
        format!("/api/v1/voyages/{}/prices", voyage_id),
        price,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/voyages/{id}/prices",
    tag = "voyages",
    params(("id" = i32, Path, description = "Voyage id"), PageParams),
    responses(
        (status = 200, description = "Page of voyage prices", body = Page<VoyagePriceResponse>),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 404, description = "Voyage not found", body = ErrorResponse),
    )
)]
pub async fn list_voyage_prices(
    State(state): State<AppState>,
    PathParams(voyage_id): PathParams<i32>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<Json<Page<VoyagePriceResponse>>, ServiceError> {
    let page = page_request(&state.config, params)?;
    Ok(Json(
        state.services.voyages.list_prices(voyage_id, page).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/voyages/{id}/containers",
    tag = "voyages",
    params(("id" = i32, Path, description = "Voyage id")),
    responses(
        (status = 200, description = "Containers booked on the voyage", body = [VoyageContainerResponse]),
        (status = 404, description = "Voyage not found", body = ErrorResponse),
    )
)]
pub async fn list_voyage_containers(
    State(state): State<AppState>,
    PathParams(voyage_id): PathParams<i32>,
) -> Result<Json<Vec<VoyageContainerResponse>>, ServiceError> {
    Ok(Json(
        state
            .services
            .freight_orders
            .voyage_containers(voyage_id)
            .await?,
    ))
}
