use axum::{extract::State, response::Response, Json};
use validator::Validate;

use super::common::{created_response, page_request, JsonBody, PathParams, QueryParams};
use crate::common::{Page, PageParams};
use crate::errors::{ErrorResponse, ServiceError};
use crate::services::freight_orders::{
    CreateFreightOrderRequest, FreightOrderResponse, OrderListParams, UpdateDiscountRequest,
    UpdateOrderStatusRequest,
};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/freight-orders",
    tag = "freight-orders",
    request_body = CreateFreightOrderRequest,
    responses(
        (status = 201, description = "Freight order booked", body = FreightOrderResponse,
            headers(("Location" = String, description = "URL of the new order"))),
        (status = 400, description = "Invalid request, discount out of range or no price for the container size", body = ErrorResponse),
        (status = 404, description = "Voyage, container or agent not found", body = ErrorResponse),
        (status = 409, description = "Voyage cancelled or agent inactive", body = ErrorResponse),
    )
)]
pub async fn create_freight_order(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateFreightOrderRequest>,
) -> Result<Response, ServiceError> {
    request.validate()?;
    let order = state.services.freight_orders.create_order(request).await?;
    Ok(created_response(
        format!("/api/v1/freight-orders/{}", order.id),
        order,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/freight-orders",
    tag = "freight-orders",
    params(OrderListParams, PageParams),
    responses(
        (status = 200, description = "Page of freight orders", body = Page<FreightOrderResponse>),
        (status = 400, description = "Invalid query", body = ErrorResponse),
    )
)]
pub async fn list_freight_orders(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<OrderListParams>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<Json<Page<FreightOrderResponse>>, ServiceError> {
    let page = page_request(&state.config, params)?;
    Ok(Json(
        state
            .services
            .freight_orders
            .list_orders(filter, page)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/freight-orders/{id}",
    tag = "freight-orders",
    params(("id" = i32, Path, description = "Freight order id")),
    responses(
        (status = 200, description = "Freight order found", body = FreightOrderResponse),
        (status = 404, description = "Freight order not found", body = ErrorResponse),
    )
)]
pub async fn get_freight_order(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<FreightOrderResponse>, ServiceError> {
    Ok(Json(state.services.freight_orders.get_order(id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/freight-orders/{id}/discount",
    tag = "freight-orders",
    params(("id" = i32, Path, description = "Freight order id")),
    request_body = UpdateDiscountRequest,
    responses(
        (status = 200, description = "Discount applied and final price recomputed", body = FreightOrderResponse),
        (status = 400, description = "Discount out of range", body = ErrorResponse),
        (status = 404, description = "Freight order not found", body = ErrorResponse),
        (status = 409, description = "Order is cancelled or delivered", body = ErrorResponse),
    )
)]
pub async fn update_freight_order_discount(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
    JsonBody(request): JsonBody<UpdateDiscountRequest>,
) -> Result<Json<FreightOrderResponse>, ServiceError> {
    request.validate()?;
    Ok(Json(
        state
            .services
            .freight_orders
            .update_discount(id, request)
            .await?,
    ))
}

#[utoipa::path(
    patch,
    path = "/api/v1/freight-orders/{id}/status",
    tag = "freight-orders",
    params(("id" = i32, Path, description = "Freight order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = FreightOrderResponse),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Freight order not found", body = ErrorResponse),
    )
)]
pub async fn update_freight_order_status(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
    JsonBody(request): JsonBody<UpdateOrderStatusRequest>,
) -> Result<Json<FreightOrderResponse>, ServiceError> {
    Ok(Json(
        state
            .services
            .freight_orders
            .update_status(id, request.status)
            .await?,
    ))
}
