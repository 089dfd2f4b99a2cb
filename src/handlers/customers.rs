use axum::{extract::State, response::Response, Json};
use validator::Validate;

use super::common::{created_response, JsonBody, PathParams};
use crate::errors::{ErrorResponse, ServiceError};
use crate::services::customers::{CreateCustomerRequest, CustomerResponse};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse,
            headers(("Location" = String, description = "URL of the new customer"))),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateCustomerRequest>,
) -> Result<Response, ServiceError> {
    request.validate()?;
    let customer = state.services.customers.create_customer(request).await?;
    Ok(created_response(
        format!("/api/v1/customers/{}", customer.id),
        customer,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<CustomerResponse>, ServiceError> {
    Ok(Json(state.services.customers.get_customer(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "customers",
    responses((status = 200, description = "All customers", body = [CustomerResponse]))
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, ServiceError> {
    Ok(Json(state.services.customers.list_customers().await?))
}
