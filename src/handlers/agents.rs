use axum::{extract::State, response::Response, Json};
use validator::Validate;

use super::common::{created_response, JsonBody, PathParams, QueryParams};
use crate::errors::{ErrorResponse, ServiceError};
use crate::services::agents::{
    AgentListParams, AgentResponse, CreateAgentRequest, UpdateAgentRequest,
};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/agents",
    tag = "agents",
    request_body = CreateAgentRequest,
    responses(
        (status = 201, description = "Agent created", body = AgentResponse,
            headers(("Location" = String, description = "URL of the new agent"))),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_agent(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateAgentRequest>,
) -> Result<Response, ServiceError> {
    request.validate()?;
    let agent = state.services.agents.create_agent(request).await?;
    Ok(created_response(format!("/api/v1/agents/{}", agent.id), agent))
}

#[utoipa::path(
    get,
    path = "/api/v1/agents/{id}",
    tag = "agents",
    params(("id" = i32, Path, description = "Agent id")),
    responses(
        (status = 200, description = "Agent found", body = AgentResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse),
    )
)]
pub async fn get_agent(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<AgentResponse>, ServiceError> {
    Ok(Json(state.services.agents.get_agent(id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/agents/{id}",
    tag = "agents",
    params(("id" = i32, Path, description = "Agent id")),
    request_body = UpdateAgentRequest,
    responses(
        (status = 200, description = "Agent updated", body = AgentResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Agent not found", body = ErrorResponse),
    )
)]
pub async fn update_agent(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
    JsonBody(request): JsonBody<UpdateAgentRequest>,
) -> Result<Json<AgentResponse>, ServiceError> {
    request.validate()?;
    Ok(Json(state.services.agents.update_agent(id, request).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/agents",
    tag = "agents",
    params(AgentListParams),
    responses(
        (status = 200, description = "Agents matching the filters", body = [AgentResponse]),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
    )
)]
pub async fn list_agents(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<AgentListParams>,
) -> Result<Json<Vec<AgentResponse>>, ServiceError> {
    Ok(Json(state.services.agents.list_agents(params).await?))
}
