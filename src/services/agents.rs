use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::pricing::money;
use super::validation::{validate_not_blank, validate_percent};
use crate::db::DbPool;
use crate::entities::{agent, AgentType};
use crate::errors::ServiceError;
use crate::repositories::{AgentFilter, FreightRepository, NewAgent, SeaOrmRepository};

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Jonas Berg",
    "email": "jonas@forwarders.example",
    "commission_percent": "2.50",
    "agent_type": "EXTERNAL"
}))]
pub struct CreateAgentRequest {
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(custom = "validate_percent")]
    #[schema(value_type = String)]
    pub commission_percent: Decimal,
    pub agent_type: AgentType,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Partial update: absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAgentRequest {
    #[validate(custom = "validate_percent")]
    #[schema(value_type = Option<String>)]
    pub commission_percent: Option<Decimal>,
    pub active: Option<bool>,
}

/// Agent list filters (`?type=&active=`)
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgentListParams {
    #[serde(rename = "type")]
    pub agent_type: Option<AgentType>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgentResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[schema(value_type = String, example = "2.50")]
    pub commission_percent: Decimal,
    pub agent_type: AgentType,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<agent::Model> for AgentResponse {
    fn from(model: agent::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            commission_percent: money(model.commission_percent),
            agent_type: model.agent_type,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Service for booking agents (the requesters of freight orders)
#[derive(Clone)]
pub struct AgentService {
    db: Arc<DbPool>,
}

impl AgentService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request))]
    pub async fn create_agent(
        &self,
        request: CreateAgentRequest,
    ) -> Result<AgentResponse, ServiceError> {
        let new = NewAgent {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            commission_percent: money(request.commission_percent),
            agent_type: request.agent_type,
            active: request.active,
        };
        let agent = self
            .db
            .transaction::<_, agent::Model, ServiceError>(|txn| {
                Box::pin(async move { SeaOrmRepository::new(txn).insert_agent(new).await })
            })
            .await?;

        info!(agent_id = agent.id, agent_type = %agent.agent_type, "Agent created");
        Ok(agent.into())
    }

    #[instrument(skip(self))]
    pub async fn get_agent(&self, id: i32) -> Result<AgentResponse, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        find_agent(&repo, id).await.map(Into::into)
    }

    #[instrument(skip(self, request))]
    pub async fn update_agent(
        &self,
        id: i32,
        request: UpdateAgentRequest,
    ) -> Result<AgentResponse, ServiceError> {
        let agent = self
            .db
            .transaction::<_, agent::Model, ServiceError>(|txn| {
                Box::pin(async move { update_agent(&SeaOrmRepository::new(txn), id, request).await })
            })
            .await?;

        info!(agent_id = agent.id, active = agent.active, "Agent updated");
        Ok(agent.into())
    }

    #[instrument(skip(self))]
    pub async fn list_agents(
        &self,
        params: AgentListParams,
    ) -> Result<Vec<AgentResponse>, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        let agents = list_agents(&repo, params).await?;
        Ok(agents.into_iter().map(Into::into).collect())
    }
}

pub(crate) async fn find_agent<R>(repo: &R, id: i32) -> Result<agent::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    repo.find_agent(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Agent not found: {}", id)))
}

pub(crate) async fn update_agent<R>(
    repo: &R,
    id: i32,
    request: UpdateAgentRequest,
) -> Result<agent::Model, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let mut agent = find_agent(repo, id).await?;

    if let Some(commission) = request.commission_percent {
        agent.commission_percent = money(commission);
    }
    if let Some(active) = request.active {
        agent.active = active;
    }

    repo.save_agent(agent).await
}

pub(crate) async fn list_agents<R>(
    repo: &R,
    params: AgentListParams,
) -> Result<Vec<agent::Model>, ServiceError>
where
    R: FreightRepository + ?Sized,
{
    let filter = AgentFilter::from_params(params.agent_type, params.active);
    repo.list_agents(filter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockFreightRepository;
    use assert_matches::assert_matches;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    fn agent_model() -> agent::Model {
        agent::Model {
            id: 3,
            name: "Jonas Berg".into(),
            email: "jonas@forwarders.example".into(),
            commission_percent: dec!(2.50),
            agent_type: AgentType::External,
            active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn patch_leaves_absent_fields_unchanged() {
        let mut repo = MockFreightRepository::new();
        repo.expect_find_agent()
            .with(eq(3))
            .returning(|_| Ok(Some(agent_model())));
        repo.expect_save_agent()
            .withf(|agent| agent.active && agent.commission_percent == dec!(7.25))
            .times(1)
            .returning(Ok);

        let updated = update_agent(
            &repo,
            3,
            UpdateAgentRequest {
                commission_percent: Some(dec!(7.25)),
                active: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Jonas Berg");
    }

    #[tokio::test]
    async fn patch_can_deactivate() {
        let mut repo = MockFreightRepository::new();
        repo.expect_find_agent()
            .returning(|_| Ok(Some(agent_model())));
        repo.expect_save_agent()
            .withf(|agent| !agent.active && agent.commission_percent == dec!(2.50))
            .returning(Ok);

        let updated = update_agent(
            &repo,
            3,
            UpdateAgentRequest {
                commission_percent: None,
                active: Some(false),
            },
        )
        .await
        .unwrap();
        assert!(!updated.active);
    }

    #[tokio::test]
    async fn patch_on_missing_agent_is_not_found() {
        let mut repo = MockFreightRepository::new();
        repo.expect_find_agent().returning(|_| Ok(None));
        repo.expect_save_agent().never();

        let err = update_agent(&repo, 42, UpdateAgentRequest::default())
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::NotFound(msg) if msg == "Agent not found: 42");
    }

    #[tokio::test]
    async fn list_uses_type_and_active_strategy_when_both_present() {
        let mut repo = MockFreightRepository::new();
        repo.expect_list_agents()
            .with(eq(AgentFilter::ByTypeAndActive(AgentType::Internal, false)))
            .times(1)
            .returning(|_| Ok(vec![]));

        let agents = list_agents(
            &repo,
            AgentListParams {
                agent_type: Some(AgentType::Internal),
                active: Some(false),
            },
        )
        .await
        .unwrap();
        assert!(agents.is_empty());
    }

    #[test]
    fn commission_must_be_a_percentage() {
        let request = CreateAgentRequest {
            name: "Jonas".into(),
            email: "jonas@forwarders.example".into(),
            commission_percent: dec!(120),
            agent_type: AgentType::Internal,
            active: true,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("commission_percent"));
    }
}
