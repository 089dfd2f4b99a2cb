use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::validate_not_blank;
use crate::db::DbPool;
use crate::entities::customer;
use crate::errors::ServiceError;
use crate::repositories::{FreightRepository, NewCustomer, SeaOrmRepository};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub company_name: String,
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub contact_name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i32,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<customer::Model> for CustomerResponse {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            company_name: model.company_name,
            contact_name: model.contact_name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Service for customer records
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request))]
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        let customer = self
            .db
            .transaction::<_, customer::Model, ServiceError>(|txn| {
                Box::pin(async move {
                    SeaOrmRepository::new(txn)
                        .insert_customer(new_customer(request))
                        .await
                })
            })
            .await?;

        info!(customer_id = customer.id, "Customer created");
        Ok(customer.into())
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: i32) -> Result<CustomerResponse, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        repo.find_customer(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::NotFound(format!("Customer not found: {}", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<CustomerResponse>, ServiceError> {
        let repo = SeaOrmRepository::new(self.db.as_ref());
        let customers = repo.list_customers().await?;
        Ok(customers.into_iter().map(Into::into).collect())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn new_customer(request: CreateCustomerRequest) -> NewCustomer {
    NewCustomer {
        company_name: request.company_name.trim().to_string(),
        contact_name: request.contact_name.trim().to_string(),
        email: request.email.trim().to_lowercase(),
        phone: non_empty(request.phone),
        address: non_empty(request.address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateCustomerRequest {
        CreateCustomerRequest {
            company_name: "Acme Imports".into(),
            contact_name: "Dana Reyes".into(),
            email: "Dana@Acme.example".into(),
            phone: Some("  ".into()),
            address: Some("1 Harbour Rd".into()),
        }
    }

    #[test]
    fn normalizes_optional_fields() {
        let new = new_customer(request());
        assert_eq!(new.email, "dana@acme.example");
        assert_eq!(new.phone, None);
        assert_eq!(new.address.as_deref(), Some("1 Harbour Rd"));
    }

    #[test]
    fn phone_is_limited_to_twenty_characters() {
        let mut bad = request();
        bad.phone = Some("0".repeat(21));
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn email_must_be_valid() {
        let mut bad = request();
        bad.email = "not-an-email".into();
        assert!(bad.validate().is_err());
    }
}
