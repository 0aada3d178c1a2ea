//! Users: the subject of a role grant, and the actor recorded in its audit columns.
use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::tenant;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Tenant,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Tenant => Entity::belongs_to(tenant::Entity).from(Column::TenantId).to(tenant::Column::Id).into() }
    }
}

impl Related<tenant::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tenant.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Trimmed, lower-cased address; emails are unique per tenant regardless of case.
pub fn normalize_email(email: &str) -> Result<String, ModelError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ModelError::Validation(format!("invalid email '{}'", email))),
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, tenant_id: Uuid, email: &str, name: &str) -> Result<Model, ModelError> {
    let email = normalize_email(email)?;
    if name.trim().is_empty() { return Err(ModelError::Validation("user name required".into())); }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(tenant_id),
        email: Set(email),
        name: Set(name.trim().to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::from)
}

#[cfg(test)]
mod tests {
    use super::normalize_email;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ada@Example.COM ").unwrap(), "ada@example.com");
    }

    #[test]
    fn email_needs_both_halves() {
        for bad in ["", "ada", "@example.com", "ada@"] {
            assert!(normalize_email(bad).is_err(), "{bad}");
        }
    }
}
