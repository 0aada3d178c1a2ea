//! Role grant: a user holding a role inside a tenant.
//!
//! Serialized field names are PascalCase (`TenantId`, `RoleId`, ...). The same names are
//! what callers use for projection, filtering, sorting and patch paths.
use sea_orm::entity::prelude::*;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{role, tenant, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_in_role")]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub role_id: Uuid,
    pub user_id: Uuid,
    pub created_on: DateTimeWithTimeZone,
    pub created_by: Uuid,
    pub updated_on: Option<DateTimeWithTimeZone>,
    pub updated_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Tenant,
    Role,
    User,
    CreatedByUser,
    UpdatedByUser,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Tenant => Entity::belongs_to(tenant::Entity).from(Column::TenantId).to(tenant::Column::Id).into(),
            Relation::Role => Entity::belongs_to(role::Entity).from(Column::RoleId).to(role::Column::Id).into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::CreatedByUser => Entity::belongs_to(user::Entity).from(Column::CreatedBy).to(user::Column::Id).into(),
            Relation::UpdatedByUser => Entity::belongs_to(user::Entity).from(Column::UpdatedBy).to(user::Column::Id).into(),
        }
    }
}

impl Related<tenant::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tenant.def() }
}

impl Related<role::Entity> for Entity {
    fn to() -> RelationDef { Relation::Role.def() }
}

impl ActiveModelBehavior for ActiveModel {}
