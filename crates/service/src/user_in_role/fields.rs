//! Static field tables for the grant entity and everything it navigates to.

use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use models::{role, tenant, user, user_in_role};

use crate::errors::ServiceError;
use crate::filter::{FieldKind, FilterableEntity};
use crate::patch::{value_as, Patchable};
use crate::projection::{resolve_name, NavigationDef, Projectable};

pub const USER_IN_ROLE_FIELDS: &[&str] =
    &["Id", "TenantId", "RoleId", "UserId", "CreatedOn", "CreatedBy", "UpdatedOn", "UpdatedBy"];
pub const TENANT_FIELDS: &[&str] = &["Id", "Name", "CreatedAt"];
pub const ROLE_FIELDS: &[&str] = &["Id", "TenantId", "Name", "CreatedAt"];
pub const USER_FIELDS: &[&str] = &["Id", "TenantId", "Email", "Name", "CreatedAt"];

/// Relations of a grant that can be eagerly loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    Tenant,
    Role,
    User,
    CreatedBy,
    UpdatedBy,
}

impl Navigation {
    pub const ALL: [Navigation; 5] =
        [Navigation::Tenant, Navigation::Role, Navigation::User, Navigation::CreatedBy, Navigation::UpdatedBy];

    pub fn name(self) -> &'static str {
        match self {
            Navigation::Tenant => "TenantId_Tenant",
            Navigation::Role => "RoleId_Role",
            Navigation::User => "UserId_User",
            Navigation::CreatedBy => "CreatedBy_User",
            Navigation::UpdatedBy => "UpdatedBy_User",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.name().eq_ignore_ascii_case(name))
    }
}

/// A grant with whichever relations were loaded alongside it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserInRoleDetail {
    #[serde(flatten)]
    pub grant: user_in_role::Model,
    #[serde(rename = "TenantId_Tenant")]
    pub tenant: Option<tenant::Model>,
    #[serde(rename = "RoleId_Role")]
    pub role: Option<role::Model>,
    #[serde(rename = "UserId_User")]
    pub user: Option<user::Model>,
    #[serde(rename = "CreatedBy_User")]
    pub created_by_user: Option<user::Model>,
    #[serde(rename = "UpdatedBy_User")]
    pub updated_by_user: Option<user::Model>,
}

impl From<user_in_role::Model> for UserInRoleDetail {
    fn from(grant: user_in_role::Model) -> Self {
        Self { grant, tenant: None, role: None, user: None, created_by_user: None, updated_by_user: None }
    }
}

fn value_or_null<T: Projectable>(related: Option<&T>, field: &str) -> Value {
    related.map(|r| r.field_value(field)).unwrap_or(Value::Null)
}

impl Projectable for UserInRoleDetail {
    const FIELDS: &'static [&'static str] = USER_IN_ROLE_FIELDS;
    const NAVIGATIONS: &'static [NavigationDef] = &[
        NavigationDef { name: "TenantId_Tenant", fields: TENANT_FIELDS },
        NavigationDef { name: "RoleId_Role", fields: ROLE_FIELDS },
        NavigationDef { name: "UserId_User", fields: USER_FIELDS },
        NavigationDef { name: "CreatedBy_User", fields: USER_FIELDS },
        NavigationDef { name: "UpdatedBy_User", fields: USER_FIELDS },
    ];

    fn field_value(&self, field: &str) -> Value {
        self.grant.field_value(field)
    }

    fn navigation_value(&self, navigation: &str, field: &str) -> Value {
        match Navigation::from_name(navigation) {
            Some(Navigation::Tenant) => value_or_null(self.tenant.as_ref(), field),
            Some(Navigation::Role) => value_or_null(self.role.as_ref(), field),
            Some(Navigation::User) => value_or_null(self.user.as_ref(), field),
            Some(Navigation::CreatedBy) => value_or_null(self.created_by_user.as_ref(), field),
            Some(Navigation::UpdatedBy) => value_or_null(self.updated_by_user.as_ref(), field),
            None => Value::Null,
        }
    }
}

impl Projectable for user_in_role::Model {
    const FIELDS: &'static [&'static str] = USER_IN_ROLE_FIELDS;

    fn field_value(&self, field: &str) -> Value {
        match field {
            "Id" => json!(self.id),
            "TenantId" => json!(self.tenant_id),
            "RoleId" => json!(self.role_id),
            "UserId" => json!(self.user_id),
            "CreatedOn" => json!(self.created_on),
            "CreatedBy" => json!(self.created_by),
            "UpdatedOn" => json!(self.updated_on),
            "UpdatedBy" => json!(self.updated_by),
            _ => Value::Null,
        }
    }
}

impl Projectable for tenant::Model {
    const FIELDS: &'static [&'static str] = TENANT_FIELDS;

    fn field_value(&self, field: &str) -> Value {
        match field {
            "Id" => json!(self.id),
            "Name" => json!(self.name),
            "CreatedAt" => json!(self.created_at),
            _ => Value::Null,
        }
    }
}

impl Projectable for role::Model {
    const FIELDS: &'static [&'static str] = ROLE_FIELDS;

    fn field_value(&self, field: &str) -> Value {
        match field {
            "Id" => json!(self.id),
            "TenantId" => json!(self.tenant_id),
            "Name" => json!(self.name),
            "CreatedAt" => json!(self.created_at),
            _ => Value::Null,
        }
    }
}

impl Projectable for user::Model {
    const FIELDS: &'static [&'static str] = USER_FIELDS;

    fn field_value(&self, field: &str) -> Value {
        match field {
            "Id" => json!(self.id),
            "TenantId" => json!(self.tenant_id),
            "Email" => json!(self.email),
            "Name" => json!(self.name),
            "CreatedAt" => json!(self.created_at),
            _ => Value::Null,
        }
    }
}

fn canonical(field: &str) -> Result<&'static str, ServiceError> {
    resolve_name(USER_IN_ROLE_FIELDS, field).ok_or_else(|| ServiceError::invalid(format!("Unknown field '{}'", field)))
}

impl Patchable for user_in_role::Model {
    fn set_field(&mut self, field: &str, value: Value) -> Result<(), ServiceError> {
        let field = canonical(field)?;
        match field {
            "Id" => return Err(ServiceError::invalid("Id cannot be modified")),
            "TenantId" => self.tenant_id = value_as::<Uuid>(field, value)?,
            "RoleId" => self.role_id = value_as::<Uuid>(field, value)?,
            "UserId" => self.user_id = value_as::<Uuid>(field, value)?,
            "CreatedOn" => self.created_on = value_as(field, value)?,
            "CreatedBy" => self.created_by = value_as::<Uuid>(field, value)?,
            "UpdatedOn" => self.updated_on = value_as(field, value)?,
            "UpdatedBy" => self.updated_by = value_as(field, value)?,
            other => return Err(ServiceError::invalid(format!("'{}' cannot be patched", other))),
        }
        Ok(())
    }

    fn clear_field(&mut self, field: &str) -> Result<(), ServiceError> {
        match canonical(field)? {
            "UpdatedOn" => self.updated_on = None,
            "UpdatedBy" => self.updated_by = None,
            "Id" => return Err(ServiceError::invalid("Id cannot be modified")),
            other => return Err(ServiceError::invalid(format!("'{}' is required and cannot be removed", other))),
        }
        Ok(())
    }
}

impl FilterableEntity for user_in_role::Entity {
    fn column_for(name: &str) -> Option<(user_in_role::Column, FieldKind)> {
        use user_in_role::Column;
        let col = match resolve_name(USER_IN_ROLE_FIELDS, name)? {
            "Id" => (Column::Id, FieldKind::Uuid),
            "TenantId" => (Column::TenantId, FieldKind::Uuid),
            "RoleId" => (Column::RoleId, FieldKind::Uuid),
            "UserId" => (Column::UserId, FieldKind::Uuid),
            "CreatedOn" => (Column::CreatedOn, FieldKind::Timestamp),
            "CreatedBy" => (Column::CreatedBy, FieldKind::Uuid),
            "UpdatedOn" => (Column::UpdatedOn, FieldKind::Timestamp),
            "UpdatedBy" => (Column::UpdatedBy, FieldKind::Uuid),
            _ => return None,
        };
        Some(col)
    }

    fn search_columns() -> &'static [user_in_role::Column] {
        use user_in_role::Column;
        &[Column::Id, Column::TenantId, Column::RoleId, Column::UserId, Column::CreatedBy, Column::UpdatedBy]
    }
}
