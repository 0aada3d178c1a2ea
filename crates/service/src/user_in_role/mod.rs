//! The UserInRole resource: role grants with projection, filtering and patching.

pub mod fields;
pub mod related;
pub mod service;

pub use fields::{Navigation, UserInRoleDetail};
pub use service::{ListQuery, UserInRoleResource, UserInRoleService};

#[cfg(test)]
pub(crate) mod test_fixtures {
    use chrono::{FixedOffset, TimeZone};
    use models::{role, tenant, user, user_in_role};
    use sea_orm::prelude::DateTimeWithTimeZone;
    use uuid::Uuid;

    pub fn at() -> DateTimeWithTimeZone {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    pub fn grant() -> user_in_role::Model {
        user_in_role::Model {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            role_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_on: at(),
            created_by: Uuid::new_v4(),
            updated_on: None,
            updated_by: None,
        }
    }

    pub fn tenant_with(id: Uuid) -> tenant::Model {
        tenant::Model { id, name: "acme".into(), created_at: at() }
    }

    pub fn role_named(id: Uuid, name: &str) -> role::Model {
        role::Model { id, tenant_id: Uuid::new_v4(), name: name.into(), created_at: at() }
    }

    pub fn user_with(id: Uuid, name: &str) -> user::Model {
        user::Model {
            id,
            tenant_id: Uuid::new_v4(),
            email: format!("{}@example.com", name.to_lowercase()),
            name: name.into(),
            created_at: at(),
        }
    }
}
