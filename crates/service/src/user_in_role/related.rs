//! Eager loading of grant relations: one `IN (...)` query per related table.

use std::collections::{BTreeSet, HashMap};

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use tracing::debug;
use uuid::Uuid;

use models::{role, tenant, user, user_in_role};

use crate::errors::ServiceError;
use crate::user_in_role::fields::{Navigation, UserInRoleDetail};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

/// Attach the requested relations to each row, preserving row order.
/// Queries run in tenant, role, user order and are skipped when nothing needs them.
pub async fn load_related<C: ConnectionTrait>(
    db: &C,
    rows: Vec<user_in_role::Model>,
    navigations: &[Navigation],
) -> Result<Vec<UserInRoleDetail>, ServiceError> {
    if rows.is_empty() || navigations.is_empty() {
        return Ok(rows.into_iter().map(UserInRoleDetail::from).collect());
    }
    let wants = |n: Navigation| navigations.contains(&n);

    let mut tenants: HashMap<Uuid, tenant::Model> = HashMap::new();
    if wants(Navigation::Tenant) {
        let ids: BTreeSet<Uuid> = rows.iter().map(|r| r.tenant_id).collect();
        tenants = tenant::Entity::find()
            .filter(tenant::Column::Id.is_in(ids))
            .all(db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();
    }

    let mut roles: HashMap<Uuid, role::Model> = HashMap::new();
    if wants(Navigation::Role) {
        let ids: BTreeSet<Uuid> = rows.iter().map(|r| r.role_id).collect();
        roles = role::Entity::find()
            .filter(role::Column::Id.is_in(ids))
            .all(db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();
    }

    let mut user_ids: BTreeSet<Uuid> = BTreeSet::new();
    for r in &rows {
        if wants(Navigation::User) { user_ids.insert(r.user_id); }
        if wants(Navigation::CreatedBy) { user_ids.insert(r.created_by); }
        if wants(Navigation::UpdatedBy) { user_ids.extend(r.updated_by); }
    }
    let mut users: HashMap<Uuid, user::Model> = HashMap::new();
    if !user_ids.is_empty() {
        users = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
    }
    debug!(rows = rows.len(), tenants = tenants.len(), roles = roles.len(), users = users.len(), "loaded grant relations");

    let pick_user = |nav: Navigation, id: Option<Uuid>| -> Option<user::Model> {
        if wants(nav) { id.and_then(|id| users.get(&id).cloned()) } else { None }
    };
    let details = rows
        .into_iter()
        .map(|grant| UserInRoleDetail {
            tenant: if wants(Navigation::Tenant) { tenants.get(&grant.tenant_id).cloned() } else { None },
            role: if wants(Navigation::Role) { roles.get(&grant.role_id).cloned() } else { None },
            user: pick_user(Navigation::User, Some(grant.user_id)),
            created_by_user: pick_user(Navigation::CreatedBy, Some(grant.created_by)),
            updated_by_user: pick_user(Navigation::UpdatedBy, grant.updated_by),
            grant,
        })
        .collect();
    Ok(details)
}
