use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Iterable, ModelTrait, QuerySelect, Select, Set,
};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::user_in_role;

use crate::errors::ServiceError;
use crate::filter::{apply_filter, FilterCriteria};
use crate::pagination::PageRequest;
use crate::patch::{apply_patch, PatchDocument};
use crate::projection::{FieldMapper, FieldSelection, JsonFieldMapper, Projection};
use crate::sort::{apply_sort, resolve_sort};
use crate::user_in_role::fields::{Navigation, UserInRoleDetail};
use crate::user_in_role::related::load_related;

fn db_err(e: DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

fn update_err(e: DbErr) -> ServiceError {
    match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => ServiceError::no_data(),
        other => db_err(other),
    }
}

/// List parameters. Defaults: first page of one row, ascending.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    pub filters: Vec<FilterCriteria>,
    pub search_term: String,
    pub page_number: i64,
    pub page_size: i64,
    pub sort_field: Option<String>,
    pub sort_order: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            search_term: String::new(),
            page_number: 1,
            page_size: 1,
            sort_field: None,
            sort_order: "asc".into(),
        }
    }
}

impl ListQuery {
    pub fn page(page_number: i64, page_size: i64) -> Self {
        Self { page_number, page_size, ..Self::default() }
    }

    /// Validate and build the select. Nothing touches the store until it is executed.
    pub fn to_select(&self) -> Result<Select<user_in_role::Entity>, ServiceError> {
        let page = PageRequest::new(self.page_number, self.page_size)?;
        let sort = resolve_sort::<user_in_role::Entity>(self.sort_field.as_deref(), &self.sort_order)?;
        let select = apply_filter(user_in_role::Entity::find(), &self.filters, &self.search_term)?;
        Ok(apply_sort(select, sort).offset(page.skip()).limit(page.take()))
    }
}

/// Operations exposed for the UserInRole resource.
#[async_trait]
pub trait UserInRoleResource: Send + Sync {
    /// Projection of the requested fields plus `Id`; empty when no row matches.
    async fn get_by_id(&self, id: Uuid, fields: Option<&str>) -> Result<Projection, ServiceError>;
    /// One page of full grants with every relation loaded.
    async fn list(&self, query: ListQuery) -> Result<Vec<UserInRoleDetail>, ServiceError>;
    /// Persist a new grant; the caller's `id` is replaced.
    async fn create(&self, model: user_in_role::Model) -> Result<Uuid, ServiceError>;
    /// Full replace. `id` must match `updated.id`.
    async fn update(&self, id: Uuid, updated: user_in_role::Model) -> Result<bool, ServiceError>;
    async fn patch(&self, id: Uuid, document: Option<PatchDocument>) -> Result<bool, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed implementation. Stateless apart from the shared pool handle; clone freely.
#[derive(Clone)]
pub struct UserInRoleService<M: FieldMapper = JsonFieldMapper> {
    db: Arc<DatabaseConnection>,
    mapper: M,
}

impl UserInRoleService {
    pub fn new(db: DatabaseConnection) -> Self { Self::shared(Arc::new(db)) }

    /// Share a pool that other services already hold.
    pub fn shared(db: Arc<DatabaseConnection>) -> Self { Self::with_mapper(db, JsonFieldMapper) }
}

impl<M: FieldMapper> UserInRoleService<M> {
    pub fn with_mapper(db: Arc<DatabaseConnection>, mapper: M) -> Self { Self { db, mapper } }

    pub fn db(&self) -> &DatabaseConnection { &self.db }

    /// Hand back the connection; only possible once every clone has been dropped.
    #[cfg(test)]
    fn into_db(self) -> DatabaseConnection {
        match Arc::try_unwrap(self.db) {
            Ok(db) => db,
            Err(_) => panic!("service still shared"),
        }
    }

    async fn find(&self, id: Uuid) -> Result<Option<user_in_role::Model>, ServiceError> {
        user_in_role::Entity::find_by_id(id).one(self.db()).await.map_err(db_err)
    }
}

#[async_trait]
impl<M: FieldMapper> UserInRoleResource for UserInRoleService<M> {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid, fields: Option<&str>) -> Result<Projection, ServiceError> {
        let selection = FieldSelection::parse::<UserInRoleDetail>(fields)?;
        let navigations: Vec<Navigation> =
            selection.navigations().into_iter().filter_map(Navigation::from_name).collect();

        let detail = match self.find(id).await? {
            Some(row) => load_related(self.db(), vec![row], &navigations).await?.pop(),
            None => {
                debug!(%id, "user_in_role not found; returning empty projection");
                None
            }
        };
        Ok(self.mapper.map_to_fields(detail.as_ref(), &selection))
    }

    #[instrument(skip(self, query), fields(page_number = query.page_number, page_size = query.page_size))]
    async fn list(&self, query: ListQuery) -> Result<Vec<UserInRoleDetail>, ServiceError> {
        let select = query.to_select()?;
        let rows = select.all(self.db()).await.map_err(db_err)?;
        info!(count = rows.len(), filters = query.filters.len(), "listed user_in_role");
        load_related(self.db(), rows, &Navigation::ALL).await
    }

    #[instrument(skip(self, model))]
    async fn create(&self, model: user_in_role::Model) -> Result<Uuid, ServiceError> {
        let am = user_in_role::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(model.tenant_id),
            role_id: Set(model.role_id),
            user_id: Set(model.user_id),
            created_on: Set(model.created_on),
            created_by: Set(model.created_by),
            updated_on: Set(model.updated_on),
            updated_by: Set(model.updated_by),
        };
        let created = am.insert(self.db()).await.map_err(db_err)?;
        info!(id = %created.id, role_id = %created.role_id, user_id = %created.user_id, "created user_in_role");
        Ok(created.id)
    }

    #[instrument(skip(self, updated))]
    async fn update(&self, id: Uuid, updated: user_in_role::Model) -> Result<bool, ServiceError> {
        if updated.id != id {
            return Err(ServiceError::invalid(format!("Id mismatch: {} does not match entity id {}", id, updated.id)));
        }
        let am = user_in_role::ActiveModel::from(updated).reset_all();
        am.update(self.db()).await.map_err(update_err)?;
        info!(%id, "updated user_in_role");
        Ok(true)
    }

    #[instrument(skip(self, document))]
    async fn patch(&self, id: Uuid, document: Option<PatchDocument>) -> Result<bool, ServiceError> {
        let document = document.ok_or_else(|| ServiceError::MissingInput("Patch document is missing!".into()))?;
        let existing = self.find(id).await?.ok_or_else(ServiceError::no_data)?;

        let mut patched = existing.clone();
        apply_patch(&mut patched, &document)?;

        let mut am: user_in_role::ActiveModel = existing.clone().into();
        let mut changed = 0usize;
        for col in user_in_role::Column::iter() {
            let value = patched.get(col);
            if existing.get(col) != value {
                am.set(col, value);
                changed += 1;
            }
        }
        if changed == 0 {
            debug!(%id, "patch produced no changes");
            return Ok(true);
        }
        am.update(self.db()).await.map_err(update_err)?;
        info!(%id, changed, ops = document.operations().len(), "patched user_in_role");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = user_in_role::Entity::delete_by_id(id).exec(self.db()).await.map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::no_data());
        }
        info!(%id, "deleted user_in_role");
        Ok(true)
    }
}
