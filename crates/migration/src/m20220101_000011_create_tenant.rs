//! Create `tenant`, the root every role, user and grant hangs off.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Tenant::Table)
            .if_not_exists()
            .col(uuid(Tenant::Id).primary_key())
            .col(string_len(Tenant::Name, 128).unique_key())
            .col(timestamp_with_time_zone(Tenant::CreatedAt).default(Expr::current_timestamp()))
            .to_owned();
        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Cascades remove roles, users and grants first
        manager.drop_table(Table::drop().table(Tenant::Table).if_exists().cascade().to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Tenant { Table, Id, Name, CreatedAt }
