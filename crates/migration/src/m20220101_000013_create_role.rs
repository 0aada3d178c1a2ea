//! Create `role` table with FK to `tenant`.
//!
//! Role names are unique within a tenant.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Role::Table)
                    .if_not_exists()
                    .col(uuid(Role::Id).primary_key())
                    .col(uuid(Role::TenantId).not_null())
                    .col(string_len(Role::Name, 128).not_null())
                    .col(timestamp_with_time_zone(Role::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_tenant")
                            .from(Role::Table, Role::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_role_tenant_name")
                    .table(Role::Table)
                    .col(Role::TenantId)
                    .col(Role::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Role::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Role { Table, Id, TenantId, Name, CreatedAt }

#[derive(DeriveIden)]
enum Tenant { Table, Id }
