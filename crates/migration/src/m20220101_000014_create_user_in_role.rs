//! Create `user_in_role` join table.
//!
//! Grants a role to a user inside a tenant, with audit columns pointing back at `user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserInRole::Table)
                    .if_not_exists()
                    .col(uuid(UserInRole::Id).primary_key())
                    .col(uuid(UserInRole::TenantId).not_null())
                    .col(uuid(UserInRole::RoleId).not_null())
                    .col(uuid(UserInRole::UserId).not_null())
                    .col(timestamp_with_time_zone(UserInRole::CreatedOn).not_null())
                    .col(uuid(UserInRole::CreatedBy).not_null())
                    .col(
                        ColumnDef::new(UserInRole::UpdatedOn)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(UserInRole::UpdatedBy).uuid().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_in_role_tenant")
                            .from(UserInRole::Table, UserInRole::TenantId)
                            .to(Tenant::Table, Tenant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_in_role_role")
                            .from(UserInRole::Table, UserInRole::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_in_role_user")
                            .from(UserInRole::Table, UserInRole::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_in_role_created_by")
                            .from(UserInRole::Table, UserInRole::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_in_role_updated_by")
                            .from(UserInRole::Table, UserInRole::UpdatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserInRole::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserInRole {
    Table,
    Id,
    TenantId,
    RoleId,
    UserId,
    CreatedOn,
    CreatedBy,
    UpdatedOn,
    UpdatedBy,
}

#[derive(DeriveIden)]
enum Tenant { Table, Id }

#[derive(DeriveIden)]
enum Role { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
