use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // UserInRole: lookups by each side of the grant
        manager
            .create_index(
                Index::create()
                    .name("idx_user_in_role_tenant")
                    .table(UserInRole::Table)
                    .col(UserInRole::TenantId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_user_in_role_role")
                    .table(UserInRole::Table)
                    .col(UserInRole::RoleId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_user_in_role_user")
                    .table(UserInRole::Table)
                    .col(UserInRole::UserId)
                    .to_owned(),
            )
            .await?;

        // UserInRole: a user holds a given role at most once per tenant
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_in_role_tenant_role_user")
                    .table(UserInRole::Table)
                    .col(UserInRole::TenantId)
                    .col(UserInRole::RoleId)
                    .col(UserInRole::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_in_role_tenant").table(UserInRole::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_in_role_role").table(UserInRole::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_in_role_user").table(UserInRole::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_user_in_role_tenant_role_user").table(UserInRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserInRole { Table, TenantId, RoleId, UserId }
