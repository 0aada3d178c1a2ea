use super::setup_test_db;
use crate::{role, tenant, user, user_in_role};
use crate::errors::ModelError;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryFilter, ColumnTrait, Set};
use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

/// Validation runs before any database access
#[tokio::test]
async fn test_create_helpers_validate_input() {
    let db = sea_orm::DatabaseConnection::Disconnected;
    assert!(matches!(tenant::create(&db, "  ").await, Err(ModelError::Validation(_))));
    assert!(matches!(role::create(&db, Uuid::new_v4(), "").await, Err(ModelError::Validation(_))));
    assert!(matches!(user::create(&db, Uuid::new_v4(), "no-at-sign", "Bob").await, Err(ModelError::Validation(_))));
}

/// Grant a role and follow every relation back out
#[tokio::test]
async fn test_user_in_role_crud_and_relations() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let t = tenant::create(&db, &format!("uir_tenant_{}", Uuid::new_v4())).await?;
    let r = role::create(&db, t.id, "admin").await?;
    let u = user::create(&db, t.id, &format!("uir_{}@example.com", Uuid::new_v4()), "Grantee").await?;
    let actor = user::create(&db, t.id, &format!("actor_{}@example.com", Uuid::new_v4()), "Actor").await?;

    let grant = user_in_role::ActiveModel {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(t.id),
        role_id: Set(r.id),
        user_id: Set(u.id),
        created_on: Set(Utc::now().into()),
        created_by: Set(actor.id),
        updated_on: Set(None),
        updated_by: Set(None),
    }
    .insert(&db)
    .await?;

    let found = user_in_role::Entity::find_by_id(grant.id).one(&db).await?.expect("grant stored");
    assert_eq!(found.role_id, r.id);
    assert_eq!(found.created_by, actor.id);

    let related_role = found.find_related(role::Entity).one(&db).await?.expect("role relation");
    assert_eq!(related_role.name, "admin");
    let related_tenant = found.find_related(tenant::Entity).one(&db).await?.expect("tenant relation");
    assert_eq!(related_tenant.id, t.id);

    let by_user = user_in_role::Entity::find()
        .filter(user_in_role::Column::UserId.eq(u.id))
        .all(&db)
        .await?;
    assert_eq!(by_user.len(), 1);

    // Deleting the tenant cascades to roles, users and grants
    tenant::Entity::delete_by_id(t.id).exec(&db).await?;
    assert!(user_in_role::Entity::find_by_id(grant.id).one(&db).await?.is_none());
    Ok(())
}

/// A user holds a role at most once per tenant
#[tokio::test]
async fn test_duplicate_grant_rejected() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let t = tenant::create(&db, &format!("dup_tenant_{}", Uuid::new_v4())).await?;
    let r = role::create(&db, t.id, "viewer").await?;
    let u = user::create(&db, t.id, &format!("dup_{}@example.com", Uuid::new_v4()), "Dup").await?;

    let grant = |id: Uuid| user_in_role::ActiveModel {
        id: Set(id),
        tenant_id: Set(t.id),
        role_id: Set(r.id),
        user_id: Set(u.id),
        created_on: Set(Utc::now().into()),
        created_by: Set(u.id),
        updated_on: Set(None),
        updated_by: Set(None),
    };
    grant(Uuid::new_v4()).insert(&db).await?;
    let dup = grant(Uuid::new_v4()).insert(&db).await.map_err(ModelError::from);
    assert!(matches!(dup, Err(ModelError::Conflict(_))), "{:?}", dup.err());

    tenant::Entity::delete_by_id(t.id).exec(&db).await?;
    Ok(())
}

/// Emails are unique per tenant, ignoring case; other tenants may reuse them
#[tokio::test]
async fn test_user_email_unique_within_tenant() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let a = tenant::create(&db, &format!("mail_a_{}", Uuid::new_v4())).await?;
    let b = tenant::create(&db, &format!("mail_b_{}", Uuid::new_v4())).await?;
    let email = format!("Same_{}@Example.com", Uuid::new_v4());

    let first = user::create(&db, a.id, &email, "First").await?;
    assert_eq!(first.email, email.to_lowercase());
    let again = user::create(&db, a.id, &email.to_uppercase(), "Again").await;
    assert!(matches!(again, Err(ModelError::Conflict(_))), "{:?}", again.err());
    user::create(&db, b.id, &email, "Elsewhere").await?;

    // Role names follow the same rule
    role::create(&db, a.id, "ops").await?;
    assert!(matches!(role::create(&db, a.id, "ops").await, Err(ModelError::Conflict(_))));

    tenant::Entity::delete_by_id(a.id).exec(&db).await?;
    tenant::Entity::delete_by_id(b.id).exec(&db).await?;
    Ok(())
}
