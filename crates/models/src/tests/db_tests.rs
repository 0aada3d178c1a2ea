use super::setup_test_db;
use crate::db::test_connection;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

/// Test basic database round-trip
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    test_connection(&db).await?;

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}

/// Migrations create the grant table
#[tokio::test]
async fn test_user_in_role_table_exists() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let stmt = Statement::from_string(
        DatabaseBackend::Postgres,
        "SELECT count(*)::int AS n FROM information_schema.tables WHERE table_name = 'user_in_role'".to_string(),
    );
    let row = db.query_one(stmt).await?.expect("one row");
    let n: i32 = row.try_get("", "n")?;
    assert_eq!(n, 1);
    Ok(())
}
