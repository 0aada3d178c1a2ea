/// Database connection and configuration tests
pub mod db_tests;

/// CRUD and relation tests for tenant, role, user and user_in_role
pub mod crud_tests;

use crate::db::{connect_with_config, DatabaseConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use std::time::Duration;

/// Connect and migrate, or `None` when no database is available for this run.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        println!("Skipping database tests (SKIP_DB_TESTS is set)");
        return None;
    }
    let mut cfg = DatabaseConfig::from_env();
    cfg.min_connections = 1;
    cfg.connect_timeout = Duration::from_secs(3);
    cfg.acquire_timeout = Duration::from_secs(3);
    let db = match connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}
