use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failures raised by the entity helpers.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    /// A unique key already exists: tenant name, user email within a tenant, or a grant triple.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => ModelError::Conflict(msg),
            _ => ModelError::Db(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_constraint_errors_stay_db_errors() {
        let e = ModelError::from(DbErr::Custom("boom".into()));
        assert!(matches!(e, ModelError::Db(ref msg) if msg.contains("boom")));
        assert!(matches!(ModelError::from(DbErr::RecordNotInserted), ModelError::Db(_)));
    }
}
