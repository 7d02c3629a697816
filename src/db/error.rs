//! Errors raised by the repository layer.

use std::collections::BTreeMap;
use thiserror::Error;

/// Field name -> list of problems with that field
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A required field is missing or a value is malformed
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// A uniqueness rule would be broken (duplicate email, name or favorite)
    #[error("{0}")]
    Conflict(String),

    /// A referenced row does not exist
    #[error("{0}")]
    NotFound(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl DomainError {
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound(format!("{} {} not found", entity, id))
    }

    pub fn validation_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        Self::Validation(errors)
    }
}

/// Map a UNIQUE violation on insert to a conflict, keeping other errors as-is.
///
/// Existence checks run first inside the same transaction, so this only fires
/// when a concurrent writer wins the race.
pub fn conflict_on_unique(message: String) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |err| match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DomainError::Conflict(message)
        }
        _ => DomainError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("Planet", 7);
        assert_eq!(err.to_string(), "Planet 7 not found");
    }

    #[test]
    fn test_validation_field() {
        match DomainError::validation_field("email", "Email is required") {
            DomainError::Validation(errors) => {
                assert_eq!(errors["email"], vec!["Email is required".to_string()]);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = conflict_on_unique("dup".to_string())(sqlx::Error::RowNotFound);
        assert!(matches!(err, DomainError::Database(sqlx::Error::RowNotFound)));
    }
}
