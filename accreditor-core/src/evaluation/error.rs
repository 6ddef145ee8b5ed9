//! Evaluation error types

use thiserror::Error;

/// Errors for evaluation operations
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EvaluationError::NotFound("Evaluation 42".into());
        assert_eq!(err.to_string(), "Evaluation 42 not found");

        let err = EvaluationError::Validation("programName is required".into());
        assert_eq!(err.to_string(), "Validation failed: programName is required");
    }

    #[test]
    fn test_database_error_conversion() {
        let err: EvaluationError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, EvaluationError::Database(_)));
        assert!(err.to_string().starts_with("Database error"));
    }
}
