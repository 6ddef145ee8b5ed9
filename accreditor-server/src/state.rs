//! Shared application state for the accreditor server

use std::path::Path;
use std::sync::Arc;

use accreditor_core::{
    CriteriaTemplate, EvaluationError, EvaluationService, SqliteEvaluationStore,
};
use chrono::{DateTime, Utc};

use crate::ServerError;

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Evaluation operations over the shared database connection
    pub evaluations: Arc<EvaluationService<SqliteEvaluationStore>>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create an AppState from an opened store and the loaded template
    pub fn new(store: Arc<SqliteEvaluationStore>, template: Arc<CriteriaTemplate>) -> Self {
        Self {
            evaluations: Arc::new(EvaluationService::new(store, template)),
            started_at: Utc::now(),
        }
    }

    /// Open (or create) the database file at `database`
    pub fn open(database: &Path, template: CriteriaTemplate) -> Result<Self, ServerError> {
        if let Some(parent) = database.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ServerError::Internal(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let store = SqliteEvaluationStore::open(database)?;
        tracing::info!(path = %database.display(), "Opened evaluation database");
        Ok(Self::new(Arc::new(store), Arc::new(template)))
    }

    /// AppState backed by an in-memory database
    pub fn in_memory(template: CriteriaTemplate) -> Result<Self, EvaluationError> {
        let store = SqliteEvaluationStore::open_in_memory()?;
        Ok(Self::new(Arc::new(store), Arc::new(template)))
    }

    /// The criteria template loaded at startup
    pub fn template(&self) -> &CriteriaTemplate {
        self.evaluations.template()
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_state_in_memory() {
        let state = AppState::in_memory(CriteriaTemplate::empty()).unwrap();
        assert!(state.uptime_seconds() >= 0);
        assert!(state.template().is_empty());
    }

    #[test]
    fn test_app_state_open_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/accreditor.db");

        let state = AppState::open(&path, CriteriaTemplate::empty()).unwrap();
        assert!(path.exists());
        assert!(state.evaluations.list_evaluations().unwrap().is_empty());
    }
}
