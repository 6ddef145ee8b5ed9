//! Template loading errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the criteria template
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template: {0}")]
    Parse(#[from] serde_json::Error),
}
