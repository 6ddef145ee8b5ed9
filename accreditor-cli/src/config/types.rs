use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default host for the accreditor server
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port for the accreditor server
pub const DEFAULT_PORT: u16 = 7480;
/// Default criteria template, relative to the working directory
pub const DEFAULT_TEMPLATE_PATH: &str = "config/criteria.json";

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawAccreditorConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub storage: RawStorageConfig,

    #[serde(default)]
    pub template: RawTemplateConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawStorageConfig {
    /// SQLite database file
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawTemplateConfig {
    /// Criteria template JSON file
    pub path: Option<PathBuf>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccreditorConfig {
    pub server: ServerSection,
    pub storage: StorageSection,
    pub template: TemplateSection,
}

impl Default for AccreditorConfig {
    fn default() -> Self {
        Self {
            server: ServerSection::default(),
            storage: StorageSection {
                database: accreditor_paths::default_database_path(),
            },
            template: TemplateSection {
                path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSection {
    pub database: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub path: PathBuf,
}
