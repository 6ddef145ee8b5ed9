use super::types::{
    AccreditorConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TEMPLATE_PATH, RawAccreditorConfig,
    RawServerConfig, RawStorageConfig, RawTemplateConfig, ServerSection, StorageSection,
    TemplateSection,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<AccreditorConfig> {
        Self::load_from(
            Some(&Self::user_config_path()),
            &Self::project_config_path(),
        )
    }

    /// Load configuration from explicit layer paths; missing files are skipped
    pub fn load_from(user_path: Option<&Path>, project_path: &Path) -> Result<AccreditorConfig> {
        let mut raw = RawAccreditorConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user_path
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(user_path)?);
        }

        // Layer 2: Project config
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(project_path)?);
        }

        Ok(Self::finalize(raw))
    }

    /// Get user config path ($XDG_CONFIG_HOME/accreditor/config.toml)
    pub fn user_config_path() -> PathBuf {
        accreditor_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with ACCREDITOR_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("ACCREDITOR_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".accreditor/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<RawAccreditorConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawAccreditorConfig, overlay: RawAccreditorConfig) -> RawAccreditorConfig {
        RawAccreditorConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
            },
            storage: RawStorageConfig {
                database: overlay.storage.database.or(base.storage.database),
            },
            template: RawTemplateConfig {
                path: overlay.template.path.or(base.template.path),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawAccreditorConfig) -> AccreditorConfig {
        AccreditorConfig {
            server: ServerSection {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
            },
            storage: StorageSection {
                database: raw
                    .storage
                    .database
                    .unwrap_or_else(accreditor_paths::default_database_path),
            },
            template: TemplateSection {
                path: raw
                    .template
                    .path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH)),
            },
        }
    }
}
