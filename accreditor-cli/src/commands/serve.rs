//! Serve command: runs the HTTP API and web UI in the foreground
//!
//! Command-line flags override values from the layered config files.

use std::path::PathBuf;

use accreditor_core::CriteriaTemplate;
use accreditor_server::{AccreditorServer, AppState, ServerConfig};
use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::config::{AccreditorConfig, ConfigLoader};

/// Arguments for the serve command
#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// SQLite database file
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Criteria template JSON file
    #[arg(long)]
    pub template: Option<PathBuf>,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded configuration
    fn apply(&self, mut config: AccreditorConfig) -> AccreditorConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database) = &self.database {
            config.storage.database = database.clone();
        }
        if let Some(template) = &self.template {
            config.template.path = template.clone();
        }
        config
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = args.apply(ConfigLoader::load()?);

    let template = CriteriaTemplate::load_or_empty(&config.template.path);
    let state = AppState::open(&config.storage.database, template).with_context(|| {
        format!(
            "Failed to open database {}",
            config.storage.database.display()
        )
    })?;

    info!(
        "Starting accreditor server on {}:{} (database: {})",
        config.server.host,
        config.server.port,
        config.storage.database.display()
    );

    let server = AccreditorServer::new(
        ServerConfig::new(config.server.host, config.server.port),
        state,
    );
    server.run().await?;

    info!("Server stopped");
    Ok(())
}
