//! Config command: inspect the merged configuration and where it comes from

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{AccreditorConfig, ConfigLoader};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration as TOML
    Show,
    /// List config layers and the files the settings point at
    Path,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(&ConfigLoader::load()?)?);
        }
        ConfigCommands::Path => {
            let config = ConfigLoader::load()?;
            print!(
                "{}",
                describe_paths(
                    &ConfigLoader::user_config_path(),
                    &ConfigLoader::project_config_path(),
                    &config,
                )
            );
        }
    }
    Ok(())
}

fn describe_paths(user: &Path, project: &Path, config: &AccreditorConfig) -> String {
    let mut out = String::new();
    let rows = [
        ("User config", user),
        ("Project config", project),
        ("Database", config.storage.database.as_path()),
        ("Template", config.template.path.as_path()),
    ];
    for (label, path) in rows {
        let marker = if path.exists() { "" } else { "  (missing)" };
        let _ = writeln!(out, "{:<16}{}{}", format!("{label}:"), path.display(), marker);
    }
    out
}
