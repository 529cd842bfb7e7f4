mod config;
mod dashboard;

pub use config::ConfigCommand;
pub use dashboard::DashboardCommand;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kairos_core::config::KairosConfig;

/// KAIROS - dashboard for a distributed job scheduler
#[derive(Parser)]
#[command(name = "kairos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the web dashboard.
    Dashboard(DashboardCommand),

    /// Print the effective configuration.
    Config(ConfigCommand),
}

impl Cli {
    /// Execute the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Dashboard(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute(),
        }
    }
}

/// Configuration as loaded from disk.
pub struct LoadedConfig {
    pub config: KairosConfig,
    /// False when the file was missing and defaults are in use.
    pub from_file: bool,
}

/// Load `path`, falling back to defaults when the file does not exist.
///
/// A file that exists but does not parse is an error.
pub fn load_config(path: &str) -> Result<LoadedConfig> {
    if !Path::new(path).exists() {
        return Ok(LoadedConfig {
            config: KairosConfig::default(),
            from_file: false,
        });
    }

    Ok(LoadedConfig {
        config: KairosConfig::from_file(path)?,
        from_file: true,
    })
}
