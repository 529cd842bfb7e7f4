use anyhow::Result;
use clap::Parser;
use console::style;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kairos::Kairos;
use kairos_core::config::{KairosConfig, LoggingConfig};

use super::load_config;

/// Serve the web dashboard.
#[derive(Parser)]
pub struct DashboardCommand {
    /// Configuration file path.
    #[arg(short, long, default_value = "kairos.toml")]
    pub config: String,

    /// Port to listen on (overrides config).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    pub host: Option<String>,

    /// Verbose logging.
    #[arg(long)]
    pub dev: bool,
}

impl DashboardCommand {
    /// Execute the dashboard command.
    pub async fn execute(self) -> Result<()> {
        let loaded = load_config(&self.config)?;
        let mut config = loaded.config;
        self.apply_overrides(&mut config);

        init_logging(&config.observability.logging, self.dev);

        if loaded.from_file {
            info!(path = %self.config, "Loaded configuration");
        } else {
            warn!(path = %self.config, "Configuration file not found, using defaults");
        }

        println!();
        println!(
            "  {} v{}",
            style("KAIROS").bold().cyan(),
            env!("CARGO_PKG_VERSION")
        );
        println!(
            "  Dashboard at {}",
            style(format!(
                "http://{}:{}{}",
                config.dashboard.host, config.dashboard.port, config.dashboard.path_prefix
            ))
            .cyan()
        );
        println!("  Store at {}", style(&config.store.url).cyan());
        println!();

        let kairos = Kairos::builder().config(config).build()?;
        kairos.run().await?;

        println!("\n  Goodbye!");
        Ok(())
    }

    fn apply_overrides(&self, config: &mut KairosConfig) {
        if let Some(port) = self.port {
            config.dashboard.port = port;
        }
        if let Some(host) = &self.host {
            config.dashboard.host = host.clone();
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig, dev: bool) {
    let level = if dev { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if logging.json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(port: Option<u16>, host: Option<&str>) -> DashboardCommand {
        DashboardCommand {
            config: "kairos.toml".to_string(),
            port,
            host: host.map(str::to_string),
            dev: false,
        }
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = KairosConfig::default();
        command(Some(3000), Some("127.0.0.1")).apply_overrides(&mut config);
        assert_eq!(config.dashboard.port, 3000);
        assert_eq!(config.dashboard.host, "127.0.0.1");
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = KairosConfig::default();
        config.dashboard.port = 9000;
        command(None, None).apply_overrides(&mut config);
        assert_eq!(config.dashboard.port, 9000);
        assert_eq!(config.dashboard.host, "0.0.0.0");
    }
}
