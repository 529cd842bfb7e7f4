use anyhow::Result;
use clap::Parser;

use super::load_config;

/// Print the effective configuration as TOML.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration file path.
    #[arg(short, long, default_value = "kairos.toml")]
    pub config: String,
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(self) -> Result<()> {
        let loaded = load_config(&self.config)?;
        if !loaded.from_file {
            eprintln!("# {} not found, showing defaults", self.config);
        }
        print!("{}", loaded.config.to_toml()?);
        Ok(())
    }
}
