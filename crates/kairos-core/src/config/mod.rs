mod observability;
mod store;

pub use observability::{LoggingConfig, ObservabilityConfig};
pub use store::StoreConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{KairosError, Result};

/// Root configuration for KAIROS.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KairosConfig {
    /// Local member configuration.
    #[serde(default)]
    pub node: NodeConfig,

    /// Coordination store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Dashboard HTTP configuration.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl KairosConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| KairosError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = substitute_env_vars(content);

        let config: Self = toml::from_str(&content)
            .map_err(|e| KairosError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the effective configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the values that the runtime cannot recover from.
    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;

        if !self.dashboard.path_prefix.starts_with('/') {
            return Err(KairosError::Config(format!(
                "dashboard.path_prefix must start with '/', got {:?}",
                self.dashboard.path_prefix
            )));
        }

        Ok(())
    }
}

/// Local member configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Member name shown on the dashboard. Falls back to the host name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Dashboard HTTP configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port.
    #[serde(default = "default_http_port")]
    pub port: u16,

    /// Path prefix the dashboard pages are mounted under.
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_http_port(),
            path_prefix: default_path_prefix(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_path_prefix() -> String {
    "/dashboard".to_string()
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
        Ok(re) => re,
        Err(_) => return result,
    };

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KairosConfig::default();
        assert_eq!(config.dashboard.port, 8080);
        assert_eq!(config.dashboard.path_prefix, "/dashboard");
        assert_eq!(config.store.url, "http://127.0.0.1:2379");
        assert!(config.node.name.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = KairosConfig::parse_toml("").unwrap();
        assert_eq!(config.store.keyspace, "kairos");
        assert_eq!(config.observability.logging.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [node]
            name = "node-1"

            [store]
            url = "http://etcd:4001"
            keyspace = "scheduler"
            timeout_secs = 2

            [dashboard]
            host = "127.0.0.1"
            port = 3000
            path_prefix = "/ui"

            [observability.logging]
            level = "debug"
            json_format = true
        "#;

        let config = KairosConfig::parse_toml(toml).unwrap();
        assert_eq!(config.node.name.as_deref(), Some("node-1"));
        assert_eq!(config.store.url, "http://etcd:4001");
        assert_eq!(config.store.keyspace, "scheduler");
        assert_eq!(config.store.timeout_secs, 2);
        assert_eq!(config.dashboard.port, 3000);
        assert_eq!(config.dashboard.path_prefix, "/ui");
        assert!(config.observability.logging.json_format);
    }

    #[test]
    fn test_rejects_relative_prefix() {
        let toml = r#"
            [dashboard]
            path_prefix = "dashboard"
        "#;

        let err = KairosConfig::parse_toml(toml).unwrap_err();
        assert!(matches!(err, KairosError::Config(_)));
    }

    #[test]
    fn test_rejects_unparseable_toml() {
        let err = KairosConfig::parse_toml("[store\nurl = 1").unwrap_err();
        assert!(matches!(err, KairosError::Config(_)));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("KAIROS_TEST_STORE_URL", "http://10.0.0.5:2379");

        let toml = r#"
            [store]
            url = "${KAIROS_TEST_STORE_URL}"
        "#;

        let config = KairosConfig::parse_toml(toml).unwrap();
        assert_eq!(config.store.url, "http://10.0.0.5:2379");

        std::env::remove_var("KAIROS_TEST_STORE_URL");
    }

    #[test]
    fn test_to_toml_round_trips_values() {
        let mut config = KairosConfig::default();
        config.node.name = Some("alpha".to_string());

        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("name = \"alpha\""));

        let parsed = KairosConfig::parse_toml(&rendered).unwrap();
        assert_eq!(parsed.node.name.as_deref(), Some("alpha"));
    }
}
