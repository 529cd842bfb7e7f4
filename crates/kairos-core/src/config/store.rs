use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KairosError, Result};

/// Coordination store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store's HTTP API.
    #[serde(default = "default_url")]
    pub url: String,

    /// Key prefix all agent records live under.
    #[serde(default = "default_keyspace")]
    pub keyspace: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(KairosError::Config(format!(
                "store.url must be an http(s) URL, got {:?}",
                self.url
            )));
        }
        if self.keyspace.trim_matches('/').is_empty() {
            return Err(KairosError::Config(
                "store.keyspace must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(KairosError::Config(
                "store.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            keyspace: default_keyspace(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://127.0.0.1:2379".to_string()
}

fn default_keyspace() -> String {
    "kairos".to_string()
}

fn default_timeout() -> u64 {
    5
}
