mod execution;
mod store;

pub use execution::Execution;
pub use store::JobStore;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled job as persisted by the agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job name.
    pub name: String,
    /// Cron-style schedule expression.
    #[serde(default)]
    pub schedule: String,
    /// Shell command the job runs.
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub owner_email: String,
    /// Number of successful runs.
    #[serde(default)]
    pub success_count: u64,
    /// Number of failed runs.
    #[serde(default)]
    pub error_count: u64,
    /// When the job last succeeded.
    #[serde(default, with = "optional_time")]
    pub last_success: Option<DateTime<Utc>>,
    /// When the job last failed.
    #[serde(default, with = "optional_time")]
    pub last_error: Option<DateTime<Utc>>,
    #[serde(default)]
    pub disabled: bool,
    /// Member tags a node must carry to run the job.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Job {
    /// Create a job with only a name and schedule set.
    pub fn new(name: impl Into<String>, schedule: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schedule: schedule.into(),
            ..Default::default()
        }
    }

    /// Whether the last run of this job was a success.
    pub fn is_success(&self) -> bool {
        is_success(self.last_success, self.last_error)
    }
}

/// A job counts as successful when its last success strictly post-dates its
/// last failure. No failure at all is a success, no success at all is not.
pub fn is_success(last_success: Option<DateTime<Utc>>, last_error: Option<DateTime<Utc>>) -> bool {
    match (last_success, last_error) {
        (Some(success), Some(error)) => success > error,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Timestamps that older agents wrote as the zero instant
/// (`0001-01-01T00:00:00Z`) decode as `None`.
mod optional_time {
    use chrono::{DateTime, Datelike, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
        Ok(value.filter(|t| t.year() > 1))
    }
}
