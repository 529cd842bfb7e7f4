use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One run of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    /// Job this run belongs to.
    pub job_name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished, if it has.
    #[serde(default, with = "super::optional_time")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub success: bool,
    /// Combined command output. May contain pre-formatted markup.
    #[serde(default)]
    pub output: String,
    /// Member that ran the job.
    #[serde(default)]
    pub node_name: String,
}

impl Execution {
    /// Whether the run is still going.
    pub fn is_running(&self) -> bool {
        self.finished_at.is_none()
    }

    /// Run time in seconds, once finished.
    pub fn duration_secs(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_execution() {
        let json = r#"{
            "job_name": "backup",
            "started_at": "2024-03-05T15:00:00Z",
            "finished_at": "2024-03-05T15:05:05Z",
            "success": true,
            "output": "<b>done</b>",
            "node_name": "node-2"
        }"#;

        let exec: Execution = serde_json::from_str(json).unwrap();
        assert_eq!(exec.job_name, "backup");
        assert!(exec.success);
        assert!(!exec.is_running());
        assert_eq!(exec.duration_secs(), Some(305));
        assert_eq!(exec.output, "<b>done</b>");
    }

    #[test]
    fn test_unfinished_execution() {
        let json = r#"{
            "job_name": "backup",
            "started_at": "2024-03-05T15:00:00Z",
            "finished_at": "0001-01-01T00:00:00Z"
        }"#;

        let exec: Execution = serde_json::from_str(json).unwrap();
        assert!(exec.is_running());
        assert_eq!(exec.duration_secs(), None);
        assert!(!exec.success);
    }
}
