//! Testing utilities for the dashboard.
//!
//! In-memory collaborators that can be switched to failing, and a builder
//! that wires them into an [`AgentContext`].

mod mock;

pub use mock::{MockCoordinationStore, MockJobStore, MockMembership};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kairos_core::job::Execution;

use crate::context::AgentContext;

/// Builder for an [`AgentContext`] over mock collaborators.
pub struct TestContextBuilder {
    version: String,
    member_name: String,
    path_prefix: String,
    membership: MockMembership,
    coordination: MockCoordinationStore,
    jobs: MockJobStore,
}

impl TestContextBuilder {
    pub fn new() -> Self {
        Self {
            version: "0.1.0-test".to_string(),
            member_name: "node-1".to_string(),
            path_prefix: "/dashboard".to_string(),
            membership: MockMembership::with_leader("node-1"),
            coordination: MockCoordinationStore::new(),
            jobs: MockJobStore::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn member_name(mut self, name: impl Into<String>) -> Self {
        self.member_name = name.into();
        self
    }

    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    pub fn membership(mut self, membership: MockMembership) -> Self {
        self.membership = membership;
        self
    }

    pub fn coordination(mut self, store: MockCoordinationStore) -> Self {
        self.coordination = store;
        self
    }

    pub fn jobs(mut self, store: MockJobStore) -> Self {
        self.jobs = store;
        self
    }

    pub fn build(self) -> AgentContext {
        AgentContext::new(
            self.version,
            self.member_name,
            Arc::new(self.membership),
            Arc::new(self.coordination),
            Arc::new(self.jobs),
        )
        .with_path_prefix(self.path_prefix)
    }
}

impl Default for TestContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `count` finished executions of `job`, one minute apart, oldest first.
pub fn execution_series(job: &str, start: DateTime<Utc>, count: usize) -> Vec<Execution> {
    (0..count)
        .map(|i| {
            let started_at = start + chrono::Duration::minutes(i as i64);
            Execution {
                job_name: job.to_string(),
                started_at,
                finished_at: Some(started_at + chrono::Duration::seconds(30)),
                success: i % 3 != 0,
                output: format!("run {}", i),
                node_name: "node-1".to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let ctx = TestContextBuilder::new().build();
        assert_eq!(ctx.version, "0.1.0-test");
        assert_eq!(ctx.member_name, "node-1");
        assert_eq!(ctx.path_prefix, "/dashboard");
    }

    #[test]
    fn test_execution_series_is_ordered() {
        let start: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        let series = execution_series("backup", start, 5);
        assert_eq!(series.len(), 5);
        assert!(series.windows(2).all(|w| w[0].started_at < w[1].started_at));
        assert_eq!(series[4].output, "run 4");
    }
}
