use std::sync::Arc;

use kairos_core::cluster::{CoordinationStore, Membership};
use kairos_core::job::JobStore;

/// Everything a dashboard request may consult about the running agent.
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct AgentContext {
    /// Agent software version.
    pub version: String,
    /// Name of the member serving the dashboard.
    pub member_name: String,
    /// Path prefix the dashboard is mounted under, used for links.
    pub path_prefix: String,
    pub membership: Arc<dyn Membership>,
    pub coordination: Arc<dyn CoordinationStore>,
    pub jobs: Arc<dyn JobStore>,
}

impl AgentContext {
    /// Create a context mounted at `/dashboard`.
    pub fn new(
        version: impl Into<String>,
        member_name: impl Into<String>,
        membership: Arc<dyn Membership>,
        coordination: Arc<dyn CoordinationStore>,
        jobs: Arc<dyn JobStore>,
    ) -> Self {
        Self {
            version: version.into(),
            member_name: member_name.into(),
            path_prefix: "/dashboard".to_string(),
            membership,
            coordination,
            jobs,
        }
    }

    /// Mount the dashboard links under a different prefix.
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.path_prefix = prefix.trim_end_matches('/').to_string();
        self
    }
}

impl std::fmt::Debug for AgentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentContext")
            .field("version", &self.version)
            .field("member_name", &self.member_name)
            .field("path_prefix", &self.path_prefix)
            .finish_non_exhaustive()
    }
}
