use async_trait::async_trait;

use super::{Execution, Job};
use crate::error::Result;

/// Read access to persisted jobs and their executions.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Every known job, in store order.
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    /// Every recorded execution of `job`, oldest first.
    async fn list_executions(&self, job: &str) -> Result<Vec<Execution>>;
}
