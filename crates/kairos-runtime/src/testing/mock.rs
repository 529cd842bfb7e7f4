use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use kairos_core::cluster::{CoordinationStore, Member, Membership, StoreQuery};
use kairos_core::error::{KairosError, Result};
use kairos_core::job::{Execution, Job, JobStore};

/// Membership whose leader can be set or cleared between requests.
#[derive(Clone, Default)]
pub struct MockMembership {
    leader: Arc<RwLock<Option<Member>>>,
}

impl MockMembership {
    /// Membership reporting `name` as leader.
    pub fn with_leader(name: &str) -> Self {
        let mock = Self::default();
        mock.set_leader(Some(Member::named(name)));
        mock
    }

    /// Membership with no elected leader; lookups fail.
    pub fn without_leader() -> Self {
        Self::default()
    }

    pub fn set_leader(&self, leader: Option<Member>) {
        *self.leader.write().unwrap_or_else(|e| e.into_inner()) = leader;
    }
}

#[async_trait]
impl Membership for MockMembership {
    async fn leader(&self) -> Result<Member> {
        self.leader
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| KairosError::Membership("no leader elected".to_string()))
    }
}

#[derive(Clone)]
enum MockAnswer {
    Payload(Vec<u8>),
    Fail(String),
}

/// Coordination store answering from canned payloads.
///
/// Queries without a canned answer fail.
#[derive(Clone, Default)]
pub struct MockCoordinationStore {
    answers: Arc<RwLock<HashMap<StoreQuery, MockAnswer>>>,
}

impl MockCoordinationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with raw bytes.
    pub fn with_payload(self, query: StoreQuery, payload: impl Into<Vec<u8>>) -> Self {
        self.set(query, MockAnswer::Payload(payload.into()));
        self
    }

    /// Answer `query` with a JSON document.
    pub fn with_json(self, query: StoreQuery, value: serde_json::Value) -> Self {
        self.with_payload(query, value.to_string())
    }

    /// Make `query` fail with a store error.
    pub fn failing(self, query: StoreQuery, message: impl Into<String>) -> Self {
        self.set(query, MockAnswer::Fail(message.into()));
        self
    }

    fn set(&self, query: StoreQuery, answer: MockAnswer) {
        self.answers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(query, answer);
    }
}

#[async_trait]
impl CoordinationStore for MockCoordinationStore {
    async fn query(&self, query: StoreQuery) -> Result<Vec<u8>> {
        let answer = self
            .answers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&query)
            .cloned();

        match answer {
            Some(MockAnswer::Payload(bytes)) => Ok(bytes),
            Some(MockAnswer::Fail(message)) => Err(KairosError::Store(message)),
            None => Err(KairosError::Store(format!("no mock answer for {}", query))),
        }
    }
}

/// Job store backed by in-memory vectors.
#[derive(Clone, Default)]
pub struct MockJobStore {
    jobs: Arc<RwLock<Vec<Job>>>,
    executions: Arc<RwLock<HashMap<String, Vec<Execution>>>>,
    failure: Arc<RwLock<Option<String>>>,
}

impl MockJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(self, jobs: Vec<Job>) -> Self {
        *self.jobs.write().unwrap_or_else(|e| e.into_inner()) = jobs;
        self
    }

    /// Record executions for `job`, kept in the given order.
    pub fn with_executions(self, job: &str, executions: Vec<Execution>) -> Self {
        self.executions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(job.to_string(), executions);
        self
    }

    /// Make every read fail with a store error.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap_or_else(|e| e.into_inner()) = Some(message.into());
        self
    }

    fn check(&self) -> Result<()> {
        match self.failure.read().unwrap_or_else(|e| e.into_inner()).as_ref() {
            Some(message) => Err(KairosError::Store(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl JobStore for MockJobStore {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.check()?;
        Ok(self.jobs.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn list_executions(&self, job: &str) -> Result<Vec<Execution>> {
        self.check()?;
        Ok(self
            .executions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(job)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_membership() {
        let membership = MockMembership::with_leader("node-2");
        assert_eq!(membership.leader().await.unwrap().name, "node-2");

        membership.set_leader(None);
        assert!(membership.leader().await.is_err());
    }

    #[tokio::test]
    async fn test_mock_coordination_store() {
        let store = MockCoordinationStore::new()
            .with_payload(StoreQuery::Version, "{}")
            .failing(StoreQuery::SelfStats, "unreachable");

        assert_eq!(store.query(StoreQuery::Version).await.unwrap(), b"{}".to_vec());
        assert!(store.query(StoreQuery::SelfStats).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_job_store() {
        let store = MockJobStore::new().with_jobs(vec![Job::new("a", "@hourly")]);
        assert_eq!(store.list_jobs().await.unwrap().len(), 1);
        assert!(store.list_executions("a").await.unwrap().is_empty());

        let store = store.failing("down");
        assert!(store.list_jobs().await.is_err());
        assert!(store.list_executions("a").await.is_err());
    }
}
