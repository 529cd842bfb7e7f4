use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use kairos_core::cluster::{CoordinationStore, Member, Membership, StoreQuery};
use kairos_core::config::StoreConfig;
use kairos_core::error::{KairosError, Result};
use kairos_core::job::{Execution, Job, JobStore};

/// etcd v2 error code for a missing key.
const KEY_NOT_FOUND: u64 = 100;

/// Client for the coordination store's v2 HTTP API.
///
/// Serves leader lookups, raw health queries, and the job and execution
/// records the agent keeps under its keyspace.
#[derive(Debug, Clone)]
pub struct EtcdClient {
    http: reqwest::Client,
    base_url: Url,
    keyspace: Vec<String>,
    timeout: Duration,
}

/// Body of a v2 keys response.
#[derive(Debug, Deserialize)]
struct KeysResponse {
    node: KeyNode,
}

#[derive(Debug, Deserialize)]
struct KeyNode {
    key: String,
    #[serde(default)]
    dir: bool,
    value: Option<String>,
    #[serde(default)]
    nodes: Vec<KeyNode>,
}

impl KeyNode {
    /// Depth-first leaves, in listing order.
    fn into_leaves(self) -> Vec<KeyNode> {
        if !self.dir {
            return vec![self];
        }
        self.nodes
            .into_iter()
            .flat_map(KeyNode::into_leaves)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(rename = "errorCode")]
    error_code: u64,
    #[serde(default)]
    message: String,
}

impl EtcdClient {
    /// Create a client from the store configuration.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| KairosError::Config(format!("Invalid store url {:?}: {}", config.url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| KairosError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let keyspace = config
            .keyspace
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            http,
            base_url,
            keyspace,
            timeout: config.timeout(),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| KairosError::Config(format!("Store url {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn keys_url(&self, path: &[&str]) -> Result<Url> {
        let mut segments = vec!["v2", "keys"];
        segments.extend(self.keyspace.iter().map(String::as_str));
        segments.extend_from_slice(path);
        let mut url = self.url(&segments)?;
        url.query_pairs_mut()
            .append_pair("recursive", "true")
            .append_pair("sorted", "true");
        Ok(url)
    }

    fn transport_error(&self, e: reqwest::Error) -> KairosError {
        if e.is_timeout() {
            KairosError::Timeout(self.timeout)
        } else {
            KairosError::Store(e.to_string())
        }
    }

    /// GET a URL and return the body of a 2xx answer.
    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>> {
        tracing::debug!(url = %url, "Store request");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(KairosError::Store(format!(
                "{} answered {}: {}",
                url.path(),
                status,
                String::from_utf8_lossy(&body).trim()
            )));
        }

        Ok(body.to_vec())
    }

    /// Fetch a key tree. A missing key is `None`.
    async fn get_node(&self, path: &[&str]) -> Result<Option<KeyNode>> {
        let url = self.keys_url(path)?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if status == StatusCode::NOT_FOUND {
            if let Ok(err) = serde_json::from_slice::<ErrorResponse>(&body) {
                if err.error_code == KEY_NOT_FOUND {
                    return Ok(None);
                }
                return Err(KairosError::Store(err.message));
            }
        }

        if !status.is_success() {
            return Err(KairosError::Store(format!(
                "{} answered {}",
                url.path(),
                status
            )));
        }

        let keys: KeysResponse = serde_json::from_slice(&body)?;
        Ok(Some(keys.node))
    }

    /// Decode every leaf value under `path`, skipping records that do not decode.
    async fn list_records<T>(&self, path: &[&str]) -> Result<Vec<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(node) = self.get_node(path).await? else {
            return Ok(Vec::new());
        };

        let records = node
            .into_leaves()
            .into_iter()
            .filter_map(|leaf| {
                let value = leaf.value.as_deref()?;
                match serde_json::from_str(value) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(key = %leaf.key, error = %e, "Skipping undecodable record");
                        None
                    }
                }
            })
            .collect();

        Ok(records)
    }
}

#[async_trait]
impl CoordinationStore for EtcdClient {
    async fn query(&self, query: StoreQuery) -> Result<Vec<u8>> {
        let url = match query {
            StoreQuery::Version => self.url(&["version"])?,
            StoreQuery::SelfStats => self.url(&["v2", "stats", "self"])?,
        };
        self.get_bytes(url).await
    }
}

#[async_trait]
impl Membership for EtcdClient {
    async fn leader(&self) -> Result<Member> {
        let node = self
            .get_node(&["leader"])
            .await?
            .ok_or_else(|| KairosError::Membership("no leader elected".to_string()))?;

        let value = node.value.unwrap_or_default();
        let value = value.trim();
        if value.is_empty() {
            return Err(KairosError::Membership("leader key is empty".to_string()));
        }

        Ok(parse_leader(value))
    }
}

#[async_trait]
impl JobStore for EtcdClient {
    async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.list_records(&["jobs"]).await
    }

    async fn list_executions(&self, job: &str) -> Result<Vec<Execution>> {
        let mut executions: Vec<Execution> = self.list_records(&["executions", job]).await?;
        // Keys sort lexically, which is not completion order for every key scheme.
        executions.sort_by_key(completion_order);
        Ok(executions)
    }
}

/// Leader key value: a JSON member, a JSON string, or a bare member name.
fn parse_leader(value: &str) -> Member {
    if let Ok(member) = serde_json::from_str::<Member>(value) {
        return member;
    }
    match serde_json::from_str::<String>(value) {
        Ok(name) => Member::named(name),
        Err(_) => Member::named(value),
    }
}

/// Finished runs by completion time, then runs still going, each tie broken by start.
fn completion_order(execution: &Execution) -> (bool, Option<DateTime<Utc>>, DateTime<Utc>) {
    (
        execution.finished_at.is_none(),
        execution.finished_at,
        execution.started_at,
    )
}
