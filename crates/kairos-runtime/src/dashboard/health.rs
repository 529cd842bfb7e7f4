use askama::Template;
use serde::de::DeserializeOwned;

use kairos_core::cluster::{CoordinationStore, StoreQuery, StoreStats, StoreVersion};
use kairos_core::Fetched;

use super::common::CommonViewData;
use super::format::format_timestamp;
use crate::context::AgentContext;

/// Coordination store health as shown on the index page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterHealthData {
    /// Store server version, empty when the version query failed.
    pub store_version: String,
    /// Store cluster identifier, empty when the version query failed.
    pub cluster_id: String,
    /// Self-reported statistics, absent when the statistics query failed.
    pub self_stats: Option<StoreStats>,
    /// Start of the current leader's term, formatted; empty when unknown.
    pub leader_term_start: String,
    /// Causes of any degraded query.
    pub warnings: Vec<String>,
}

impl ClusterHealthData {
    /// Query version and statistics independently.
    ///
    /// Either query may fail without blanking the other's contribution.
    pub async fn build(store: &dyn CoordinationStore) -> Self {
        let (version, stats) = tokio::join!(
            store.query(StoreQuery::Version),
            store.query(StoreQuery::SelfStats)
        );

        let version: Fetched<StoreVersion> = Fetched::from_result(
            version.map(|payload| decode_or_default(&payload, StoreQuery::Version)),
            "Store version query",
        );
        let stats: Fetched<Option<StoreStats>> = Fetched::from_result(
            stats.map(|payload| Some(decode_or_default(&payload, StoreQuery::SelfStats))),
            "Store statistics query",
        );

        let warnings = [version.cause(), stats.cause()]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();

        let version = version.into_value();
        let self_stats = stats.into_value();
        let leader_term_start = self_stats
            .as_ref()
            .and_then(|s| s.leader_info.start_time.as_ref())
            .map(format_timestamp)
            .unwrap_or_default();

        Self {
            store_version: version.server,
            cluster_id: version.cluster,
            self_stats,
            leader_term_start,
            warnings,
        }
    }

    /// Whether any query degraded.
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Decode a store payload; a malformed payload is the zero value.
fn decode_or_default<T: DeserializeOwned + Default>(payload: &[u8], query: StoreQuery) -> T {
    match serde_json::from_slice(payload) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "Malformed store payload");
            T::default()
        }
    }
}

/// Cluster status page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub base: String,
    pub common: CommonViewData,
    pub health: ClusterHealthData,
}

impl IndexPage {
    pub async fn build(ctx: &AgentContext) -> Self {
        let (common, health) = tokio::join!(
            CommonViewData::build(ctx),
            ClusterHealthData::build(ctx.coordination.as_ref())
        );

        Self {
            base: ctx.path_prefix.clone(),
            common,
            health,
        }
    }
}
