use async_trait::async_trait;

use super::member::Member;
use crate::error::Result;

/// Leader lookup against the membership layer.
#[async_trait]
pub trait Membership: Send + Sync {
    /// The member currently acting as leader.
    async fn leader(&self) -> Result<Member>;
}

/// Read-only queries the dashboard issues against the coordination store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreQuery {
    /// Server and cluster version identifiers.
    Version,
    /// The queried member's self-reported statistics.
    SelfStats,
}

impl StoreQuery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::SelfStats => "self_stats",
        }
    }
}

impl std::fmt::Display for StoreQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw query access to the coordination store.
///
/// Answers are the undecoded JSON payloads; callers own decoding so a
/// malformed payload can be told apart from an unreachable store.
#[async_trait]
pub trait CoordinationStore: Send + Sync {
    async fn query(&self, query: StoreQuery) -> Result<Vec<u8>>;
}
