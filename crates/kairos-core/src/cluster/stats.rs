use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version identifiers reported by the coordination store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreVersion {
    /// Store server version.
    #[serde(default, rename = "etcdserver")]
    pub server: String,
    /// Cluster protocol version, used as the cluster identifier.
    #[serde(default, rename = "etcdcluster")]
    pub cluster: String,
}

/// Statistics a store member reports about itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreStats {
    pub name: String,
    pub id: String,
    /// Raft state, e.g. `StateLeader` or `StateFollower`.
    pub state: String,
    pub start_time: Option<DateTime<Utc>>,
    pub leader_info: LeaderStats,
    pub recv_append_request_cnt: u64,
    pub recv_pkg_rate: f64,
    pub recv_bandwidth_rate: f64,
    pub send_append_request_cnt: u64,
    pub send_pkg_rate: f64,
    pub send_bandwidth_rate: f64,
}

/// Leader block of the self statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaderStats {
    /// Store id of the current leader.
    pub leader: String,
    pub uptime: String,
    /// When the leader's term started.
    pub start_time: Option<DateTime<Utc>>,
}

impl StoreStats {
    /// Whether the reporting member is the store leader.
    pub fn is_leader(&self) -> bool {
        self.state == "StateLeader"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_self_stats() {
        let json = r#"{
            "name": "infra1",
            "id": "ce2a822cea30bfca",
            "state": "StateLeader",
            "startTime": "2024-03-05T14:00:00.123456789+01:00",
            "leaderInfo": {
                "leader": "ce2a822cea30bfca",
                "uptime": "1h5m5s",
                "startTime": "2024-03-05T15:05:05Z"
            },
            "recvAppendRequestCnt": 5944,
            "sendAppendRequestCnt": 0,
            "sendPkgRate": 2.5,
            "sendBandwidthRate": 14.1
        }"#;

        let stats: StoreStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.name, "infra1");
        assert!(stats.is_leader());
        assert_eq!(stats.recv_append_request_cnt, 5944);
        assert_eq!(stats.leader_info.uptime, "1h5m5s");
        assert_eq!(
            stats.leader_info.start_time,
            Some("2024-03-05T15:05:05Z".parse().unwrap())
        );
        assert_eq!(
            stats.start_time,
            Some("2024-03-05T13:00:00.123456789Z".parse().unwrap())
        );
    }

    #[test]
    fn test_decode_version() {
        let version: StoreVersion =
            serde_json::from_str(r#"{"etcdserver":"3.5.12","etcdcluster":"3.5.0"}"#).unwrap();
        assert_eq!(version.server, "3.5.12");
        assert_eq!(version.cluster, "3.5.0");
    }

    #[test]
    fn test_partial_payload_defaults() {
        let stats: StoreStats = serde_json::from_str(r#"{"state":"StateFollower"}"#).unwrap();
        assert!(!stats.is_leader());
        assert!(stats.leader_info.start_time.is_none());
    }
}
