pub mod cluster;
pub mod config;
pub mod error;
pub mod fetched;
pub mod job;

pub use cluster::{CoordinationStore, Member, Membership, StoreQuery, StoreStats, StoreVersion};
pub use config::KairosConfig;
pub use error::{KairosError, Result};
pub use fetched::Fetched;
pub use job::{Execution, Job, JobStore};
