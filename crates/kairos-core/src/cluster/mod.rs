mod member;
mod stats;
mod traits;

pub use member::{Member, MemberStatus};
pub use stats::{LeaderStats, StoreStats, StoreVersion};
pub use traits::{CoordinationStore, Membership, StoreQuery};
