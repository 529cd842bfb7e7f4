pub mod context;
pub mod dashboard;
pub mod store;
pub mod testing;

pub use context::AgentContext;
pub use dashboard::{create_dashboard_router, DashboardState};
pub use store::EtcdClient;
