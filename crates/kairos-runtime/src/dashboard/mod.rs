//! Read-only HTML dashboard.
//!
//! Three pages are served: cluster status, the job list and the execution
//! history of one job. Every page is assembled from a fresh set of
//! collaborator queries per request; nothing is cached between requests.

mod assets;
mod common;
mod executions;
mod format;
mod health;
mod jobs;
mod pages;
mod render;

pub use common::CommonViewData;
pub use executions::{recent_executions, window, window_executions, ExecutionsPage, EXECUTION_WINDOW};
pub use format::{format_timestamp, TimeDisplay, TIMESTAMP_FORMAT};
pub use health::{ClusterHealthData, IndexPage};
pub use jobs::{list_jobs, JobListPage, JobRow};
pub use render::{render, render_page};

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::context::AgentContext;

/// Dashboard state shared across handlers.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub context: Arc<AgentContext>,
}

impl DashboardState {
    pub fn new(context: AgentContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }
}

/// Create the dashboard router.
///
/// Routes are relative; the caller nests the router under the context's
/// path prefix.
pub fn create_dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/jobs", get(pages::jobs))
        .route("/jobs/{job}/executions", get(pages::executions))
        .route("/assets/styles.css", get(assets::styles_css))
        .with_state(state)
}
