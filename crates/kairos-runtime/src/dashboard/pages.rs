use axum::extract::{Path, State};
use axum::response::Response;

use super::executions::ExecutionsPage;
use super::health::IndexPage;
use super::jobs::JobListPage;
use super::render::render_page;
use super::DashboardState;

/// Cluster status page.
pub async fn index(State(state): State<DashboardState>) -> Response {
    let page = IndexPage::build(&state.context).await;
    render_page(&page)
}

/// Job list page.
pub async fn jobs(State(state): State<DashboardState>) -> Response {
    let page = JobListPage::build(&state.context).await;
    render_page(&page)
}

/// Execution history of one job.
pub async fn executions(
    State(state): State<DashboardState>,
    Path(job): Path<String>,
) -> Response {
    tracing::debug!(job = %job, "Rendering executions page");
    let page = ExecutionsPage::build(&state.context, &job).await;
    render_page(&page)
}
