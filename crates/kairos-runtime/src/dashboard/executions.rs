use askama::Template;

use kairos_core::job::{Execution, JobStore};
use kairos_core::Fetched;

use super::common::CommonViewData;
use super::format::TimeDisplay;
use crate::context::AgentContext;

/// Most executions shown for one job.
pub const EXECUTION_WINDOW: usize = 100;

/// Keep the last `size` items, in their original order.
pub fn window<T>(mut items: Vec<T>, size: usize) -> Vec<T> {
    if items.len() > size {
        let excess = items.len() - size;
        items.drain(..excess);
    }
    items
}

/// The most recent [`EXECUTION_WINDOW`] executions of an oldest-first list.
pub fn window_executions(executions: Vec<Execution>) -> Vec<Execution> {
    window(executions, EXECUTION_WINDOW)
}

/// Recent executions of `job`. A store failure is an empty list.
pub async fn recent_executions(store: &dyn JobStore, job: &str) -> Vec<Execution> {
    let executions = Fetched::from_result(
        store.list_executions(job).await,
        &format!("Execution listing for {}", job),
    );
    window_executions(executions.into_value())
}

/// Execution history page for one job.
///
/// `output` is rendered unescaped: it carries markup produced by the
/// executing agent.
#[derive(Template)]
#[template(path = "executions.html")]
pub struct ExecutionsPage {
    pub base: String,
    pub common: CommonViewData,
    pub executions: Vec<Execution>,
    pub job_name: String,
}

impl ExecutionsPage {
    pub async fn build(ctx: &AgentContext, job_name: &str) -> Self {
        let (common, executions) = tokio::join!(
            CommonViewData::build(ctx),
            recent_executions(ctx.jobs.as_ref(), job_name)
        );

        Self {
            base: ctx.path_prefix.clone(),
            common,
            executions,
            job_name: job_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{execution_series, MockJobStore, TestContextBuilder};
    use chrono::{DateTime, Utc};

    fn start() -> DateTime<Utc> {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_window_identity_up_to_limit() {
        for len in [0, 1, 99, 100] {
            let items: Vec<usize> = (0..len).collect();
            assert_eq!(window(items.clone(), EXECUTION_WINDOW), items);
        }
    }

    #[test]
    fn test_window_keeps_last_entries() {
        let items: Vec<usize> = (0..150).collect();
        let windowed = window(items, EXECUTION_WINDOW);
        assert_eq!(windowed.len(), 100);
        assert_eq!(windowed, (50..150).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_executions() {
        let series = execution_series("backup", start(), 150);
        let expected = series[50..].to_vec();
        assert_eq!(window_executions(series), expected);
    }

    #[tokio::test]
    async fn test_page_windows_history() {
        let store = MockJobStore::new().with_executions("backup", execution_series("backup", start(), 130));
        let ctx = TestContextBuilder::new().jobs(store).build();

        let page = ExecutionsPage::build(&ctx, "backup").await;
        assert_eq!(page.job_name, "backup");
        assert_eq!(page.executions.len(), 100);
        assert_eq!(page.executions[0].output, "run 30");
        assert_eq!(page.executions[99].output, "run 129");
    }

    #[tokio::test]
    async fn test_unknown_job_is_empty() {
        let ctx = TestContextBuilder::new().build();
        let page = ExecutionsPage::build(&ctx, "ghost").await;
        assert!(page.executions.is_empty());
        assert_eq!(page.job_name, "ghost");
    }

    #[tokio::test]
    async fn test_store_failure_is_empty() {
        let ctx = TestContextBuilder::new()
            .jobs(MockJobStore::new().failing("store unreachable"))
            .build();

        let page = ExecutionsPage::build(&ctx, "backup").await;
        assert!(page.executions.is_empty());
    }
}
