use askama::Template;

use kairos_core::job::{Job, JobStore};
use kairos_core::Fetched;

use super::common::CommonViewData;
use super::format::TimeDisplay;
use crate::context::AgentContext;

/// A job plus its derived success classification.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRow {
    pub job: Job,
    success: bool,
}

impl JobRow {
    pub fn new(job: Job) -> Self {
        let success = job.is_success();
        Self { job, success }
    }

    /// Whether the job's last success post-dates its last failure.
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn status_class(&self) -> &'static str {
        if self.success {
            "status-success"
        } else {
            "status-failed"
        }
    }
}

/// Every known job, in store order. A store failure is an empty list.
pub async fn list_jobs(store: &dyn JobStore) -> Vec<Job> {
    Fetched::from_result(store.list_jobs().await, "Job listing").into_value()
}

/// Job list page.
#[derive(Template)]
#[template(path = "jobs.html")]
pub struct JobListPage {
    pub base: String,
    pub common: CommonViewData,
    pub jobs: Vec<JobRow>,
}

impl JobListPage {
    pub async fn build(ctx: &AgentContext) -> Self {
        let (common, jobs) = tokio::join!(
            CommonViewData::build(ctx),
            list_jobs(ctx.jobs.as_ref())
        );

        Self {
            base: ctx.path_prefix.clone(),
            common,
            jobs: jobs.into_iter().map(JobRow::new).collect(),
        }
    }
}
