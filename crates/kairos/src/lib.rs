//! KAIROS - read-only web dashboard for a distributed job scheduler.
//!
//! The runtime serves cluster status, the job list and per-job execution
//! history, all read live from the coordination store.

mod runtime;

pub use runtime::{Kairos, KairosBuilder};
