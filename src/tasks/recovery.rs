// src/tasks/recovery.rs

use std::time::Instant;

use anyhow::Result;
use tracing::info;

use crate::notifier::{Notifier, TaskFailure};
use crate::tasks::TaskReport;
use crate::types::{TaskKind, TaskOutcome};

/// Run `f` as one run of `task`, turning an error into a notification.
///
/// The error ends this run only; the caller keeps going.
pub fn run_with_recovery<F>(task: TaskKind, notifier: &dyn Notifier, f: F) -> TaskOutcome
where
    F: FnOnce() -> Result<TaskReport>,
{
    let started = Instant::now();

    match f() {
        Ok(report) => {
            info!(
                task = %task,
                files = report.written.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "task finished"
            );
            TaskOutcome::Success
        }
        Err(err) => {
            notifier.notify(&TaskFailure {
                task,
                message: format!("{err:#}"),
            });
            TaskOutcome::Failed
        }
    }
}
