// src/exec/task_runner.rs

//! Individual task runner.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::engine::RuntimeEvent;
use crate::notifier::{Notifier, TaskFailure};
use crate::tasks::{self, TaskContext, run_with_recovery};
use crate::types::{TaskKind, TaskOutcome};

/// Run one task on the blocking pool and report `TaskCompleted`.
pub async fn run_task(
    task: TaskKind,
    ctx: TaskContext,
    notifier: Arc<dyn Notifier>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) {
    let outcome = execute(task, ctx, notifier).await;

    if let Err(err) = runtime_tx
        .send(RuntimeEvent::TaskCompleted { task, outcome })
        .await
    {
        warn!(task = %task, error = %err, "runtime gone; dropping completion");
    }
}

/// Run one task on the blocking pool and return its outcome.
///
/// Transform errors are handled by [`run_with_recovery`]; a panic inside the
/// compiler is reported the same way and counts as a failed run.
pub async fn execute(task: TaskKind, ctx: TaskContext, notifier: Arc<dyn Notifier>) -> TaskOutcome {
    info!(task = %task, mode = ctx.build.mode_name(), "starting task");

    let blocking_notifier = Arc::clone(&notifier);
    let joined = tokio::task::spawn_blocking(move || {
        run_with_recovery(task, blocking_notifier.as_ref(), || tasks::run(task, &ctx))
    })
    .await;

    match joined {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(task = %task, error = %err, "task panicked");
            notifier.notify(&TaskFailure {
                task,
                message: format!("task panicked: {err}"),
            });
            TaskOutcome::Failed
        }
    }
}
