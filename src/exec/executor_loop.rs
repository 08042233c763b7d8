// src/exec/executor_loop.rs

//! Main executor loop that runs dispatched tasks.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::engine::RuntimeEvent;
use crate::exec::task_runner::run_task;
use crate::notifier::Notifier;
use crate::tasks::TaskContext;
use crate::types::TaskKind;

/// Spawn the background executor loop.
///
/// The returned `mpsc::Sender<TaskKind>` is what `RealExecutorBackend` uses
/// to dispatch. Each task runs in its own Tokio task, so different tasks
/// proceed in parallel; the core never dispatches a task that is still
/// running.
pub fn spawn_executor(
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    ctx: TaskContext,
    notifier: Arc<dyn Notifier>,
) -> mpsc::Sender<TaskKind> {
    let (tx, mut rx) = mpsc::channel::<TaskKind>(32);

    tokio::spawn(async move {
        info!("executor loop started");

        while let Some(task) = rx.recv().await {
            let ctx = ctx.clone();
            let notifier = Arc::clone(&notifier);
            let rt_tx = runtime_tx.clone();
            tokio::spawn(run_task(task, ctx, notifier, rt_tx));
        }

        info!("executor loop finished (channel closed)");
    });

    tx
}
