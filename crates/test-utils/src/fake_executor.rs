use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use frontend_build::engine::RuntimeEvent;
use frontend_build::errors::Result;
use frontend_build::exec::ExecutorBackend;
use frontend_build::types::{TaskKind, TaskOutcome};
use tokio::sync::mpsc;

/// A fake executor that:
/// - records which tasks were "run"
/// - immediately reports TaskCompleted for each dispatched task, with the
///   outcome configured for that task (success by default)
/// - optionally requests shutdown once a number of runs have completed, so
///   a test's runtime loop ends on its own.
pub struct FakeExecutor {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    executed: Arc<Mutex<Vec<TaskKind>>>,
    failing: Vec<TaskKind>,
    shutdown_after: Option<usize>,
}

impl FakeExecutor {
    pub fn new(runtime_tx: mpsc::Sender<RuntimeEvent>, executed: Arc<Mutex<Vec<TaskKind>>>) -> Self {
        Self {
            runtime_tx,
            executed,
            failing: Vec::new(),
            shutdown_after: None,
        }
    }

    /// Report `task` as failed every time it runs.
    pub fn failing(mut self, task: TaskKind) -> Self {
        self.failing.push(task);
        self
    }

    /// Send `ShutdownRequested` right after the `runs`-th completion.
    pub fn shutdown_after(mut self, runs: usize) -> Self {
        self.shutdown_after = Some(runs);
        self
    }
}

impl ExecutorBackend for FakeExecutor {
    fn spawn_ready_tasks(
        &mut self,
        tasks: Vec<TaskKind>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();
        let executed = Arc::clone(&self.executed);

        let mut events = Vec::new();
        for task in tasks {
            let outcome = if self.failing.contains(&task) {
                TaskOutcome::Failed
            } else {
                TaskOutcome::Success
            };
            events.push((task, RuntimeEvent::TaskCompleted { task, outcome }));

            if let Some(remaining) = self.shutdown_after.as_mut() {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    self.shutdown_after = None;
                    events.push((task, RuntimeEvent::ShutdownRequested));
                }
            }
        }

        Box::pin(async move {
            for (task, event) in events {
                if matches!(event, RuntimeEvent::TaskCompleted { .. }) {
                    executed.lock().unwrap().push(task);
                }
                tx.send(event).await.map_err(anyhow::Error::from)?;
            }
            Ok(())
        })
    }
}
