// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use std::collections::BTreeSet;

use tracing::debug;

use crate::engine::queue::TriggerQueue;
use crate::engine::TriggerReason;
use crate::types::{TaskKind, TaskOutcome};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Send these tasks to the executor.
    DispatchTasks(Vec<TaskKind>),
    /// Tell connected browsers that `task` produced fresh output.
    Reload(TaskKind),
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

/// Handle a task trigger event.
///
/// - Idle task: mark it running and dispatch it.
/// - Running task: record one coalesced follow-up run.
pub fn handle_task_trigger(
    running: &mut BTreeSet<TaskKind>,
    queue: &mut TriggerQueue,
    task: TaskKind,
    reason: TriggerReason,
) -> CoreStep {
    let mut commands = Vec::new();

    if running.contains(&task) {
        debug!(task = %task, ?reason, "task busy; coalescing trigger");
        queue.record_trigger(task);
    } else {
        running.insert(task);
        commands.push(CoreCommand::DispatchTasks(vec![task]));
    }

    CoreStep {
        commands,
        keep_running: true,
    }
}

/// Handle a task completion event.
///
/// A successful run pushes a reload. A queued follow-up for the same task is
/// dispatched right away.
pub fn handle_task_completion(
    running: &mut BTreeSet<TaskKind>,
    queue: &mut TriggerQueue,
    task: TaskKind,
    outcome: TaskOutcome,
) -> CoreStep {
    let mut commands = Vec::new();

    if !running.remove(&task) {
        debug!(task = %task, "completion for a task that was not running; ignoring");
        return CoreStep {
            commands,
            keep_running: true,
        };
    }

    if outcome.is_success() {
        commands.push(CoreCommand::Reload(task));
    }

    if queue.take(task) {
        running.insert(task);
        commands.push(CoreCommand::DispatchTasks(vec![task]));
    }

    CoreStep {
        commands,
        keep_running: true,
    }
}
