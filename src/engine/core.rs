// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces:
//! - an updated core state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - sending tasks to the executor
//! - pushing reload events to browsers
//!
//! The core is intended to be extensively unit tested without any Tokio,
//! channels, filesystem, or compilers.

use std::collections::BTreeSet;

use crate::engine::event_handlers::{CoreStep, handle_task_completion, handle_task_trigger};
use crate::engine::queue::TriggerQueue;
use crate::engine::RuntimeEvent;
use crate::types::TaskKind;

/// Pure core runtime state.
///
/// Invariant: a task is dispatched only when it is not in `running`, so
/// each task has at most one run in flight.
#[derive(Debug, Default)]
pub struct CoreRuntime {
    running: BTreeSet<TaskKind>,
    queue: TriggerQueue,
}

impl CoreRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no task is running.
    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    pub fn is_running(&self, task: TaskKind) -> bool {
        self.running.contains(&task)
    }

    /// Expose queue emptiness (for tests).
    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::TaskTriggered { task, reason } => {
                handle_task_trigger(&mut self.running, &mut self.queue, task, reason)
            }
            RuntimeEvent::TaskCompleted { task, outcome } => {
                handle_task_completion(&mut self.running, &mut self.queue, task, outcome)
            }
            RuntimeEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }
}
