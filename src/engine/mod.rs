// src/engine/mod.rs

//! Watch-mode orchestration engine.
//!
//! This module ties together:
//! - the trigger queue (what happens when a task is triggered while it runs)
//! - the main runtime event loop that reacts to:
//!   - file-watch triggers
//!   - task completion events
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use crate::types::{TaskKind, TaskOutcome};

/// Why a task was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// Triggered due to a filesystem event.
    FileWatch,
}

/// Events flowing into the runtime from the watcher, executor and signals.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A task should run.
    TaskTriggered {
        task: TaskKind,
        reason: TriggerReason,
    },
    /// A task run finished.
    TaskCompleted {
        task: TaskKind,
        outcome: TaskOutcome,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod queue;
pub mod runtime;

pub use core::CoreRuntime;
pub use event_handlers::{CoreCommand, CoreStep};
pub use queue::TriggerQueue;
pub use runtime::Runtime;
