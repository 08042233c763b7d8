// src/engine/queue.rs

use std::collections::BTreeSet;

use tracing::debug;

use crate::types::TaskKind;

/// Triggers that arrived while their task was already running.
///
/// Semantics:
/// - Each task has at most one pending follow-up run, however many times it
///   was triggered while running. Five saves during one style compile give
///   exactly one more compile.
/// - The follow-up is taken when that task's current run completes, so
///   pending runs of one task never wait on other tasks.
#[derive(Debug, Default)]
pub struct TriggerQueue {
    pending: BTreeSet<TaskKind>,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no queued triggers.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether `task` has a follow-up run queued.
    pub fn contains(&self, task: TaskKind) -> bool {
        self.pending.contains(&task)
    }

    /// Record that `task` was triggered while running.
    pub fn record_trigger(&mut self, task: TaskKind) {
        let inserted = self.pending.insert(task);
        debug!(task = %task, inserted, "queued follow-up run");
    }

    /// Remove and report the pending follow-up for `task`, if any.
    pub fn take(&mut self, task: TaskKind) -> bool {
        self.pending.remove(&task)
    }
}
