use std::sync::{Arc, Mutex};

use frontend_build::notifier::{Notifier, TaskFailure};
use frontend_build::types::TaskKind;

/// Notifier that keeps every failure for later assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    failures: Arc<Mutex<Vec<TaskFailure>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<TaskFailure> {
        self.failures.lock().unwrap().clone()
    }

    pub fn failed_tasks(&self) -> Vec<TaskKind> {
        self.failures().iter().map(|f| f.task).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, failure: &TaskFailure) {
        self.failures.lock().unwrap().push(failure.clone());
    }
}
