// src/notifier.rs

//! Surfacing transform failures to the developer.

use std::fmt::Debug;
use std::io::Write;

use tracing::error;

use crate::config::NotificationSection;
use crate::types::TaskKind;

/// A transform run that ended with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub task: TaskKind,
    pub message: String,
}

/// Receives every failure caught by [`crate::tasks::run_with_recovery`].
pub trait Notifier: Send + Sync + Debug {
    fn notify(&self, failure: &TaskFailure);
}

/// Logs the failure and prints a banner on stderr.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    title: String,
    sound: bool,
}

impl ConsoleNotifier {
    pub fn new(settings: &NotificationSection) -> Self {
        Self {
            title: settings.title.clone(),
            sound: settings.sound,
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, failure: &TaskFailure) {
        error!(task = %failure.task, error = %failure.message, "task failed");

        let mut stderr = std::io::stderr().lock();
        let bell = if self.sound { "\x07" } else { "" };
        let _ = writeln!(
            stderr,
            "{bell}{}: Failure! [{}]\n{}",
            self.title, failure.task, failure.message
        );
    }
}
