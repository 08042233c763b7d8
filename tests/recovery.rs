// tests/recovery.rs

use std::path::PathBuf;

use anyhow::{Context, anyhow};

use frontend_build::config::NotificationSection;
use frontend_build::notifier::{ConsoleNotifier, Notifier, TaskFailure};
use frontend_build::tasks::{TaskReport, run_with_recovery};
use frontend_build::types::{TaskKind, TaskOutcome};
use frontend_build_test_utils::notifier::RecordingNotifier;

#[test]
fn success_notifies_nobody() {
    let notifier = RecordingNotifier::new();

    let outcome = run_with_recovery(TaskKind::Styles, &notifier, || {
        Ok(TaskReport {
            written: vec![PathBuf::from("build/css/main.css")],
        })
    });

    assert_eq!(outcome, TaskOutcome::Success);
    assert!(notifier.failures().is_empty());
}

#[test]
fn error_chain_reaches_the_notifier() {
    let notifier = RecordingNotifier::new();

    let outcome = run_with_recovery(TaskKind::Scripts, &notifier, || {
        Err(anyhow!("unexpected token")).context("src/js/main.js")
    });

    assert_eq!(outcome, TaskOutcome::Failed);
    assert_eq!(
        notifier.failures(),
        vec![TaskFailure {
            task: TaskKind::Scripts,
            message: "src/js/main.js: unexpected token".to_string(),
        }]
    );
}

#[test]
fn every_failure_is_reported_separately() {
    let notifier = RecordingNotifier::new();

    for task in [TaskKind::Icons, TaskKind::Markup, TaskKind::Icons] {
        run_with_recovery(task, &notifier, || Err(anyhow!("boom")));
    }

    assert_eq!(
        notifier.failed_tasks(),
        vec![TaskKind::Icons, TaskKind::Markup, TaskKind::Icons]
    );
}

#[test]
fn console_notifier_does_not_panic() {
    let notifier = ConsoleNotifier::new(&NotificationSection {
        title: "Site".to_string(),
        sound: false,
    });

    notifier.notify(&TaskFailure {
        task: TaskKind::Styles,
        message: "Undefined variable.".to_string(),
    });
}
