// tests/core_runtime.rs

use frontend_build::engine::{CoreCommand, CoreRuntime, RuntimeEvent, TriggerReason};
use frontend_build::types::{TaskKind, TaskOutcome};

fn trigger(task: TaskKind) -> RuntimeEvent {
    RuntimeEvent::TaskTriggered {
        task,
        reason: TriggerReason::FileWatch,
    }
}

fn completed(task: TaskKind, outcome: TaskOutcome) -> RuntimeEvent {
    RuntimeEvent::TaskCompleted { task, outcome }
}

#[test]
fn idle_task_is_dispatched_immediately() {
    let mut core = CoreRuntime::new();

    let step = core.step(trigger(TaskKind::Styles));

    assert_eq!(
        step.commands,
        vec![CoreCommand::DispatchTasks(vec![TaskKind::Styles])]
    );
    assert!(step.keep_running);
    assert!(core.is_running(TaskKind::Styles));
}

#[test]
fn triggers_while_running_coalesce_into_one_follow_up() {
    let mut core = CoreRuntime::new();

    core.step(trigger(TaskKind::Styles));
    for _ in 0..3 {
        let step = core.step(trigger(TaskKind::Styles));
        assert!(step.commands.is_empty(), "busy task must not be dispatched again");
    }
    assert!(!core.queue_is_empty());

    let step = core.step(completed(TaskKind::Styles, TaskOutcome::Success));
    assert_eq!(
        step.commands,
        vec![
            CoreCommand::Reload(TaskKind::Styles),
            CoreCommand::DispatchTasks(vec![TaskKind::Styles]),
        ]
    );

    let step = core.step(completed(TaskKind::Styles, TaskOutcome::Success));
    assert_eq!(step.commands, vec![CoreCommand::Reload(TaskKind::Styles)]);
    assert!(core.is_idle());
}

#[test]
fn different_tasks_run_side_by_side() {
    let mut core = CoreRuntime::new();

    core.step(trigger(TaskKind::Styles));
    let step = core.step(trigger(TaskKind::Scripts));

    assert_eq!(
        step.commands,
        vec![CoreCommand::DispatchTasks(vec![TaskKind::Scripts])]
    );
    assert!(core.is_running(TaskKind::Styles));
    assert!(core.is_running(TaskKind::Scripts));
}

#[test]
fn failed_run_pushes_no_reload() {
    let mut core = CoreRuntime::new();
    core.step(trigger(TaskKind::Markup));

    let step = core.step(completed(TaskKind::Markup, TaskOutcome::Failed));

    assert!(step.commands.is_empty());
    assert!(step.keep_running);
    assert!(core.is_idle());
}

#[test]
fn stray_completion_is_ignored() {
    let mut core = CoreRuntime::new();

    let step = core.step(completed(TaskKind::Icons, TaskOutcome::Success));

    assert!(step.commands.is_empty());
    assert!(step.keep_running);
}

#[test]
fn going_idle_keeps_watching() {
    let mut core = CoreRuntime::new();
    core.step(trigger(TaskKind::Styles));
    core.step(trigger(TaskKind::Scripts));
    core.step(completed(TaskKind::Styles, TaskOutcome::Success));

    let step = core.step(completed(TaskKind::Scripts, TaskOutcome::Failed));

    assert!(core.is_idle());
    assert!(step.keep_running);
    assert!(step.commands.is_empty());
}

#[test]
fn shutdown_stops_the_loop() {
    let mut core = CoreRuntime::new();
    core.step(trigger(TaskKind::Styles));

    let step = core.step(RuntimeEvent::ShutdownRequested);

    assert!(!step.keep_running);
}
