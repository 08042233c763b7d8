// tests/runtime_fake_executor.rs

use std::error::Error;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use frontend_build::engine::{CoreRuntime, Runtime, RuntimeEvent, TriggerReason};
use frontend_build::server::{ReloadEvent, ReloadHub};
use frontend_build::types::TaskKind;
use frontend_build_test_utils::fake_executor::FakeExecutor;
use frontend_build_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn style_trigger_runs_styles_and_pushes_css_reload() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(16);
    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(tx.clone(), Arc::clone(&executed)).shutdown_after(1);

    let site = ReloadHub::new();
    let mut site_rx = site.subscribe();
    let styleguide = ReloadHub::new();
    let mut styleguide_rx = styleguide.subscribe();

    tx.send(RuntimeEvent::TaskTriggered {
        task: TaskKind::Styles,
        reason: TriggerReason::FileWatch,
    })
    .await?;

    let runtime = Runtime::new(CoreRuntime::new(), rx, executor)
        .with_site_reload(site)
        .with_styleguide_reload(styleguide);
    with_timeout(runtime.run()).await?;

    assert_eq!(*executed.lock().unwrap(), vec![TaskKind::Styles]);
    assert_eq!(site_rx.try_recv()?, ReloadEvent::Css);
    assert_eq!(styleguide_rx.try_recv()?, ReloadEvent::Css);
    Ok(())
}

#[tokio::test]
async fn failed_run_pushes_nothing() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(16);
    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor =
        FakeExecutor::new(tx.clone(), Arc::clone(&executed))
        .failing(TaskKind::Markup)
        .shutdown_after(1);

    let site = ReloadHub::new();
    let mut site_rx = site.subscribe();

    tx.send(RuntimeEvent::TaskTriggered {
        task: TaskKind::Markup,
        reason: TriggerReason::FileWatch,
    })
    .await?;

    let runtime =
        Runtime::new(CoreRuntime::new(), rx, executor).with_site_reload(site);
    with_timeout(runtime.run()).await?;

    assert_eq!(*executed.lock().unwrap(), vec![TaskKind::Markup]);
    assert!(site_rx.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn styleguide_rebuild_reloads_only_the_styleguide() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(16);
    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(tx.clone(), Arc::clone(&executed)).shutdown_after(1);

    let site = ReloadHub::new();
    let mut site_rx = site.subscribe();
    let styleguide = ReloadHub::new();
    let mut styleguide_rx = styleguide.subscribe();

    tx.send(RuntimeEvent::TaskTriggered {
        task: TaskKind::Styleguide,
        reason: TriggerReason::FileWatch,
    })
    .await?;

    let runtime = Runtime::new(CoreRuntime::new(), rx, executor)
        .with_site_reload(site)
        .with_styleguide_reload(styleguide);
    with_timeout(runtime.run()).await?;

    assert!(site_rx.try_recv().is_err());
    assert_eq!(styleguide_rx.try_recv()?, ReloadEvent::Reload);
    Ok(())
}

#[tokio::test]
async fn shutdown_ends_the_loop_without_running_anything() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(16);
    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(tx.clone(), Arc::clone(&executed));

    tx.send(RuntimeEvent::ShutdownRequested).await?;

    let runtime = Runtime::new(CoreRuntime::new(), rx, executor);
    with_timeout(runtime.run()).await?;

    assert!(executed.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn trigger_during_a_run_reruns_once() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(16);
    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(tx.clone(), Arc::clone(&executed)).shutdown_after(2);

    for _ in 0..3 {
        tx.send(RuntimeEvent::TaskTriggered {
            task: TaskKind::Scripts,
            reason: TriggerReason::FileWatch,
        })
        .await?;
    }

    let runtime = Runtime::new(CoreRuntime::new(), rx, executor);
    with_timeout(runtime.run()).await?;

    assert_eq!(*executed.lock().unwrap(), vec![TaskKind::Scripts, TaskKind::Scripts]);
    Ok(())
}
