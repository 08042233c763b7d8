// src/orchestrator.rs

//! Development and production sequences, `clean`, and single-task commands.
//!
//! Sequence steps run strictly in order. A failed transform is reported by
//! the notifier and the sequence moves on to the next step.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::{ConfigFile, validate_project_layout};
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent};
use crate::errors::{FrontendError, Result};
use crate::exec::{RealExecutorBackend, execute};
use crate::fs::FileSystem;
use crate::notifier::Notifier;
use crate::server::{ReloadHub, ServerHandle, router, spawn_server};
use crate::styleguide;
use crate::tasks::TaskContext;
use crate::types::{BuildConfig, TaskKind, TaskOutcome};
use crate::watch::{build_registrations, spawn_watcher};

/// Outcome of every step of a one-shot sequence, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceReport {
    pub steps: Vec<(TaskKind, TaskOutcome)>,
}

impl SequenceReport {
    pub fn failed(&self) -> Vec<TaskKind> {
        self.steps
            .iter()
            .filter(|(_, outcome)| !outcome.is_success())
            .map(|(task, _)| *task)
            .collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed().is_empty()
    }

    /// `Err(TasksFailed)` when any step failed.
    pub fn into_result(self) -> Result<Self> {
        let failed = self.failed();
        if failed.is_empty() {
            return Ok(self);
        }
        let tasks = failed
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(FrontendError::TasksFailed {
            count: failed.len(),
            tasks,
        })
    }
}

/// Tasks built once before the dev server starts.
pub fn development_sequence() -> Vec<TaskKind> {
    TaskKind::TRANSFORMS.to_vec()
}

/// Tasks of the production build; the styleguide export comes last.
pub fn production_sequence(cfg: &ConfigFile) -> Vec<TaskKind> {
    let mut steps = TaskKind::TRANSFORMS.to_vec();
    if cfg.styleguide().enabled {
        steps.push(TaskKind::Styleguide);
    }
    steps
}

/// Run `steps` one after another with recovery.
pub async fn run_sequence(
    ctx: &TaskContext,
    notifier: &Arc<dyn Notifier>,
    steps: &[TaskKind],
) -> SequenceReport {
    let mut report = SequenceReport::default();
    for &task in steps {
        let outcome = execute(task, ctx.clone(), Arc::clone(notifier)).await;
        report.steps.push((task, outcome));
    }
    report
}

/// Minified build without source maps, then the static styleguide export.
///
/// Runs every step even when an earlier one fails; the returned error lists
/// the failed tasks.
pub async fn production(
    fs: Arc<dyn FileSystem>,
    cfg: Arc<ConfigFile>,
    notifier: Arc<dyn Notifier>,
) -> Result<SequenceReport> {
    validate_project_layout(&cfg, fs.as_ref())?;

    let ctx = TaskContext::new(fs, Arc::clone(&cfg), BuildConfig::production());
    info!(mode = ctx.build.mode_name(), "starting production build");

    let report = run_sequence(&ctx, &notifier, &production_sequence(&cfg)).await;
    report.into_result()
}

/// One task, once.
pub async fn single(
    task: TaskKind,
    fs: Arc<dyn FileSystem>,
    cfg: Arc<ConfigFile>,
    build: BuildConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<SequenceReport> {
    validate_project_layout(&cfg, fs.as_ref())?;

    let ctx = TaskContext::new(fs, cfg, build);
    run_sequence(&ctx, &notifier, &[task]).await.into_result()
}

/// Remove the build output tree. A missing tree is fine.
pub fn clean(fs: &dyn FileSystem, cfg: &ConfigFile) -> Result<()> {
    let dir = cfg.clean_dir();
    fs.remove_dir_all(&dir)?;
    info!(dir = ?dir, "cleaned");
    Ok(())
}

/// Servers started by the development sequence.
#[derive(Debug)]
pub struct DevServers {
    pub site: ServerHandle,
    pub styleguide: Option<ServerHandle>,
}

impl DevServers {
    pub fn abort(&self) {
        self.site.abort();
        if let Some(sg) = &self.styleguide {
            sg.abort();
        }
    }
}

/// Build once, serve, then rebuild on change until Ctrl-C.
pub async fn development(
    fs: Arc<dyn FileSystem>,
    cfg: Arc<ConfigFile>,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    validate_project_layout(&cfg, fs.as_ref())?;

    let ctx = TaskContext::new(fs, Arc::clone(&cfg), BuildConfig::development());
    let initial = run_sequence(&ctx, &notifier, &development_sequence()).await;
    if !initial.all_succeeded() {
        warn!(failed = ?initial.failed(), "initial build had failures; watching anyway");
    }

    let site_hub = ReloadHub::new();
    let styleguide_hub = ReloadHub::new();
    let servers = start_servers(&ctx, &notifier, site_hub.clone(), styleguide_hub.clone()).await?;

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let executor = RealExecutorBackend::new(rt_tx.clone(), ctx.clone(), Arc::clone(&notifier));

    let _watcher = spawn_watcher(
        cfg.root(),
        build_registrations(&cfg)?,
        rt_tx.clone(),
        Duration::from_millis(cfg.server().debounce_ms),
    )?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let mut runtime = Runtime::new(CoreRuntime::new(), rt_rx, executor)
        .with_site_reload(site_hub);
    if servers.styleguide.is_some() {
        runtime = runtime.with_styleguide_reload(styleguide_hub);
    }

    let result = runtime.run().await;
    servers.abort();
    result
}

/// Start the site server over the build output and, when enabled, export
/// and serve the styleguide.
pub async fn start_servers(
    ctx: &TaskContext,
    notifier: &Arc<dyn Notifier>,
    site_hub: ReloadHub,
    styleguide_hub: ReloadHub,
) -> Result<DevServers> {
    let cfg = &ctx.config;

    let styleguide = if cfg.styleguide().enabled {
        execute(TaskKind::Styleguide, ctx.clone(), Arc::clone(notifier)).await;
        Some(styleguide::serve(ctx, styleguide_hub).await?)
    } else {
        None
    };

    let server = cfg.server();
    let app = router(cfg.clean_dir(), &[], site_hub);
    let site = match spawn_server("site", &server.host, server.port, app).await {
        Ok(site) => site,
        Err(err) => {
            if let Some(sg) = &styleguide {
                sg.abort();
            }
            return Err(err);
        }
    };

    info!(url = %site.url(), "dev server ready");
    if let Some(sg) = &styleguide {
        info!(url = %sg.url(), "styleguide ready");
    }

    Ok(DevServers { site, styleguide })
}
