// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::ExecutorBackend;
use crate::server::{ReloadEvent, ReloadHub};
use crate::types::TaskKind;

use super::core::CoreRuntime;
use super::{CoreCommand, RuntimeEvent};

/// Drives the watch-mode task scheduling in response to `RuntimeEvent`s,
/// and delegates actual task execution to an `ExecutorBackend`.
///
/// This is a pure IO shell around `CoreRuntime`, which contains all the
/// runtime semantics. This struct handles async IO: reading events from
/// channels, dispatching tasks to the executor and pushing reloads.
pub struct Runtime<E: ExecutorBackend> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    executor: E,
    site_reload: Option<ReloadHub>,
    styleguide_reload: Option<ReloadHub>,
}

impl<E: ExecutorBackend> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> Runtime<E> {
    pub fn new(core: CoreRuntime, event_rx: mpsc::Receiver<RuntimeEvent>, executor: E) -> Self {
        Self {
            core,
            event_rx,
            executor,
            site_reload: None,
            styleguide_reload: None,
        }
    }

    /// Push reloads for transform output to browsers on the dev server.
    pub fn with_site_reload(mut self, hub: ReloadHub) -> Self {
        self.site_reload = Some(hub);
        self
    }

    /// Push reloads to browsers on the styleguide server.
    pub fn with_styleguide_reload(mut self, hub: ReloadHub) -> Self {
        self.styleguide_reload = Some(hub);
        self
    }

    /// Main event loop.
    ///
    /// - Consumes `RuntimeEvent`s from `event_rx`.
    /// - Feeds them into the core runtime.
    /// - Executes commands returned by the core (dispatch, reload, exit).
    pub async fn run(mut self) -> Result<()> {
        info!("watch runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("shutdown requested; stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(())
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::DispatchTasks(tasks) => {
                if !tasks.is_empty() {
                    debug!(?tasks, "dispatching tasks");
                    self.executor.spawn_ready_tasks(tasks).await?;
                }
            }
            CoreCommand::Reload(task) => self.push_reload(task),
        }
        Ok(())
    }

    fn push_reload(&self, task: TaskKind) {
        let event = ReloadEvent::from(task.reload_kind());

        if task != TaskKind::Styleguide {
            if let Some(hub) = &self.site_reload {
                hub.notify(event);
            }
        }

        // Styleguide previews link the build output, so every change
        // refreshes them as well.
        if let Some(hub) = &self.styleguide_reload {
            hub.notify(event);
        }
    }
}
