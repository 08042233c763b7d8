// src/watch/watcher.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::{RuntimeEvent, TriggerReason};
use crate::fs::RealFileSystem;
use crate::tasks::sources::collect_matching;
use crate::watch::cache::FileCache;
use crate::watch::event_handler::tasks_for_batch;
use crate::watch::patterns::WatchRegistration;

/// Keeps the OS watcher alive; dropping it stops watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher that observes `root` recursively and sends
/// `RuntimeEvent::TaskTriggered` for tasks whose registrations match a
/// changed path.
///
/// - `root` is the project root against which all glob patterns are evaluated.
/// - `registrations` binds watch globs to tasks.
/// - `debounce` is the quiet period that closes a batch of events.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    registrations: Vec<WatchRegistration>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    debounce: Duration,
) -> Result<WatcherHandle> {
    let root = root.into();
    let root = root.canonicalize().unwrap_or(root);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                // Only fails once the batching loop is gone.
                let _ = event_tx.send(event);
            }
            Err(err) => warn!(error = %err, "file watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;
    info!("file watcher started on {:?}", root);

    let cache = primed_cache(&root, &registrations);
    let registrations = Arc::new(registrations);

    tokio::spawn(async move {
        let mut cache = cache;

        while let Some(first) = event_rx.recv().await {
            let mut paths = BTreeSet::new();
            collect_paths(&first, &mut paths);

            // Keep extending the batch until the tree has been quiet for
            // `debounce`.
            loop {
                tokio::select! {
                    next = event_rx.recv() => match next {
                        Some(event) => collect_paths(&event, &mut paths),
                        None => break,
                    },
                    _ = tokio::time::sleep(debounce) => break,
                }
            }

            if paths.is_empty() {
                continue;
            }
            debug!(count = paths.len(), "processing change batch");

            let batch_root = root.clone();
            let batch_regs = Arc::clone(&registrations);
            let joined = tokio::task::spawn_blocking(move || {
                let tasks = tasks_for_batch(&batch_root, &paths, &batch_regs, &mut cache);
                (tasks, cache)
            })
            .await;

            let tasks = match joined {
                Ok((tasks, returned)) => {
                    cache = returned;
                    tasks
                }
                Err(err) => {
                    warn!(error = %err, "change batch processing failed");
                    cache = FileCache::new();
                    continue;
                }
            };

            for task in tasks {
                debug!(task = %task, "watch match -> triggering task");
                if runtime_tx
                    .send(RuntimeEvent::TaskTriggered {
                        task,
                        reason: TriggerReason::FileWatch,
                    })
                    .await
                    .is_err()
                {
                    // If the runtime channel is closed, there's no point
                    // keeping the watcher loop alive.
                    debug!("runtime channel closed; stopping watcher loop");
                    return;
                }
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}

fn collect_paths(event: &Event, paths: &mut BTreeSet<PathBuf>) {
    if matches!(event.kind, EventKind::Access(_)) {
        return;
    }
    paths.extend(event.paths.iter().cloned());
}

/// Hash every currently watched file so the first no-op save is ignored.
fn primed_cache(root: &Path, registrations: &[WatchRegistration]) -> FileCache {
    let mut cache = FileCache::new();
    let fs = RealFileSystem;

    for registration in registrations {
        match collect_matching(&fs, root, registration.patterns(), |rel| {
            registration.matches(rel)
        }) {
            Ok(files) => files.iter().for_each(|f| cache.prime(f)),
            Err(err) => debug!(task = %registration.task(), error = %err, "could not prime hashes"),
        }
    }

    cache
}
