// src/watch/event_handler.rs

//! Turning a batch of changed paths into task triggers.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::watch::cache::FileCache;
use crate::fs::relative_path;
use crate::watch::patterns::WatchRegistration;
use crate::types::TaskKind;

/// Tasks whose registrations match `rel_path`.
pub fn tasks_for_path(registrations: &[WatchRegistration], rel_path: &str) -> BTreeSet<TaskKind> {
    registrations
        .iter()
        .filter(|r| r.matches(rel_path))
        .map(|r| r.task())
        .collect()
}

/// Map one debounced batch of paths to the set of tasks to trigger.
///
/// Each task appears at most once per batch. Paths outside the root, paths
/// no registration watches, and files whose content did not change are
/// ignored.
pub fn tasks_for_batch(
    root: &Path,
    paths: &BTreeSet<PathBuf>,
    registrations: &[WatchRegistration],
    cache: &mut FileCache,
) -> BTreeSet<TaskKind> {
    let mut tasks = BTreeSet::new();

    for path in paths {
        let rel = match relative_path(root, path) {
            Some(s) => s,
            None => {
                warn!("could not relativize path {:?} against root {:?}", path, root);
                continue;
            }
        };

        let matching = tasks_for_path(registrations, &rel);
        if matching.is_empty() {
            continue;
        }

        if !cache.has_changed(path) {
            debug!(path = %rel, "content unchanged; skipping");
            continue;
        }

        debug!(path = %rel, ?matching, "watch match");
        tasks.extend(matching);
    }

    tasks
}
