// src/tasks/sources.rs

//! Expanding source globs into concrete files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::paths::literal_prefix;
use crate::fs::{FileSystem, relative_path};

/// Collect every file under `root` matched by `is_match`, sorted.
///
/// Only the literal prefix directory of each pattern is walked, so
/// `src/style/main.scss` never scans the rest of the project.
pub fn collect_matching(
    fs: &dyn FileSystem,
    root: &Path,
    patterns: &[String],
    is_match: impl Fn(&str) -> bool,
) -> Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();

    for pattern in patterns {
        let start = root.join(literal_prefix(pattern));

        if fs.is_file(&start) {
            if let Some(rel) = relative_path(root, &start) {
                if is_match(&rel) {
                    found.insert(start);
                }
            }
            continue;
        }
        if !fs.is_dir(&start) {
            continue;
        }

        let mut stack = vec![start];
        while let Some(dir) = stack.pop() {
            for path in fs.read_dir(&dir)? {
                if fs.is_dir(&path) {
                    stack.push(path);
                } else if fs.is_file(&path) {
                    if let Some(rel) = relative_path(root, &path) {
                        if is_match(&rel) {
                            found.insert(path);
                        }
                    }
                }
            }
        }
    }

    Ok(found.into_iter().collect())
}

/// Files anywhere under `dir` with the given extension, sorted.
pub fn files_with_extension(fs: &dyn FileSystem, dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();
    if !fs.is_dir(dir) {
        return Ok(Vec::new());
    }

    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for path in fs.read_dir(&current)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) && path.extension().is_some_and(|e| e == ext) {
                found.insert(path);
            }
        }
    }

    Ok(found.into_iter().collect())
}
