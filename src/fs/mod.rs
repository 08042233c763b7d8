// src/fs/mod.rs

//! Filesystem seam used by the transform tasks and the styleguide.
//!
//! Tasks only touch the disk through [`FileSystem`], so tests can run them
//! against [`mock::MockFileSystem`] without a temp directory.

use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace `path` with `contents`, creating parent directories.
    ///
    /// Readers never observe a half-written file.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Remove a file. Missing files are not an error.
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Recursively remove a directory. A missing directory is not an error.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("reading file {:?}", path))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }

        // Write next to the target and rename over it.
        let tmp = temp_sibling(path);
        {
            let mut file =
                fs::File::create(&tmp).with_context(|| format!("creating file {:?}", tmp))?;
            file.write_all(contents)
                .with_context(|| format!("writing to file {:?}", tmp))?;
            file.sync_all().ok();
        }
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("renaming {:?} to {:?}", tmp, path));
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        Ok(entries)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing file {:?}", path)),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing dir {:?}", path)),
        }
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

/// Recursively copy every file under `from` into `to` through `fs`.
pub fn copy_tree(fs: &dyn FileSystem, from: &Path, to: &Path) -> Result<usize> {
    let mut copied = 0;
    let mut stack = vec![from.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) {
                let rel = path
                    .strip_prefix(from)
                    .with_context(|| format!("{:?} is outside {:?}", path, from))?;
                fs.write(&to.join(rel), &fs.read(&path)?)?;
                copied += 1;
            }
        }
    }

    Ok(copied)
}

/// `path` relative to `root` with forward slashes, as globs expect it.
///
/// Falls back to comparing canonical paths, since watcher events may
/// report a symlinked or otherwise differently spelled prefix.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let to_slashes = |rel: &Path| rel.to_string_lossy().replace('\\', "/");

    if let Ok(rel) = path.strip_prefix(root) {
        return Some(to_slashes(rel));
    }

    let root = root.canonicalize().ok()?;
    let path = path.canonicalize().ok()?;
    path.strip_prefix(&root).ok().map(to_slashes)
}
