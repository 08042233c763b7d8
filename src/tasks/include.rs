// src/tasks/include.rs

//! Inline `//= path` and `/*= path */` include directives.
//!
//! ```js
//! //= vendor/jquery.js
//! //= require components/menu.js
//! /*= include util.js */
//! ```
//!
//! Paths are relative to the file containing the directive. Included files
//! may include further files; a file including itself (directly or through
//! others) is an error.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;

use crate::fs::FileSystem;

const LINE_DIRECTIVE: &str = r"^[ \t]*//=[ \t]*(?:(?:require|include)[ \t]+)?(\S+)[ \t]*$";
const BLOCK_DIRECTIVE: &str =
    r"^[ \t]*/\*=[ \t]*(?:(?:require|include)[ \t]+)?(\S+?)[ \t]*\*/[ \t]*$";

/// Compiled directive patterns.
#[derive(Debug, Clone)]
pub struct IncludeResolver {
    line: Regex,
    block: Regex,
}

impl IncludeResolver {
    pub fn new() -> Result<Self> {
        Ok(Self {
            line: Regex::new(LINE_DIRECTIVE).context("compiling line directive pattern")?,
            block: Regex::new(BLOCK_DIRECTIVE).context("compiling block directive pattern")?,
        })
    }

    /// Return the contents of `entry` with every include directive replaced
    /// by the (recursively resolved) contents of the referenced file.
    pub fn resolve(&self, fs: &dyn FileSystem, entry: &Path) -> Result<String> {
        let mut stack = Vec::new();
        self.resolve_file(fs, &normalize(entry), &mut stack)
    }

    fn resolve_file(
        &self,
        fs: &dyn FileSystem,
        path: &Path,
        stack: &mut Vec<PathBuf>,
    ) -> Result<String> {
        if let Some(pos) = stack.iter().position(|p| p == path) {
            let chain: Vec<String> = stack[pos..]
                .iter()
                .map(|p| p.display().to_string())
                .chain(std::iter::once(path.display().to_string()))
                .collect();
            bail!("include cycle: {}", chain.join(" -> "));
        }

        let source = fs.read_to_string(path)?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        stack.push(path.to_path_buf());
        let mut out = String::with_capacity(source.len());
        for line in source.split_inclusive('\n') {
            let body = line.trim_end_matches(['\n', '\r']);
            match self.directive_target(body) {
                Some(target) => {
                    let included = normalize(&dir.join(target));
                    if !fs.is_file(&included) {
                        bail!(
                            "{}: included file {} does not exist",
                            path.display(),
                            included.display()
                        );
                    }
                    let text = self.resolve_file(fs, &included, stack)?;
                    out.push_str(&text);
                    if !text.ends_with('\n') {
                        out.push('\n');
                    }
                }
                None => out.push_str(line),
            }
        }
        stack.pop();

        Ok(out)
    }

    /// The path named by an include directive on this line, if any.
    pub fn directive_target<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.line
            .captures(line)
            .or_else(|| self.block.captures(line))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

/// Lexically resolve `.` and `..` so the same file always has one key.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
