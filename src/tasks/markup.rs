// src/tasks/markup.rs

//! Templates + JSON data → HTML.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use minijinja::{Environment, ErrorKind};
use serde_json::Value;
use tracing::debug;

use crate::fs::FileSystem;
use crate::tasks::{TaskContext, TaskReport, file_stem};
use crate::types::AssetCategory;

/// Render every markup source into `<stem>.html`.
///
/// All pages are rendered before anything is written, so a broken template
/// or data file leaves the previous output untouched. Two sources with the
/// same stem would write the same page and are rejected.
pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let data = load_data(ctx)?;
    let source_root = ctx.config.source_root();
    let out_dir = ctx.output_dir(AssetCategory::Markup)?;
    let env = template_env(Arc::clone(&ctx.fs), vec![source_root.clone()]);

    let mut pages: Vec<(PathBuf, String)> = Vec::new();
    let mut claimed: HashMap<PathBuf, String> = HashMap::new();
    for template in ctx.sources(AssetCategory::Markup)? {
        let name = template_name(&source_root, &template)?;
        let target = out_dir.join(format!("{}.html", file_stem(&template)?));
        if let Some(first) = claimed.insert(target.clone(), name.clone()) {
            return Err(anyhow!(
                "templates {first} and {name} both render to {:?}",
                target
            ));
        }

        let html = render(&env, &name, &data)?;
        debug!(template = %name, target = ?target, "rendered template");
        pages.push((target, html));
    }

    let mut report = TaskReport::default();
    for (target, html) in pages {
        ctx.fs.write(&target, html.as_bytes())?;
        report.record(&target);
    }
    Ok(report)
}

/// Parse the data file into the render context.
///
/// Every matching data file is merged into one object; later files win.
pub fn load_data(ctx: &TaskContext) -> Result<Value> {
    let mut merged = serde_json::Map::new();

    for path in ctx.sources(AssetCategory::Data)? {
        let text = ctx.fs.read_to_string(&path)?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("parsing data file {:?}", path))?;
        match value {
            Value::Object(map) => merged.extend(map),
            other => {
                return Err(anyhow!(
                    "data file {:?} must contain a JSON object, found {}",
                    path,
                    json_kind(&other)
                ));
            }
        }
    }

    Ok(Value::Object(merged))
}

/// Template environment whose loader looks `name` up under each of `roots`
/// in turn.
pub fn template_env(fs: Arc<dyn FileSystem>, roots: Vec<PathBuf>) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(move |name| {
        let Some(path) = roots.iter().map(|r| r.join(name)).find(|p| fs.is_file(p)) else {
            return Ok(None);
        };
        fs.read_to_string(&path).map(Some).map_err(|e| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("could not read template {name}: {e:#}"),
            )
        })
    });
    env
}

/// Render a loaded template with `context`.
pub fn render(env: &Environment<'_>, name: &str, context: &Value) -> Result<String> {
    let template = env
        .get_template(name)
        .map_err(|e| anyhow!("{e:#}"))
        .with_context(|| format!("loading template {name}"))?;
    template
        .render(context)
        .map_err(|e| anyhow!("{e:#}"))
        .with_context(|| format!("rendering template {name}"))
}

/// Loader name (forward slashes, relative to the source root) for a file.
pub fn template_name(source_root: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(source_root)
        .with_context(|| format!("template {:?} is outside the source root {:?}", path, source_root))?;
    Ok(rel.to_string_lossy().replace('\\', "/"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
