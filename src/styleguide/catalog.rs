// src/styleguide/catalog.rs

//! Discovering components and docs.

use std::collections::HashMap;
use std::path::{Component as PathPart, Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use pulldown_cmark::{Options, Parser, html};
use serde::Serialize;
use serde_json::Value;

use crate::fs::FileSystem;
use crate::tasks::file_stem;
use crate::tasks::sources::files_with_extension;

/// A template under the components directory.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    /// Page name, unique across the catalog. See [`page_name`].
    pub name: String,
    pub title: String,
    /// Loader name of the template (relative to the components directory).
    pub template: String,
    /// Raw template text, shown next to the preview.
    pub source: String,
    /// Context the preview is rendered with.
    #[serde(skip)]
    pub context: Value,
}

/// A markdown page under the docs directory.
#[derive(Debug, Clone, Serialize)]
pub struct Doc {
    pub name: String,
    pub title: String,
    pub html: String,
}

/// Everything the styleguide shows.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub components: Vec<Component>,
    pub docs: Vec<Doc>,
}

impl Catalog {
    /// Read every `*.twig` under `components_dir` and every `*.md` under
    /// `docs_dir`, nested folders included.
    ///
    /// Missing directories give an empty section. Two files that map to the
    /// same page name are an error.
    pub fn load(fs: &dyn FileSystem, components_dir: &Path, docs_dir: &Path) -> Result<Self> {
        let mut claimed = HashMap::new();
        let mut components = Vec::new();
        for path in files_with_extension(fs, components_dir, "twig")? {
            let component = load_component(fs, components_dir, &path)?;
            claim(&mut claimed, "component", &component.name, &path)?;
            components.push(component);
        }

        claimed.clear();
        let mut docs = Vec::new();
        for path in files_with_extension(fs, docs_dir, "md")? {
            let doc = load_doc(fs, docs_dir, &path)?;
            claim(&mut claimed, "doc", &doc.name, &path)?;
            docs.push(doc);
        }

        Ok(Self { components, docs })
    }

    /// The doc named `index`, used as the landing page body.
    pub fn index_doc(&self) -> Option<&Doc> {
        self.docs.iter().find(|d| d.name == "index")
    }
}

fn claim(
    claimed: &mut HashMap<String, PathBuf>,
    kind: &str,
    name: &str,
    path: &Path,
) -> Result<()> {
    match claimed.insert(name.to_string(), path.to_path_buf()) {
        Some(first) => Err(anyhow!(
            "{kind} files {:?} and {:?} both map to page '{name}'",
            first,
            path
        )),
        None => Ok(()),
    }
}

/// Page name for a file at `rel` (relative to its section directory).
///
/// Folders are joined with `-`. A file named after its own folder takes the
/// folder's name, so `button/button.twig` is `button` and
/// `forms/input.twig` is `forms-input`.
pub fn page_name(rel: &Path) -> Result<String> {
    let mut parts: Vec<String> = rel
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|part| match part {
            PathPart::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let stem = file_stem(rel)?;
    if parts.last() != Some(&stem) {
        parts.push(stem);
    }
    Ok(parts.join("-"))
}

/// `rel` with `/` separators, as the template loader expects.
fn loader_name(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

fn relative_to<'a>(dir: &Path, path: &'a Path) -> Result<&'a Path> {
    path.strip_prefix(dir)
        .map_err(|_| anyhow!("{:?} is not under {:?}", path, dir))
}

fn load_component(fs: &dyn FileSystem, components_dir: &Path, path: &Path) -> Result<Component> {
    let rel = relative_to(components_dir, path)?;
    let name = page_name(rel)?;
    let stem = file_stem(path)?;
    let source = fs.read_to_string(path)?;

    let config_path: PathBuf = path.with_file_name(format!("{stem}.config.json"));
    let config: Value = if fs.is_file(&config_path) {
        serde_json::from_str(&fs.read_to_string(&config_path)?)
            .with_context(|| format!("parsing component config {:?}", config_path))?
    } else {
        Value::Null
    };

    let title = config
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| title_case(&stem));

    let context = match config.get("context") {
        Some(ctx) => ctx.clone(),
        None => match config {
            Value::Object(mut map) => {
                map.remove("title");
                Value::Object(map)
            }
            _ => Value::Object(serde_json::Map::new()),
        },
    };

    Ok(Component {
        template: loader_name(rel),
        name,
        title,
        source,
        context,
    })
}

fn load_doc(fs: &dyn FileSystem, docs_dir: &Path, path: &Path) -> Result<Doc> {
    let name = page_name(relative_to(docs_dir, path)?)?;
    let stem = file_stem(path)?;
    let markdown = fs.read_to_string(path)?;

    let title = markdown
        .lines()
        .find_map(|l| l.strip_prefix("# "))
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|| title_case(&stem));

    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(&markdown, markdown_options()));

    Ok(Doc {
        name,
        title,
        html: out,
    })
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// `primary-button` → `Primary button`.
pub fn title_case(name: &str) -> String {
    let spaced = name.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
