// src/styleguide/mod.rs

//! Component catalog: one preview page per component template, one page per
//! markdown doc, and an overview page.
//!
//! Exported into the configured destination with a copy of the build output
//! under `build/`, so previews pick up the compiled stylesheets and scripts.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use minijinja::context;
use tracing::{debug, info};

use crate::fs::{FileSystem, copy_tree};
use crate::server::{ReloadHub, ServerHandle, router, spawn_server};
use crate::tasks::markup::{render, template_env};
use crate::tasks::{TaskContext, TaskReport};

pub mod catalog;
pub mod pages;

pub use catalog::{Catalog, Component, Doc};

/// URL prefix and directory name the build output is copied under.
pub const BUILD_MOUNT: &str = "build";

/// Compiled assets linked from every page, relative to the build output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assets {
    pub styles: Vec<String>,
    pub scripts: Vec<String>,
}

impl Assets {
    /// Every `.css` and `.js` file under `dir`, sorted.
    pub fn scan(fs: &dyn FileSystem, dir: &Path) -> Result<Self> {
        let mut assets = Self::default();
        if !fs.is_dir(dir) {
            return Ok(assets);
        }

        let mut stack = vec![dir.to_path_buf()];
        while let Some(current) = stack.pop() {
            for path in fs.read_dir(&current)? {
                if fs.is_dir(&path) {
                    stack.push(path);
                    continue;
                }
                let Ok(rel) = path.strip_prefix(dir) else {
                    continue;
                };
                let rel = rel.to_string_lossy().replace('\\', "/");
                match path.extension().and_then(|e| e.to_str()) {
                    Some("css") => assets.styles.push(rel),
                    Some("js") => assets.scripts.push(rel),
                    _ => {}
                }
            }
        }

        assets.styles.sort();
        assets.scripts.sort();
        Ok(assets)
    }
}

/// Root-joined `(components, docs, dest)` directories.
fn dirs(ctx: &TaskContext) -> (PathBuf, PathBuf, PathBuf) {
    let sg = ctx.config.styleguide();
    let root = ctx.config.root();
    (root.join(&sg.components), root.join(&sg.docs), root.join(&sg.dest))
}

/// Regenerate the styleguide into its destination directory.
///
/// Every page is rendered before the destination is touched; a broken
/// component leaves the previous export in place.
pub fn export(ctx: &TaskContext) -> Result<TaskReport> {
    let fs = ctx.fs.as_ref();
    let (components_dir, docs_dir, dest) = dirs(ctx);
    let build_dir = ctx.config.clean_dir();

    let catalog = Catalog::load(fs, &components_dir, &docs_dir)?;
    let assets = Assets::scan(fs, &build_dir)?;
    let pages = render_pages(ctx, &catalog, &assets, components_dir)?;

    fs.remove_dir_all(&dest)?;
    if fs.is_dir(&build_dir) {
        let copied = copy_tree(fs, &build_dir, &dest.join(BUILD_MOUNT))?;
        debug!(files = copied, "copied build output into styleguide");
    }

    let mut report = TaskReport::default();
    for (rel, html) in pages {
        let target = dest.join(rel);
        fs.write(&target, html.as_bytes())?;
        report.record(&target);
    }

    info!(
        components = catalog.components.len(),
        docs = catalog.docs.len(),
        dest = ?dest,
        "styleguide exported"
    );
    Ok(report)
}

fn render_pages(
    ctx: &TaskContext,
    catalog: &Catalog,
    assets: &Assets,
    components_dir: PathBuf,
) -> Result<Vec<(PathBuf, String)>> {
    let layouts = pages::layouts()?;
    let previews = template_env(
        Arc::clone(&ctx.fs),
        vec![components_dir, ctx.config.source_root()],
    );

    let mut out = Vec::new();

    let intro = catalog.index_doc().map(|d| d.html.as_str());
    let index = pages::render_page(
        &layouts,
        pages::INDEX_PAGE,
        context! {
            title => "Overview",
            base => "",
            intro => intro,
            styles => &assets.styles,
            scripts => &assets.scripts,
            components => &catalog.components,
            docs => &catalog.docs,
        },
    )?;
    out.push((PathBuf::from("index.html"), index));

    for component in &catalog.components {
        let preview = render(&previews, &component.template, &component.context)?;
        let html = pages::render_page(
            &layouts,
            pages::COMPONENT_PAGE,
            context! {
                title => &component.title,
                base => "../",
                component => component,
                preview => preview,
                styles => &assets.styles,
                scripts => &assets.scripts,
                components => &catalog.components,
                docs => &catalog.docs,
            },
        )?;
        out.push((
            Path::new("components").join(format!("{}.html", component.name)),
            html,
        ));
    }

    for doc in &catalog.docs {
        let html = pages::render_page(
            &layouts,
            pages::DOC_PAGE,
            context! {
                title => &doc.title,
                base => "../",
                doc => doc,
                styles => &assets.styles,
                scripts => &assets.scripts,
                components => &catalog.components,
                docs => &catalog.docs,
            },
        )?;
        out.push((Path::new("docs").join(format!("{}.html", doc.name)), html));
    }

    Ok(out)
}

/// Serve the exported styleguide, with the live build output mounted under
/// `/build` so style and script rebuilds show up without a re-export.
pub async fn serve(ctx: &TaskContext, hub: ReloadHub) -> crate::errors::Result<ServerHandle> {
    let sg = ctx.config.styleguide();
    let (_, _, dest) = dirs(ctx);
    let mounts = [(format!("/{BUILD_MOUNT}"), ctx.config.clean_dir())];
    let app = router(dest, &mounts, hub);
    spawn_server("styleguide", &sg.host, sg.port, app).await
}
