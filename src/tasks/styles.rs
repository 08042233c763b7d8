// src/tasks/styles.rs

//! SCSS → CSS.
//!
//! Output is printed for [`browser_targets`], so syntax those browsers lack
//! (media range queries, for one) is written in its older form.
//!
//! The development source map covers the CSS that the SCSS compiler
//! produced, not the original SCSS lines. Its single source is named after
//! the SCSS entry and carries the compiled CSS as content.

use std::io;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use parcel_sourcemap::SourceMap;
use tracing::debug;

use crate::fs::{FileSystem, relative_path};
use crate::tasks::media_queries::group_media_queries;
use crate::tasks::{TaskContext, TaskReport, file_stem};
use crate::types::{AssetCategory, BuildConfig};

/// Compiled stylesheet plus its source map (development only).
#[derive(Debug, Clone)]
pub struct CssOutput {
    pub code: String,
    pub map: Option<String>,
}

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let out_dir = ctx.output_dir(AssetCategory::Styles)?;
    let mut report = TaskReport::default();

    for source in ctx.sources(AssetCategory::Styles)? {
        let stem = file_stem(&source)?;
        if stem.starts_with('_') {
            debug!(partial = ?source, "skipping partial");
            continue;
        }

        let compiled = compile_scss(ctx.fs.as_ref(), &source)?;
        let css_name = format!("{stem}.css");
        let source_name = relative_path(ctx.config.root(), &source)
            .unwrap_or_else(|| format!("{stem}.scss"));
        let output = build_css(&compiled, &source_name, ctx.build)
            .with_context(|| format!("post-processing {:?}", source))?;

        let css_path = out_dir.join(&css_name);
        let map_path = out_dir.join(format!("{css_name}.map"));

        match output.map {
            Some(map) => {
                let code = format!("{}\n/*# sourceMappingURL={css_name}.map */\n", output.code);
                ctx.fs.write(&css_path, code.as_bytes())?;
                ctx.fs.write(&map_path, map.as_bytes())?;
                report.record(&css_path);
                report.record(&map_path);
            }
            None => {
                ctx.fs.write(&css_path, output.code.as_bytes())?;
                ctx.fs.remove_file(&map_path)?;
                report.record(&css_path);
            }
        }
    }

    Ok(report)
}

/// Compile one SCSS entry. Imports resolve through `fs`.
pub fn compile_scss(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let grass_fs = GrassFs(fs);
    let mut options = grass::Options::default()
        .style(grass::OutputStyle::Expanded)
        .fs(&grass_fs);
    if let Some(dir) = path.parent() {
        options = options.load_path(dir);
    }

    grass::from_path(path, &options)
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("compiling {:?}", path))
}

/// Oldest browsers the stylesheet output must work in.
pub fn browser_targets() -> Targets {
    let version = |major: u32| major << 16;
    Targets::from(Browsers {
        chrome: Some(version(80)),
        edge: Some(version(80)),
        firefox: Some(version(78)),
        safari: Some(version(13)),
        ios_saf: Some(version(13)),
        ..Browsers::default()
    })
}

/// Group media queries, then either minify or print with a source map.
///
/// `source_name` names the stylesheet the compiled `css` came from.
pub fn build_css(css: &str, source_name: &str, build: BuildConfig) -> Result<CssOutput> {
    let mut sheet = StyleSheet::parse(
        css,
        ParserOptions {
            filename: source_name.to_string(),
            ..ParserOptions::default()
        },
    )
    .map_err(|e| anyhow!("parsing css: {e}"))?;

    group_media_queries(&mut sheet)?;

    if build.production {
        sheet
            .minify(MinifyOptions {
                targets: browser_targets(),
                ..MinifyOptions::default()
            })
            .map_err(|e| anyhow!("minifying css: {e}"))?;
        let out = sheet
            .to_css(PrinterOptions {
                minify: true,
                targets: browser_targets(),
                ..PrinterOptions::default()
            })
            .map_err(|e| anyhow!("printing css: {e}"))?;
        return Ok(CssOutput {
            code: out.code,
            map: None,
        });
    }

    let mut source_map = SourceMap::new("/");
    let index = source_map.add_source(source_name);
    source_map
        .set_source_content(index as usize, css)
        .map_err(|e| anyhow!("recording source content: {e:?}"))?;

    let out = sheet
        .to_css(PrinterOptions {
            source_map: Some(&mut source_map),
            targets: browser_targets(),
            ..PrinterOptions::default()
        })
        .map_err(|e| anyhow!("printing css: {e}"))?;

    let map = source_map
        .to_json(None)
        .map_err(|e| anyhow!("serializing source map: {e:?}"))?;

    Ok(CssOutput {
        code: out.code,
        map: Some(map),
    })
}

/// Lets the SCSS compiler read imports through [`FileSystem`].
#[derive(Debug)]
struct GrassFs<'a>(&'a dyn FileSystem);

impl grass::Fs for GrassFs<'_> {
    fn is_dir(&self, path: &Path) -> bool {
        self.0.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.0.is_file(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.0
            .read(path)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, format!("{e:#}")))
    }
}
