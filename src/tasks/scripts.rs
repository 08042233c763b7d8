// src/tasks/scripts.rs

//! Include-resolved JavaScript → ES2015.

use std::path::Path;

use anyhow::{Result, anyhow, bail};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{TransformOptions, Transformer};

use crate::tasks::include::IncludeResolver;
use crate::tasks::{TaskContext, TaskReport, file_stem};
use crate::types::{AssetCategory, BuildConfig};

/// Syntax baseline every script is lowered to.
pub const TARGET: &str = "es2015";

/// Generated script plus its source map (development only).
#[derive(Debug, Clone)]
pub struct JsOutput {
    pub code: String,
    pub map: Option<String>,
}

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let out_dir = ctx.output_dir(AssetCategory::Scripts)?;
    let resolver = IncludeResolver::new()?;
    let mut report = TaskReport::default();

    for entry in ctx.sources(AssetCategory::Scripts)? {
        let js_name = format!("{}.js", file_stem(&entry)?);
        let bundled = resolver.resolve(ctx.fs.as_ref(), &entry)?;
        let output = build_js(&bundled, Path::new(&js_name), ctx.build)?;

        let js_path = out_dir.join(&js_name);
        let map_path = out_dir.join(format!("{js_name}.map"));

        match output.map {
            Some(map) => {
                let code = format!("{}\n//# sourceMappingURL={js_name}.map\n", output.code);
                ctx.fs.write(&js_path, code.as_bytes())?;
                ctx.fs.write(&map_path, map.as_bytes())?;
                report.record(&js_path);
                report.record(&map_path);
            }
            None => {
                ctx.fs.write(&js_path, output.code.as_bytes())?;
                ctx.fs.remove_file(&map_path)?;
                report.record(&js_path);
            }
        }
    }

    Ok(report)
}

/// Parse, lower to [`TARGET`], and print `source`.
///
/// Production output is compressed and mangled; development output carries
/// a source map against the include-resolved source.
pub fn build_js(source: &str, path: &Path, build: BuildConfig) -> Result<JsOutput> {
    let allocator = Allocator::default();
    let source_type = SourceType::cjs();

    let parsed = Parser::new(&allocator, source, source_type).parse();
    if !parsed.errors.is_empty() {
        bail!("{}: {}", path.display(), join_diagnostics(&parsed.errors));
    }
    let mut program = parsed.program;

    let (symbols, scopes) = SemanticBuilder::new()
        .build(&program)
        .semantic
        .into_symbol_table_and_scope_tree();

    let options =
        TransformOptions::from_target(TARGET).map_err(|e| anyhow!("target {TARGET}: {e:?}"))?;
    let transformed = Transformer::new(&allocator, path, &options)
        .build_with_symbols_and_scopes(symbols, scopes, &mut program);
    if !transformed.errors.is_empty() {
        bail!("{}: {}", path.display(), join_diagnostics(&transformed.errors));
    }

    if build.production {
        let minified = Minifier::new(MinifierOptions::default()).build(&allocator, &mut program);
        let printed = Codegen::new()
            .with_options(CodegenOptions {
                minify: true,
                comments: false,
                ..CodegenOptions::default()
            })
            .with_symbol_table(minified.symbol_table)
            .build(&program);
        return Ok(JsOutput {
            code: printed.code,
            map: None,
        });
    }

    let printed = Codegen::new()
        .with_options(CodegenOptions {
            source_map_path: Some(path.to_path_buf()),
            ..CodegenOptions::default()
        })
        .build(&program);

    Ok(JsOutput {
        code: printed.code,
        map: printed.map.map(|m| m.to_json_string()),
    })
}

fn join_diagnostics<D: std::fmt::Display>(errors: &[D]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
