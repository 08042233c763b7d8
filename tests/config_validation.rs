// tests/config_validation.rs

use std::error::Error;
use std::path::Path;

use frontend_build::config::{
    ConfigFile, RawConfigFile, load_and_validate, load_or_default, validate_project_layout,
};
use frontend_build::errors::FrontendError;
use frontend_build::fs::mock::MockFileSystem;
use frontend_build::types::AssetCategory;
use frontend_build_test_utils::builders::{ConfigFileBuilder, ProjectBuilder};

type TestResult = Result<(), Box<dyn Error>>;

fn parse(toml_text: &str) -> Result<ConfigFile, FrontendError> {
    let raw: RawConfigFile = toml::from_str(toml_text)?;
    ConfigFile::try_from(raw)
}

fn assert_config_error(result: Result<ConfigFile, FrontendError>, needle: &str) {
    match result {
        Err(FrontendError::ConfigError(msg)) => {
            assert!(msg.contains(needle), "message {msg:?} should mention {needle:?}")
        }
        other => panic!("expected ConfigError mentioning {needle:?}, got {other:?}"),
    }
}

#[test]
fn empty_file_uses_built_in_layout() -> TestResult {
    let cfg = parse("")?;

    let styles = cfg.paths().entry(AssetCategory::Styles);
    assert_eq!(styles.source_patterns(), ["src/style/main.scss"]);
    assert_eq!(styles.output(), Some(Path::new("build/css")));
    assert_eq!(cfg.paths().entry(AssetCategory::Data).output(), None);
    assert_eq!(cfg.server().port, 9000);
    assert_eq!(cfg.styleguide().port, 3000);
    assert!(cfg.styleguide().enabled);
    Ok(())
}

#[test]
fn overrides_merge_field_by_field() -> TestResult {
    let cfg = parse(
        r#"
        [paths.scripts]
        output = "public/js"
        "#,
    )?;

    let scripts = cfg.paths().entry(AssetCategory::Scripts);
    assert_eq!(scripts.output(), Some(Path::new("public/js")));
    assert_eq!(scripts.source_patterns(), ["src/js/main.js"]);
    assert_eq!(scripts.watch_patterns(), ["src/js/**/*.js"]);
    Ok(())
}

#[test]
fn unknown_category_is_rejected() {
    assert_config_error(
        parse(
            r#"
            [paths.fonts]
            source = ["src/fonts/*"]
            "#,
        ),
        "fonts",
    );
}

#[test]
fn invalid_glob_is_rejected() {
    assert_config_error(
        parse(
            r#"
            [paths.styles]
            source = ["src/style/[main.scss"]
            "#,
        ),
        "invalid glob",
    );
}

#[test]
fn empty_source_list_is_rejected() {
    assert_config_error(
        parse(
            r#"
            [paths.icons]
            source = []
            "#,
        ),
        "paths.icons",
    );
}

#[test]
fn clashing_ports_are_rejected() {
    assert_config_error(
        parse(
            r#"
            [server]
            port = 4000

            [styleguide]
            port = 4000
            "#,
        ),
        "port",
    );
}

#[test]
fn unparsable_toml_is_a_toml_error() {
    let result: Result<RawConfigFile, _> = toml::from_str("[server\nport = 1");
    assert!(result.is_err());

    let project = ProjectBuilder::new()
        .file("Frontend.toml", "[server\nport = 1")
        .build();
    match load_and_validate(project.path("Frontend.toml")) {
        Err(FrontendError::TomlError(_)) => {}
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn config_paths_are_anchored_at_its_directory() -> TestResult {
    let project = ProjectBuilder::new()
        .file("site/Frontend.toml", "clean = \"dist\"\n")
        .build();

    let cfg = load_or_default(project.path("site/Frontend.toml"))?;

    assert_eq!(cfg.root(), project.path("site"));
    assert_eq!(cfg.clean_dir(), project.path("site/dist"));
    Ok(())
}

#[test]
fn missing_explicit_config_is_an_error() {
    let project = ProjectBuilder::new().build();

    match load_or_default(project.path("custom.toml")) {
        Err(FrontendError::ConfigError(msg)) => assert!(msg.contains("does not exist")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn layout_check_requires_source_root_and_data_file() -> TestResult {
    let cfg = ConfigFileBuilder::new().root("/proj").build();
    let fs = MockFileSystem::new();

    match validate_project_layout(&cfg, &fs) {
        Err(FrontendError::ConfigError(msg)) => assert!(msg.contains("source directory")),
        other => panic!("expected missing source root, got {other:?}"),
    }

    fs.add_dir("/proj/src");
    match validate_project_layout(&cfg, &fs) {
        Err(FrontendError::ConfigError(msg)) => assert!(msg.contains("data file")),
        other => panic!("expected missing data file, got {other:?}"),
    }

    fs.add_file("/proj/src/data.json", "{}");
    validate_project_layout(&cfg, &fs)?;
    Ok(())
}

#[test]
fn layout_check_expands_data_globs() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .root("/proj")
        .with_source(AssetCategory::Data, &["src/data/*.json"])
        .build();
    let fs = MockFileSystem::new();
    fs.add_dir("/proj/src/data");

    match validate_project_layout(&cfg, &fs) {
        Err(FrontendError::ConfigError(msg)) => assert!(msg.contains("src/data/*.json")),
        other => panic!("expected unmatched data glob, got {other:?}"),
    }

    fs.add_file("/proj/src/data/site.json", "{}");
    validate_project_layout(&cfg, &fs)?;
    Ok(())
}
