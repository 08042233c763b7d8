// tests/watch_registrations.rs

use std::collections::BTreeSet;
use std::error::Error;

use frontend_build::types::{AssetCategory, TaskKind};
use frontend_build::watch::cache::FileCache;
use frontend_build::watch::event_handler::{tasks_for_batch, tasks_for_path};
use frontend_build::watch::build_registrations;
use frontend_build_test_utils::builders::{ConfigFileBuilder, ProjectBuilder};

type TestResult = Result<(), Box<dyn Error>>;

fn tasks(list: &[TaskKind]) -> BTreeSet<TaskKind> {
    list.iter().copied().collect()
}

#[test]
fn stylesheet_change_maps_to_styles_only() -> TestResult {
    let cfg = ConfigFileBuilder::new().build();
    let regs = build_registrations(&cfg)?;

    assert_eq!(
        tasks_for_path(&regs, "src/style/components/_button.scss"),
        tasks(&[TaskKind::Styles])
    );
    assert_eq!(
        tasks_for_path(&regs, "src/js/vendor/menu.js"),
        tasks(&[TaskKind::Scripts])
    );
    assert_eq!(
        tasks_for_path(&regs, "src/svg/close.svg"),
        tasks(&[TaskKind::Icons])
    );
    Ok(())
}

#[test]
fn data_file_change_rebuilds_markup() -> TestResult {
    let cfg = ConfigFileBuilder::new().with_styleguide(false).build();
    let regs = build_registrations(&cfg)?;

    assert_eq!(tasks_for_path(&regs, "src/data.json"), tasks(&[TaskKind::Markup]));
    assert_eq!(
        tasks_for_path(&regs, "src/templates/layout.twig"),
        tasks(&[TaskKind::Markup])
    );
    Ok(())
}

#[test]
fn component_templates_also_rebuild_the_styleguide() -> TestResult {
    let cfg = ConfigFileBuilder::new().build();
    let regs = build_registrations(&cfg)?;

    assert_eq!(
        tasks_for_path(&regs, "src/components/button.twig"),
        tasks(&[TaskKind::Markup, TaskKind::Styleguide])
    );
    assert_eq!(
        tasks_for_path(&regs, "docs/colors.md"),
        tasks(&[TaskKind::Styleguide])
    );
    Ok(())
}

#[test]
fn disabled_styleguide_is_not_watched() -> TestResult {
    let cfg = ConfigFileBuilder::new().with_styleguide(false).build();
    let regs = build_registrations(&cfg)?;

    assert!(tasks_for_path(&regs, "docs/colors.md").is_empty());
    assert!(regs.iter().all(|r| r.task() != TaskKind::Styleguide));
    Ok(())
}

#[test]
fn unrelated_paths_trigger_nothing() -> TestResult {
    let cfg = ConfigFileBuilder::new().build();
    let regs = build_registrations(&cfg)?;

    assert!(tasks_for_path(&regs, "build/css/main.css").is_empty());
    assert!(tasks_for_path(&regs, "README.md").is_empty());
    Ok(())
}

#[test]
fn custom_watch_globs_replace_the_defaults() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .with_watch(AssetCategory::Styles, &["assets/scss/**/*.scss"])
        .build();
    let regs = build_registrations(&cfg)?;

    assert_eq!(
        tasks_for_path(&regs, "assets/scss/main.scss"),
        tasks(&[TaskKind::Styles])
    );
    assert!(tasks_for_path(&regs, "src/style/main.scss").is_empty());
    Ok(())
}

#[test]
fn batch_with_one_stylesheet_change_triggers_styles_once() -> TestResult {
    let project = ProjectBuilder::new()
        .sample_site()
        .file("src/style/_vars.scss", "$c: red;")
        .build();
    let cfg = project.config();
    let regs = build_registrations(&cfg)?;
    let mut cache = FileCache::new();

    let batch: BTreeSet<_> = [
        project.path("src/style/main.scss"),
        project.path("src/style/_vars.scss"),
    ]
    .into_iter()
    .collect();

    let triggered = tasks_for_batch(project.root(), &batch, &regs, &mut cache);

    assert_eq!(triggered, tasks(&[TaskKind::Styles]));
    Ok(())
}

#[test]
fn unchanged_content_is_skipped() -> TestResult {
    let project = ProjectBuilder::new().sample_site().build();
    let cfg = project.config();
    let regs = build_registrations(&cfg)?;
    let mut cache = FileCache::new();

    let main = project.path("src/style/main.scss");
    cache.prime(&main);
    let batch: BTreeSet<_> = std::iter::once(main).collect();

    assert!(tasks_for_batch(project.root(), &batch, &regs, &mut cache).is_empty());

    project.write("src/style/main.scss", "body{color:blue;}");
    assert_eq!(
        tasks_for_batch(project.root(), &batch, &regs, &mut cache),
        tasks(&[TaskKind::Styles])
    );
    Ok(())
}
