// tests/styleguide_export.rs

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use frontend_build::fs::FileSystem;
use frontend_build::fs::mock::MockFileSystem;
use frontend_build::styleguide::catalog::{page_name, title_case};
use frontend_build::styleguide::{self, Assets, Catalog};
use frontend_build::tasks::{TaskContext, run_with_recovery};
use frontend_build::types::{BuildConfig, TaskKind, TaskOutcome};
use frontend_build_test_utils::builders::ConfigFileBuilder;
use frontend_build_test_utils::notifier::RecordingNotifier;

type TestResult = Result<(), Box<dyn Error>>;

fn context(fs: &MockFileSystem) -> TaskContext {
    let cfg = ConfigFileBuilder::new().root("/proj").build();
    TaskContext::new(Arc::new(fs.clone()), Arc::new(cfg), BuildConfig::production())
}

fn project() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file(
        "/proj/src/components/primary-button.twig",
        r#"<button class="btn">{{ label }}</button>"#,
    );
    fs.add_file(
        "/proj/src/components/primary-button.config.json",
        r#"{"title":"Primary button","context":{"label":"Save"}}"#,
    );
    fs.add_file(
        "/proj/src/components/card.twig",
        r#"{% include "components/primary-button.twig" %}<div>{{ heading }}</div>"#,
    );
    fs.add_file(
        "/proj/src/components/card.config.json",
        r#"{"heading":"Welcome","label":"Go"}"#,
    );
    fs.add_file("/proj/docs/index.md", "# Our styleguide\n\nRead *this* first.\n");
    fs.add_file("/proj/docs/colors.md", "# Colors\n\n| name | hex |\n|---|---|\n| red | #f00 |\n");
    fs.add_file("/proj/build/css/main.css", "body{color:red}");
    fs.add_file("/proj/build/js/main.js", "console.log(1);");
    fs.add_file("/proj/build/index.html", "<p>Hi</p>");
    fs
}

fn read(fs: &MockFileSystem, path: &str) -> String {
    fs.read_to_string(Path::new(path)).unwrap()
}

#[test]
fn catalog_reads_components_and_docs() -> TestResult {
    let fs = project();

    let catalog = Catalog::load(&fs, Path::new("/proj/src/components"), Path::new("/proj/docs"))?;

    let names: Vec<_> = catalog.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["card", "primary-button"]);
    assert_eq!(catalog.components[0].title, "Card");
    assert_eq!(catalog.components[0].context["heading"], "Welcome");
    assert_eq!(catalog.components[1].title, "Primary button");
    assert_eq!(catalog.components[1].context["label"], "Save");

    let index = catalog.index_doc().unwrap();
    assert_eq!(index.title, "Our styleguide");
    assert!(index.html.contains("<em>this</em>"));
    let colors = catalog.docs.iter().find(|d| d.name == "colors").unwrap();
    assert!(colors.html.contains("<table>"));
    Ok(())
}

#[test]
fn missing_directories_give_an_empty_catalog() -> TestResult {
    let fs = MockFileSystem::new();

    let catalog = Catalog::load(&fs, Path::new("/proj/src/components"), Path::new("/proj/docs"))?;

    assert!(catalog.components.is_empty());
    assert!(catalog.docs.is_empty());
    Ok(())
}

#[test]
fn export_writes_pages_and_copies_build_output() -> TestResult {
    let fs = project();

    let report = styleguide::export(&context(&fs))?;

    let index = read(&fs, "/proj/styleguide/index.html");
    assert!(index.contains("<h1>Our styleguide</h1>"));
    assert!(index.contains(r#"href="components/card.html""#));
    assert!(index.contains(r#"href="build/css/main.css""#));

    let button = read(&fs, "/proj/styleguide/components/primary-button.html");
    assert!(button.contains(r#"<button class="btn">Save</button>"#));
    assert!(button.contains("&lt;button class=&quot;btn&quot;&gt;"));
    assert!(button.contains(r#"src="../build/js/main.js""#));

    let card = read(&fs, "/proj/styleguide/components/card.html");
    assert!(card.contains(r#"<button class="btn">Go</button><div>Welcome</div>"#));

    assert!(read(&fs, "/proj/styleguide/docs/colors.html").contains("<table>"));
    assert_eq!(read(&fs, "/proj/styleguide/build/css/main.css"), "body{color:red}");
    // index + 2 components + 2 docs
    assert_eq!(report.written.len(), 5);
    Ok(())
}

#[test]
fn export_replaces_stale_pages() -> TestResult {
    let fs = project();
    fs.add_file("/proj/styleguide/components/removed.html", "old");

    styleguide::export(&context(&fs))?;

    assert!(!fs.exists(Path::new("/proj/styleguide/components/removed.html")));
    Ok(())
}

#[test]
fn broken_component_keeps_previous_export() -> TestResult {
    let fs = project();
    let ctx = context(&fs);
    styleguide::export(&ctx)?;
    let before = read(&fs, "/proj/styleguide/index.html");

    fs.add_file("/proj/src/components/card.twig", "{% if %}");
    let notifier = RecordingNotifier::new();
    let outcome = run_with_recovery(TaskKind::Styleguide, &notifier, || styleguide::export(&ctx));

    assert_eq!(outcome, TaskOutcome::Failed);
    assert_eq!(notifier.failed_tasks(), vec![TaskKind::Styleguide]);
    assert_eq!(read(&fs, "/proj/styleguide/index.html"), before);
    Ok(())
}

#[test]
fn assets_are_found_recursively_and_sorted() -> TestResult {
    let fs = project();
    fs.add_file("/proj/build/css/vendor/reset.css", "");
    fs.add_file("/proj/build/css/main.css.map", "{}");

    let assets = Assets::scan(&fs, Path::new("/proj/build"))?;

    assert_eq!(assets.styles, vec!["css/main.css", "css/vendor/reset.css"]);
    assert_eq!(assets.scripts, vec!["js/main.js"]);
    Ok(())
}

#[test]
fn titles_come_from_file_names() {
    assert_eq!(title_case("primary-button"), "Primary button");
    assert_eq!(title_case("nav_bar"), "Nav bar");
    assert_eq!(title_case(""), "");
}

#[test]
fn nested_components_and_docs_get_their_own_pages() -> TestResult {
    let fs = project();
    fs.add_file("/proj/src/components/button/button.twig", "<a class=\"b\">{{ text }}</a>");
    fs.add_file(
        "/proj/src/components/button/button.config.json",
        r#"{"context":{"text":"Nested"}}"#,
    );
    fs.add_file("/proj/src/components/forms/input.twig", "<input name=\"q\">");
    fs.add_file("/proj/docs/guides/spacing.md", "Use multiples of 4.\n");

    let catalog = Catalog::load(&fs, Path::new("/proj/src/components"), Path::new("/proj/docs"))?;
    let button = catalog.components.iter().find(|c| c.name == "button").unwrap();
    assert_eq!(button.template, "button/button.twig");
    assert_eq!(button.title, "Button");

    styleguide::export(&context(&fs))?;

    assert!(read(&fs, "/proj/styleguide/components/button.html").contains(r#"<a class="b">Nested</a>"#));
    assert!(read(&fs, "/proj/styleguide/components/forms-input.html").contains(r#"<input name="q">"#));
    let spacing = read(&fs, "/proj/styleguide/docs/guides-spacing.html");
    assert!(spacing.contains("multiples of 4"));
    assert!(spacing.contains("<title>Spacing | Styleguide</title>"));
    assert!(read(&fs, "/proj/styleguide/index.html").contains(r#"href="components/forms-input.html""#));
    Ok(())
}

#[test]
fn components_mapping_to_one_page_are_rejected() {
    let fs = project();
    fs.add_file("/proj/src/components/card/card.twig", "<div></div>");

    let err = Catalog::load(&fs, Path::new("/proj/src/components"), Path::new("/proj/docs"))
        .unwrap_err();

    assert!(format!("{err:#}").contains("'card'"));
}

#[test]
fn page_names_follow_folders() -> TestResult {
    assert_eq!(page_name(Path::new("card.twig"))?, "card");
    assert_eq!(page_name(Path::new("button/button.twig"))?, "button");
    assert_eq!(page_name(Path::new("forms/input.twig"))?, "forms-input");
    assert_eq!(page_name(Path::new("a/b/c.md"))?, "a-b-c");
    Ok(())
}
