// tests/dev_servers.rs

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use frontend_build::fs::RealFileSystem;
use frontend_build::notifier::Notifier;
use frontend_build::orchestrator::{development_sequence, run_sequence, start_servers};
use frontend_build::server::ReloadHub;
use frontend_build::server::livereload::RELOAD_CLIENT_PATH;
use frontend_build::tasks::TaskContext;
use frontend_build::types::BuildConfig;
use frontend_build_test_utils::builders::ProjectBuilder;
use frontend_build_test_utils::notifier::RecordingNotifier;
use frontend_build_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

async fn http_get(addr: SocketAddr, path: &str) -> Result<String, Box<dyn Error>> {
    let mut stream = TcpStream::connect(addr).await?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;
    let mut response = String::new();
    stream.read_to_string(&mut response).await?;
    Ok(response)
}

#[tokio::test]
async fn development_build_is_served_with_live_reload() -> TestResult {
    init_tracing();
    let project = ProjectBuilder::new()
        .sample_site()
        .file("src/components/badge.twig", "<span>{{ text }}</span>")
        .build();

    let mut cfg = project.config();
    cfg.server_mut().host = "127.0.0.1".to_string();
    cfg.server_mut().port = 0;
    cfg.styleguide_mut().host = "127.0.0.1".to_string();
    cfg.styleguide_mut().port = 0;

    let ctx = TaskContext::new(Arc::new(RealFileSystem), Arc::new(cfg), BuildConfig::development());
    let recording = RecordingNotifier::new();
    let notifier: Arc<dyn Notifier> = Arc::new(recording.clone());

    let report = with_timeout(run_sequence(&ctx, &notifier, &development_sequence())).await;
    assert!(report.all_succeeded(), "failures: {:?}", recording.failures());
    assert!(project.path("build/css/main.css.map").exists());

    let servers =
        with_timeout(start_servers(&ctx, &notifier, ReloadHub::new(), ReloadHub::new())).await?;

    let page = with_timeout(http_get(servers.site.addr, "/")).await?;
    assert!(page.starts_with("HTTP/1.1 200"));
    assert!(page.contains("<h1>Hi</h1>"));
    assert!(page.contains(RELOAD_CLIENT_PATH));

    let styleguide = servers.styleguide.as_ref().expect("styleguide enabled");
    let badge = with_timeout(http_get(styleguide.addr, "/components/badge.html")).await?;
    assert!(badge.starts_with("HTTP/1.1 200"));
    assert!(badge.contains("<span></span>"));

    let css = with_timeout(http_get(styleguide.addr, "/build/css/main.css")).await?;
    assert!(css.contains("color: red"));

    servers.abort();
    Ok(())
}
