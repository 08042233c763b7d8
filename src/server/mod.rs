// src/server/mod.rs

//! Static file servers with live reload.
//!
//! Used for the build output (development sequence) and for the exported
//! styleguide.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::errors::{FrontendError, Result};

pub mod livereload;

pub use livereload::{ReloadEvent, ReloadHub};

use livereload::{
    RELOAD_CLIENT_PATH, RELOAD_WS_PATH, client_script, inject_reload_client, ws_handler,
};

/// Router serving `root` plus any extra `(url prefix, directory)` mounts.
///
/// Directory requests resolve to `index.html`; HTML responses get the
/// live-reload client injected.
pub fn router(root: PathBuf, mounts: &[(String, PathBuf)], hub: ReloadHub) -> Router {
    let mut app = Router::new()
        .route(RELOAD_WS_PATH, get(ws_handler))
        .route(RELOAD_CLIENT_PATH, get(client_script));

    for (prefix, dir) in mounts {
        app = app.nest_service(prefix, ServeDir::new(dir).append_index_html_on_directories(true));
    }

    app.fallback_service(ServeDir::new(root).append_index_html_on_directories(true))
        .layer(middleware::from_fn(inject_reload_client))
        .with_state(hub)
}

/// A server running in the background.
#[derive(Debug)]
pub struct ServerHandle {
    pub addr: SocketAddr,
    task: JoinHandle<()>,
}

impl ServerHandle {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop serving.
    pub fn abort(&self) {
        self.task.abort();
    }
}

/// Bind `host:port` and serve `app` on a background task.
///
/// Port 0 picks a free port; the bound address is in the handle. A failure
/// to bind is a configuration error.
pub async fn spawn_server(name: &'static str, host: &str, port: u16, app: Router) -> Result<ServerHandle> {
    let listener = TcpListener::bind((host, port)).await.map_err(|e| {
        FrontendError::ConfigError(format!("{name} server cannot bind {host}:{port}: {e}"))
    })?;
    let addr = listener.local_addr()?;

    let task = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            error!(server = name, error = %err, "server stopped");
        }
    });

    info!(server = name, url = %format!("http://{addr}"), "serving");
    Ok(ServerHandle { addr, task })
}
