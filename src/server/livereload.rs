// src/server/livereload.rs

//! Live-reload channel between the runtime and connected browsers.
//!
//! Every HTML page served gets a small client script injected before
//! `</body>`. The script opens a WebSocket and either reloads the page or
//! re-fetches stylesheets when a [`ReloadEvent`] arrives.

use axum::body::Body;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::types::ReloadKind;

pub const RELOAD_WS_PATH: &str = "/__frontend/livereload";
pub const RELOAD_CLIENT_PATH: &str = "/__frontend/livereload.js";

/// Largest HTML body the injection middleware will buffer.
const MAX_INJECT_BODY: usize = 16 * 1024 * 1024;

const CLIENT_JS: &str = r#"(function () {
  var scheme = location.protocol === "https:" ? "wss://" : "ws://";
  function refreshStyles() {
    var links = document.querySelectorAll('link[rel="stylesheet"]');
    for (var i = 0; i < links.length; i++) {
      var href = links[i].href.replace(/[?&]livereload=\d+/, "");
      links[i].href = href + (href.indexOf("?") < 0 ? "?" : "&") + "livereload=" + Date.now();
    }
  }
  function connect() {
    var ws = new WebSocket(scheme + location.host + "/__frontend/livereload");
    ws.onmessage = function (msg) {
      var event = JSON.parse(msg.data);
      if (event.type === "css") {
        refreshStyles();
      } else {
        location.reload();
      }
    };
    ws.onclose = function () {
      setTimeout(connect, 1000);
    };
  }
  connect();
})();
"#;

/// Message pushed to browsers, serialized as `{"type":"reload"}` or
/// `{"type":"css"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReloadEvent {
    Reload,
    Css,
}

impl From<ReloadKind> for ReloadEvent {
    fn from(kind: ReloadKind) -> Self {
        match kind {
            ReloadKind::FullPage => ReloadEvent::Reload,
            ReloadKind::InjectCss => ReloadEvent::Css,
        }
    }
}

/// Fan-out point for reload events. Clones share one channel.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    tx: broadcast::Sender<ReloadEvent>,
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.tx.subscribe()
    }

    /// Push `event` to every connected client. Returns how many received it.
    pub fn notify(&self, event: ReloadEvent) -> usize {
        match self.tx.send(event) {
            Ok(n) => {
                debug!(?event, clients = n, "pushed reload");
                n
            }
            // No browser connected.
            Err(_) => 0,
        }
    }
}

/// `GET /__frontend/livereload`: upgrade and stream reload events.
pub async fn ws_handler(ws: WebSocketUpgrade, State(hub): State<ReloadHub>) -> Response {
    let rx = hub.subscribe();
    ws.on_upgrade(move |socket| stream_events(socket, rx))
}

async fn stream_events(mut socket: WebSocket, mut rx: broadcast::Receiver<ReloadEvent>) {
    debug!("live-reload client connected");
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(t) => t,
                        Err(err) => {
                            warn!(error = %err, "failed to encode reload event");
                            continue;
                        }
                    };
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "live-reload client lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    debug!("live-reload client disconnected");
}

/// `GET /__frontend/livereload.js`.
pub async fn client_script() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/javascript; charset=utf-8")], CLIENT_JS)
}

/// Insert the client `<script>` before the last `</body>`, or append it.
pub fn inject_snippet(html: &str) -> String {
    let tag = format!("<script src=\"{RELOAD_CLIENT_PATH}\"></script>");
    match html.to_ascii_lowercase().rfind("</body>") {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + tag.len());
            out.push_str(&html[..pos]);
            out.push_str(&tag);
            out.push_str(&html[pos..]);
            out
        }
        None => format!("{html}{tag}"),
    }
}

/// Middleware: add the client script to every `text/html` response.
pub async fn inject_reload_client(req: Request<Body>, next: Next) -> Response {
    let response = next.run(req).await;

    let is_html = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"));
    if !is_html {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_INJECT_BODY).await {
        Ok(b) => b,
        Err(err) => {
            warn!(error = %err, "could not buffer html response for injection");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let html = inject_snippet(&String::from_utf8_lossy(&bytes));
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(html))
}
