//! Common test utilities and fixtures
//!
//! Provides a mock admin backend (an axum router on an ephemeral port)
//! plus a command builder pointed at it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use assert_cmd::Command;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A write the mock backend accepted
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: &'static str,
    pub body: Value,
}

#[derive(Debug)]
struct BackendState {
    schema: Value,
    config: Value,
    personas: Value,
    writes: Vec<Recorded>,
    uploads: Vec<(String, usize)>,
}

type Shared = Arc<RwLock<BackendState>>;

/// Mock admin backend serving `/api/config`, `/api/personas` and
/// `/api/upload-image`
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    /// Start the backend on its own thread and runtime
    pub fn start(schema: Value, config: Value, personas: Value) -> Self {
        let state: Shared = Arc::new(RwLock::new(BackendState {
            schema,
            config,
            personas,
            writes: Vec::new(),
            uploads: Vec::new(),
        }));
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = router(state.clone());

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .unwrap();
            });
        });

        let addr = addr_rx.recv().unwrap();
        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn posts_to(&self, path: &str) -> Vec<Recorded> {
        self.state
            .read()
            .writes
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// File name and size of every accepted upload
    pub fn uploads(&self) -> Vec<(String, usize)> {
        self.state.read().uploads.clone()
    }

    pub fn personas(&self) -> Value {
        self.state.read().personas.clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/config", get(get_config).post(post_config))
        .route("/api/personas", get(get_personas).post(post_personas))
        .route("/api/upload-image", post(upload_image))
        .with_state(state)
}

async fn get_config(State(state): State<Shared>) -> Json<Value> {
    let s = state.read();
    Json(json!({"success": true, "schema": s.schema, "config": s.config}))
}

async fn post_config(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut s = state.write();
    s.config = body.clone();
    s.writes.push(Recorded { path: "/api/config", body });
    Json(json!({"success": true, "message": "saved"}))
}

async fn get_personas(State(state): State<Shared>) -> Json<Value> {
    Json(json!({"success": true, "personas": state.read().personas}))
}

/// Answers without a `success` flag, like the reference backend's bare 200
async fn post_personas(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut s = state.write();
    s.personas = body.clone();
    s.writes.push(Recorded { path: "/api/personas", body });
    Json(json!({"message": "stored"}))
}

async fn upload_image(
    State(state): State<Shared>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let Ok(bytes) = field.bytes().await else {
            break;
        };
        state.write().uploads.push((name.clone(), bytes.len()));
        return (
            StatusCode::OK,
            Json(json!({"success": true, "url": format!("/img/{}", name)})),
        );
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "message": "no file"})),
    )
}

/// The console binary with an isolated config pointed at `server`
pub fn console_cmd(server: &str) -> Command {
    let mut cmd = Command::cargo_bin("admin-console").unwrap();
    cmd.env_remove("ADMIN_CONSOLE_CONFIG")
        .env_remove("ADMIN_CONSOLE_SERVER_URL")
        .env("ADMIN_CONSOLE_LOG_LEVEL", "error")
        .arg("--server")
        .arg(server);
    cmd
}
