//! Development server: serves one snapshot file as `/data.json`.
//!
//! The file is re-read on every request so a collector (or a test) can
//! replace it while the server runs. A missing file answers 404.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;

#[derive(Parser)]
#[command(name = "newsdesk-serve")]
#[command(about = "Serve a news digest snapshot for local previews", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Snapshot file to serve at /data.json
    #[arg(long, default_value = "docs/data.json")]
    data_file: PathBuf,
}

struct AppState {
    data_file: PathBuf,
}

#[tokio::main]
async fn main() {
    newsdesk::logging::init_stderr();
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let state = Arc::new(AppState {
        data_file: args.data_file.clone(),
    });
    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/data.json", get(data_json))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(
        addr = %local_addr,
        data_file = %args.data_file.display(),
        "newsdesk-serve listening"
    );

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn data_json(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read(&state.data_file).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %state.data_file.display(), "snapshot missing");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(err) => {
            tracing::warn!(path = %state.data_file.display(), "read snapshot: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
