// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP report server.
//!
//! Every request renders from the snapshot current at that moment. A reload
//! ingests the artifacts again on a blocking thread and publishes the new
//! model only when it loaded successfully.

use std::net::SocketAddr;
use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::error::Error;
use crate::ingest::{ArtifactSet, load_report};
use crate::model::{ReportHandle, ReportModel};
use crate::report::{self, RunView};

/// State shared by every request.
pub struct AppState {
    handle: ReportHandle,
    artifacts: ArtifactSet,
}

impl AppState {
    pub fn new(model: ReportModel, artifacts: ArtifactSet) -> Self {
        Self {
            handle: ReportHandle::new(model),
            artifacts,
        }
    }

    pub fn handle(&self) -> &ReportHandle {
        &self.handle
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }
}

/// Build the report router.
///
/// Run pages take a source identifier or a plugin name.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/tests/{plugin}", get(run_tests))
        .route("/tests/{plugin}/failed", get(failed_tests))
        .route("/api/report", get(api_report))
        .route("/file", get(raw_file))
        .route("/reload", post(reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Parse a listen address.
pub fn parse_addr(addr: &str) -> crate::Result<SocketAddr> {
    addr.parse()
        .map_err(|e| Error::Argument(format!("invalid listen address `{addr}`: {e}")))
}

/// Serve the report until the process is stopped.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "serving report");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn render_failure(e: anyhow::Error) -> Response {
    warn!(error = %e, "render failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}

async fn index(State(state): State<Arc<AppState>>) -> Response {
    let model = state.handle.snapshot();
    let mut body = Vec::new();
    match report::format_report_to(&mut body, OutputFormat::Html, &model, false) {
        Ok(()) => Html(body).into_response(),
        Err(e) => render_failure(e),
    }
}

fn render_run(state: &AppState, plugin: &str, view: RunView) -> Response {
    let model = state.handle.snapshot();
    let mut body = Vec::new();
    match report::format_run_report_to(&mut body, OutputFormat::Html, &model, plugin, view, false)
    {
        Ok(()) => Html(body).into_response(),
        Err(e) => render_failure(e),
    }
}

async fn run_tests(State(state): State<Arc<AppState>>, Path(plugin): Path<String>) -> Response {
    render_run(&state, &plugin, RunView::All)
}

async fn failed_tests(State(state): State<Arc<AppState>>, Path(plugin): Path<String>) -> Response {
    render_run(&state, &plugin, RunView::Failed)
}

async fn api_report(State(state): State<Arc<AppState>>) -> Response {
    let model = state.handle.snapshot();
    let mut body = Vec::new();
    match report::format_report_to(&mut body, OutputFormat::Json, &model, true) {
        Ok(()) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => render_failure(e),
    }
}

#[derive(Debug, Deserialize)]
struct FileQuery {
    file: Option<String>,
}

/// Location of a requested raw file, if it may be served.
///
/// Known artifacts resolve like ingestion does; anything else must be a
/// relative path that stays under the artifact root.
fn servable_path(state: &AppState, requested: &str) -> Option<PathBuf> {
    let model = state.handle.snapshot();
    if model.artifact_paths().any(|p| p == requested) {
        return Some(state.artifacts.resolve(FsPath::new(requested)));
    }

    let relative = FsPath::new(requested);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !plain {
        return None;
    }

    // Symlinks may still point outside the root.
    let root = state.artifacts.root.canonicalize().ok()?;
    let path = root.join(relative).canonicalize().ok()?;
    path.starts_with(&root).then_some(path)
}

async fn raw_file(State(state): State<Arc<AppState>>, Query(query): Query<FileQuery>) -> Response {
    let Some(requested) = query.file.filter(|f| !f.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "missing `file` parameter").into_response();
    };
    let Some(path) = servable_path(&state, &requested) else {
        warn!(file = %requested, "refused raw file request");
        return StatusCode::NOT_FOUND.into_response();
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], bytes).into_response(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read raw file");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn reload(State(state): State<Arc<AppState>>) -> Response {
    let artifacts = state.artifacts.clone();
    let loaded = tokio::task::spawn_blocking(move || load_report(&artifacts)).await;
    match loaded {
        Ok(Ok(model)) => {
            let runs = model.runs().len();
            state.handle.publish(model);
            info!(runs, "published reloaded report");
            (StatusCode::OK, format!("reloaded {runs} runs\n")).into_response()
        }
        Ok(Err(e)) => {
            warn!(error = %e, "reload failed, keeping previous report");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            warn!(error = %e, "reload task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;
