//! Serving the bundled single-page app.
//!
//! Any path that is not an API route and not a real file falls back to the
//! entry document so client-side routes survive a page reload.

use axum::{
    Json,
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::convert::Infallible;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::AppState;

pub const ENTRY_DOCUMENT: &str = "index.html";

/// Where a catch-all request ends up.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendTarget {
    /// Starts with `api` but matched no route.
    ApiNotFound,
    /// An existing file inside the static directory.
    File(PathBuf),
    /// The app's entry document.
    EntryDocument(PathBuf),
    /// No file and no entry document.
    Missing,
}

/// Map a request path onto the static directory.
pub async fn locate(static_dir: &Path, request_path: &str) -> FrontendTarget {
    let relative = request_path.trim_start_matches('/');

    if relative.starts_with("api") {
        return FrontendTarget::ApiNotFound;
    }

    if let Some(candidate) = contained_path(static_dir, relative) {
        if is_file(&candidate).await {
            return FrontendTarget::File(candidate);
        }
    }

    let entry = static_dir.join(ENTRY_DOCUMENT);
    if is_file(&entry).await {
        FrontendTarget::EntryDocument(entry)
    } else {
        FrontendTarget::Missing
    }
}

/// Join only plain path segments so a request can never leave `static_dir`.
fn contained_path(static_dir: &Path, relative: &str) -> Option<PathBuf> {
    if relative.is_empty() {
        return None;
    }

    let mut path = static_dir.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => path.push(segment),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(path)
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Catch-all handler registered as the router fallback.
pub async fn serve_frontend(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let raw_path = request.uri().path();
    let request_path = urlencoding::decode(raw_path)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| raw_path.to_string());

    match locate(&state.static_dir, &request_path).await {
        FrontendTarget::ApiNotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "API route not found" })),
        )
            .into_response(),
        FrontendTarget::File(path) => {
            // Minimal container images often lack an svg entry in their mime table.
            let service = if path.extension().is_some_and(|ext| ext == "svg") {
                ServeFile::new_with_mime(&path, &mime::IMAGE_SVG)
            } else {
                ServeFile::new(&path)
            };
            serve(service, request).await
        }
        FrontendTarget::EntryDocument(path) => serve(ServeFile::new(&path), request).await,
        FrontendTarget::Missing => {
            tracing::warn!(
                static_dir = %state.static_dir.display(),
                path = %request_path,
                "No frontend bundle to serve"
            );
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Frontend not found" })),
            )
                .into_response()
        }
    }
}

async fn serve(service: ServeFile, request: Request) -> Response {
    let result: Result<_, Infallible> = service.oneshot(request).await;
    match result {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}
