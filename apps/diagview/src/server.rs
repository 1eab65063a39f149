//! JSON HTTP endpoints over a built, read-only index.
//!
//! - `GET /`, `GET /files`: summary listing
//! - `GET /file?path=P`: annotated file
//!
//! Each `/file` request reads the source from disk on the blocking pool.

use crate::annotate;
use crate::error::IndexError;
use crate::index::Index;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<Index>,
}

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    path: Option<String>,
}

/// Router with all diagview routes bound to `index`.
pub fn router(index: Arc<Index>) -> Router {
    Router::new()
        .route("/", get(listing_handler))
        .route("/files", get(listing_handler))
        .route("/file", get(file_handler))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .with_state(AppState { index })
}

/// Bind `addr` and serve until the process is stopped.
pub async fn run_http_server(addr: &str, index: Arc<Index>) -> anyhow::Result<()> {
    let files = index.len();
    let app = router(index);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, files, "diagview listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn listing_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.index.listing())
}

async fn file_handler(
    State(state): State<AppState>,
    Query(q): Query<FileQuery>,
) -> Response {
    let path = match q.path {
        Some(p) if !p.is_empty() => p,
        _ => return (StatusCode::BAD_REQUEST, "No path specified.").into_response(),
    };
    let index = Arc::clone(&state.index);
    let lookup = path.clone();
    let res = tokio::task::spawn_blocking(move || annotate::load(&index, &lookup)).await;
    match res {
        Ok(Ok(af)) => Json(af).into_response(),
        Ok(Err(e)) => {
            warn!(path = %path, error = %e, "failed to load annotated file");
            (status_for(&e), format!("Error: {}", e)).into_response()
        }
        Err(e) => {
            warn!(path = %path, error = %e, "annotate task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response()
        }
    }
}

fn status_for(e: &IndexError) -> StatusCode {
    if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::PathCase;
    use crate::models::rules::IndexConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value as Json;
    use tempfile::tempdir;
    use tower::ServiceExt;

    fn app(dir: &std::path::Path, diagnostics: &str) -> Router {
        let index = Index::build_with(
            &IndexConfig::default(),
            PathCase::Sensitive,
            dir,
            diagnostics.as_bytes(),
        );
        router(Arc::new(index))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_listing_routes() {
        let dir = tempdir().unwrap();
        let app = app(dir.path(), "b.go:1: x\na.go:2: y\n");
        for uri in ["/", "/files"] {
            let (status, body) = get(app.clone(), uri).await;
            assert_eq!(status, StatusCode::OK);
            let v: Json = serde_json::from_slice(&body).unwrap();
            assert_eq!(v["files"][0]["path"], "a.go");
            assert_eq!(v["files"][1]["path"], "b.go");
        }
    }

    #[tokio::test]
    async fn test_file_route_returns_annotated_json() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.go"), "one\ntwo\n").unwrap();
        let app = app(dir.path(), "a.go:2:3: escapes to heap\n");
        let (status, body) = get(app, "/file?path=a.go").await;
        assert_eq!(status, StatusCode::OK);
        let v: Json = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["lines"].as_array().unwrap().len(), 3);
        assert_eq!(v["lines"][1]["notes"][0]["column"], 2);
        assert_eq!(v["lines"][1]["notes"][0]["message"], "escapes to heap");
    }

    #[tokio::test]
    async fn test_file_route_errors() {
        let dir = tempdir().unwrap();
        let app = app(dir.path(), "gone.go:1: m\n");

        let (status, body) = get(app.clone(), "/file").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, b"No path specified.");

        let (status, _) = get(app.clone(), "/file?path=nope.go").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get(app.clone(), "/file?path=gone.go").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(String::from_utf8_lossy(&body).starts_with("Error: "));

        let (status, _) = get(app, "/elsewhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
