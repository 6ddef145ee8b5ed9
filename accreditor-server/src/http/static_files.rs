//! Static file serving for the embedded web UI

use axum::{
    Json,
    body::Body,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use super::api::ErrorResponse;

/// Embedded web UI assets (compiled into binary)
#[derive(RustEmbed)]
#[folder = "../web/"]
struct WebAssets;

/// Handler for serving static files from embedded assets
///
/// Any path that doesn't match a real file returns index.html so the
/// frontend's own routing can handle it. Unknown `/api` paths are a JSON 404.
pub async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if path == "api" || path.starts_with("api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No such endpoint: /{}", path),
                code: "NOT_FOUND".into(),
            }),
        )
            .into_response();
    }

    if let Some(response) = serve_file(path) {
        return response;
    }

    serve_file("index.html")
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "Web UI not found").into_response())
}

/// Serve a file from embedded assets
fn serve_file(path: &str) -> Option<Response<Body>> {
    let path = if path.is_empty() { "index.html" } else { path };
    let file = WebAssets::get(path)?;

    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(file.data.into_owned()))
        .ok()
}
