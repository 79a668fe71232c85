use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{self, Extension},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use handlebars::Handlebars;
use include_dir::{include_dir, Dir};
use serde::Serialize;
use tokio::fs;
use tracing::debug;

use crate::render::Renderer;
use crate::State;

static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// `GET /` — the listing page, one link per indexed document.
pub(crate) async fn serve_listing<R>(Extension(state): Extension<Arc<State<R>>>) -> Response
where
    R: Renderer + Send + Sync + 'static,
{
    let data = ListingData {
        root: state.index.root().display().to_string(),
        files: state.index.entries().iter().map(|e| e.name()).collect(),
    };

    match Handlebars::new().render_template(include_str!("../templates/listing.html"), &data) {
        Ok(html) => Html(html).into_response(),
        Err(err) => render_failure(err),
    }
}

/// `GET /assets/*path` — styles served from the embedded bundle.
pub(crate) async fn serve_asset(extract::Path(path): extract::Path<PathBuf>) -> impl IntoResponse {
    let path = path.strip_prefix("/").unwrap_or(&path);

    let file = match ASSETS.get_file(path) {
        Some(file) => file,
        None => return Err((StatusCode::NOT_FOUND, "asset not found")),
    };

    let mime = mime_guess::from_path(path);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        mime.first_or_octet_stream().to_string().parse().unwrap(),
    );

    Ok((headers, file.contents()))
}

/// Fallback — every other path names a document to render.
pub(crate) async fn serve_document<R>(
    Extension(state): Extension<Arc<State<R>>>,
    uri: Uri,
) -> Response
where
    R: Renderer + Send + Sync + 'static,
    R::Error: fmt::Display,
{
    let entry = match state.index.resolve(uri.path()) {
        Some(entry) => entry,
        None => return (StatusCode::NOT_FOUND, "Not Found").into_response(),
    };

    debug!("rendering {}", entry.path().display());

    let markdown = match fs::read_to_string(entry.path()).await {
        Ok(markdown) => markdown,
        Err(err) => return render_failure(err),
    };

    let mut fragment = String::with_capacity(state.renderer.size_hint(&markdown));

    if let Err(err) = state.renderer.render(&markdown, &mut fragment) {
        return render_failure(err);
    }

    let data = DocumentData {
        title: entry.name(),
        content: fragment,
    };

    match Handlebars::new().render_template(include_str!("../templates/document.html"), &data) {
        Ok(html) => Html(html).into_response(),
        Err(err) => render_failure(err),
    }
}

/// Per-request failures become a 500 carrying the error text. They must never
/// take the process down.
fn render_failure(err: impl fmt::Display) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}

#[derive(Debug, Serialize)]
struct ListingData<'a> {
    root: String,
    files: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct DocumentData<'a> {
    title: &'a str,
    content: String,
}
