// responses/static_files.rs
//
// Dashboard assets: scripts, styles and geo-boundary files.

use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use mime::Mime;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Join `relative` onto `root`, refusing anything that could step outside it.
fn resolve_asset_path(root: &Path, relative: &str) -> Option<PathBuf> {
    if relative.is_empty() || relative.contains('\\') {
        return None;
    }
    let rel = Path::new(relative);
    if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(root.join(rel))
}

fn content_type_for(path: &Path) -> Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html" | "htm") => mime::TEXT_HTML_UTF_8,
        Some("css") => mime::TEXT_CSS_UTF_8,
        Some("js" | "mjs") => mime::APPLICATION_JAVASCRIPT_UTF_8,
        Some("json") => mime::APPLICATION_JSON,
        Some("geojson") => "application/geo+json"
            .parse()
            .unwrap_or(mime::APPLICATION_JSON),
        Some("csv") => mime::TEXT_CSV_UTF_8,
        Some("txt") => mime::TEXT_PLAIN_UTF_8,
        Some("svg") => mime::IMAGE_SVG,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg" | "jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("ico") => "image/x-icon".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        Some("woff") => mime::FONT_WOFF,
        Some("woff2") => mime::FONT_WOFF2,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Serve `root/relative` with a content type taken from its extension.
pub fn serve_static(root: &Path, relative: &str) -> ResultResp {
    let not_found = || ServerError::NotFound("File not found".to_string());

    let path = resolve_asset_path(root, relative).ok_or_else(not_found)?;
    if !path.is_file() {
        return Err(not_found());
    }

    let content = fs::read(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => not_found(),
        _ => ServerError::Io(e),
    })?;
    let content_type = content_type_for(&path);

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type.as_ref())
        .header("Content-Length", content.len())
        .body(Body::from(content))
        .map_err(|_| ServerError::InternalError)
}
