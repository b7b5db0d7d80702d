use crate::config::DashboardConfig;
use crate::errors::ServerError;
use crate::responses::{html_response, json_error_response, json_response, serve_static};
use crate::responses::ResultResp;
use crate::store::ListingStore;
use crate::templates;
use astra::{Request, Response};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

/// Everything a request handler needs. Built once in `main` and shared by
/// all worker threads.
pub struct AppState {
    pub config: DashboardConfig,
    pub store: Box<dyn ListingStore>,
    pub static_dir: PathBuf,
    pub geojson_dir: PathBuf,
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    debug!("{method} {path}");

    if let Some(rest) = path.strip_prefix("/api/") {
        return Ok(handle_api(method, rest, state));
    }

    match (method, path) {
        ("GET", "/") => html_response(templates::pages::dashboard_page(&state.config)),
        ("GET", "/health") => json_response(&json!({ "status": "ok" })),
        ("GET" | "HEAD", p) if p.starts_with("/static/") => {
            serve_static(&state.static_dir, &p["/static/".len()..])
        }
        ("GET" | "HEAD", p) if p.starts_with("/data/geojson/") => {
            serve_static(&state.geojson_dir, &p["/data/geojson/".len()..])
        }
        _ => Err(ServerError::NotFound("Page not found".to_string())),
    }
}

/// `/api/*` always answers with JSON, errors included.
fn handle_api(method: &str, rest: &str, state: &AppState) -> Response {
    let segments: Vec<&str> = rest.split('/').collect();

    let result = match segments.as_slice() {
        ["data", city, period] => match method {
            "GET" => get_listings(state, city, period),
            _ => Err(ServerError::MethodNotAllowed),
        },
        ["partitions"] => match method {
            "GET" => json_response(&json!({
                "cities": state.config.cities(),
                "periods": state.config.periods(),
            })),
            _ => Err(ServerError::MethodNotAllowed),
        },
        _ => Err(ServerError::NotFound("Unknown API route".to_string())),
    };

    result.unwrap_or_else(|err| json_error_response(&err))
}

/// `GET /api/data/{city}/{period}`: validation happens before the store is touched.
fn get_listings(state: &AppState, city: &str, period: &str) -> ResultResp {
    let partition = state.config.partition(city, period)?;
    let records = state.store.query(&partition)?;
    debug!(partition = %partition, count = records.len(), "Serving listings");
    json_response(&records)
}
