use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;
use tracing::{debug, error};

pub use crate::errors::ResultResp;

/// Server-side failures are logged with their cause; client errors only at debug.
pub fn log_error(err: &ServerError) {
    if err.is_server_error() {
        error!("Request failed: {err}");
    } else {
        debug!("Request rejected: {err}");
    }
}

/// Convert a ServerError into `{"error": ...}` with the matching status.
pub fn json_error_response(err: &ServerError) -> Response {
    log_error(err);

    let body = json!({ "error": err.public_message() }).to_string();
    let mut builder = ResponseBuilder::new()
        .status(err.status())
        .header("Content-Type", mime::APPLICATION_JSON.as_ref());
    if matches!(err, ServerError::MethodNotAllowed) {
        builder = builder.header("Allow", "GET");
    }

    builder
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
