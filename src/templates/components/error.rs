use crate::errors::ServerError;
use crate::responses::log_error;
use astra::{Body, Response, ResponseBuilder};
use maud::{html, PreEscaped, DOCTYPE};

/// Convert a ServerError into an HTML error page. Used for non-API routes.
pub fn html_error_response(err: ServerError) -> Response {
    log_error(&err);
    render_error(err.status(), &err.public_message())
}

const ERROR_STYLE: &str = "
    body { font-family: system-ui, sans-serif; max-width: 720px; margin: 4rem auto; padding: 1rem; }
    h1 { font-size: 2rem; margin-bottom: 1rem; }
    p { font-size: 1.1rem; color: #444; }
";

/// Build a basic HTML error page
fn render_error(status: u16, message: &str) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                style { (PreEscaped(ERROR_STYLE)) }
            }
            body {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to the dashboard" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
