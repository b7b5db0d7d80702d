pub mod errors;
pub mod html;
pub mod json;
pub mod static_files;

pub use errors::{json_error_response, log_error, ResultResp};

// Normal HTML response
pub use html::html_response;
pub use json::json_response;
pub use static_files::serve_static;
