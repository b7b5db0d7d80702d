// errors.rs
use astra::Response;
use thiserror::Error;

/// Errors raised while validating a request, reading listing sources or
/// talking to SQLite. Every variant maps onto one HTTP status.
#[derive(Debug, Error)]
pub enum ServerError {
    /// City or period outside the configured sets.
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("CSV Error: {0}")]
    CsvError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::BadRequest(_) => 400,
            ServerError::NotFound(_) => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::DbError(_)
            | ServerError::CsvError(_)
            | ServerError::Io(_)
            | ServerError::InternalError => 500,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status() >= 500
    }

    /// Message safe to hand back to a client. Server-side causes stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::BadRequest(msg) | ServerError::NotFound(msg) => msg.clone(),
            ServerError::MethodNotAllowed => "Method not allowed".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}
