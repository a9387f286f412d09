use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("transport configuration error: {0}")]
    Config(String),

    #[error("transport is not connected")]
    NotConnected,

    #[error("tool server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported operation: {0}")]
    Unsupported(String),
}
