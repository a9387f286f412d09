use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(#[from] folio_transport::TransportError),

    #[error("analysis service error: {0}")]
    Analysis(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
