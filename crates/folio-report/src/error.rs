use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("holding pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("report execution failed: {0}")]
    Execution(String),
}
