pub mod error;
pub mod formatter;
pub mod orchestrator;
pub mod parser;

pub use error::ReportError;
pub use orchestrator::ReportOrchestrator;
pub use parser::extract_holdings;
