pub mod adapter;
pub mod analysis;
pub mod error;

pub mod test_support;

pub use adapter::ServiceAdapter;
pub use analysis::AnalysisService;
pub use error::ServiceError;
