//! folio - investment portfolio plugin with dual-transport tool invocation.
//!
//! A conversational agent invokes portfolio operations (add holding, fetch
//! portfolio, analyze a stock, sell/buy recommendations, report generation)
//! through one adapter, whether the analysis service runs behind a network
//! transport or in-process.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use folio::models::{AdapterMode, FolioConfig};
//! use folio::service::ServiceAdapter;
//! use folio::report::ReportOrchestrator;
//! use folio::InvestmentPlugin;
//! ```

pub use folio_models as models;
pub use folio_report as report;
pub use folio_service as service;
pub use folio_transport as transport;

mod plugin;

pub use plugin::{InvestmentPlugin, PluginError};
