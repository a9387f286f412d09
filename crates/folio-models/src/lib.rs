pub mod catalog;
pub mod config;
pub mod holding;
pub mod views;

pub use catalog::{builtin_tools, ToolDescriptor, ToolParam};
pub use config::{AdapterMode, FolioConfig, TransportConfig, TransportKind};
pub use holding::HoldingRecord;
pub use views::{
    AddedHolding, AnalysisView, HoldingView, OpportunityQuery, OpportunityView, ReportView,
    SellView,
};
