pub mod client;
pub mod error;
pub mod local_process;
pub mod remote;

pub use client::ToolClient;
pub use error::TransportError;
