//! Configuration loaded from environment variables.

mod env;
pub mod flow;
pub mod service;

pub use flow::FlowConfig;
pub use service::ServiceConfig;
