//! Error handling for the orchestrator.

pub mod error_code;

pub use crate::domain::errors::DomainError;
pub use error_code::ErrorCode;
