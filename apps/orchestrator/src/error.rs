use thiserror::Error;

use crate::client::ServiceError;
use crate::errors::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { code: ErrorCode, detail: String },
    #[error("Game service unavailable: {detail}")]
    ServiceUnavailable { detail: String },
    #[error("Game service error: {source}")]
    Service {
        #[from]
        source: ServiceError,
    },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Config { code, .. } => *code,
            AppError::ServiceUnavailable { .. } => ErrorCode::ServiceUnavailable,
            AppError::Service { source } => match source {
                ServiceError::Rejected { .. } => ErrorCode::ServiceRejected,
                ServiceError::Decode(_) => ErrorCode::ServicePayload,
                ServiceError::Transport(_) => ErrorCode::ServiceUnavailable,
            },
            AppError::NotFound { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Whether retrying the same operation later might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::ServiceUnavailable { .. } => true,
            AppError::Service { source } => source.is_transient(),
            _ => false,
        }
    }

    pub fn config(detail: String) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            detail,
        }
    }

    pub fn config_with(code: ErrorCode, detail: String) -> Self {
        Self::Config { code, detail }
    }

    pub fn service_unavailable(detail: String) -> Self {
        Self::ServiceUnavailable { detail }
    }

    pub fn not_found(code: ErrorCode, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
