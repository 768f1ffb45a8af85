use std::time::Duration;

use super::env::{positive_or, process_env, var_or, Lookup};
use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Where the game service lives and how long a single request may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl ServiceConfig {
    /// Reads `RISK_API_URL` and `RISK_REQUEST_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&process_env)
    }

    pub(crate) fn from_lookup<L: Lookup + ?Sized>(lookup: &L) -> Result<Self, AppError> {
        let base_url: String = var_or(lookup, "RISK_API_URL", DEFAULT_API_URL.to_string())?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "RISK_API_URL must be an http(s) URL, got '{base_url}'"
            )));
        }
        let timeout_ms = positive_or(lookup, "RISK_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;
        Ok(Self {
            base_url,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
