use std::time::Duration;

use super::env::{positive_or, process_env, var_or, Lookup};
use crate::error::AppError;
use crate::services::game_flow::RetryPolicy;

const DEFAULT_TURN_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_TURNS: u32 = 100;
const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
const DEFAULT_MAX_TRANSPORT_FAULTS: u32 = 20;

/// Knobs of the turn/phase orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    pub retry_policy: RetryPolicy,
    /// Upper bound on one agent decision.
    pub turn_timeout: Duration,
    /// Player turns before a game is abandoned as `TurnLimitReached`.
    pub max_turns: u32,
    /// Base delay between ticks after a transport fault.
    pub poll_interval: Duration,
    /// Consecutive transport faults tolerated before giving up.
    pub max_transport_faults: u32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            retry_policy: RetryPolicy::default(),
            turn_timeout: Duration::from_secs(DEFAULT_TURN_TIMEOUT_SECS),
            max_turns: DEFAULT_MAX_TURNS,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_transport_faults: DEFAULT_MAX_TRANSPORT_FAULTS,
        }
    }
}

impl FlowConfig {
    /// Reads the `RISK_*` orchestrator variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&process_env)
    }

    pub(crate) fn from_lookup<L: Lookup + ?Sized>(lookup: &L) -> Result<Self, AppError> {
        let defaults = RetryPolicy::default();
        let retry_policy = RetryPolicy {
            max_attempts: positive_or(lookup, "RISK_MAX_ATTEMPTS", defaults.max_attempts.into())?
                .try_into()
                .map_err(|_| AppError::config("RISK_MAX_ATTEMPTS is too large".into()))?,
            stall_threshold: positive_or(
                lookup,
                "RISK_STALL_THRESHOLD",
                defaults.stall_threshold.into(),
            )?
            .try_into()
            .map_err(|_| AppError::config("RISK_STALL_THRESHOLD is too large".into()))?,
            max_actions_per_phase: defaults.max_actions_per_phase,
        };

        Ok(Self {
            retry_policy,
            turn_timeout: Duration::from_secs(positive_or(
                lookup,
                "RISK_TURN_TIMEOUT_SECS",
                DEFAULT_TURN_TIMEOUT_SECS,
            )?),
            max_turns: var_or(lookup, "RISK_MAX_TURNS", DEFAULT_MAX_TURNS)?,
            poll_interval: Duration::from_millis(var_or(
                lookup,
                "RISK_POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL_MS,
            )?),
            max_transport_faults: var_or(
                lookup,
                "RISK_MAX_TRANSPORT_FAULTS",
                DEFAULT_MAX_TRANSPORT_FAULTS,
            )?,
        })
    }
}
