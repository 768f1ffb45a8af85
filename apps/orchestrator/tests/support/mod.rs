#![allow(dead_code)]

pub mod agents;
pub mod boards;
pub mod fake_service;

pub use agents::{CountingAgent, FailingAgent, PanickingAgent, ScriptedAgent, SlowAgent};
pub use fake_service::{Call, FakeGameService};

use std::time::Duration;

use orchestrator::services::game_flow::RetryPolicy;
use orchestrator::FlowConfig;

/// Flow limits small enough for tests; no sleeping between faults.
pub fn test_flow_config() -> FlowConfig {
    FlowConfig {
        retry_policy: RetryPolicy {
            max_attempts: 5,
            stall_threshold: 10,
            max_actions_per_phase: 50,
        },
        turn_timeout: Duration::from_secs(2),
        max_turns: 50,
        poll_interval: Duration::ZERO,
        max_transport_faults: 3,
    }
}
