//! Game flow orchestration - drives one game on the remote service to
//! completion, one phase at a time.
//!
//! The flow never owns game state. Each step fetches a fresh snapshot,
//! derives the legal actions, asks the active player's agent for a decision,
//! applies it and judges success by diffing the next snapshot. Retry, stall
//! and turn limits bound every loop.

mod history;
mod machine;
mod orchestration;
mod outcome;
mod phase_handlers;
mod retry_policy;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use history::{GameStatus, GameSummary, Outcome, PlayerSummary, TurnHistory, TurnRecord};
pub use machine::{FlowMachine, FlowState, Transition};
pub use orchestration::{backoff_delay, StepOutcome, TurnEnd, TurnResult, MAX_STEPS_PER_TURN};
pub use phase_handlers::PhaseExit;
pub use retry_policy::{RetryCounter, RetryPolicy, StallCheck, StallGuard};

use crate::ai::DecisionAgent;
use crate::client::GameService;
use crate::config::FlowConfig;
use crate::domain::GameSnapshot;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Maps player names to the agents deciding for them.
#[derive(Clone, Default)]
pub struct AgentRoster {
    agents: BTreeMap<String, Arc<dyn DecisionAgent>>,
}

impl AgentRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, player: impl Into<String>, agent: Arc<dyn DecisionAgent>) -> Self {
        self.insert(player, agent);
        self
    }

    pub fn insert(&mut self, player: impl Into<String>, agent: Arc<dyn DecisionAgent>) {
        self.agents.insert(player.into(), agent);
    }

    pub fn agent_for(&self, player: &str) -> Result<Arc<dyn DecisionAgent>, AppError> {
        self.agents.get(player).cloned().ok_or_else(|| {
            AppError::config_with(
                ErrorCode::AgentNotAssigned,
                format!("no decision agent assigned to player '{player}'"),
            )
        })
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Orchestrator state of one game. Exclusively owned by whoever drives it.
pub struct GameFlow {
    service: Arc<dyn GameService>,
    roster: AgentRoster,
    config: FlowConfig,
    machine: FlowMachine,
    stall_guard: StallGuard,
    history: TurnHistory,
    turns_played: u32,
    steps_taken: u32,
    transport_faults: u32,
    /// Snapshot fetched at the end of the last step, reused by the next one.
    pending: Option<GameSnapshot>,
}

impl GameFlow {
    pub fn new(service: Arc<dyn GameService>, roster: AgentRoster, config: FlowConfig) -> Self {
        let stall_guard = StallGuard::new(config.retry_policy.stall_threshold);
        Self {
            service,
            roster,
            config,
            machine: FlowMachine::default(),
            stall_guard,
            history: TurnHistory::default(),
            turns_played: 0,
            steps_taken: 0,
            transport_faults: 0,
            pending: None,
        }
    }

    pub fn history(&self) -> &TurnHistory {
        &self.history
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn state(&self) -> FlowState {
        self.machine.state()
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }
}
