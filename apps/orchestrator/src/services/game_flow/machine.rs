//! Observed-state machine of one game.
//!
//! The service owns the real state; this machine only tracks what the
//! orchestrator has observed so that out-of-order transitions can be logged.

use serde::Serialize;
use tracing::warn;

use crate::domain::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Reinforce,
    Attack,
    Fortify,
    MoveArmies,
    TurnBoundary,
    /// Terminal. Entered only when the service reports game over.
    GameOver,
}

impl From<Phase> for FlowState {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Reinforce => FlowState::Reinforce,
            Phase::Attack => FlowState::Attack,
            Phase::Fortify => FlowState::Fortify,
            Phase::MoveArmies => FlowState::MoveArmies,
        }
    }
}

impl FlowState {
    /// Whether `next` is an expected successor of `self`.
    pub fn can_transition_to(self, next: FlowState) -> bool {
        if self == next {
            return true;
        }
        match (self, next) {
            (FlowState::GameOver, _) => false,
            (_, FlowState::GameOver) => true,
            // Eliminations and forced advances can end a turn in any phase.
            (_, FlowState::TurnBoundary) => true,
            (FlowState::Reinforce, FlowState::Attack) => true,
            (FlowState::Attack, FlowState::Fortify | FlowState::MoveArmies) => true,
            (FlowState::MoveArmies, FlowState::Attack | FlowState::Fortify) => true,
            (FlowState::TurnBoundary, FlowState::Reinforce) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: FlowState,
    pub to: FlowState,
    pub expected: bool,
}

#[derive(Debug, Clone)]
pub struct FlowMachine {
    state: FlowState,
}

impl Default for FlowMachine {
    fn default() -> Self {
        Self {
            state: FlowState::Reinforce,
        }
    }
}

impl FlowMachine {
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Records an observed state. Leaving `GameOver` is refused.
    pub fn observe(&mut self, next: FlowState) -> Transition {
        let from = self.state;
        let expected = from.can_transition_to(next);
        if !expected {
            warn!(from = ?from, to = ?next, "Unexpected game flow transition");
        }
        if from != FlowState::GameOver {
            self.state = next;
        }
        Transition {
            from,
            to: next,
            expected,
        }
    }
}
