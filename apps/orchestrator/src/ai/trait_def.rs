//! Decision agent trait definition.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ActionProposal, GameSnapshot, LegalAction, Player};
use crate::error::AppError;

/// Errors that can occur during agent decision-making.
#[derive(Debug, Clone)]
pub enum AgentError {
    /// Agent failed to decide within its own deadline
    Timeout,
    /// Agent encountered an internal error
    Internal(String),
    /// Agent could not produce a move from what it was offered
    InvalidMove(String),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::Timeout => write!(f, "agent decision timeout"),
            AgentError::Internal(msg) => write!(f, "agent internal error: {msg}"),
            AgentError::InvalidMove(msg) => write!(f, "agent invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AgentError {}

impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        AppError::internal(format!("agent error: {err}"))
    }
}

/// What an agent chose to do with its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Act(ActionProposal),
    /// The agent declined to act. Counts as a no-op attempt.
    Pass,
}

/// Everything an agent sees when asked for a decision.
#[derive(Debug, Clone, Copy)]
pub struct DecisionRequest<'a> {
    pub snapshot: &'a GameSnapshot,
    pub player: &'a Player,
    /// The offered actions; a proposal must fall inside one of them.
    pub legal_actions: &'a [LegalAction],
    /// Why the previous attempt in this phase failed, if it did.
    pub feedback: Option<&'a str>,
}

/// Trait for decision agents.
///
/// Implementations receive a fresh snapshot and the offered actions and
/// return a concrete proposal. The orchestrator bounds every call with a
/// timeout and treats errors and panics as invalid attempts.
#[async_trait]
pub trait DecisionAgent: Send + Sync {
    async fn decide(&self, request: DecisionRequest<'_>) -> Result<Decision, AgentError>;
}
