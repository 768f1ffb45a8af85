//! Client boundary for the authoritative game service.
//!
//! Mutating calls return no state (attack returns only its combat outcome),
//! so callers must re-fetch a snapshot after every change.

mod http;
pub(crate) mod wire;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpGameService;

use crate::domain::{GameSnapshot, PlayerId};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Connection failure or timeout. Retried on the next tick.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The service answered but refused the request.
    #[error("service rejected {operation} ({status}): {detail}")]
    Rejected {
        operation: &'static str,
        status: u16,
        detail: String,
    },
    /// The service answered with something we could not read.
    #[error("malformed service payload: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ServiceError::Transport(_) | ServiceError::Decode(_))
    }
}

/// Combat result reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    #[serde(default)]
    pub conquered: bool,
    /// Any further fields the service reports (dice rolls, losses).
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Parameters for starting a new game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_players: Option<u32>,
}

/// Typed operations of the game service.
#[async_trait]
pub trait GameService: Send + Sync {
    async fn get_state(&self) -> Result<GameSnapshot, ServiceError>;

    async fn reinforce(
        &self,
        player: PlayerId,
        territory: &str,
        armies: u32,
    ) -> Result<(), ServiceError>;

    async fn attack(
        &self,
        player: PlayerId,
        from: &str,
        to: &str,
        armies: u32,
        dice: u32,
    ) -> Result<AttackOutcome, ServiceError>;

    async fn fortify(
        &self,
        player: PlayerId,
        from: &str,
        to: &str,
        armies: u32,
    ) -> Result<(), ServiceError>;

    async fn move_armies(
        &self,
        player: PlayerId,
        from: &str,
        to: &str,
        armies: u32,
    ) -> Result<(), ServiceError>;

    async fn trade_cards(&self, player: PlayerId, indices: &[usize]) -> Result<(), ServiceError>;

    async fn advance_phase(&self) -> Result<(), ServiceError>;

    async fn new_game(&self, request: &NewGameRequest) -> Result<(), ServiceError>;
}
