#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;

// Re-exports for public API
pub use ai::{create_agent, AgentConfig, Decision, DecisionAgent, DecisionRequest};
pub use client::{GameService, HttpGameService, NewGameRequest, ServiceError};
pub use config::{FlowConfig, ServiceConfig};
pub use domain::{ActionProposal, GameSnapshot, LegalAction, Phase};
pub use error::AppError;
pub use errors::ErrorCode;
pub use services::game_flow::{AgentRoster, GameFlow, GameStatus, GameSummary, TurnResult};
pub use services::game_round::{GameId, GameRoster, GameRoundService, Seat, ServiceFactory};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    orchestrator_test_support::logging::init();
}
