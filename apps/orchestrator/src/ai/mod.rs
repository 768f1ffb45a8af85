//! Decision agents - choose one concrete action from the offered set.
//!
//! This module provides:
//! - the `DecisionAgent` trait and its request/decision types
//! - reference agents: random (seedable), first-legal, passive
//! - a static registry and `create_agent` for name-based construction

mod config;
mod first_legal;
mod passive;
mod random;
pub mod registry;
mod trait_def;

use std::sync::Arc;

pub use config::AgentConfig;
pub use first_legal::FirstLegalAgent;
pub use passive::PassiveAgent;
pub use random::RandomAgent;
pub use trait_def::{AgentError, Decision, DecisionAgent, DecisionRequest};

/// Create an agent from its registered name and config.
///
/// Returns None if the name is not registered.
pub fn create_agent(name: &str, config: &AgentConfig) -> Option<Arc<dyn DecisionAgent>> {
    registry::by_name(name).map(|factory| (factory.make)(config))
}
