//! How to register an agent
//!
//! 1) Implement `DecisionAgent` for your type in its module.
//! 2) Add a new `AgentFactory` entry to the static list with stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed ⇒ same behavior (where applicable).

use std::sync::Arc;

use super::{AgentConfig, DecisionAgent, FirstLegalAgent, PassiveAgent, RandomAgent};

/// Factory definition for constructing agent implementations.
pub struct AgentFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(config: &AgentConfig) -> Arc<dyn DecisionAgent>,
}

static AGENT_FACTORIES: &[AgentFactory] = &[
    AgentFactory {
        name: RandomAgent::NAME,
        version: RandomAgent::VERSION,
        make: make_random_agent,
    },
    AgentFactory {
        name: FirstLegalAgent::NAME,
        version: FirstLegalAgent::VERSION,
        make: make_first_legal_agent,
    },
    AgentFactory {
        name: PassiveAgent::NAME,
        version: PassiveAgent::VERSION,
        make: make_passive_agent,
    },
];

/// Returns the statically registered agent factories.
pub fn registered_agents() -> &'static [AgentFactory] {
    AGENT_FACTORIES
}

/// Finds a registered agent factory by its name.
pub fn by_name(name: &str) -> Option<&'static AgentFactory> {
    registered_agents().iter().find(|factory| factory.name == name)
}

fn make_random_agent(config: &AgentConfig) -> Arc<dyn DecisionAgent> {
    Arc::new(RandomAgent::new(config.seed()).with_pass_rate(config.pass_rate()))
}

fn make_first_legal_agent(_config: &AgentConfig) -> Arc<dyn DecisionAgent> {
    Arc::new(FirstLegalAgent::new())
}

fn make_passive_agent(_config: &AgentConfig) -> Arc<dyn DecisionAgent> {
    Arc::new(PassiveAgent)
}
