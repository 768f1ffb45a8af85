//! Passive agent: never acts.

use async_trait::async_trait;

use super::trait_def::{AgentError, Decision, DecisionAgent, DecisionRequest};

/// Always returns [`Decision::Pass`]. Every phase it is asked about ends by
/// exhausting the retry budget.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassiveAgent;

impl PassiveAgent {
    pub const NAME: &'static str = "passive";
    pub const VERSION: &'static str = "1.0.0";
}

#[async_trait]
impl DecisionAgent for PassiveAgent {
    async fn decide(&self, _request: DecisionRequest<'_>) -> Result<Decision, AgentError> {
        Ok(Decision::Pass)
    }
}
