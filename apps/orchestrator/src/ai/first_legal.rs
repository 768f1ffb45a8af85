//! FirstLegal - deterministic baseline that always takes the first offered
//! action at its full bounds.

use async_trait::async_trait;

use super::trait_def::{AgentError, Decision, DecisionAgent, DecisionRequest};

/// Deterministic agent: same snapshot ⇒ same proposal.
///
/// Offered actions are ordered by the rule engine (trades before
/// placements, then territory-name order), so this agent trades whenever it
/// can, dumps the whole pool on its first territory and attacks with as many
/// dice as allowed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalAgent;

impl FirstLegalAgent {
    pub const NAME: &'static str = "first-legal";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DecisionAgent for FirstLegalAgent {
    async fn decide(&self, request: DecisionRequest<'_>) -> Result<Decision, AgentError> {
        request
            .legal_actions
            .first()
            .map(|action| Decision::Act(action.strongest_proposal()))
            .ok_or_else(|| AgentError::InvalidMove("No legal actions offered".into()))
    }
}
