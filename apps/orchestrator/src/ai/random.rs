//! Random agent - proposes uniformly random legal moves.
//!
//! [`RandomAgent`] is the reference implementation of
//! [`DecisionAgent`](super::DecisionAgent). It keeps its RNG behind a
//! `Mutex` since `decide` takes `&self`, and it is deterministic when seeded.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::prelude::*;

use super::trait_def::{AgentError, Decision, DecisionAgent, DecisionRequest};
use crate::domain::{ActionProposal, LegalAction};

/// Agent that picks a random offered action and random bounds inside it.
///
/// With a `pass_rate` it sometimes declines to act, which exercises the
/// orchestrator's retry budget.
pub struct RandomAgent {
    rng: Mutex<StdRng>,
    pass_rate: f64,
}

impl RandomAgent {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    /// Create a new `RandomAgent`.
    ///
    /// `Some(seed)` gives reproducible choices; `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            pass_rate: 0.0,
        }
    }

    /// Probability in `[0, 1]` of returning `Pass` instead of acting.
    pub fn with_pass_rate(mut self, pass_rate: f64) -> Self {
        self.pass_rate = pass_rate.clamp(0.0, 1.0);
        self
    }

    fn materialize(rng: &mut StdRng, action: &LegalAction) -> ActionProposal {
        match action {
            LegalAction::Reinforce {
                territory,
                max_armies,
            } => ActionProposal::Reinforce {
                territory: territory.clone(),
                armies: rng.random_range(1..=(*max_armies).max(1)),
            },
            LegalAction::Attack { from, to, max_dice } => {
                let dice = rng.random_range(1..=(*max_dice).max(1));
                ActionProposal::Attack {
                    from: from.clone(),
                    to: to.clone(),
                    armies: dice,
                    dice,
                }
            }
            LegalAction::Fortify {
                from,
                to,
                max_armies,
            } => ActionProposal::Fortify {
                from: from.clone(),
                to: to.clone(),
                armies: rng.random_range(1..=(*max_armies).max(1)),
            },
            LegalAction::MoveArmies {
                from,
                to,
                min_armies,
                max_armies,
            } => ActionProposal::MoveArmies {
                from: from.clone(),
                to: to.clone(),
                armies: rng.random_range(*min_armies..=(*max_armies).max(*min_armies)),
            },
            other => other.strongest_proposal(),
        }
    }
}

#[async_trait]
impl DecisionAgent for RandomAgent {
    async fn decide(&self, request: DecisionRequest<'_>) -> Result<Decision, AgentError> {
        if request.legal_actions.is_empty() {
            return Err(AgentError::InvalidMove("No legal actions offered".into()));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AgentError::Internal(format!("RNG lock poisoned: {e}")))?;

        if self.pass_rate > 0.0 && rng.random_bool(self.pass_rate) {
            return Ok(Decision::Pass);
        }

        let action = request
            .legal_actions
            .choose(&mut *rng)
            .ok_or_else(|| AgentError::Internal("Failed to choose random action".into()))?;

        Ok(Decision::Act(Self::materialize(&mut *rng, action)))
    }
}
