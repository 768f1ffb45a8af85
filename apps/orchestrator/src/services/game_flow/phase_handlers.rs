//! Per-phase handler: one uniform loop with phase-specific exits.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::history::{Outcome, TurnRecord};
use super::outcome::made_progress;
use super::retry_policy::RetryCounter;
use super::GameFlow;
use crate::ai::{AgentError, Decision, DecisionAgent, DecisionRequest};
use crate::client::ServiceError;
use crate::domain::cards_logic::{tradeable_sets, MANDATORY_TRADE_HAND};
use crate::domain::hints::cross_check;
use crate::domain::{
    admitting_action, legal_actions, offered_actions, ActionProposal, GameSnapshot, LegalAction,
    Phase, Player,
};
use crate::error::AppError;

/// Why a phase handler returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseExit {
    GameOver,
    /// A fresh snapshot showed another phase or player.
    ServiceMoved,
    Eliminated,
    /// Nothing left to do; advanced normally.
    Advanced,
    /// MoveArmies done, or the agent ended the phase itself.
    Completed,
    BudgetExhausted,
    TimedOut,
    ActionCap,
    TransportFault,
}

enum AgentReply {
    Decided(Decision),
    Failed(String),
    TimedOut,
}

enum Applied {
    Progress(GameSnapshot),
    Unchanged(GameSnapshot),
    Rejected(String),
    Transport(String),
}

enum Verdict {
    Success,
    Invalid(String),
    NoProgress,
    NoOp,
}

impl GameFlow {
    /// Drives `phase` for `player_name` until an exit condition holds.
    pub(super) async fn handle_phase(
        &mut self,
        phase: Phase,
        player_name: &str,
    ) -> Result<PhaseExit, AppError> {
        let agent = self.roster.agent_for(player_name)?;
        let mut retries = RetryCounter::default();
        let mut feedback: Option<String> = None;
        let mut mandatory_trades = true;
        let mut successes = 0u32;
        let mut carried: Option<GameSnapshot> = None;

        loop {
            let snapshot = match carried.take() {
                Some(snapshot) => snapshot,
                None => match self.service.get_state().await {
                    Ok(snapshot) => snapshot,
                    Err(err) => {
                        self.record_fault(player_name, phase, None, &err);
                        return Ok(PhaseExit::TransportFault);
                    }
                },
            };

            if snapshot.game_over {
                return Ok(PhaseExit::GameOver);
            }
            if snapshot.phase != phase || snapshot.current_player != player_name {
                debug!(
                    player = player_name,
                    %phase,
                    now_player = %snapshot.current_player,
                    now_phase = %snapshot.phase,
                    "Service moved on, leaving phase handler"
                );
                return Ok(PhaseExit::ServiceMoved);
            }

            let player = match snapshot.player(player_name) {
                Some(player) if !player.is_eliminated() => player,
                _ => {
                    info!(player = player_name, %phase, "Player eliminated or missing, skipping");
                    self.record(player_name, phase, None, Outcome::Skipped, None);
                    return Ok(PhaseExit::Eliminated);
                }
            };

            if phase == Phase::Reinforce {
                if mandatory_trades && player.cards.len() >= MANDATORY_TRADE_HAND {
                    if let Some(set) = tradeable_sets(&player.cards).first() {
                        let proposal = ActionProposal::TradeCards {
                            card_indices: set.to_vec(),
                        };
                        info!(
                            player = player_name,
                            cards = player.cards.len(),
                            indices = ?set,
                            "Submitting mandatory card trade"
                        );
                        match self.apply(&snapshot, player, &proposal).await {
                            Applied::Progress(after) => {
                                self.record(
                                    player_name,
                                    phase,
                                    Some(proposal),
                                    Outcome::Success,
                                    Some("mandatory trade".into()),
                                );
                                carried = Some(after);
                            }
                            Applied::Unchanged(after) => {
                                mandatory_trades = false;
                                self.record(
                                    player_name,
                                    phase,
                                    Some(proposal),
                                    Outcome::NoProgress,
                                    Some("mandatory trade had no effect".into()),
                                );
                                carried = Some(after);
                            }
                            Applied::Rejected(reason) => {
                                mandatory_trades = false;
                                warn!(player = player_name, reason = %reason, "Mandatory card trade rejected");
                                self.record(
                                    player_name,
                                    phase,
                                    Some(proposal),
                                    Outcome::Invalid,
                                    Some(reason),
                                );
                            }
                            Applied::Transport(reason) => {
                                self.record(
                                    player_name,
                                    phase,
                                    Some(proposal),
                                    Outcome::TransportFault,
                                    Some(reason),
                                );
                                return Ok(PhaseExit::TransportFault);
                            }
                        }
                        continue;
                    }
                }

                if snapshot.reinforcement_pool(player) == 0 {
                    return Ok(self
                        .advance(player_name, phase, Outcome::PhaseAdvanced, "reinforce pool exhausted")
                        .await);
                }
            }

            let legal = legal_actions(&snapshot, player);
            self.cross_check_hints(&snapshot, player_name, &legal);
            if legal.is_empty() {
                return Ok(self
                    .advance(player_name, phase, Outcome::PhaseAdvanced, "no legal actions")
                    .await);
            }
            if successes >= self.config.retry_policy.max_actions_per_phase {
                warn!(player = player_name, %phase, successes, "Action cap reached, forcing phase advance");
                let exit = self
                    .advance(player_name, phase, Outcome::ForcedAdvance, "action cap reached")
                    .await;
                return Ok(match exit {
                    PhaseExit::Advanced => PhaseExit::ActionCap,
                    other => other,
                });
            }

            let offered = offered_actions(&snapshot, player);
            let reply = self
                .request_decision(&agent, &snapshot, player, &offered, feedback.as_deref())
                .await;

            let (proposal, verdict) = match reply {
                AgentReply::TimedOut => {
                    warn!(
                        player = player_name,
                        %phase,
                        timeout_secs = self.config.turn_timeout.as_secs_f64(),
                        "Agent timed out, forcing phase advance"
                    );
                    self.record(player_name, phase, None, Outcome::TimedOut, None);
                    let exit = self
                        .advance(player_name, phase, Outcome::ForcedAdvance, "agent timed out")
                        .await;
                    return Ok(match exit {
                        PhaseExit::Advanced => PhaseExit::TimedOut,
                        other => other,
                    });
                }
                AgentReply::Failed(reason) => (None, Verdict::Invalid(reason)),
                AgentReply::Decided(Decision::Pass) => (None, Verdict::NoOp),
                AgentReply::Decided(Decision::Act(proposal)) => {
                    if admitting_action(&snapshot, &offered, &proposal).is_none() {
                        let reason = format!("'{proposal}' is not among the offered actions");
                        (Some(proposal), Verdict::Invalid(reason))
                    } else {
                        match self.apply(&snapshot, player, &proposal).await {
                            Applied::Progress(after) => {
                                carried = Some(after);
                                (Some(proposal), Verdict::Success)
                            }
                            Applied::Unchanged(after) => {
                                carried = Some(after);
                                (Some(proposal), Verdict::NoProgress)
                            }
                            Applied::Rejected(reason) => (Some(proposal), Verdict::Invalid(reason)),
                            Applied::Transport(reason) => {
                                self.record(
                                    player_name,
                                    phase,
                                    Some(proposal),
                                    Outcome::TransportFault,
                                    Some(reason),
                                );
                                return Ok(PhaseExit::TransportFault);
                            }
                        }
                    }
                }
            };

            let (outcome, reason) = match verdict {
                Verdict::Success => {
                    retries.reset();
                    feedback = None;
                    successes += 1;
                    let ends_phase =
                        phase == Phase::MoveArmies || proposal == Some(ActionProposal::EndPhase);
                    info!(
                        player = player_name,
                        %phase,
                        action = proposal.as_ref().map(ToString::to_string),
                        "Action applied"
                    );
                    self.record(player_name, phase, proposal, Outcome::Success, None);
                    if ends_phase {
                        return Ok(PhaseExit::Completed);
                    }
                    continue;
                }
                Verdict::Invalid(reason) => (Outcome::Invalid, reason),
                Verdict::NoProgress => (
                    Outcome::NoProgress,
                    "the action was accepted but the game state did not change".to_string(),
                ),
                Verdict::NoOp => (Outcome::NoOp, "no action was taken".to_string()),
            };

            let attempt = retries.record_failure();
            warn!(
                player = player_name,
                %phase,
                attempt,
                max_attempts = self.config.retry_policy.max_attempts,
                outcome = ?outcome,
                reason = %reason,
                "Attempt failed"
            );
            self.record(player_name, phase, proposal, outcome, Some(reason.clone()));
            feedback = Some(reason);

            if self.config.retry_policy.budget_exhausted(attempt) {
                warn!(player = player_name, %phase, attempt, "Retry budget exhausted, forcing phase advance");
                let exit = self
                    .advance(player_name, phase, Outcome::ForcedAdvance, "retry budget exhausted")
                    .await;
                return Ok(match exit {
                    PhaseExit::Advanced => PhaseExit::BudgetExhausted,
                    other => other,
                });
            }
        }
    }

    /// Calls the agent under the turn timeout. Panics and errors become
    /// failures; they never escape.
    async fn request_decision(
        &self,
        agent: &Arc<dyn DecisionAgent>,
        snapshot: &GameSnapshot,
        player: &Player,
        offered: &[LegalAction],
        feedback: Option<&str>,
    ) -> AgentReply {
        let request = DecisionRequest {
            snapshot,
            player,
            legal_actions: offered,
            feedback,
        };
        let call = AssertUnwindSafe(agent.decide(request)).catch_unwind();
        match tokio::time::timeout(self.config.turn_timeout, call).await {
            Err(_) | Ok(Ok(Err(AgentError::Timeout))) => AgentReply::TimedOut,
            Ok(Err(_)) => AgentReply::Failed("agent panicked while deciding".into()),
            Ok(Ok(Err(err))) => AgentReply::Failed(err.to_string()),
            Ok(Ok(Ok(decision))) => AgentReply::Decided(decision),
        }
    }

    /// Submits a structurally valid proposal and re-fetches the state.
    async fn apply(
        &self,
        before: &GameSnapshot,
        player: &Player,
        proposal: &ActionProposal,
    ) -> Applied {
        let id = player.id;
        let result = match proposal {
            ActionProposal::Reinforce { territory, armies } => {
                self.service.reinforce(id, territory, *armies).await
            }
            ActionProposal::Attack {
                from,
                to,
                armies,
                dice,
            } => self
                .service
                .attack(id, from, to, *armies, *dice)
                .await
                .map(|combat| {
                    debug!(player = %player.name, from = %from, to = %to, conquered = combat.conquered, "Attack resolved");
                }),
            ActionProposal::Fortify { from, to, armies } => {
                self.service.fortify(id, from, to, *armies).await
            }
            ActionProposal::MoveArmies { from, to, armies } => {
                self.service.move_armies(id, from, to, *armies).await
            }
            ActionProposal::TradeCards { card_indices } => {
                self.service.trade_cards(id, card_indices).await
            }
            ActionProposal::EndPhase => self.service.advance_phase().await,
        };

        match result {
            Ok(()) => {}
            Err(err) if err.is_transient() => return Applied::Transport(err.to_string()),
            Err(err) => return Applied::Rejected(err.to_string()),
        }

        match self.service.get_state().await {
            Ok(after) if made_progress(before, &after, &player.name, proposal) => {
                Applied::Progress(after)
            }
            Ok(after) => Applied::Unchanged(after),
            Err(err) => Applied::Transport(err.to_string()),
        }
    }

    /// Advances the phase on the service and records why.
    pub(super) async fn advance(
        &mut self,
        player: &str,
        phase: Phase,
        outcome: Outcome,
        reason: &str,
    ) -> PhaseExit {
        info!(player, %phase, reason, "Advancing phase");
        match self.service.advance_phase().await {
            Ok(()) => {
                self.record(player, phase, None, outcome, Some(reason.to_string()));
                PhaseExit::Advanced
            }
            Err(err) => {
                self.record_fault(player, phase, None, &err);
                if err.is_transient() {
                    PhaseExit::TransportFault
                } else {
                    PhaseExit::Advanced
                }
            }
        }
    }

    fn cross_check_hints(&self, snapshot: &GameSnapshot, player: &str, legal: &[LegalAction]) {
        // MoveArmies actions are the hints themselves.
        if snapshot.phase == Phase::MoveArmies {
            return;
        }
        match cross_check(legal, &snapshot.possible_actions) {
            None => {}
            Some(report) if report.is_consistent() => {}
            Some(report) => warn!(
                player,
                phase = %snapshot.phase,
                missing = report.missing.len(),
                unexpected = report.unexpected.len(),
                "Derived legal actions disagree with service hints"
            ),
        }
    }

    pub(super) fn record(
        &mut self,
        player: &str,
        phase: Phase,
        action: Option<ActionProposal>,
        outcome: Outcome,
        detail: Option<String>,
    ) {
        self.history.push(TurnRecord {
            turn: self.turns_played,
            player: player.to_string(),
            phase,
            action,
            outcome,
            detail,
        });
    }

    fn record_fault(
        &mut self,
        player: &str,
        phase: Phase,
        action: Option<ActionProposal>,
        err: &ServiceError,
    ) {
        let outcome = if err.is_transient() {
            Outcome::TransportFault
        } else {
            Outcome::Invalid
        };
        warn!(player, %phase, error = %err, "Game service call failed");
        self.record(player, phase, action, outcome, Some(err.to_string()));
    }
}
