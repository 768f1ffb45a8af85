//! Turn loop: steps, turns, whole games.

use std::time::Duration;

use rand::random;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::history::{GameStatus, GameSummary, Outcome, TurnRecord};
use super::machine::FlowState;
use super::phase_handlers::PhaseExit;
use super::retry_policy::StallCheck;
use super::GameFlow;
use crate::domain::{GameSnapshot, Phase};
use crate::error::AppError;

/// Steps one player turn may take before `play_single_turn` gives up.
pub const MAX_STEPS_PER_TURN: u32 = 64;

const BACKOFF_MULTIPLIER: f64 = 2.0;
const MAX_BACKOFF: Duration = Duration::from_secs(30);
const JITTER_PERCENT: f64 = 0.2;

/// Capped exponential backoff with +/-20% jitter. `attempt` starts at 1.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    if base.is_zero() {
        return Duration::ZERO;
    }
    let exponent = attempt.saturating_sub(1).min(16) as i32;
    let delay = base.as_secs_f64() * BACKOFF_MULTIPLIER.powi(exponent);
    let capped = delay.min(MAX_BACKOFF.as_secs_f64());

    let jitter = (random::<f64>() * 2.0 - 1.0) * capped * JITTER_PERCENT;
    Duration::from_secs_f64((capped + jitter).max(0.0))
}

/// What a single orchestrator step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOutcome {
    GameOver,
    TurnEnded { next_player: String },
    PhaseHandled { phase: Phase, exit: PhaseExit },
    StallAdvanced,
    TransportFault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEnd {
    NextPlayer(String),
    GameOver,
    StepLimit,
}

/// Records of one player turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResult {
    pub turn: u32,
    pub player: Option<String>,
    pub records: Vec<TurnRecord>,
    pub end: TurnEnd,
}

impl GameFlow {
    /// Observes the service once and handles the current phase.
    pub async fn step(&mut self) -> Result<StepOutcome, AppError> {
        self.steps_taken += 1;

        let snapshot = match self.fresh_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(detail) => return self.on_transport_fault(detail).await,
        };

        if snapshot.game_over {
            self.machine.observe(FlowState::GameOver);
            info!(
                winner = snapshot.winner.as_deref().unwrap_or("unknown"),
                turns = self.turns_played,
                "Game over"
            );
            return Ok(StepOutcome::GameOver);
        }

        let player = snapshot.current_player.clone();
        let phase = snapshot.phase;
        self.machine.observe(FlowState::from(phase));

        if let StallCheck::Stalled { repeats } = self.stall_guard.observe(&player, phase) {
            warn!(player = %player, %phase, repeats, "Stall detected, forcing phase advance");
            let exit = self
                .advance(&player, phase, Outcome::StallAdvance, "stalled")
                .await;
            self.stall_guard.reset();
            if exit == PhaseExit::TransportFault {
                return self.on_transport_fault("advance after stall failed".into()).await;
            }
            return self.settle(&player, StepOutcome::StallAdvanced).await;
        }

        debug!(player = %player, %phase, turn = self.turns_played, "Handling phase");
        let exit = self.handle_phase(phase, &player).await?;
        if exit == PhaseExit::TransportFault {
            return self.on_transport_fault(format!("{phase} phase of {player}")).await;
        }
        self.settle(&player, StepOutcome::PhaseHandled { phase, exit }).await
    }

    /// Re-fetches after `player` acted and detects a turn boundary. The
    /// snapshot is kept for the next step.
    async fn settle(
        &mut self,
        player: &str,
        handled: StepOutcome,
    ) -> Result<StepOutcome, AppError> {
        let after = match self.service.get_state().await {
            Ok(after) => after,
            Err(err) => return self.on_transport_fault(err.to_string()).await,
        };
        if after.game_over || after.current_player == player {
            self.pending = Some(after);
            return Ok(handled);
        }

        self.turns_played += 1;
        self.stall_guard.reset();
        self.machine.observe(FlowState::TurnBoundary);
        info!(
            turn = self.turns_played,
            player,
            next_player = %after.current_player,
            "Turn ended"
        );
        let next_player = after.current_player.clone();
        self.pending = Some(after);
        Ok(StepOutcome::TurnEnded { next_player })
    }

    /// Steps until the active player changes or the game ends.
    pub async fn play_single_turn(&mut self) -> Result<TurnResult, AppError> {
        let start = self.history.len();
        let turn = self.turns_played;
        let mut player = None;

        for _ in 0..MAX_STEPS_PER_TURN {
            if player.is_none() {
                player = self.pending.as_ref().map(|s| s.current_player.clone());
            }
            let end = match self.step().await? {
                StepOutcome::GameOver => Some(TurnEnd::GameOver),
                StepOutcome::TurnEnded { next_player } => Some(TurnEnd::NextPlayer(next_player)),
                _ => None,
            };
            if player.is_none() {
                player = self.history.since(start).first().map(|r| r.player.clone());
            }
            if let Some(end) = end {
                return Ok(self.turn_result(turn, player, start, end));
            }
        }

        warn!(turn, player = ?player, "Turn did not finish within the step limit");
        Ok(self.turn_result(turn, player, start, TurnEnd::StepLimit))
    }

    /// Drives the game until it ends or the turn limit is hit.
    pub async fn run_to_completion(&mut self) -> Result<GameSummary, AppError> {
        let max_turns = self.config.max_turns;
        let max_steps = max_turns.saturating_mul(MAX_STEPS_PER_TURN);
        info!(max_turns, players = self.roster.len(), "Starting game flow");

        loop {
            if self.turns_played >= max_turns || self.steps_taken >= max_steps {
                warn!(
                    turns = self.turns_played,
                    steps = self.steps_taken,
                    max_turns,
                    "Turn limit reached"
                );
                return self.summarize(GameStatus::TurnLimitReached).await;
            }
            if self.step().await? == StepOutcome::GameOver {
                return self.summarize(GameStatus::Completed).await;
            }
        }
    }

    /// Builds the summary from one last snapshot.
    pub async fn summarize(&mut self, status: GameStatus) -> Result<GameSummary, AppError> {
        let snapshot = loop {
            match self.fresh_snapshot().await {
                Ok(snapshot) => break snapshot,
                Err(detail) => {
                    self.on_transport_fault(detail).await?;
                }
            }
        };
        let summary =
            GameSummary::from_snapshot(status, self.turns_played, &snapshot, &self.history);
        info!(
            status = ?summary.status,
            winner = summary.winner.as_deref().unwrap_or("none"),
            turns = summary.turns,
            actions = summary.history.len(),
            "Game summarized"
        );
        Ok(summary)
    }

    fn turn_result(
        &self,
        turn: u32,
        player: Option<String>,
        start: usize,
        end: TurnEnd,
    ) -> TurnResult {
        TurnResult {
            turn,
            player,
            records: self.history.since(start).to_vec(),
            end,
        }
    }

    /// The pending snapshot if there is one, otherwise a new fetch.
    async fn fresh_snapshot(&mut self) -> Result<GameSnapshot, String> {
        if let Some(snapshot) = self.pending.take() {
            self.transport_faults = 0;
            return Ok(snapshot);
        }
        match self.service.get_state().await {
            Ok(snapshot) => {
                self.transport_faults = 0;
                Ok(snapshot)
            }
            Err(err) => Err(err.to_string()),
        }
    }

    async fn on_transport_fault(&mut self, detail: String) -> Result<StepOutcome, AppError> {
        self.transport_faults += 1;
        if self.transport_faults > self.config.max_transport_faults {
            return Err(AppError::service_unavailable(format!(
                "{} consecutive transport faults, last: {detail}",
                self.transport_faults - 1
            )));
        }
        let delay = backoff_delay(self.config.poll_interval, self.transport_faults);
        warn!(
            attempt = self.transport_faults,
            delay_ms = delay.as_millis() as u64,
            detail = %detail,
            "Transport fault, backing off"
        );
        tokio::time::sleep(delay).await;
        Ok(StepOutcome::TransportFault)
    }
}
