//! Per-game metrics written as one JSON line each.

use std::collections::BTreeMap;

use orchestrator::services::game_flow::{GameStatus, GameSummary, Outcome, TurnRecord};
use orchestrator::GameRoster;
use serde::Serialize;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_num: u32,
    pub game_id: String,
    pub timestamp: String,
    pub config: RunConfig,
    pub result: GameResultMetrics,
    pub player_metrics: Vec<PlayerMetrics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<TurnRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    /// Player name to agent name.
    pub agents: BTreeMap<String, String>,
    pub total_games: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub status: GameStatus,
    pub winner: Option<String>,
    pub winner_agent: Option<String>,
    pub turns: u32,
    pub service_turn: u32,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub player: String,
    pub agent: Option<String>,
    pub territories: usize,
    pub armies: u32,
    pub continents: Vec<String>,
    pub cards: usize,
    pub eliminated: bool,
    pub actions: ActionCounts,
}

/// Orchestrator outcomes attributed to one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionCounts {
    pub success: u32,
    pub invalid: u32,
    pub no_progress: u32,
    pub no_op: u32,
    pub timed_out: u32,
    pub forced_advances: u32,
    pub stall_advances: u32,
}

impl ActionCounts {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.success += 1,
            Outcome::Invalid => self.invalid += 1,
            Outcome::NoProgress => self.no_progress += 1,
            Outcome::NoOp => self.no_op += 1,
            Outcome::TimedOut => self.timed_out += 1,
            Outcome::ForcedAdvance => self.forced_advances += 1,
            Outcome::StallAdvance => self.stall_advances += 1,
            Outcome::PhaseAdvanced | Outcome::Skipped | Outcome::TransportFault => {}
        }
    }

    /// Share of agent attempts that changed the game.
    pub fn success_rate(&self) -> f64 {
        let attempts = self.success + self.invalid + self.no_progress + self.no_op;
        if attempts == 0 {
            0.0
        } else {
            f64::from(self.success) / f64::from(attempts)
        }
    }
}

/// Build metrics from a finished game's summary.
#[allow(clippy::too_many_arguments)]
pub fn build_game_metrics(
    game_num: u32,
    game_id: String,
    roster: &GameRoster,
    total_games: u32,
    seed: Option<u64>,
    summary: &GameSummary,
    duration_ms: f64,
    keep_history: bool,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let agents: BTreeMap<String, String> = roster
        .seats
        .iter()
        .map(|seat| (seat.player.clone(), seat.agent.clone()))
        .collect();

    let mut counts: BTreeMap<&str, ActionCounts> = BTreeMap::new();
    for record in &summary.history {
        counts
            .entry(record.player.as_str())
            .or_default()
            .record(record.outcome);
    }

    let player_metrics = summary
        .players
        .iter()
        .map(|player| PlayerMetrics {
            player: player.name.clone(),
            agent: agents.get(&player.name).cloned(),
            territories: player.territories,
            armies: player.armies,
            continents: player.continents.clone(),
            cards: player.cards,
            eliminated: player.eliminated,
            actions: counts.get(player.name.as_str()).cloned().unwrap_or_default(),
        })
        .collect();

    GameMetrics {
        game_num,
        game_id,
        timestamp,
        result: GameResultMetrics {
            status: summary.status,
            winner: summary.winner.clone(),
            winner_agent: summary
                .winner
                .as_ref()
                .and_then(|w| agents.get(w))
                .cloned(),
            turns: summary.turns,
            service_turn: summary.service_turn,
            duration_ms,
        },
        config: RunConfig {
            agents,
            total_games,
            seed,
        },
        player_metrics,
        history: if keep_history {
            summary.history.clone()
        } else {
            Vec::new()
        },
    }
}
