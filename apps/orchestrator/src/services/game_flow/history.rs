//! Turn history and the end-of-game summary.

use serde::{Deserialize, Serialize};

use crate::domain::{controlled_continents, ActionProposal, GameSnapshot, Phase};

/// How one orchestrator step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Applied and the state changed as expected.
    Success,
    /// Outside the offered bounds, rejected by the service, or agent failure.
    Invalid,
    /// Accepted but no observable change.
    NoProgress,
    /// The agent passed.
    NoOp,
    /// The agent did not answer within the turn timeout.
    TimedOut,
    /// Legal set empty or phase finished; advanced normally.
    PhaseAdvanced,
    /// Retry budget exhausted; advanced by force.
    ForcedAdvance,
    /// Same (player, phase) observed too often; advanced by force.
    StallAdvance,
    /// Player eliminated or missing; nothing done.
    Skipped,
    /// The service could not be reached; iteration abandoned.
    TransportFault,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub player: String,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionProposal>,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Append-only action log of one game.
#[derive(Debug, Clone, Default)]
pub struct TurnHistory {
    records: Vec<TurnRecord>,
}

impl TurnHistory {
    pub fn push(&mut self, record: TurnRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn since(&self, start: usize) -> &[TurnRecord] {
        self.records.get(start..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// The service reported game over.
    Completed,
    /// The local turn limit was reached first.
    TurnLimitReached,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub id: i64,
    pub territories: usize,
    pub armies: u32,
    pub continents: Vec<String>,
    pub cards: usize,
    pub eliminated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub status: GameStatus,
    pub winner: Option<String>,
    /// Player turns counted by the orchestrator.
    pub turns: u32,
    /// Turn counter reported by the service.
    pub service_turn: u32,
    pub players: Vec<PlayerSummary>,
    pub history: Vec<TurnRecord>,
}

impl GameSummary {
    pub fn from_snapshot(
        status: GameStatus,
        turns: u32,
        snapshot: &GameSnapshot,
        history: &TurnHistory,
    ) -> Self {
        let players = snapshot
            .players
            .values()
            .map(|player| PlayerSummary {
                name: player.name.clone(),
                id: player.id.0,
                territories: player.territories.len(),
                armies: snapshot.total_armies(player),
                continents: controlled_continents(snapshot, player)
                    .into_iter()
                    .map(|c| c.name.clone())
                    .collect(),
                cards: player.cards.len(),
                eliminated: player.is_eliminated(),
            })
            .collect();

        Self {
            status,
            winner: snapshot.winner.clone().or_else(|| sole_survivor(snapshot)),
            turns,
            service_turn: snapshot.turn,
            players,
            history: history.records().to_vec(),
        }
    }
}

/// When the service reports game over without naming a winner, the only
/// player still holding territory is it.
fn sole_survivor(snapshot: &GameSnapshot) -> Option<String> {
    if !snapshot.game_over {
        return None;
    }
    let mut alive = snapshot.players.values().filter(|p| !p.is_eliminated());
    match (alive.next(), alive.next()) {
        (Some(p), None) => Some(p.name.clone()),
        _ => None,
    }
}
