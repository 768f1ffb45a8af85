//! Snapshot model: one immutable read of the authoritative game state.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::actions::LegalAction;
use super::cards_types::Card;
use super::errors::DomainError;

/// Numeric player id assigned by the game service, stable for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Turn phases. Reinforce → Attack → Fortify for each player turn;
/// MoveArmies is entered after a conquest and returns to Attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Reinforce,
    Attack,
    Fortify,
    MoveArmies,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Reinforce => "reinforce",
            Phase::Attack => "attack",
            Phase::Fortify => "fortify",
            Phase::MoveArmies => "movearmies",
        }
    }

    /// Phases a player may leave voluntarily.
    pub fn is_optional(self) -> bool {
        matches!(self, Phase::Attack | Phase::Fortify)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = DomainError;

    /// Accepts `movearmies`, `move_armies`, `MoveArmies` and similar spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "reinforce" => Ok(Phase::Reinforce),
            "attack" => Ok(Phase::Attack),
            "fortify" => Ok(Phase::Fortify),
            "movearmies" => Ok(Phase::MoveArmies),
            _ => Err(DomainError::ParsePhase(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub name: String,
    pub owner: Option<String>,
    pub armies: u32,
    pub continent: String,
    pub adjacent: Vec<String>,
}

impl Territory {
    pub fn is_owned_by(&self, player: &str) -> bool {
        self.owner.as_deref() == Some(player)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continent {
    pub name: String,
    pub bonus_armies: u32,
    pub territories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub territories: Vec<String>,
    /// Armies held in reserve outside the reinforce pool.
    pub army_supply: u32,
    pub cards: Vec<Card>,
}

impl Player {
    pub fn owns(&self, territory: &str) -> bool {
        self.territories.iter().any(|t| t == territory)
    }

    pub fn is_eliminated(&self) -> bool {
        self.territories.is_empty()
    }
}

/// Service-reported probability of conquering `to` from `from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConquestOdds {
    pub from: String,
    pub to: String,
    pub probability: f64,
}

/// One read of the authoritative state. Never mutated after construction;
/// the orchestrator fetches a new one after every state-changing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub territories: BTreeMap<String, Territory>,
    pub continents: BTreeMap<String, Continent>,
    pub players: BTreeMap<String, Player>,
    pub current_player: String,
    pub phase: Phase,
    pub turn: u32,
    pub game_over: bool,
    pub winner: Option<String>,
    /// Reinforce pool of the active player.
    pub reinforcement_armies: u32,
    /// Actions the service itself considers possible. Cross-check only.
    pub possible_actions: Vec<LegalAction>,
    pub conquer_probs: Vec<ConquestOdds>,
}

impl GameSnapshot {
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(&self.current_player)
    }

    pub fn territory(&self, name: &str) -> Option<&Territory> {
        self.territories.get(name)
    }

    /// Army count on a territory; unknown territories count as empty.
    pub fn armies_in(&self, name: &str) -> u32 {
        self.territories.get(name).map_or(0, |t| t.armies)
    }

    pub fn owner_of(&self, name: &str) -> Option<&str> {
        self.territories.get(name).and_then(|t| t.owner.as_deref())
    }

    /// Total armies a player has on the board.
    pub fn total_armies(&self, player: &Player) -> u32 {
        player.territories.iter().map(|t| self.armies_in(t)).sum()
    }

    /// Reinforce pool for `player`. Zero unless the player is active and the
    /// snapshot is in the Reinforce phase.
    pub fn reinforcement_pool(&self, player: &Player) -> u32 {
        if self.phase == Phase::Reinforce && player.name == self.current_player {
            self.reinforcement_armies
        } else {
            0
        }
    }

    pub fn card_count(&self, player: &str) -> usize {
        self.players.get(player).map_or(0, |p| p.cards.len())
    }
}
