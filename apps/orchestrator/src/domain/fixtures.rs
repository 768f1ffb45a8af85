//! Builder for hand-assembled snapshots used by tests and demo scenarios.

use std::collections::BTreeMap;

use super::actions::LegalAction;
use super::cards_types::{Card, CardKind};
use super::state::{Continent, GameSnapshot, Phase, Player, PlayerId, Territory};

/// Assembles a [`GameSnapshot`] from terse territory and player declarations.
///
/// Ownership and army counts are taken from the player declarations;
/// continents collect their members from the territories that name them.
/// The first declared player becomes the active player unless
/// [`SnapshotBuilder::current`] says otherwise.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    territories: Vec<(String, String, Vec<String>)>,
    continents: Vec<(String, u32)>,
    players: Vec<(PlayerId, String, Vec<(String, u32)>)>,
    cards: BTreeMap<String, Vec<Card>>,
    current: Option<String>,
    phase: Phase,
    turn: u32,
    pool: u32,
    game_over: bool,
    winner: Option<String>,
    hints: Vec<LegalAction>,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            territories: Vec::new(),
            continents: Vec::new(),
            players: Vec::new(),
            cards: BTreeMap::new(),
            current: None,
            phase: Phase::Reinforce,
            turn: 1,
            pool: 0,
            game_over: false,
            winner: None,
            hints: Vec::new(),
        }
    }

    pub fn territory(mut self, name: &str, continent: &str, adjacent: &[&str]) -> Self {
        self.territories.push((
            name.to_string(),
            continent.to_string(),
            adjacent.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Declares an undirected edge between two already declared territories.
    pub fn border(mut self, a: &str, b: &str) -> Self {
        for (name, _, adjacent) in &mut self.territories {
            if name == a && !adjacent.iter().any(|n| n == b) {
                adjacent.push(b.to_string());
            }
            if name == b && !adjacent.iter().any(|n| n == a) {
                adjacent.push(a.to_string());
            }
        }
        self
    }

    pub fn continent(mut self, name: &str, bonus_armies: u32) -> Self {
        self.continents.push((name.to_string(), bonus_armies));
        self
    }

    pub fn player(mut self, id: i64, name: &str, holdings: &[(&str, u32)]) -> Self {
        self.players.push((
            PlayerId(id),
            name.to_string(),
            holdings
                .iter()
                .map(|(t, armies)| (t.to_string(), *armies))
                .collect(),
        ));
        self
    }

    pub fn cards(mut self, player: &str, kinds: &[CardKind]) -> Self {
        self.cards.insert(
            player.to_string(),
            kinds.iter().copied().map(Card::new).collect(),
        );
        self
    }

    pub fn current(mut self, player: &str) -> Self {
        self.current = Some(player.to_string());
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    pub fn turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    pub fn pool(mut self, pool: u32) -> Self {
        self.pool = pool;
        self
    }

    pub fn game_over(mut self, winner: Option<&str>) -> Self {
        self.game_over = true;
        self.winner = winner.map(str::to_string);
        self
    }

    pub fn hint(mut self, action: LegalAction) -> Self {
        self.hints.push(action);
        self
    }

    pub fn build(self) -> GameSnapshot {
        let mut territories: BTreeMap<String, Territory> = self
            .territories
            .iter()
            .map(|(name, continent, adjacent)| {
                (
                    name.clone(),
                    Territory {
                        name: name.clone(),
                        owner: None,
                        armies: 0,
                        continent: continent.clone(),
                        adjacent: adjacent.clone(),
                    },
                )
            })
            .collect();

        let mut players = BTreeMap::new();
        for (id, name, holdings) in &self.players {
            for (territory, armies) in holdings {
                if let Some(t) = territories.get_mut(territory) {
                    t.owner = Some(name.clone());
                    t.armies = *armies;
                }
            }
            players.insert(
                name.clone(),
                Player {
                    id: *id,
                    name: name.clone(),
                    territories: holdings.iter().map(|(t, _)| t.clone()).collect(),
                    army_supply: 0,
                    cards: self.cards.get(name).cloned().unwrap_or_default(),
                },
            );
        }

        let continents = self
            .continents
            .iter()
            .map(|(name, bonus)| {
                let members = territories
                    .values()
                    .filter(|t| &t.continent == name)
                    .map(|t| t.name.clone())
                    .collect();
                (
                    name.clone(),
                    Continent {
                        name: name.clone(),
                        bonus_armies: *bonus,
                        territories: members,
                    },
                )
            })
            .collect();

        let current_player = self
            .current
            .or_else(|| self.players.first().map(|(_, name, _)| name.clone()))
            .unwrap_or_default();

        GameSnapshot {
            territories,
            continents,
            players,
            current_player,
            phase: self.phase,
            turn: self.turn,
            game_over: self.game_over,
            winner: self.winner,
            reinforcement_armies: self.pool,
            possible_actions: self.hints,
            conquer_probs: Vec::new(),
        }
    }
}
