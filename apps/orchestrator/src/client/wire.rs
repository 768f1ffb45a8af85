//! Wire representation of `GET /game-state` and its conversion into a
//! [`GameSnapshot`].

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use super::ServiceError;
use crate::domain::{
    Card, CardKind, Continent, ConquestOdds, GameSnapshot, LegalAction, Phase, Player, PlayerId,
    Territory,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireState {
    board: WireBoard,
    players: Vec<WirePlayer>,
    current_player: Option<String>,
    turn_phase: Option<String>,
    current_turn: u32,
    game_over: Option<bool>,
    defeated_players: Vec<JsonValue>,
    winner: Option<String>,
    reinforcement_armies: u32,
    possible_actions: Vec<JsonValue>,
    conquer_probs: Vec<JsonValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireBoard {
    territories: BTreeMap<String, WireTerritory>,
    continents: BTreeMap<String, WireContinent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTerritory {
    continent: Option<String>,
    adjacent_territories: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireContinent {
    bonus_armies: u32,
    territories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WirePlayer {
    #[serde(default = "unknown_id")]
    id: i64,
    name: String,
    #[serde(default)]
    territories: Vec<String>,
    #[serde(default)]
    armies: BTreeMap<String, u32>,
    #[serde(default)]
    cards: Vec<WireCard>,
    #[serde(default)]
    army_supply: u32,
}

fn unknown_id() -> i64 {
    -1
}

/// Cards arrive either as a bare kind string or as an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireCard {
    Kind(String),
    Full {
        #[serde(alias = "type", alias = "card_type")]
        kind: String,
        #[serde(default)]
        territory: Option<String>,
    },
}

/// Conquest odds arrive either as `[from, to, p]` or as an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireOdds {
    Triple(String, String, f64),
    Named {
        from: String,
        to: String,
        probability: f64,
    },
}

/// Parses a `GET /game-state` body. The state sits either at the top level
/// or under a `game_state` key.
pub(crate) fn parse_state(body: JsonValue) -> Result<GameSnapshot, ServiceError> {
    let payload = match body {
        JsonValue::Object(mut map) if map.contains_key("game_state") => map
            .remove("game_state")
            .unwrap_or(JsonValue::Null),
        other => other,
    };
    let wire: WireState =
        serde_json::from_value(payload).map_err(|e| ServiceError::Decode(e.to_string()))?;
    wire.into_snapshot()
}

impl WireState {
    pub(crate) fn into_snapshot(self) -> Result<GameSnapshot, ServiceError> {
        let mut territories: BTreeMap<String, Territory> = self
            .board
            .territories
            .into_iter()
            .map(|(name, t)| {
                let territory = Territory {
                    name: name.clone(),
                    owner: None,
                    armies: 0,
                    continent: t.continent.unwrap_or_else(|| "Unknown".to_string()),
                    adjacent: t.adjacent_territories,
                };
                (name, territory)
            })
            .collect();

        let mut players = BTreeMap::new();
        for mut wire_player in self.players {
            // The first player to list a territory owns it.
            wire_player.territories.retain(|name| {
                let Some(territory) = territories.get_mut(name) else {
                    return true;
                };
                if let Some(owner) = &territory.owner {
                    warn!(
                        territory = %name,
                        owner = %owner,
                        claimant = %wire_player.name,
                        "Territory listed by two players, keeping the first owner"
                    );
                    return false;
                }
                territory.owner = Some(wire_player.name.clone());
                // An owned territory holds at least one army.
                territory.armies = match wire_player.armies.get(name).copied() {
                    Some(0) => {
                        warn!(
                            territory = %name,
                            player = %wire_player.name,
                            "Owned territory reported with zero armies, counting one"
                        );
                        1
                    }
                    Some(armies) => armies,
                    None => 1,
                };
                true
            });
            let cards = wire_player
                .cards
                .into_iter()
                .map(WireCard::into_card)
                .collect::<Result<Vec<_>, _>>()?;
            players.insert(
                wire_player.name.clone(),
                Player {
                    id: PlayerId(wire_player.id),
                    name: wire_player.name,
                    territories: wire_player.territories,
                    army_supply: wire_player.army_supply,
                    cards,
                },
            );
        }

        let continents = self
            .board
            .continents
            .into_iter()
            .map(|(name, c)| {
                let continent = Continent {
                    name: name.clone(),
                    bonus_armies: c.bonus_armies,
                    territories: c.territories,
                };
                (name, continent)
            })
            .collect();

        let phase = match self.turn_phase.as_deref() {
            None => Phase::Reinforce,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(phase = raw, "Unknown turn phase from service, treating as reinforce");
                Phase::Reinforce
            }),
        };

        let game_over = self.game_over.unwrap_or_else(|| {
            self.defeated_players.len() + 1 >= players.len().max(1)
        });

        let possible_actions = self
            .possible_actions
            .into_iter()
            .filter_map(|hint| serde_json::from_value::<LegalAction>(hint).ok())
            .collect();

        let conquer_probs = self
            .conquer_probs
            .into_iter()
            .filter_map(|raw| serde_json::from_value::<WireOdds>(raw).ok())
            .map(WireOdds::into_odds)
            .collect();

        Ok(GameSnapshot {
            territories,
            continents,
            players,
            current_player: self.current_player.unwrap_or_default(),
            phase,
            turn: self.current_turn,
            game_over,
            winner: self.winner,
            reinforcement_armies: self.reinforcement_armies,
            possible_actions,
            conquer_probs,
        })
    }
}

impl WireCard {
    /// Unknown kinds are a decode error: dropping a card would shift the
    /// positional indices used for trades.
    fn into_card(self) -> Result<Card, ServiceError> {
        let (kind, territory) = match self {
            WireCard::Kind(kind) => (kind, None),
            WireCard::Full { kind, territory } => (kind, territory),
        };
        let kind: CardKind = kind
            .parse()
            .map_err(|e| ServiceError::Decode(format!("{e}")))?;
        Ok(Card { kind, territory })
    }
}

impl WireOdds {
    fn into_odds(self) -> ConquestOdds {
        match self {
            WireOdds::Triple(from, to, probability) | WireOdds::Named {
                from,
                to,
                probability,
            } => ConquestOdds {
                from,
                to,
                probability,
            },
        }
    }
}
