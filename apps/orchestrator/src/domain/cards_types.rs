use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Kind printed on a territory card. Jokers substitute for any other kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    Infantry,
    Cavalry,
    Artillery,
    Joker,
}

impl CardKind {
    pub const ALL: [CardKind; 4] = [
        CardKind::Infantry,
        CardKind::Cavalry,
        CardKind::Artillery,
        CardKind::Joker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CardKind::Infantry => "Infantry",
            CardKind::Cavalry => "Cavalry",
            CardKind::Artillery => "Artillery",
            CardKind::Joker => "Joker",
        }
    }

    pub fn is_wild(self) -> bool {
        matches!(self, CardKind::Joker)
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "infantry" => Ok(CardKind::Infantry),
            "cavalry" => Ok(CardKind::Cavalry),
            "artillery" => Ok(CardKind::Artillery),
            "joker" | "wild" => Ok(CardKind::Joker),
            other => Err(DomainError::ParseCard(other.to_string())),
        }
    }
}

/// A card held by a player. Within a trade a card is identified by its
/// position in the player's hand, never by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub kind: CardKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub territory: Option<String>,
}

impl Card {
    pub fn new(kind: CardKind) -> Self {
        Self {
            kind,
            territory: None,
        }
    }

    pub fn for_territory(kind: CardKind, territory: impl Into<String>) -> Self {
        Self {
            kind,
            territory: Some(territory.into()),
        }
    }
}
