//! Legal actions derived by the rule engine and the concrete proposals a
//! decision agent returns against them.
//!
//! Both enums use serde's externally tagged layout, which is also the shape
//! of the service's `possible_actions` hints, e.g.
//! `{"MoveArmies": {"from": "A", "to": "B", "min_armies": 1, "max_armies": 4}}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cards_logic::normalize_indices;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Reinforce,
    Attack,
    Fortify,
    MoveArmies,
    TradeCards,
    EndPhase,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Reinforce => "reinforce",
            ActionKind::Attack => "attack",
            ActionKind::Fortify => "fortify",
            ActionKind::MoveArmies => "move_armies",
            ActionKind::TradeCards => "trade_cards",
            ActionKind::EndPhase => "end_phase",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action permitted in the current phase, with its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LegalAction {
    Reinforce {
        territory: String,
        max_armies: u32,
    },
    Attack {
        from: String,
        to: String,
        max_dice: u32,
    },
    Fortify {
        from: String,
        to: String,
        max_armies: u32,
    },
    MoveArmies {
        from: String,
        to: String,
        min_armies: u32,
        max_armies: u32,
    },
    TradeCards {
        card_indices: Vec<usize>,
    },
    EndPhase,
}

impl LegalAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            LegalAction::Reinforce { .. } => ActionKind::Reinforce,
            LegalAction::Attack { .. } => ActionKind::Attack,
            LegalAction::Fortify { .. } => ActionKind::Fortify,
            LegalAction::MoveArmies { .. } => ActionKind::MoveArmies,
            LegalAction::TradeCards { .. } => ActionKind::TradeCards,
            LegalAction::EndPhase => ActionKind::EndPhase,
        }
    }

    /// Whether `proposal` falls inside this action's bounds.
    pub fn admits(&self, proposal: &ActionProposal) -> bool {
        match (self, proposal) {
            (
                LegalAction::Reinforce {
                    territory,
                    max_armies,
                },
                ActionProposal::Reinforce {
                    territory: t,
                    armies,
                },
            ) => territory == t && (1..=*max_armies).contains(armies),
            (
                LegalAction::Attack { from, to, max_dice },
                ActionProposal::Attack {
                    from: f,
                    to: t,
                    armies,
                    dice,
                },
            ) => from == f && to == t && (1..=*max_dice).contains(dice) && armies >= dice,
            (
                LegalAction::Fortify {
                    from,
                    to,
                    max_armies,
                },
                ActionProposal::Fortify {
                    from: f,
                    to: t,
                    armies,
                },
            ) => from == f && to == t && (1..=*max_armies).contains(armies),
            (
                LegalAction::MoveArmies {
                    from,
                    to,
                    min_armies,
                    max_armies,
                },
                ActionProposal::MoveArmies {
                    from: f,
                    to: t,
                    armies,
                },
            ) => from == f && to == t && (*min_armies..=*max_armies).contains(armies),
            (
                LegalAction::TradeCards { card_indices },
                ActionProposal::TradeCards { card_indices: p },
            ) => match (normalize_indices(card_indices), normalize_indices(p)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            (LegalAction::EndPhase, ActionProposal::EndPhase) => true,
            _ => false,
        }
    }

    /// The proposal that uses this action's full bounds.
    pub fn strongest_proposal(&self) -> ActionProposal {
        match self {
            LegalAction::Reinforce {
                territory,
                max_armies,
            } => ActionProposal::Reinforce {
                territory: territory.clone(),
                armies: *max_armies,
            },
            LegalAction::Attack { from, to, max_dice } => ActionProposal::Attack {
                from: from.clone(),
                to: to.clone(),
                armies: *max_dice,
                dice: *max_dice,
            },
            LegalAction::Fortify {
                from,
                to,
                max_armies,
            } => ActionProposal::Fortify {
                from: from.clone(),
                to: to.clone(),
                armies: *max_armies,
            },
            LegalAction::MoveArmies {
                from,
                to,
                max_armies,
                ..
            } => ActionProposal::MoveArmies {
                from: from.clone(),
                to: to.clone(),
                armies: *max_armies,
            },
            LegalAction::TradeCards { card_indices } => ActionProposal::TradeCards {
                card_indices: card_indices.clone(),
            },
            LegalAction::EndPhase => ActionProposal::EndPhase,
        }
    }
}

/// A concrete command chosen by a decision agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionProposal {
    Reinforce {
        territory: String,
        armies: u32,
    },
    Attack {
        from: String,
        to: String,
        armies: u32,
        dice: u32,
    },
    Fortify {
        from: String,
        to: String,
        armies: u32,
    },
    MoveArmies {
        from: String,
        to: String,
        armies: u32,
    },
    TradeCards {
        card_indices: Vec<usize>,
    },
    EndPhase,
}

impl ActionProposal {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionProposal::Reinforce { .. } => ActionKind::Reinforce,
            ActionProposal::Attack { .. } => ActionKind::Attack,
            ActionProposal::Fortify { .. } => ActionKind::Fortify,
            ActionProposal::MoveArmies { .. } => ActionKind::MoveArmies,
            ActionProposal::TradeCards { .. } => ActionKind::TradeCards,
            ActionProposal::EndPhase => ActionKind::EndPhase,
        }
    }
}

impl fmt::Display for ActionProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionProposal::Reinforce { territory, armies } => {
                write!(f, "reinforce {territory} with {armies}")
            }
            ActionProposal::Attack {
                from,
                to,
                armies,
                dice,
            } => write!(f, "attack {from} -> {to} with {armies} armies, {dice} dice"),
            ActionProposal::Fortify { from, to, armies } => {
                write!(f, "fortify {from} -> {to} with {armies}")
            }
            ActionProposal::MoveArmies { from, to, armies } => {
                write!(f, "move {armies} armies {from} -> {to}")
            }
            ActionProposal::TradeCards { card_indices } => {
                write!(f, "trade cards {card_indices:?}")
            }
            ActionProposal::EndPhase => f.write_str("end phase"),
        }
    }
}

/// The offered action that admits `proposal`, if any.
pub fn find_admitting<'a>(
    offered: &'a [LegalAction],
    proposal: &ActionProposal,
) -> Option<&'a LegalAction> {
    offered.iter().find(|action| action.admits(proposal))
}
