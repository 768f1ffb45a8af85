//! Legal-action rule engine.
//!
//! Every function here is pure: snapshot plus player in, ordered action list
//! out. A phase mismatch yields an empty list rather than an error; an empty
//! list tells the orchestrator to advance the phase.

use std::collections::BTreeSet;

use super::actions::{find_admitting, ActionProposal, LegalAction};
use super::cards_logic::tradeable_sets;
use super::connectivity::owned_component;
use super::state::{GameSnapshot, Phase, Player};

/// Most dice an attacker may roll.
pub const MAX_ATTACK_DICE: u32 = 3;

fn owned_names(player: &Player) -> BTreeSet<&str> {
    player.territories.iter().map(String::as_str).collect()
}

/// One placement per owned territory, each bounded by the fresh pool.
pub fn legal_reinforce_actions(snapshot: &GameSnapshot, player: &Player) -> Vec<LegalAction> {
    let pool = snapshot.reinforcement_pool(player);
    if snapshot.phase != Phase::Reinforce || pool == 0 {
        return Vec::new();
    }
    owned_names(player)
        .into_iter()
        .map(|territory| LegalAction::Reinforce {
            territory: territory.to_string(),
            max_armies: pool,
        })
        .collect()
}

pub fn legal_attack_actions(snapshot: &GameSnapshot, player: &Player) -> Vec<LegalAction> {
    if snapshot.phase != Phase::Attack {
        return Vec::new();
    }
    let mut actions = Vec::new();
    for from in owned_names(player) {
        let Some(territory) = snapshot.territory(from) else {
            continue;
        };
        if territory.armies <= 1 {
            continue;
        }
        let max_dice = (territory.armies - 1).min(MAX_ATTACK_DICE);
        let targets: BTreeSet<&str> = territory
            .adjacent
            .iter()
            .map(String::as_str)
            .filter(|adj| matches!(snapshot.owner_of(adj), Some(owner) if owner != player.name))
            .collect();
        for to in targets {
            actions.push(LegalAction::Attack {
                from: from.to_string(),
                to: to.to_string(),
                max_dice,
            });
        }
    }
    actions
}

pub fn legal_fortify_actions(snapshot: &GameSnapshot, player: &Player) -> Vec<LegalAction> {
    if snapshot.phase != Phase::Fortify {
        return Vec::new();
    }
    let owned = owned_names(player);
    let mut actions = Vec::new();
    for &from in &owned {
        let armies = snapshot.armies_in(from);
        if armies <= 1 {
            continue;
        }
        let Some(territory) = snapshot.territory(from) else {
            continue;
        };
        for to in owned_component(snapshot, &owned, &territory.name) {
            if to == from {
                continue;
            }
            actions.push(LegalAction::Fortify {
                from: from.to_string(),
                to: to.to_string(),
                max_armies: armies - 1,
            });
        }
    }
    actions
}

/// Post-conquest moves are bounded by the service; its constraints are
/// passed through unchanged.
pub fn legal_move_armies_actions(snapshot: &GameSnapshot, _player: &Player) -> Vec<LegalAction> {
    if snapshot.phase != Phase::MoveArmies {
        return Vec::new();
    }
    snapshot
        .possible_actions
        .iter()
        .filter(|action| matches!(action, LegalAction::MoveArmies { .. }))
        .cloned()
        .collect()
}

pub fn legal_card_trade_actions(snapshot: &GameSnapshot, player: &Player) -> Vec<LegalAction> {
    if snapshot.phase != Phase::Reinforce {
        return Vec::new();
    }
    tradeable_sets(&player.cards)
        .into_iter()
        .map(|set| LegalAction::TradeCards {
            card_indices: set.to_vec(),
        })
        .collect()
}

/// Every legal action for the snapshot's phase. In Reinforce, trades come
/// before placements.
pub fn legal_actions(snapshot: &GameSnapshot, player: &Player) -> Vec<LegalAction> {
    match snapshot.phase {
        Phase::Reinforce => {
            let mut actions = legal_card_trade_actions(snapshot, player);
            actions.extend(legal_reinforce_actions(snapshot, player));
            actions
        }
        Phase::Attack => legal_attack_actions(snapshot, player),
        Phase::Fortify => legal_fortify_actions(snapshot, player),
        Phase::MoveArmies => legal_move_armies_actions(snapshot, player),
    }
}

/// Actions offered to a decision agent: the legal set plus `EndPhase` in
/// the optional phases when there is something to decline.
pub fn offered_actions(snapshot: &GameSnapshot, player: &Player) -> Vec<LegalAction> {
    let mut actions = legal_actions(snapshot, player);
    if snapshot.phase.is_optional() && !actions.is_empty() {
        actions.push(LegalAction::EndPhase);
    }
    actions
}

/// The offered action that admits `proposal` on this board. Beyond the
/// action's own bounds, an attack must leave one army on its source.
pub fn admitting_action<'a>(
    snapshot: &GameSnapshot,
    offered: &'a [LegalAction],
    proposal: &ActionProposal,
) -> Option<&'a LegalAction> {
    let action = find_admitting(offered, proposal)?;
    match proposal {
        ActionProposal::Attack { from, armies, .. } if *armies >= snapshot.armies_in(from) => None,
        _ => Some(action),
    }
}
