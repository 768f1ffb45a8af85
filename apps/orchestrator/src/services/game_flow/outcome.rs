//! Structural success check: did the service state move in the direction
//! the applied proposal implies?

use crate::domain::{ActionProposal, GameSnapshot, Phase};

/// Compares the snapshots taken before and after applying `proposal` on
/// behalf of `player`.
pub(crate) fn made_progress(
    before: &GameSnapshot,
    after: &GameSnapshot,
    player: &str,
    proposal: &ActionProposal,
) -> bool {
    if after.game_over && !before.game_over {
        return true;
    }
    let turn_moved = after.current_player != before.current_player || after.phase != before.phase;

    match proposal {
        ActionProposal::Reinforce { territory, .. } => {
            after.reinforcement_armies < before.reinforcement_armies
                || after.armies_in(territory) > before.armies_in(territory)
        }
        ActionProposal::TradeCards { .. } => {
            after.card_count(player) < before.card_count(player)
                || after.reinforcement_armies > before.reinforcement_armies
        }
        ActionProposal::Attack { from, to, .. } => {
            after.armies_in(from) != before.armies_in(from)
                || after.armies_in(to) != before.armies_in(to)
                || after.owner_of(to) != before.owner_of(to)
                || after.phase == Phase::MoveArmies
        }
        ActionProposal::Fortify { from, to, .. } => {
            (after.armies_in(from) < before.armies_in(from)
                && after.armies_in(to) > before.armies_in(to))
                || turn_moved
        }
        ActionProposal::MoveArmies { from, to, .. } => {
            after.armies_in(from) != before.armies_in(from)
                || after.armies_in(to) != before.armies_in(to)
                || after.phase != Phase::MoveArmies
        }
        ActionProposal::EndPhase => turn_moved,
    }
}
