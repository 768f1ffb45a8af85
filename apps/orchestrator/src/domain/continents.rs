//! Continent control and bonus helpers.

use super::state::{Continent, GameSnapshot, Player};

/// Continents whose every territory is owned by `player`, in name order.
pub fn controlled_continents<'a>(snapshot: &'a GameSnapshot, player: &Player) -> Vec<&'a Continent> {
    snapshot
        .continents
        .values()
        .filter(|continent| {
            !continent.territories.is_empty()
                && continent.territories.iter().all(|t| player.owns(t))
        })
        .collect()
}

/// Sum of bonus armies from every continent `player` controls.
pub fn continent_bonus(snapshot: &GameSnapshot, player: &Player) -> u32 {
    controlled_continents(snapshot, player)
        .iter()
        .map(|c| c.bonus_armies)
        .sum()
}
