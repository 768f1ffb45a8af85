//! Reachability over the subgraph of territories one player owns.

use std::collections::{BTreeSet, VecDeque};

use super::state::{GameSnapshot, Player};

/// Breadth-first search from `start` over edges whose endpoints are both in
/// `owned`. The result includes `start`.
pub fn owned_component<'a>(
    snapshot: &'a GameSnapshot,
    owned: &BTreeSet<&str>,
    start: &'a str,
) -> BTreeSet<&'a str> {
    let mut visited: BTreeSet<&'a str> = BTreeSet::new();
    let mut queue: VecDeque<&'a str> = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(territory) = snapshot.territory(current) else {
            continue;
        };
        for neighbour in &territory.adjacent {
            let neighbour = neighbour.as_str();
            if owned.contains(neighbour) && visited.insert(neighbour) {
                queue.push_back(neighbour);
            }
        }
    }

    visited
}

/// Whether `player` can move armies from `from` to `to` through its own
/// territories.
pub fn is_connected(snapshot: &GameSnapshot, player: &Player, from: &str, to: &str) -> bool {
    let owned: BTreeSet<&str> = player.territories.iter().map(String::as_str).collect();
    if !owned.contains(from) || !owned.contains(to) {
        return false;
    }
    owned_component(snapshot, &owned, from).contains(to)
}
