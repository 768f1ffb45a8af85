//! Card trade-in combinatorics.

use super::cards_types::{Card, CardKind};

/// Number of cards in a tradeable set.
pub const TRADE_SET_SIZE: usize = 3;

/// Hand size at which a trade becomes mandatory before reinforcing.
pub const MANDATORY_TRADE_HAND: usize = 5;

/// Whether three card kinds form a tradeable set.
///
/// Valid sets are three of the same kind, one of each non-wild kind, or any
/// set holding one or two Jokers. Three Jokers are not a set.
pub fn is_valid_combination(kinds: [CardKind; TRADE_SET_SIZE]) -> bool {
    let count = |kind: CardKind| kinds.iter().filter(|&&k| k == kind).count();
    let jokers = count(CardKind::Joker);

    match jokers {
        0 => {
            let same = count(kinds[0]) == TRADE_SET_SIZE;
            let one_each = count(CardKind::Infantry) == 1
                && count(CardKind::Cavalry) == 1
                && count(CardKind::Artillery) == 1;
            same || one_each
        }
        1 | 2 => true,
        _ => false,
    }
}

/// Whether the given cards form exactly one tradeable set.
pub fn is_valid_card_set(cards: &[Card]) -> bool {
    match cards {
        [a, b, c] => is_valid_combination([a.kind, b.kind, c.kind]),
        _ => false,
    }
}

/// All index triples `[i, j, k]` with `i < j < k` that form a valid set,
/// in lexicographic order.
pub fn tradeable_sets(cards: &[Card]) -> Vec<[usize; TRADE_SET_SIZE]> {
    let n = cards.len();
    let mut sets = Vec::new();
    if n < TRADE_SET_SIZE {
        return sets;
    }
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                if is_valid_combination([cards[i].kind, cards[j].kind, cards[k].kind]) {
                    sets.push([i, j, k]);
                }
            }
        }
    }
    sets
}

/// Sorts and checks a proposed index list: exactly three distinct indices.
pub fn normalize_indices(indices: &[usize]) -> Option<[usize; TRADE_SET_SIZE]> {
    let mut sorted = <[usize; TRADE_SET_SIZE]>::try_from(indices).ok()?;
    sorted.sort_unstable();
    if sorted[0] == sorted[1] || sorted[1] == sorted[2] {
        return None;
    }
    Some(sorted)
}
