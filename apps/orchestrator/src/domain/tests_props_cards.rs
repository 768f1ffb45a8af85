//! Property tests for card trade-in combinatorics.

use proptest::prelude::*;

use crate::domain::cards_logic::{is_valid_combination, tradeable_sets};
use crate::domain::test_gens;
use crate::domain::CardKind;

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Validity does not depend on the order of the three cards.
    #[test]
    fn prop_validity_is_permutation_invariant(
        a in test_gens::card_kind(),
        b in test_gens::card_kind(),
        c in test_gens::card_kind(),
    ) {
        let expected = is_valid_combination([a, b, c]);
        for perm in [[a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]] {
            prop_assert_eq!(is_valid_combination(perm), expected);
        }
    }

    /// Any set with one or two jokers is valid; three jokers never are.
    #[test]
    fn prop_joker_count_rules(
        a in test_gens::card_kind(),
        b in test_gens::card_kind(),
        c in test_gens::card_kind(),
    ) {
        let jokers = [a, b, c].iter().filter(|k| **k == CardKind::Joker).count();
        match jokers {
            1 | 2 => prop_assert!(is_valid_combination([a, b, c])),
            3 => prop_assert!(!is_valid_combination([a, b, c])),
            _ => {}
        }
    }

    /// Enumerated trades are ascending, distinct, in range and valid.
    #[test]
    fn prop_tradeable_sets_are_well_formed(hand in test_gens::hand(7)) {
        let sets = tradeable_sets(&hand);
        for set in &sets {
            prop_assert!(set[0] < set[1] && set[1] < set[2]);
            prop_assert!(set[2] < hand.len());
            prop_assert!(is_valid_combination([
                hand[set[0]].kind,
                hand[set[1]].kind,
                hand[set[2]].kind,
            ]));
        }
        let mut sorted = sets.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted, sets);
    }

    /// Five cards with at most two jokers always contain a tradeable set.
    #[test]
    fn prop_five_cards_always_trade(hand in prop::collection::vec(
        test_gens::card_kind().prop_map(crate::domain::Card::new), 5..=5,
    )) {
        let jokers = hand.iter().filter(|c| c.kind.is_wild()).count();
        prop_assume!(jokers <= 2);
        prop_assert!(!tradeable_sets(&hand).is_empty());
    }
}
