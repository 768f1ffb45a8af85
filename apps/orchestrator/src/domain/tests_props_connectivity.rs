//! Property tests for fortify reachability and attack legality on random maps.

use proptest::prelude::*;

use crate::domain::connectivity::is_connected;
use crate::domain::test_gens;
use crate::domain::{legal_attack_actions, legal_fortify_actions, LegalAction, Phase};

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Connectivity is symmetric; fortify caps depend only on the source.
    #[test]
    fn prop_fortify_symmetric_with_source_caps(snapshot in test_gens::two_player_board(Phase::Fortify)) {
        let alice = snapshot.player("alice").unwrap();
        let actions = legal_fortify_actions(&snapshot, alice);

        for action in &actions {
            let LegalAction::Fortify { from, to, max_armies } = action else {
                prop_assert!(false, "non-fortify action {:?}", action);
                continue;
            };
            prop_assert!(is_connected(&snapshot, alice, to, from));
            prop_assert_eq!(*max_armies, snapshot.armies_in(from) - 1);
            prop_assert!(alice.owns(to));
            prop_assert_ne!(from, to);

            if snapshot.armies_in(to) > 1 {
                let reverse = LegalAction::Fortify {
                    from: to.clone(),
                    to: from.clone(),
                    max_armies: snapshot.armies_in(to) - 1,
                };
                prop_assert!(actions.contains(&reverse));
            }
        }
    }

    /// Attacks start from owned territories with spare armies and target a
    /// differently owned neighbour.
    #[test]
    fn prop_attacks_respect_ownership(snapshot in test_gens::two_player_board(Phase::Attack)) {
        let alice = snapshot.player("alice").unwrap();
        for action in legal_attack_actions(&snapshot, alice) {
            let LegalAction::Attack { from, to, max_dice } = action else {
                prop_assert!(false, "non-attack action");
                continue;
            };
            let source = snapshot.territory(&from).unwrap();
            prop_assert!(source.is_owned_by("alice"));
            prop_assert!(source.armies >= 2);
            prop_assert!(source.adjacent.contains(&to));
            prop_assert_eq!(snapshot.owner_of(&to), Some("bob"));
            prop_assert_eq!(max_dice, (source.armies - 1).min(3));
        }
    }

    /// No fortify or attack actions appear in a phase they do not belong to.
    #[test]
    fn prop_phase_mismatch_is_empty(snapshot in test_gens::two_player_board(Phase::Reinforce)) {
        let alice = snapshot.player("alice").unwrap();
        prop_assert!(legal_fortify_actions(&snapshot, alice).is_empty());
        prop_assert!(legal_attack_actions(&snapshot, alice).is_empty());
    }
}
