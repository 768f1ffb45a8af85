use crate::domain::fixtures::SnapshotBuilder;
use crate::domain::state::Phase;
use crate::domain::{
    admitting_action, legal_actions, legal_attack_actions, legal_card_trade_actions,
    legal_fortify_actions, legal_move_armies_actions, legal_reinforce_actions, offered_actions,
    ActionProposal, CardKind, GameSnapshot, LegalAction,
};

fn two_player_map(phase: Phase) -> GameSnapshot {
    SnapshotBuilder::new()
        .territory("Alaska", "north", &["Kamchatka", "Ontario"])
        .territory("Ontario", "north", &["Alaska", "Quebec"])
        .territory("Quebec", "north", &["Ontario"])
        .territory("Kamchatka", "asia", &["Alaska"])
        .continent("north", 5)
        .continent("asia", 2)
        .player(1, "alice", &[("Alaska", 4), ("Ontario", 1)])
        .player(2, "bob", &[("Kamchatka", 2), ("Quebec", 3)])
        .current("alice")
        .phase(phase)
        .pool(5)
        .build()
}

#[test]
fn reinforce_one_action_per_owned_territory() {
    let snapshot = two_player_map(Phase::Reinforce);
    let alice = snapshot.player("alice").unwrap();
    assert_eq!(
        legal_reinforce_actions(&snapshot, alice),
        vec![
            LegalAction::Reinforce {
                territory: "Alaska".into(),
                max_armies: 5
            },
            LegalAction::Reinforce {
                territory: "Ontario".into(),
                max_armies: 5
            },
        ]
    );
}

#[test]
fn reinforce_empty_outside_phase_or_with_empty_pool() {
    let attack = two_player_map(Phase::Attack);
    let alice = attack.player("alice").unwrap();
    assert!(legal_reinforce_actions(&attack, alice).is_empty());

    let mut drained = two_player_map(Phase::Reinforce);
    drained.reinforcement_armies = 0;
    let alice = drained.player("alice").unwrap();
    assert!(legal_reinforce_actions(&drained, alice).is_empty());
}

#[test]
fn reinforce_empty_for_inactive_player() {
    let snapshot = two_player_map(Phase::Reinforce);
    let bob = snapshot.player("bob").unwrap();
    assert!(legal_reinforce_actions(&snapshot, bob).is_empty());
}

#[test]
fn attack_targets_enemy_neighbours_with_capped_dice() {
    let snapshot = two_player_map(Phase::Attack);
    let alice = snapshot.player("alice").unwrap();
    assert_eq!(
        legal_attack_actions(&snapshot, alice),
        vec![LegalAction::Attack {
            from: "Alaska".into(),
            to: "Kamchatka".into(),
            max_dice: 3
        }]
    );
}

#[test]
fn single_army_never_attacks() {
    let snapshot = two_player_map(Phase::Attack);
    let bob = snapshot.player("bob").unwrap();
    let actions = legal_attack_actions(&snapshot, bob);
    // Kamchatka (2 armies) attacks Alaska with one die; Quebec (3) attacks Ontario with two.
    assert_eq!(
        actions,
        vec![
            LegalAction::Attack {
                from: "Kamchatka".into(),
                to: "Alaska".into(),
                max_dice: 1
            },
            LegalAction::Attack {
                from: "Quebec".into(),
                to: "Ontario".into(),
                max_dice: 2
            },
        ]
    );
}

#[test]
fn unowned_neighbours_never_yield_attacks() {
    let snapshot = SnapshotBuilder::new()
        .territory("A", "x", &["B"])
        .territory("B", "x", &["A"])
        .player(1, "alice", &[("A", 5)])
        .phase(Phase::Attack)
        .build();
    let alice = snapshot.player("alice").unwrap();
    assert!(legal_attack_actions(&snapshot, alice).is_empty());
}

#[test]
fn fortify_follows_owned_component_only() {
    let snapshot = SnapshotBuilder::new()
        .territory("A", "x", &["B"])
        .territory("B", "x", &["A", "C"])
        .territory("C", "x", &["B", "E"])
        .territory("D", "y", &["E"])
        .territory("E", "y", &["C", "D"])
        .player(1, "alice", &[("A", 4), ("B", 1), ("C", 2), ("D", 3)])
        .player(2, "bob", &[("E", 1)])
        .phase(Phase::Fortify)
        .build();
    let alice = snapshot.player("alice").unwrap();
    let actions = legal_fortify_actions(&snapshot, alice);

    assert_eq!(
        actions,
        vec![
            LegalAction::Fortify {
                from: "A".into(),
                to: "B".into(),
                max_armies: 3
            },
            LegalAction::Fortify {
                from: "A".into(),
                to: "C".into(),
                max_armies: 3
            },
            LegalAction::Fortify {
                from: "C".into(),
                to: "A".into(),
                max_armies: 1
            },
            LegalAction::Fortify {
                from: "C".into(),
                to: "B".into(),
                max_armies: 1
            },
        ]
    );
    assert!(actions.iter().all(|a| match a {
        LegalAction::Fortify { from, to, .. } => from != "D" && to != "D",
        _ => false,
    }));
}

#[test]
fn move_armies_passes_service_bounds_through() {
    let bounds = LegalAction::MoveArmies {
        from: "Alaska".into(),
        to: "Kamchatka".into(),
        min_armies: 3,
        max_armies: 3,
    };
    let snapshot = SnapshotBuilder::new()
        .territory("Alaska", "north", &["Kamchatka"])
        .territory("Kamchatka", "asia", &["Alaska"])
        .player(1, "alice", &[("Alaska", 4), ("Kamchatka", 0)])
        .phase(Phase::MoveArmies)
        .hint(bounds.clone())
        .hint(LegalAction::EndPhase)
        .build();
    let alice = snapshot.player("alice").unwrap();
    assert_eq!(legal_move_armies_actions(&snapshot, alice), vec![bounds]);

    let attack = two_player_map(Phase::Attack);
    let alice = attack.player("alice").unwrap();
    assert!(legal_move_armies_actions(&attack, alice).is_empty());
}

#[test]
fn one_of_each_hand_trades_once() {
    let snapshot = SnapshotBuilder::new()
        .territory("A", "x", &[])
        .player(1, "alice", &[("A", 1)])
        .cards(
            "alice",
            &[CardKind::Infantry, CardKind::Cavalry, CardKind::Artillery],
        )
        .phase(Phase::Reinforce)
        .pool(3)
        .build();
    let alice = snapshot.player("alice").unwrap();
    assert_eq!(
        legal_card_trade_actions(&snapshot, alice),
        vec![LegalAction::TradeCards {
            card_indices: vec![0, 1, 2]
        }]
    );

    let all = legal_actions(&snapshot, alice);
    assert!(matches!(all[0], LegalAction::TradeCards { .. }));
    assert!(matches!(all[1], LegalAction::Reinforce { .. }));
}

#[test]
fn trades_only_in_reinforce() {
    let snapshot = SnapshotBuilder::new()
        .territory("A", "x", &[])
        .player(1, "alice", &[("A", 1)])
        .cards("alice", &[CardKind::Joker, CardKind::Joker, CardKind::Infantry])
        .phase(Phase::Fortify)
        .build();
    let alice = snapshot.player("alice").unwrap();
    assert!(legal_card_trade_actions(&snapshot, alice).is_empty());
}

#[test]
fn end_phase_offered_only_in_optional_phases_with_actions() {
    let attack = two_player_map(Phase::Attack);
    let alice = attack.player("alice").unwrap();
    assert_eq!(offered_actions(&attack, alice).last(), Some(&LegalAction::EndPhase));

    let reinforce = two_player_map(Phase::Reinforce);
    let alice = reinforce.player("alice").unwrap();
    assert!(!offered_actions(&reinforce, alice).contains(&LegalAction::EndPhase));

    let stuck = SnapshotBuilder::new()
        .territory("A", "x", &[])
        .player(1, "alice", &[("A", 1)])
        .phase(Phase::Attack)
        .build();
    let alice = stuck.player("alice").unwrap();
    assert!(offered_actions(&stuck, alice).is_empty());
}

#[test]
fn attack_must_leave_one_army_behind() {
    let snapshot = two_player_map(Phase::Attack);
    let alice = snapshot.player("alice").unwrap();
    let offered = offered_actions(&snapshot, alice);
    let attack = |armies| ActionProposal::Attack {
        from: "Alaska".into(),
        to: "Kamchatka".into(),
        armies,
        dice: 3,
    };

    assert!(admitting_action(&snapshot, &offered, &attack(3)).is_some());
    assert!(admitting_action(&snapshot, &offered, &attack(4)).is_none());
    assert!(admitting_action(&snapshot, &offered, &attack(1000)).is_none());
    assert!(admitting_action(&snapshot, &offered, &ActionProposal::EndPhase).is_some());
}
