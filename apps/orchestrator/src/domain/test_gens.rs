// Proptest generators for domain types.

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

use crate::domain::fixtures::SnapshotBuilder;
use crate::domain::{Card, CardKind, GameSnapshot, Phase};

pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

/// Generate a random CardKind
pub fn card_kind() -> impl Strategy<Value = CardKind> {
    prop_oneof![
        Just(CardKind::Infantry),
        Just(CardKind::Cavalry),
        Just(CardKind::Artillery),
        Just(CardKind::Joker),
    ]
}

/// Generate a hand of up to `max` cards
pub fn hand(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_kind().prop_map(Card::new), 0..=max)
}

/// Generate a random map owned by two players in the given phase.
///
/// Territories are named `T0..Tn`; each gets a random neighbour set (made
/// symmetric), a random owner and 1..=6 armies.
pub fn two_player_board(phase: Phase) -> impl Strategy<Value = GameSnapshot> {
    (2usize..=9)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(prop::collection::vec(0..n, 0..=3), n),
                prop::collection::vec(any::<bool>(), n),
                prop::collection::vec(1u32..=6, n),
            )
        })
        .prop_map(move |(n, edges, owners, armies)| {
            let names: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
            let mut builder = SnapshotBuilder::new().phase(phase);
            for name in &names {
                builder = builder.territory(name, "c", &[]);
            }
            for (i, targets) in edges.iter().enumerate() {
                for &j in targets {
                    if i != j {
                        builder = builder.border(&names[i], &names[j]);
                    }
                }
            }
            let holdings = |side: bool| -> Vec<(&str, u32)> {
                names
                    .iter()
                    .zip(owners.iter().zip(armies.iter()))
                    .filter(|(_, (owner, _))| **owner == side)
                    .map(|(name, (_, a))| (name.as_str(), *a))
                    .collect()
            };
            builder
                .player(1, "alice", &holdings(true))
                .player(2, "bob", &holdings(false))
                .current("alice")
                .build()
        })
}
