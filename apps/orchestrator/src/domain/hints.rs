//! Cross-check of engine-derived actions against the service's own
//! `possible_actions` hints. The engine stays authoritative; the report only
//! feeds logging.

use std::collections::BTreeSet;

use super::actions::{ActionKind, LegalAction};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintReport {
    /// Hinted by the service but not derived locally.
    pub missing: Vec<LegalAction>,
    /// Derived locally but absent from the hints.
    pub unexpected: Vec<LegalAction>,
}

impl HintReport {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

/// Compares the two lists restricted to the action kinds the engine derived.
/// `EndPhase` never takes part. Returns `None` when the service sent no
/// hints of a comparable kind.
pub fn cross_check(derived: &[LegalAction], hints: &[LegalAction]) -> Option<HintReport> {
    let kinds: BTreeSet<ActionKind> = derived
        .iter()
        .map(LegalAction::kind)
        .filter(|k| *k != ActionKind::EndPhase)
        .collect();

    let hinted: BTreeSet<&LegalAction> = hints
        .iter()
        .filter(|h| kinds.contains(&h.kind()))
        .collect();
    if hinted.is_empty() {
        return None;
    }
    let local: BTreeSet<&LegalAction> = derived
        .iter()
        .filter(|a| a.kind() != ActionKind::EndPhase)
        .collect();

    Some(HintReport {
        missing: hinted.difference(&local).map(|a| (*a).clone()).collect(),
        unexpected: local.difference(&hinted).map(|a| (*a).clone()).collect(),
    })
}
