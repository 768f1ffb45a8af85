//! Domain layer: snapshot model and the pure legal-action rules.

pub mod actions;
pub mod cards_logic;
pub mod cards_types;
pub mod connectivity;
pub mod continents;
pub mod errors;
pub mod fixtures;
pub mod hints;
pub mod rules;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_cards;
#[cfg(test)]
mod tests_props_connectivity;
#[cfg(test)]
mod tests_rules;

// Re-exports for ergonomics
pub use actions::{find_admitting, ActionKind, ActionProposal, LegalAction};
pub use cards_logic::{is_valid_card_set, is_valid_combination, tradeable_sets};
pub use cards_types::{Card, CardKind};
pub use continents::{continent_bonus, controlled_continents};
pub use rules::{
    admitting_action, legal_actions, legal_attack_actions, legal_card_trade_actions, legal_fortify_actions,
    legal_move_armies_actions, legal_reinforce_actions, offered_actions,
};
pub use state::{Continent, ConquestOdds, GameSnapshot, Phase, Player, PlayerId, Territory};
