//! Agent configuration handling.
//!
//! Provides a typed interface over the JSON config handed to an agent
//! factory, extracting standard fields while preserving agent-specific ones.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Standard configuration for decision agents.
///
/// # Standard Fields
///
/// - `seed`: optional RNG seed for reproducible decisions.
/// - `pass_rate`: optional probability of declining to act, for agents that
///   support it.
///
/// # Example JSON Config
///
/// ```json
/// {"seed": 12345, "pass_rate": 0.1, "temperature": 0.7}
/// ```
///
/// Unknown fields such as `temperature` land in `custom`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Optional RNG seed for deterministic agent behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Optional probability in `[0, 1]` of passing instead of acting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<f64>,

    /// Agent-specific configuration.
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl AgentConfig {
    /// Create an AgentConfig from optional JSON value.
    ///
    /// Malformed input yields an empty config.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_else(Self::empty)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Pass probability, zero when unset.
    pub fn pass_rate(&self) -> f64 {
        self.pass_rate.unwrap_or(0.0)
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }

    /// Create an empty configuration (no seed, no custom fields).
    pub fn empty() -> Self {
        Self {
            seed: None,
            pass_rate: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }

    /// Create a configuration with just a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::empty()
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::empty()
    }
}
