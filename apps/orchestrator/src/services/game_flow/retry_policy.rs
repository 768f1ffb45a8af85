//! Retry budget and cross-phase stall detection.

use serde::{Deserialize, Serialize};

use crate::domain::Phase;

/// One policy shared by every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Consecutive failed attempts (invalid or no-op) before the phase is
    /// force-advanced.
    pub max_attempts: u32,
    /// Consecutive observations of the same (player, phase) tolerated by the
    /// turn loop before it force-advances.
    pub stall_threshold: u32,
    /// Successful actions allowed in one phase visit before the handler
    /// advances on its own.
    pub max_actions_per_phase: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            stall_threshold: 10,
            max_actions_per_phase: 100,
        }
    }
}

impl RetryPolicy {
    pub fn budget_exhausted(&self, failures: u32) -> bool {
        failures >= self.max_attempts
    }
}

/// Consecutive-failure counter for one phase visit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RetryCounter {
    failures: u32,
}

impl RetryCounter {
    /// Records a failure and returns the new consecutive count.
    pub fn record_failure(&mut self) -> u32 {
        self.failures += 1;
        self.failures
    }

    pub fn reset(&mut self) {
        self.failures = 0;
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallCheck {
    Progressing,
    Stalled { repeats: u32 },
}

/// Counts how many consecutive turn-loop iterations observed the same
/// (player, phase). Fires once the count exceeds the threshold.
#[derive(Debug, Clone)]
pub struct StallGuard {
    threshold: u32,
    last: Option<(String, Phase)>,
    repeats: u32,
}

impl StallGuard {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            last: None,
            repeats: 0,
        }
    }

    pub fn observe(&mut self, player: &str, phase: Phase) -> StallCheck {
        let same = matches!(&self.last, Some((p, ph)) if p == player && *ph == phase);
        if same {
            self.repeats += 1;
        } else {
            self.last = Some((player.to_string(), phase));
            self.repeats = 1;
        }
        if self.repeats > self.threshold {
            StallCheck::Stalled {
                repeats: self.repeats,
            }
        } else {
            StallCheck::Progressing
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.repeats = 0;
    }

    pub fn repeats(&self) -> u32 {
        self.repeats
    }
}
