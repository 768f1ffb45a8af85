//! Error codes for the orchestrator.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and appear verbatim in logs and in the
//! runner's output.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Configuration
    /// Malformed or missing configuration value
    ConfigError,
    /// No decision agent is registered under the requested name
    UnknownAgent,
    /// The active player has no agent in the roster
    AgentNotAssigned,

    // Game service
    /// The game service could not be reached within the fault budget
    ServiceUnavailable,
    /// The game service refused a request outright
    ServiceRejected,
    /// The game service answered with a payload we could not read
    ServicePayload,

    // Coordinator
    /// No game is registered under the given id
    GameNotFound,

    // System
    /// Internal server error
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigError => "CONFIG_ERROR",
            Self::UnknownAgent => "UNKNOWN_AGENT",
            Self::AgentNotAssigned => "AGENT_NOT_ASSIGNED",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::ServiceRejected => "SERVICE_REJECTED",
            Self::ServicePayload => "SERVICE_PAYLOAD",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
