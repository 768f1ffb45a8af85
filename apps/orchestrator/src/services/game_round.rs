//! Game round coordinator: starts games on the service and keeps their flows
//! addressable by id.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;
use ulid::Ulid;

use super::game_flow::{AgentRoster, GameFlow, GameSummary, TurnResult};
use crate::ai::{create_agent, AgentConfig};
use crate::client::{GameService, NewGameRequest};
use crate::config::FlowConfig;
use crate::error::AppError;
use crate::errors::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Ulid);

impl GameId {
    fn new() -> Self {
        Self(Ulid::new())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds one service client per game.
pub trait ServiceFactory: Send + Sync {
    fn create(&self) -> Result<Arc<dyn GameService>, AppError>;
}

impl<F> ServiceFactory for F
where
    F: Fn() -> Result<Arc<dyn GameService>, AppError> + Send + Sync,
{
    fn create(&self) -> Result<Arc<dyn GameService>, AppError> {
        self()
    }
}

/// One seat: the service-side player name and the agent deciding for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub player: String,
    pub agent: String,
    #[serde(default)]
    pub config: AgentConfig,
}

impl Seat {
    pub fn new(player: impl Into<String>, agent: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            agent: agent.into(),
            config: AgentConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }
}

/// Parses `NAME=AGENT`.
impl FromStr for Seat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((player, agent)) if !player.trim().is_empty() && !agent.trim().is_empty() => {
                Ok(Seat::new(player.trim(), agent.trim()))
            }
            _ => Err(AppError::config(format!(
                "seat '{s}' must look like NAME=AGENT"
            ))),
        }
    }
}

/// Seats plus the parameters of the `new_game` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameRoster {
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub new_game: NewGameRequest,
}

impl GameRoster {
    pub fn seat(mut self, seat: Seat) -> Self {
        self.seats.push(seat);
        self
    }

    /// Parses a comma-separated list of `NAME=AGENT` seats.
    pub fn parse_seats(list: &str) -> Result<Self, AppError> {
        let seats = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Seat>, _>>()?;
        Ok(Self {
            seats,
            new_game: NewGameRequest::default(),
        })
    }

    /// Resolves every seat's agent through the registry.
    pub fn build_agents(&self) -> Result<AgentRoster, AppError> {
        if self.seats.is_empty() {
            return Err(AppError::config("roster has no seats".into()));
        }
        let mut roster = AgentRoster::new();
        for seat in &self.seats {
            let agent = create_agent(&seat.agent, &seat.config).ok_or_else(|| {
                AppError::config_with(
                    ErrorCode::UnknownAgent,
                    format!("unknown agent '{}' for player '{}'", seat.agent, seat.player),
                )
            })?;
            roster.insert(seat.player.clone(), agent);
        }
        Ok(roster)
    }
}

/// Registry of running games. Each flow sits behind its own async mutex, so
/// one game is driven by one caller at a time while games run side by side.
pub struct GameRoundService {
    factory: Arc<dyn ServiceFactory>,
    config: FlowConfig,
    games: DashMap<GameId, Arc<Mutex<GameFlow>>>,
}

impl GameRoundService {
    pub fn new(factory: Arc<dyn ServiceFactory>, config: FlowConfig) -> Self {
        Self {
            factory,
            config,
            games: DashMap::new(),
        }
    }

    /// Starts a new game on a fresh client and registers its flow.
    pub async fn start_game(&self, roster: &GameRoster) -> Result<GameId, AppError> {
        let agents = roster.build_agents()?;
        let service = self.factory.create()?;
        service.new_game(&roster.new_game).await?;

        let id = GameId::new();
        let flow = GameFlow::new(service, agents, self.config.clone());
        self.games.insert(id, Arc::new(Mutex::new(flow)));
        info!(game_id = %id, players = roster.seats.len(), "Game started");
        Ok(id)
    }

    pub async fn run_to_completion(&self, id: GameId) -> Result<GameSummary, AppError> {
        let flow = self.flow(id)?;
        let mut flow = flow.lock().await;
        flow.run_to_completion().await
    }

    pub async fn play_single_turn(&self, id: GameId) -> Result<TurnResult, AppError> {
        let flow = self.flow(id)?;
        let mut flow = flow.lock().await;
        flow.play_single_turn().await
    }

    /// Drops the game's flow. The service-side game is left as is.
    pub fn finish_game(&self, id: GameId) -> Result<(), AppError> {
        self.games
            .remove(&id)
            .map(|_| info!(game_id = %id, "Game finished"))
            .ok_or_else(|| not_found(id))
    }

    pub fn active_games(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self.games.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }

    fn flow(&self, id: GameId) -> Result<Arc<Mutex<GameFlow>>, AppError> {
        self.games
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: GameId) -> AppError {
    AppError::not_found(ErrorCode::GameNotFound, format!("game {id} is not registered"))
}
