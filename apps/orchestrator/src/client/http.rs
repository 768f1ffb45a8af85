//! reqwest binding of [`GameService`] against the game service's REST API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use super::wire::parse_state;
use super::{AttackOutcome, GameService, NewGameRequest, ServiceError};
use crate::config::ServiceConfig;
use crate::domain::{GameSnapshot, PlayerId};

#[derive(Debug, Clone)]
pub struct HttpGameService {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct ReinforceBody<'a> {
    player_id: PlayerId,
    territory: &'a str,
    num_armies: u32,
}

#[derive(Serialize)]
struct TransferBody<'a> {
    player_id: PlayerId,
    from_territory: &'a str,
    to_territory: &'a str,
    num_armies: u32,
}

#[derive(Serialize)]
struct AttackBody<'a> {
    player_id: PlayerId,
    from_territory: &'a str,
    to_territory: &'a str,
    num_armies: u32,
    num_dice: u32,
    repeat: bool,
}

#[derive(Serialize)]
struct TradeBody<'a> {
    player_id: PlayerId,
    card_indices: &'a [usize],
}

fn transport(err: reqwest::Error) -> ServiceError {
    if err.is_decode() {
        ServiceError::Decode(err.to_string())
    } else {
        ServiceError::Transport(err.to_string())
    }
}

impl HttpGameService {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Maps non-2xx answers to [`ServiceError::Rejected`], keeping the body
    /// as detail for the agent's feedback.
    async fn check(operation: &'static str, response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        debug!(operation, status = status.as_u16(), detail = %detail, "Game service rejected request");
        Err(ServiceError::Rejected {
            operation,
            status: status.as_u16(),
            detail,
        })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ServiceError> {
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(transport)?;
        Self::check(operation, response).await
    }
}

#[async_trait]
impl GameService for HttpGameService {
    async fn get_state(&self) -> Result<GameSnapshot, ServiceError> {
        let response = self
            .client
            .get(self.url("game-state"))
            .send()
            .await
            .map_err(transport)?;
        let response = Self::check("get_state", response).await?;
        let body: JsonValue = response.json().await.map_err(transport)?;
        parse_state(body)
    }

    async fn reinforce(
        &self,
        player: PlayerId,
        territory: &str,
        armies: u32,
    ) -> Result<(), ServiceError> {
        let body = ReinforceBody {
            player_id: player,
            territory,
            num_armies: armies,
        };
        self.post("reinforce", "reinforce", Some(&body)).await?;
        Ok(())
    }

    async fn attack(
        &self,
        player: PlayerId,
        from: &str,
        to: &str,
        armies: u32,
        dice: u32,
    ) -> Result<AttackOutcome, ServiceError> {
        let body = AttackBody {
            player_id: player,
            from_territory: from,
            to_territory: to,
            num_armies: armies,
            num_dice: dice,
            repeat: false,
        };
        let response = self.post("attack", "attack", Some(&body)).await?;
        // The attack already happened; an unreadable body only loses details.
        let raw = response.text().await.map_err(transport)?;
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    }

    async fn fortify(
        &self,
        player: PlayerId,
        from: &str,
        to: &str,
        armies: u32,
    ) -> Result<(), ServiceError> {
        let body = TransferBody {
            player_id: player,
            from_territory: from,
            to_territory: to,
            num_armies: armies,
        };
        self.post("fortify", "fortify", Some(&body)).await?;
        Ok(())
    }

    async fn move_armies(
        &self,
        player: PlayerId,
        from: &str,
        to: &str,
        armies: u32,
    ) -> Result<(), ServiceError> {
        let body = TransferBody {
            player_id: player,
            from_territory: from,
            to_territory: to,
            num_armies: armies,
        };
        self.post("move_armies", "move_armies", Some(&body)).await?;
        Ok(())
    }

    async fn trade_cards(&self, player: PlayerId, indices: &[usize]) -> Result<(), ServiceError> {
        let body = TradeBody {
            player_id: player,
            card_indices: indices,
        };
        self.post("trade_cards", "trade_cards", Some(&body)).await?;
        Ok(())
    }

    async fn advance_phase(&self) -> Result<(), ServiceError> {
        self.post::<JsonValue>("advance_phase", "advance_phase", None)
            .await?;
        Ok(())
    }

    async fn new_game(&self, request: &NewGameRequest) -> Result<(), ServiceError> {
        info!(
            base_url = %self.base_url,
            config_file = ?request.config_file,
            num_players = ?request.num_players,
            "Requesting new game"
        );
        self.post("new_game", "new-game", Some(request)).await?;
        Ok(())
    }
}
