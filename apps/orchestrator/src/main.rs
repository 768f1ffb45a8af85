use std::sync::Arc;

use orchestrator::{
    FlowConfig, GameRoster, GameRoundService, GameService, HttpGameService, ServiceConfig,
};
use tracing::{error, info};

mod telemetry;

const DEFAULT_PLAYERS: &str = "player1=random,player2=first-legal";

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // RISK_API_URL, RISK_PLAYERS ("name=agent,..."), RISK_MAX_TURNS, ...
    let service_config = ServiceConfig::from_env().unwrap_or_else(|e| exit_with(&e));
    let flow_config = FlowConfig::from_env().unwrap_or_else(|e| exit_with(&e));
    let players = std::env::var("RISK_PLAYERS").unwrap_or_else(|_| DEFAULT_PLAYERS.to_string());
    let mut roster = GameRoster::parse_seats(&players).unwrap_or_else(|e| exit_with(&e));
    roster.new_game.num_players = u32::try_from(roster.seats.len()).ok();
    roster.new_game.config_file = std::env::var("RISK_GAME_CONFIG").ok();

    info!(
        api_url = %service_config.base_url,
        players = roster.seats.len(),
        max_turns = flow_config.max_turns,
        "Starting orchestrator"
    );

    let factory = move || -> Result<Arc<dyn GameService>, orchestrator::AppError> {
        Ok(Arc::new(HttpGameService::new(&service_config)?))
    };
    let rounds = GameRoundService::new(Arc::new(factory), flow_config);

    let result = async {
        let id = rounds.start_game(&roster).await?;
        let summary = rounds.run_to_completion(id).await;
        rounds.finish_game(id)?;
        summary
    }
    .await;

    match result {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => exit_with(&e),
        },
        Err(e) => {
            error!(code = %e.code(), error = %e, "Game aborted");
            std::process::exit(1);
        }
    }
}

fn exit_with(err: &dyn std::fmt::Display) -> ! {
    eprintln!("❌ {err}");
    std::process::exit(1);
}
