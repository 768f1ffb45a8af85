//! Game runner CLI - plays batches of games against a running game service
//! and records per-game metrics.

mod metrics;
mod output;

use clap::Parser;
use metrics::{build_game_metrics, GameMetrics};
use orchestrator::{
    AgentConfig, FlowConfig, GameRoster, GameRoundService, GameService, GameStatus,
    HttpGameService, Seat, ServiceConfig,
};
use output::OutputWriter;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "game-runner")]
#[command(about = "Plays batches of games between decision agents on a game service")]
struct Args {
    /// Base URL of the game service
    #[arg(long, env = "RISK_API_URL", default_value = orchestrator::config::service::DEFAULT_API_URL)]
    api_url: String,

    /// Number of games to play
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Seat assignment as NAME=AGENT (repeatable)
    #[arg(long = "player", value_name = "NAME=AGENT", required = true)]
    players: Vec<Seat>,

    /// Base seed for the agents; each game and seat derives its own
    #[arg(long)]
    seed: Option<u64>,

    /// Player turns before a game is abandoned
    #[arg(long)]
    max_turns: Option<u32>,

    /// Upper bound on a single agent decision
    #[arg(long)]
    turn_timeout_secs: Option<u64>,

    /// Game config file passed to the service's new-game call
    #[arg(long)]
    game_config: Option<String>,

    /// Output directory for results
    #[arg(long, default_value = "./game-results")]
    output_dir: PathBuf,

    /// Compress output files
    #[arg(long)]
    compress: bool,

    /// Keep each game's full action history in the output
    #[arg(long)]
    with_history: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut flow_config = FlowConfig::from_env()?;
    if let Some(max_turns) = args.max_turns {
        flow_config.max_turns = max_turns;
    }
    if let Some(secs) = args.turn_timeout_secs {
        flow_config.turn_timeout = Duration::from_secs(secs);
    }
    let service_config = ServiceConfig::from_env()?.with_base_url(args.api_url.clone());

    let factory = move || -> Result<Arc<dyn GameService>, orchestrator::AppError> {
        Ok(Arc::new(HttpGameService::new(&service_config)?))
    };
    let rounds = GameRoundService::new(Arc::new(factory), flow_config);

    let mut output_writer = OutputWriter::new(&args.output_dir, args.compress)?;
    if args.show_output {
        info!(games = args.games, players = args.players.len(), api_url = %args.api_url, "Starting game runner");
        info!(output = %output_writer.path().display(), "Writing results");
    }

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let roster = roster_for(&args, game_num);
        let game_start = Instant::now();

        let played = async {
            let id = rounds.start_game(&roster).await?;
            let summary = rounds.run_to_completion(id).await;
            rounds.finish_game(id)?;
            summary.map(|summary| (id, summary))
        }
        .await;

        match played {
            Ok((id, summary)) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    id.to_string(),
                    &roster,
                    args.games,
                    args.seed,
                    &summary,
                    duration_ms,
                    args.with_history,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(
                        game = game_num,
                        status = ?summary.status,
                        winner = summary.winner.as_deref().unwrap_or("none"),
                        turns = summary.turns,
                        "Game completed"
                    );
                }
                results.push(metrics);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let path = output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", path.display());
        print_summary(&results, errors, elapsed, args.games);
    }

    Ok(())
}

/// Seats for one game; agent seeds derive from `--seed` so reruns repeat.
fn roster_for(args: &Args, game_num: u32) -> GameRoster {
    let seats = args
        .players
        .iter()
        .enumerate()
        .map(|(index, seat)| {
            let seed = match args.seed {
                Some(base) => base
                    .wrapping_add(u64::from(game_num) << 16)
                    .wrapping_add(index as u64),
                None => rand::random(),
            };
            let config = AgentConfig {
                seed: Some(seed),
                ..seat.config.clone()
            };
            seat.clone().with_config(config)
        })
        .collect::<Vec<_>>();

    let mut roster = GameRoster {
        seats,
        ..GameRoster::default()
    };
    roster.new_game.num_players = u32::try_from(roster.seats.len()).ok();
    roster.new_game.config_file = args.game_config.clone();
    roster
}

fn print_summary(results: &[GameMetrics], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Run Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let turn_limited = results
        .iter()
        .filter(|m| m.result.status == GameStatus::TurnLimitReached)
        .count();
    let avg_turns =
        results.iter().map(|m| f64::from(m.result.turns)).sum::<f64>() / results.len() as f64;
    println!("Average turns: {:.1}", avg_turns);
    println!("Turn limit reached: {}", turn_limited);

    let mut wins: BTreeMap<&str, u32> = BTreeMap::new();
    let mut success_rates: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for metrics in results {
        if let Some(winner) = metrics.result.winner.as_deref() {
            *wins.entry(winner).or_default() += 1;
        }
        for player in &metrics.player_metrics {
            success_rates
                .entry(player.player.as_str())
                .or_default()
                .push(player.actions.success_rate());
        }
    }

    println!("\n=== Results by Player ===");
    for (player, rates) in &success_rates {
        let won = wins.get(player).copied().unwrap_or(0);
        let win_rate = f64::from(won) / results.len() as f64 * 100.0;
        let avg_success = rates.iter().sum::<f64>() / rates.len() as f64 * 100.0;
        let agent = results[0]
            .config
            .agents
            .get(*player)
            .map(String::as_str)
            .unwrap_or("?");
        println!(
            "{} ({}): wins={} ({:.1}%), action success={:.1}%",
            player, agent, won, win_rate, avg_success
        );
    }
}
