#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use salvo::{
    init_logging, AiPlayer, CliPlayer, LogPresenter, MatchConfig, MatchRunner, Player,
    RecentMatches, RunOutcome, Side,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Watch two computer players fight it out.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1000, help = "Thinking delay before each computer shot")]
        delay_ms: u64,
    },
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1000, help = "Thinking delay before each computer shot")]
        delay_ms: u64,
        #[arg(long, help = "Show the engine's suggestion at every prompt")]
        hints: bool,
        #[arg(long, default_value = "You")]
        name: String,
    },
}

#[cfg(feature = "std")]
fn rng_pair(seed: Option<u64>) -> [SmallRng; 2] {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            [
                SmallRng::seed_from_u64(s),
                SmallRng::seed_from_u64(s.wrapping_add(1)),
            ]
        }
        None => {
            let mut seed_rng = rand::rng();
            [
                SmallRng::from_rng(&mut seed_rng),
                SmallRng::from_rng(&mut seed_rng),
            ]
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (players, config, seed): ([Box<dyn Player>; 2], MatchConfig, Option<u64>) =
        match cli.command {
            Commands::Local { seed, delay_ms } => {
                println!("Starting local computer vs computer game...");
                (
                    [
                        Box::new(AiPlayer::new()) as Box<dyn Player>,
                        Box::new(AiPlayer::new()),
                    ],
                    MatchConfig {
                        thinking_delay: Duration::from_millis(delay_ms),
                        names: ["Computer 1".to_string(), "Computer 2".to_string()],
                        starting: Side::First,
                    },
                    seed,
                )
            }
            Commands::Play {
                seed,
                delay_ms,
                hints,
                name,
            } => (
                [
                    Box::new(CliPlayer::new(hints)) as Box<dyn Player>,
                    Box::new(AiPlayer::new()),
                ],
                MatchConfig {
                    thinking_delay: Duration::from_millis(delay_ms),
                    names: [name, "Computer".to_string()],
                    starting: Side::First,
                },
                seed,
            ),
        };

    let history = RecentMatches::new();
    let mut runner = MatchRunner::new(players, rng_pair(seed), config)?
        .with_presenter(Box::new(LogPresenter))
        .with_recorder(Box::new(history.clone()));

    let cancel = runner.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    match runner.run().await? {
        RunOutcome::Finished(_) => {
            if let Some(record) = history.recent()?.last() {
                println!("\nGame over: {} wins.", record.winner);
                for stats in record.stats.iter() {
                    println!(
                        "  {}: {} shots fired, {}/{} ships lost",
                        stats.name, stats.move_count, stats.sunk_ships, stats.total_ships
                    );
                }
            }
        }
        RunOutcome::Cancelled => println!("\nGame abandoned."),
    }
    Ok(())
}
