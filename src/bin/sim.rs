use rand::{rngs::SmallRng, SeedableRng};
use salvo::{AiPlayer, MatchConfig, MatchRunner, Player, RecentMatches, RunOutcome};
use serde_json::json;
use tokio::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let history = RecentMatches::new();
    let players: [Box<dyn Player>; 2] = [Box::new(AiPlayer::new()), Box::new(AiPlayer::new())];
    let config = MatchConfig {
        thinking_delay: Duration::ZERO,
        names: ["player1".to_string(), "player2".to_string()],
        ..MatchConfig::default()
    };
    let rngs = [SmallRng::seed_from_u64(seed1), SmallRng::seed_from_u64(seed2)];
    let mut runner = MatchRunner::new(players, rngs, config)?
        .with_recorder(Box::new(history.clone()));

    let outcome = runner.run().await?;
    let record = history.recent()?.pop();

    let result = match (outcome, record) {
        (RunOutcome::Finished(_), Some(record)) => json!({
            "winner": record.winner,
            "loser": record.loser,
            "stats": record.stats,
            "timestamp_ms": record.timestamp_ms,
        }),
        _ => json!({ "winner": null }),
    };

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
