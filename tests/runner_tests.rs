use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use salvo::{
    choose_target, place_fleet, AiPlayer, Board, BoardError, CancelToken, ChannelPresenter,
    Coord, EngineError, GameOverEvent, Match, MatchConfig, MatchEvent, MatchRecord,
    MatchRecorder, MatchRunner, Player, Presenter, RecentMatches, RunOutcome, Ship, ShotEvent,
    ShotResults, Side, TurnScheduler, FLEET, TOTAL_SHIPS,
};
use tokio::time::{sleep, timeout, Duration};

struct CountingRecorder(Arc<AtomicUsize>);

#[async_trait::async_trait]
impl MatchRecorder for CountingRecorder {
    async fn record(&self, _record: MatchRecord) -> anyhow::Result<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingRecorder;

#[async_trait::async_trait]
impl MatchRecorder for FailingRecorder {
    async fn record(&self, _record: MatchRecord) -> anyhow::Result<()> {
        anyhow::bail!("storage unavailable")
    }
}

/// Fails to present every sinking shot.
struct SinkFailingPresenter;

#[async_trait::async_trait]
impl Presenter for SinkFailingPresenter {
    async fn shot(&mut self, event: &ShotEvent) -> anyhow::Result<()> {
        if event.sunk {
            anyhow::bail!("display went away");
        }
        Ok(())
    }

    async fn game_over(&mut self, _event: &GameOverEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Unpaced player whose operator hits Ctrl-C while at the prompt.
struct InterruptedHuman {
    cancel: CancelToken,
}

impl Player for InterruptedHuman {
    fn place_fleet(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        place_fleet(rng, board, &FLEET)
    }

    fn select_target(
        &mut self,
        _rng: &mut SmallRng,
        _shots: &ShotResults,
        _sunk_ships: &[Ship],
    ) -> Result<Coord, EngineError> {
        self.cancel.cancel();
        Ok((0, 0))
    }

    fn is_paced(&self) -> bool {
        false
    }
}

fn ai_pair() -> [Box<dyn Player>; 2] {
    [Box::new(AiPlayer::new()), Box::new(AiPlayer::new())]
}

fn rngs(seed: u64) -> [SmallRng; 2] {
    [SmallRng::seed_from_u64(seed), SmallRng::seed_from_u64(seed + 1)]
}

fn fast_config() -> MatchConfig {
    MatchConfig {
        thinking_delay: Duration::ZERO,
        names: ["alpha".to_string(), "beta".to_string()],
        ..MatchConfig::default()
    }
}

#[tokio::test]
async fn ai_match_finishes_and_records_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut runner = MatchRunner::new(ai_pair(), rngs(3), fast_config())
        .unwrap()
        .with_recorder(Box::new(CountingRecorder(calls.clone())));

    let outcome = runner.run().await.unwrap();
    let RunOutcome::Finished(verdict) = outcome else {
        panic!("expected a finished match, got {:?}", outcome);
    };
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let loser = runner.game().turn().stats(verdict.loser);
    assert_eq!(loser.sunk_ships, TOTAL_SHIPS);
    let winner = runner.game().turn().stats(verdict.winner);
    assert!(winner.sunk_ships < TOTAL_SHIPS);
    // at least one shot per enemy ship cell
    let cells: usize = FLEET.iter().map(|c| c.length() * c.count()).sum();
    assert!(winner.move_count >= cells);

    // running again reports the same verdict without recording twice
    assert_eq!(runner.run().await.unwrap(), RunOutcome::Finished(verdict));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn recorder_failure_does_not_reopen_the_match() {
    let mut runner = MatchRunner::new(ai_pair(), rngs(5), fast_config())
        .unwrap()
        .with_recorder(Box::new(FailingRecorder));
    let outcome = runner.run().await.unwrap();
    assert!(matches!(outcome, RunOutcome::Finished(_)));
    assert!(runner.game().is_over());
}

#[tokio::test]
async fn history_keeps_named_records() {
    let history = RecentMatches::new();
    let mut runner = MatchRunner::new(ai_pair(), rngs(8), fast_config())
        .unwrap()
        .with_recorder(Box::new(history.clone()));
    runner.run().await.unwrap();

    let records = history.recent().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert!(record.winner == "alpha" || record.winner == "beta");
    assert_ne!(record.winner, record.loser);
    assert_eq!(record.stats[0].name, "alpha");
    assert_eq!(record.stats[1].name, "beta");
    assert!(record.timestamp_ms > 0);
}

#[tokio::test]
async fn record_timestamp_is_wall_clock_millis() {
    let before = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis() as u64;
    let history = RecentMatches::new();
    let mut runner = MatchRunner::new(ai_pair(), rngs(12), fast_config())
        .unwrap()
        .with_recorder(Box::new(history.clone()));
    runner.run().await.unwrap();
    let after = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis() as u64;

    let stamp = history.recent().unwrap()[0].timestamp_ms;
    assert!(before <= stamp && stamp <= after, "{} not in {}..={}", stamp, before, after);
}

#[tokio::test]
async fn presenter_failure_on_final_shot_still_records() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut runner = MatchRunner::new(ai_pair(), rngs(6), fast_config())
        .unwrap()
        .with_presenter(Box::new(SinkFailingPresenter))
        .with_recorder(Box::new(CountingRecorder(calls.clone())));

    // every sink errors out of run(); keep going until the match is decided
    let mut errors = 0;
    let verdict = loop {
        match runner.run().await {
            Ok(RunOutcome::Finished(verdict)) => break verdict,
            Ok(RunOutcome::Cancelled) => panic!("nothing cancelled this match"),
            Err(_) => {
                errors += 1;
                assert!(errors <= 2 * TOTAL_SHIPS, "too many presenter errors");
            }
        }
    };

    assert!(errors > 0);
    assert!(runner.game().is_over());
    assert_eq!(runner.game().turn().game_over, Some(verdict));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cancel_at_unpaced_prompt_fires_nothing() {
    let cancel = CancelToken::new();
    let players: [Box<dyn Player>; 2] = [
        Box::new(InterruptedHuman {
            cancel: cancel.clone(),
        }),
        Box::new(AiPlayer::new()),
    ];
    let mut runner = MatchRunner::new(players, rngs(7), fast_config())
        .unwrap()
        .with_cancel_token(cancel);

    assert_eq!(runner.run().await.unwrap(), RunOutcome::Cancelled);
    let turn = runner.game().turn();
    assert_eq!(turn.stats(Side::First).move_count, 0);
    assert!(runner.game().shots(Side::First).is_unknown((0, 0)));
}

#[tokio::test]
async fn history_drops_oldest_beyond_capacity() {
    let history = RecentMatches::with_capacity(2);
    for seed in 0..3u64 {
        let mut config = fast_config();
        config.names = [format!("first-{}", seed), format!("second-{}", seed)];
        let mut runner = MatchRunner::new(ai_pair(), rngs(seed * 10), config)
            .unwrap()
            .with_recorder(Box::new(history.clone()));
        runner.run().await.unwrap();
    }
    let records = history.recent().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].stats[0].name, "first-1");
    assert_eq!(records[1].stats[0].name, "first-2");
}

#[tokio::test]
async fn events_end_with_a_single_game_over() {
    let (presenter, mut rx) = ChannelPresenter::new();
    let mut runner = MatchRunner::new(ai_pair(), rngs(11), fast_config())
        .unwrap()
        .with_presenter(Box::new(presenter));
    runner.run().await.unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    let game_overs = events
        .iter()
        .filter(|e| matches!(e, MatchEvent::GameOver(_)))
        .count();
    assert_eq!(game_overs, 1);
    assert!(matches!(events.last(), Some(MatchEvent::GameOver(_))));

    let turn = runner.game().turn();
    let shots = turn.stats(Side::First).move_count + turn.stats(Side::Second).move_count;
    assert_eq!(events.len(), shots + 1);
}

#[tokio::test]
async fn cancelled_before_start_fires_nothing() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut runner = MatchRunner::new(ai_pair(), rngs(1), fast_config())
        .unwrap()
        .with_cancel_token(cancel);

    assert_eq!(runner.run().await.unwrap(), RunOutcome::Cancelled);
    assert_eq!(runner.game().turn().stats(Side::First).move_count, 0);
}

#[tokio::test]
async fn cancel_during_thinking_delay_stops_the_match() {
    let config = MatchConfig {
        thinking_delay: Duration::from_secs(60),
        ..fast_config()
    };
    let mut runner = MatchRunner::new(ai_pair(), rngs(2), config).unwrap();
    let cancel = runner.cancel_token();

    let handle = tokio::spawn(async move {
        let outcome = runner.run().await;
        (outcome, runner.snapshot())
    });
    sleep(Duration::from_millis(20)).await;
    cancel.cancel();

    let (outcome, snapshot) = timeout(Duration::from_secs(5), handle)
        .await
        .expect("runner did not stop after cancellation")
        .unwrap();
    assert_eq!(outcome.unwrap(), RunOutcome::Cancelled);
    // the pending shot was never resolved
    let game: Match = Match::restore(&snapshot).unwrap();
    assert_eq!(game.turn().stats(Side::First).move_count, 0);
}

#[tokio::test]
async fn resumed_match_plays_to_the_end() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut first: Board = Board::new();
    let mut second: Board = Board::new();
    place_fleet(&mut rng, &mut first, &FLEET).unwrap();
    place_fleet(&mut rng, &mut second, &FLEET).unwrap();
    let mut game = Match::new(first, second, Side::First);
    for _ in 0..20 {
        let side = game.current();
        let sunk: Vec<_> = game
            .board(side.opponent())
            .ships()
            .iter()
            .filter(|s| s.is_sunk())
            .cloned()
            .collect();
        let decision = choose_target(game.shots(side), &sunk, &mut rng).unwrap();
        game.fire(side, decision.target).unwrap();
    }

    let snapshot = game.snapshot();
    let mut runner = MatchRunner::resume(&snapshot, ai_pair(), rngs(4), fast_config()).unwrap();
    let outcome = runner.run().await.unwrap();
    assert!(matches!(outcome, RunOutcome::Finished(_)));

    let moves = |g: &Match| {
        g.turn().stats(Side::First).move_count + g.turn().stats(Side::Second).move_count
    };
    assert!(moves(runner.game()) > moves(&game));
}

#[tokio::test]
async fn scheduler_skips_task_once_cancelled() {
    let cancel = CancelToken::new();
    let scheduler = TurnScheduler::new(Duration::ZERO, cancel.clone());
    assert_eq!(scheduler.after_delay(|| 7).await, Some(7));

    cancel.cancel();
    let mut ran = false;
    assert_eq!(scheduler.after_delay(|| ran = true).await, None);
    assert!(!ran);
    // cancellation is sticky and shared by clones
    assert!(scheduler.cancel_token().is_cancelled());
}
