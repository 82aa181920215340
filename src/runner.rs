#![cfg(feature = "std")]

//! Drives a match: asks the side holding the turn for a target, paces and
//! resolves the shot, reports it, and repeats until game over or
//! cancellation.

use log::{error, info};
use rand::rngs::SmallRng;
use tokio::time::Duration;

use crate::engine::{
    board::Board,
    common::Side,
    config::THINKING_DELAY_MS,
    ship::Ship,
    snapshot::MatchSnapshot,
    turn::{GameOver, Match},
};
use crate::events::{GameOverEvent, LogPresenter, Presenter, ShotEvent};
use crate::history::{MatchRecord, MatchRecorder, RecentMatches};
use crate::player::Player;
use crate::scheduler::{CancelToken, TurnScheduler};

/// Runtime settings of one match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Pause before each paced shot.
    pub thinking_delay: Duration,
    /// Display names of the first and second side.
    pub names: [String; 2],
    /// Side that fires first.
    pub starting: Side,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            thinking_delay: Duration::from_millis(THINKING_DELAY_MS),
            names: ["Player".to_string(), "Computer".to_string()],
            starting: Side::First,
        }
    }
}

/// How [`MatchRunner::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Finished(GameOver),
    Cancelled,
}

pub struct MatchRunner {
    game: Match,
    players: [Box<dyn Player>; 2],
    rngs: [SmallRng; 2],
    names: [String; 2],
    scheduler: TurnScheduler,
    presenter: Box<dyn Presenter>,
    recorder: Box<dyn MatchRecorder>,
}

impl MatchRunner {
    /// Let both players lay out their fleets and set up a fresh match.
    pub fn new(
        mut players: [Box<dyn Player>; 2],
        mut rngs: [SmallRng; 2],
        config: MatchConfig,
    ) -> anyhow::Result<Self> {
        let mut boards = [Board::new(), Board::new()];
        for i in 0..2 {
            players[i]
                .place_fleet(&mut rngs[i], &mut boards[i])
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        let [first, second] = boards;
        let game = Match::new(first, second, config.starting);
        Ok(Self::with_match(game, players, rngs, config))
    }

    /// Resume a match from a snapshot.
    pub fn resume(
        snapshot: &MatchSnapshot,
        players: [Box<dyn Player>; 2],
        rngs: [SmallRng; 2],
        config: MatchConfig,
    ) -> anyhow::Result<Self> {
        let game = Match::restore(snapshot)?;
        Ok(Self::with_match(game, players, rngs, config))
    }

    fn with_match(
        game: Match,
        players: [Box<dyn Player>; 2],
        rngs: [SmallRng; 2],
        config: MatchConfig,
    ) -> Self {
        Self {
            game,
            players,
            rngs,
            names: config.names,
            scheduler: TurnScheduler::new(config.thinking_delay, CancelToken::new()),
            presenter: Box::new(LogPresenter),
            recorder: Box::new(RecentMatches::new()),
        }
    }

    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn with_recorder(mut self, recorder: Box<dyn MatchRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.scheduler = TurnScheduler::new(self.scheduler.delay(), cancel);
        self
    }

    /// Token that tears this match down.
    pub fn cancel_token(&self) -> CancelToken {
        self.scheduler.cancel_token().clone()
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.game.snapshot()
    }

    /// Play until one fleet is sunk or the token is cancelled.
    ///
    /// A hit keeps the same side firing after another delay; a miss hands the
    /// turn over. One decision is in flight at a time.
    pub async fn run(&mut self) -> anyhow::Result<RunOutcome> {
        loop {
            if let Some(verdict) = self.game.turn().game_over {
                return Ok(RunOutcome::Finished(verdict));
            }
            if self.scheduler.cancel_token().is_cancelled() {
                info!("match cancelled");
                return Ok(RunOutcome::Cancelled);
            }

            let side = self.game.current();
            let idx = side.index();
            // Only sunk ships are public knowledge.
            let sunk: Vec<Ship> = self
                .game
                .board(side.opponent())
                .ships()
                .iter()
                .filter(|s| s.is_sunk())
                .cloned()
                .collect();
            let shots = *self.game.shots(side);
            let target = self.players[idx].select_target(&mut self.rngs[idx], &shots, &sunk)?;

            let report = if self.players[idx].is_paced() {
                let game = &mut self.game;
                match self.scheduler.after_delay(|| game.fire(side, target)).await {
                    Some(report) => report?,
                    None => {
                        info!("match cancelled");
                        return Ok(RunOutcome::Cancelled);
                    }
                }
            } else {
                // a prompt can outlive a Ctrl-C
                if self.scheduler.cancel_token().is_cancelled() {
                    info!("match cancelled");
                    return Ok(RunOutcome::Cancelled);
                }
                self.game.fire(side, target)?
            };

            self.players[idx].handle_shot_result(&report);
            self.players[side.opponent().index()].handle_opponent_shot(&report);
            let event = ShotEvent::from_report(&report, &self.names);

            if let Some(verdict) = report.game_over {
                self.finish(&verdict, &event).await?;
                return Ok(RunOutcome::Finished(verdict));
            }
            self.presenter.shot(&event).await?;
        }
    }

    /// Record the result, then report the final shot and the verdict.
    ///
    /// The recorder always runs first; presenter errors never skip it.
    async fn finish(&mut self, verdict: &GameOver, last_shot: &ShotEvent) -> anyhow::Result<()> {
        let record = MatchRecord::new(verdict, self.game.turn(), &self.names);
        if let Err(e) = self.recorder.record(record).await {
            error!("failed to save match result: {:#}", e);
        }
        self.presenter.shot(last_shot).await?;
        self.presenter
            .game_over(&GameOverEvent::from_verdict(verdict, &self.names))
            .await
    }
}
