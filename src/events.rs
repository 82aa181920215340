#![cfg(feature = "std")]

use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::engine::turn::{GameOver, GameOverReason, TurnReport};

/// One resolved shot, as delivered to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotEvent {
    pub shooter: String,
    pub row: usize,
    pub col: usize,
    pub hit: bool,
    pub sunk: bool,
}

impl ShotEvent {
    pub fn from_report(report: &TurnReport, names: &[String; 2]) -> Self {
        Self {
            shooter: names[report.shooter.index()].clone(),
            row: report.target.0,
            col: report.target.1,
            hit: report.outcome.hit,
            sunk: report.outcome.sunk,
        }
    }
}

/// End of match, as delivered to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverEvent {
    pub winner_id: String,
    pub loser_id: String,
    pub reason: GameOverReason,
}

impl GameOverEvent {
    pub fn from_verdict(verdict: &GameOver, names: &[String; 2]) -> Self {
        Self {
            winner_id: names[verdict.winner.index()].clone(),
            loser_id: names[verdict.loser.index()].clone(),
            reason: verdict.reason,
        }
    }
}

/// Either kind of event, for channel-based delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    ShotResult(ShotEvent),
    GameOver(GameOverEvent),
}

/// Delivers engine output to players, locally or over a network. It has no
/// say in how targets are chosen.
#[async_trait::async_trait]
pub trait Presenter: Send {
    async fn shot(&mut self, event: &ShotEvent) -> anyhow::Result<()>;
    async fn game_over(&mut self, event: &GameOverEvent) -> anyhow::Result<()>;
}

/// Writes events to the log.
pub struct LogPresenter;

#[async_trait::async_trait]
impl Presenter for LogPresenter {
    async fn shot(&mut self, event: &ShotEvent) -> anyhow::Result<()> {
        let verdict = match (event.hit, event.sunk) {
            (true, true) => "hit and sunk",
            (true, false) => "hit",
            _ => "miss",
        };
        info!(
            "{} fires at ({}, {}) - {}",
            event.shooter, event.row, event.col, verdict
        );
        Ok(())
    }

    async fn game_over(&mut self, event: &GameOverEvent) -> anyhow::Result<()> {
        info!(
            "{} wins against {} ({:?})",
            event.winner_id, event.loser_id, event.reason
        );
        Ok(())
    }
}

/// Forwards events into an unbounded channel.
pub struct ChannelPresenter {
    tx: mpsc::UnboundedSender<MatchEvent>,
}

impl ChannelPresenter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait::async_trait]
impl Presenter for ChannelPresenter {
    async fn shot(&mut self, event: &ShotEvent) -> anyhow::Result<()> {
        self.tx
            .send(MatchEvent::ShotResult(event.clone()))
            .map_err(|_| anyhow::anyhow!("Event channel closed"))
    }

    async fn game_over(&mut self, event: &GameOverEvent) -> anyhow::Result<()> {
        self.tx
            .send(MatchEvent::GameOver(event.clone()))
            .map_err(|_| anyhow::anyhow!("Event channel closed"))
    }
}
