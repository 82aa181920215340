#![cfg(feature = "std")]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::engine::common::Side;
use crate::engine::config::HISTORY_CAPACITY;
use crate::engine::turn::{GameOver, SideStats, TurnState};

/// Counters of one named participant in a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub move_count: usize,
    pub sunk_ships: usize,
    pub total_ships: usize,
}

impl PlayerStats {
    fn new(name: &str, stats: &SideStats) -> Self {
        Self {
            name: name.to_string(),
            move_count: stats.move_count,
            sunk_ships: stats.sunk_ships,
            total_ships: stats.total_ships,
        }
    }
}

/// A finished match, handed to the persistence collaborator once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub winner: String,
    pub loser: String,
    /// Indexed by side: first, then second.
    pub stats: [PlayerStats; 2],
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

impl MatchRecord {
    pub fn new(verdict: &GameOver, turn: &TurnState, names: &[String; 2]) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default();
        Self {
            winner: names[verdict.winner.index()].clone(),
            loser: names[verdict.loser.index()].clone(),
            stats: [Side::First, Side::Second]
                .map(|side| PlayerStats::new(&names[side.index()], turn.stats(side))),
            timestamp_ms,
        }
    }
}

/// Receives finished-match records. Called at most once per match and never
/// retried; a failure does not reopen the match.
#[async_trait::async_trait]
pub trait MatchRecorder: Send + Sync {
    async fn record(&self, record: MatchRecord) -> anyhow::Result<()>;
}

/// In-memory history of the most recent matches, oldest dropped first.
#[derive(Clone)]
pub struct RecentMatches {
    capacity: usize,
    games: Arc<Mutex<VecDeque<MatchRecord>>>,
}

impl RecentMatches {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            games: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
        }
    }

    /// Stored records, oldest first.
    pub fn recent(&self) -> anyhow::Result<Vec<MatchRecord>> {
        let games = self
            .games
            .lock()
            .map_err(|_| anyhow::anyhow!("Match history lock poisoned"))?;
        Ok(games.iter().cloned().collect())
    }
}

impl Default for RecentMatches {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MatchRecorder for RecentMatches {
    async fn record(&self, record: MatchRecord) -> anyhow::Result<()> {
        let mut games = self
            .games
            .lock()
            .map_err(|_| anyhow::anyhow!("Match history lock poisoned"))?;
        if self.capacity == 0 {
            return Ok(());
        }
        while games.len() >= self.capacity {
            games.pop_front();
        }
        games.push_back(record);
        Ok(())
    }
}
