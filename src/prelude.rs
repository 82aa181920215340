//! Commonly used types and utilities for ease of import.

pub use crate::{
    choose_target, AiPlayer, Board, CellState, Coord, EngineError, Match, Player, ShotResults,
    Side, FLEET,
};

#[cfg(feature = "std")]
pub use crate::{
    init_logging, CancelToken, CliPlayer, MatchConfig, MatchRunner, RecentMatches, RunOutcome,
};
