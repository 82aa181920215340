//! Player trait and implementations
//!
//! - AiPlayer: density-driven hunt/target engine
//! - CliPlayer: interactive terminal player

use rand::rngs::SmallRng;

use crate::engine::{
    board::Board,
    common::{BoardError, Coord, EngineError},
    ship::Ship,
    shots::ShotResults,
    turn::TurnReport,
};

/// Interface implemented by the two participants of a match.
///
/// A Player is responsible for:
/// - Placing its fleet on the board
/// - Selecting targets to attack
/// - Reacting to shot results
pub trait Player: Send {
    /// Lay out the whole fleet on an empty board.
    fn place_fleet(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError>;

    /// Choose the next target from the shot history against the opponent.
    /// `sunk_ships` lists only the opponent ships already sunk.
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        shots: &ShotResults,
        sunk_ships: &[Ship],
    ) -> Result<Coord, EngineError>;

    /// Whether shots from this player are paced by the thinking delay.
    fn is_paced(&self) -> bool {
        true
    }

    /// Inform the player of the result of its own shot.
    fn handle_shot_result(&mut self, _report: &TurnReport) {}

    /// Inform the player of an opponent shot against its board.
    fn handle_opponent_shot(&mut self, _report: &TurnReport) {}
}

pub mod ai;
pub use ai::AiPlayer;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::CliPlayer;
