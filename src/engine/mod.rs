//! Targeting engine core (no_std + alloc compatible).
//!
//! Board model, placement validation, density estimation, the hunt/target
//! state machine and the turn controller. Nothing in here sleeps, spawns or
//! performs I/O; the std layer drives it.

pub mod bitboard;
pub mod board;
pub mod common;
pub mod config;
pub mod density;
pub mod placement;
pub mod ship;
pub mod shots;
pub mod snapshot;
pub mod targeting;
pub mod turn;

// Re-export commonly used types
pub use bitboard::{BitBoard, BitBoardError};
pub use board::{Board, Occupancy};
pub use common::{BoardError, CellState, Coord, EngineError, ShotOutcome, Side};
pub use config::*;
pub use density::{compute_densities, exclusion_mask, DensityMaps, ExclusionMask, Heat};
pub use placement::{is_valid, place_fleet, random_placement};
pub use ship::{Orientation, Ship, ShipClass};
pub use shots::ShotResults;
pub use snapshot::{MatchSnapshot, ShipSnapshot, SideSnapshot};
pub use targeting::{choose_target, hunt, target_mode, Decision, Mode, Strategy};
pub use turn::{resolve_shot, GameOver, GameOverReason, Match, SideStats, TurnReport, TurnState};
