//! Common types: coordinates, cell states, shot outcomes and engine errors.

use core::fmt;

use crate::engine::bitboard::BitBoardError;

/// A `(row, col)` coordinate, 0-based.
pub type Coord = (usize, usize);

/// What an observer knows about one cell of the opponent's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Never fired at.
    #[default]
    Unknown,
    /// Fired at, no ship.
    Miss,
    /// Fired at, ship segment whose ship is still afloat.
    Hit,
    /// Segment of a ship confirmed sunk.
    Sunk,
}

impl CellState {
    /// `true` once the cell has been fired at.
    pub fn is_resolved(self) -> bool {
        self != CellState::Unknown
    }
}

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// The other side.
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Index into per-side arrays.
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Result of resolving one shot against a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotOutcome {
    pub hit: bool,
    pub sunk: bool,
}

/// Errors returned by board and placement operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoardError(BitBoardError),
    /// Specified index is out of range.
    InvalidIndex,
    /// Ship would leave the board or touch another ship.
    InvalidPlacement,
    /// Shot was already fired at this position.
    AlreadyGuessed,
    /// Random placement gave up.
    UnableToPlaceShip,
    /// Occupancy says "ship" but no ship claims the cell.
    UnknownShipHit,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::InvalidIndex => write!(f, "Index is out of range"),
            BoardError::InvalidPlacement => {
                write!(f, "Ship placement is out of bounds or touches another ship")
            }
            BoardError::AlreadyGuessed => write!(f, "Shot was already fired at this position"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            BoardError::UnknownShipHit => write!(f, "Hit an occupied cell that no ship claims"),
        }
    }
}

/// Errors returned by the targeting engine and the turn controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Board(BoardError),
    /// Hunt mode found no unknown, unexcluded cell while the match is live.
    /// Bookkeeping is inconsistent; the match cannot continue.
    ExhaustedHuntSpace,
    /// The match already has a winner.
    MatchOver,
    /// The shooter does not hold the turn.
    NotYourTurn,
    /// A snapshot does not describe a valid match.
    Snapshot(&'static str),
    /// A player gave up choosing targets (e.g. its input closed).
    PlayerAborted,
}

impl From<BoardError> for EngineError {
    fn from(err: BoardError) -> Self {
        EngineError::Board(err)
    }
}

impl From<BitBoardError> for EngineError {
    fn from(err: BitBoardError) -> Self {
        EngineError::Board(err.into())
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Board(e) => write!(f, "{}", e),
            EngineError::ExhaustedHuntSpace => {
                write!(f, "No cell left to hunt while the match is still in progress")
            }
            EngineError::MatchOver => write!(f, "Match is already over"),
            EngineError::NotYourTurn => write!(f, "Not your turn"),
            EngineError::Snapshot(why) => write!(f, "Invalid snapshot: {}", why),
            EngineError::PlayerAborted => write!(f, "Player left the match"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
