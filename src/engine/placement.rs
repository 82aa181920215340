//! Placement validation and the constrained-random fleet placer.

use log::debug;
use rand::Rng;

use crate::engine::board::Board;
use crate::engine::common::{BoardError, Coord};
use crate::engine::config::{MAX_FLEET_RESTARTS, MAX_PLACEMENT_ATTEMPTS};
use crate::engine::ship::{Orientation, ShipClass};

/// Whether a ship of `size` anchored at (row, col) fits on `board`.
///
/// Fails if the ship leaves `0..N` along its axis, or if any cell it would
/// occupy, or any 8-neighbour of such a cell, is already occupied.
pub fn is_valid<const N: usize>(
    row: usize,
    col: usize,
    size: usize,
    orientation: Orientation,
    board: &Board<N>,
) -> bool {
    if size == 0 || row >= N || col >= N {
        return false;
    }
    let (end_row, end_col) = orientation.step((row, col), size - 1);
    if end_row >= N || end_col >= N {
        return false;
    }
    let occupancy = board.occupancy();
    (0..size).all(|i| {
        let (r, c) = orientation.step((row, col), i);
        !occupancy.touches(r, c)
    })
}

/// Sample anchors until a ship of `size` fits on `board`.
///
/// Rejections are expected and simply resampled; only after
/// `MAX_PLACEMENT_ATTEMPTS` misses does this give up.
pub fn random_placement<R: Rng + ?Sized, const N: usize>(
    rng: &mut R,
    board: &Board<N>,
    size: usize,
) -> Result<(Coord, Orientation), BoardError> {
    if size == 0 || size > N {
        return Err(BoardError::UnableToPlaceShip);
    }
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let orientation = if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_r, max_c) = match orientation {
            Orientation::Horizontal => (N - 1, N - size),
            Orientation::Vertical => (N - size, N - 1),
        };
        let r = rng.random_range(0..=max_r);
        let c = rng.random_range(0..=max_c);
        if is_valid(r, c, size, orientation, board) {
            return Ok(((r, c), orientation));
        }
    }
    Err(BoardError::UnableToPlaceShip)
}

/// Lay out a whole fleet at random, largest ships first.
///
/// A dead end clears the board and starts over.
pub fn place_fleet<R: Rng + ?Sized, const N: usize>(
    rng: &mut R,
    board: &mut Board<N>,
    fleet: &[ShipClass],
) -> Result<(), BoardError> {
    let mut sizes: alloc::vec::Vec<usize> = fleet
        .iter()
        .flat_map(|class| core::iter::repeat(class.length()).take(class.count()))
        .collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));

    'restart: for attempt in 0..MAX_FLEET_RESTARTS {
        board.clear();
        for &size in &sizes {
            match random_placement(rng, board, size) {
                Ok(((r, c), orientation)) => board.place(r, c, size, orientation)?,
                Err(BoardError::UnableToPlaceShip) => {
                    debug!("fleet placement dead end on attempt {}, restarting", attempt + 1);
                    continue 'restart;
                }
                Err(e) => return Err(e),
            }
        }
        return Ok(());
    }
    board.clear();
    Err(BoardError::UnableToPlaceShip)
}
