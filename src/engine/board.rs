//! A side's own board: ship occupancy plus the ships themselves.

use alloc::vec::Vec;
use core::fmt;

use crate::engine::bitboard::BitBoard;
use crate::engine::common::{BoardError, Coord};
use crate::engine::config::BOARD_SIZE;
use crate::engine::placement;
use crate::engine::ship::{Orientation, Ship};

/// Occupancy mask for an `N×N` board.
pub type Occupancy<const N: usize> = BitBoard<u128, N>;

/// Ship occupancy and ground-truth ship list of one side.
///
/// Only fleet placement mutates the layout; shots mutate ship hit counts
/// through [`ships_mut`](Board::ships_mut).
#[derive(Clone, PartialEq, Eq)]
pub struct Board<const N: usize = BOARD_SIZE> {
    occupancy: Occupancy<N>,
    ships: Vec<Ship>,
}

impl<const N: usize> Board<N> {
    /// Empty board, or `SizeTooLarge` when `N×N` does not fit the mask.
    pub fn try_new() -> Result<Self, BoardError> {
        Ok(Board {
            occupancy: Occupancy::<N>::try_new()?,
            ships: Vec::new(),
        })
    }

    /// Empty board. `N` must satisfy `N*N <= 128`.
    pub fn new() -> Self {
        Board {
            occupancy: Occupancy::<N>::new(),
            ships: Vec::new(),
        }
    }

    pub fn occupancy(&self) -> Occupancy<N> {
        self.occupancy
    }

    pub fn is_occupied(&self, (row, col): Coord) -> bool {
        self.occupancy.contains(row, col)
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ships_mut(&mut self) -> &mut [Ship] {
        &mut self.ships
    }

    /// Number of ships placed.
    pub fn total_ships(&self) -> usize {
        self.ships.len()
    }

    /// Number of ships whose every cell has been hit.
    pub fn sunk_ships(&self) -> usize {
        self.ships.iter().filter(|s| s.is_sunk()).count()
    }

    /// Index of the ship covering `coord`, if any.
    pub fn ship_at(&self, coord: Coord) -> Option<usize> {
        self.ships.iter().position(|s| s.occupies(coord))
    }

    /// Place a ship of `size` at (row, col), rejecting placements that leave
    /// the board or touch another ship.
    pub fn place(
        &mut self,
        row: usize,
        col: usize,
        size: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if !placement::is_valid(row, col, size, orientation, self) {
            return Err(BoardError::InvalidPlacement);
        }
        let ship = Ship::new((row, col), size, orientation);
        for &(r, c) in ship.positions() {
            self.occupancy.set(r, c)?;
        }
        self.ships.push(ship);
        Ok(())
    }

    /// Rebuild a board from a ship list, e.g. when restoring a snapshot.
    /// Cells off the board or claimed twice are rejected.
    pub fn from_ships(ships: Vec<Ship>) -> Result<Self, BoardError> {
        let mut occupancy = Occupancy::<N>::try_new()?;
        for ship in &ships {
            for &(r, c) in ship.positions() {
                if occupancy.get(r, c)? {
                    return Err(BoardError::InvalidPlacement);
                }
                occupancy.set(r, c)?;
            }
        }
        Ok(Board { occupancy, ships })
    }

    /// Remove every ship.
    pub fn clear(&mut self) {
        self.occupancy = Occupancy::<N>::new();
        self.ships.clear();
    }
}

impl<const N: usize> Default for Board<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for Board<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  occupancy: {:?},\n  ships: {:?}\n}}",
            self.occupancy, self.ships
        )
    }
}
