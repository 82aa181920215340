//! What one observer has learned about the opponent's board.

use core::fmt;

use crate::engine::common::{BoardError, CellState, Coord};
use crate::engine::config::BOARD_SIZE;

/// `N×N` grid of [`CellState`], one per observer.
///
/// A cell only moves `Unknown -> Miss | Hit`, and `Hit -> Sunk` in bulk when
/// its ship goes down.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ShotResults<const N: usize = BOARD_SIZE> {
    cells: [[CellState; N]; N],
}

impl<const N: usize> ShotResults<N> {
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Unknown; N]; N],
        }
    }

    /// State at `coord`; out-of-range cells read as `None`.
    pub fn get(&self, (row, col): Coord) -> Option<CellState> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// `true` if `coord` is on the board and has never been fired at.
    pub fn is_unknown(&self, coord: Coord) -> bool {
        self.get(coord) == Some(CellState::Unknown)
    }

    /// Record the outcome of a shot at a previously unknown cell.
    pub fn mark_shot(&mut self, (row, col): Coord, hit: bool) -> Result<(), BoardError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(BoardError::InvalidIndex)?;
        if cell.is_resolved() {
            return Err(BoardError::AlreadyGuessed);
        }
        *cell = if hit { CellState::Hit } else { CellState::Miss };
        Ok(())
    }

    /// Promote the given hit cells to `Sunk`.
    pub fn mark_sunk(&mut self, positions: &[Coord]) {
        for &(row, col) in positions {
            if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = CellState::Sunk;
            }
        }
    }

    /// Overwrite a cell; used when restoring snapshots.
    pub(crate) fn set(&mut self, (row, col): Coord, state: CellState) {
        self.cells[row][col] = state;
    }

    /// Cells with state `Hit` in row-major order.
    pub fn unresolved_hits(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter().filter(|&(_, s)| s == CellState::Hit).map(|(c, _)| c)
    }

    /// All cells with their state, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &s)| ((r, c), s)))
    }
}

impl<const N: usize> Default for ShotResults<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for ShotResults<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ShotResults<{}>:", N)?;
        for row in self.cells.iter() {
            for cell in row.iter() {
                let ch = match cell {
                    CellState::Unknown => '.',
                    CellState::Miss => 'o',
                    CellState::Hit => 'X',
                    CellState::Sunk => '#',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
