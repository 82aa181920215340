//! Placement-count density maps over the opponent's board.
//!
//! For each ship length 1..=4, every cell counts the hypothetical placements
//! of that length that could still cover it given what has been observed.
//! The aggregate is the element-wise sum of the four maps. It is a coarse
//! proxy for "how many ways could some ship be here" and ties are common.
//! Everything is rebuilt from the current [`ShotResults`] on every call, so
//! no state carries over between decisions.

use core::fmt;

use crate::engine::bitboard::BitBoard;
use crate::engine::common::{CellState, Coord};
use crate::engine::config::{BOARD_SIZE, SHIP_LENGTHS};
use crate::engine::shots::ShotResults;
use crate::engine::ship::{Orientation, Ship};

/// Cells that must not be fired at nor used by hypothetical placements.
pub type ExclusionMask<const N: usize> = BitBoard<u128, N>;

/// A per-cell count grid.
pub type Heat<const N: usize> = [[u32; N]; N];

/// Per-length maps, their sum and the exclusion mask they were built with.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DensityMaps<const N: usize = BOARD_SIZE> {
    pub per_length: [Heat<N>; SHIP_LENGTHS.len()],
    pub aggregate: Heat<N>,
    pub exclusion: ExclusionMask<N>,
}

impl<const N: usize> DensityMaps<N> {
    /// Aggregate value at `(row, col)`.
    pub fn at(&self, (row, col): Coord) -> u32 {
        self.aggregate[row][col]
    }

    pub fn is_excluded(&self, (row, col): Coord) -> bool {
        self.exclusion.contains(row, col)
    }
}

/// Mark the 8-neighbourhood of every sunk ship, plus every miss and sunk cell.
pub fn exclusion_mask<const N: usize>(shots: &ShotResults<N>, ships: &[Ship]) -> ExclusionMask<N> {
    let mut mask = ExclusionMask::<N>::new();
    for ship in ships.iter().filter(|s| s.is_sunk()) {
        for &(r, c) in ship.positions() {
            let _ = mask.set_with_halo(r, c);
        }
    }
    for ((r, c), state) in shots.iter() {
        if matches!(state, CellState::Miss | CellState::Sunk) {
            let _ = mask.set(r, c);
        }
    }
    mask
}

/// Build the four per-length maps and their aggregate from `shots`.
///
/// A run may pass over `Hit` cells (they are still ship cells), but only
/// `Unknown` cells are ever scored.
pub fn compute_densities<const N: usize>(shots: &ShotResults<N>, ships: &[Ship]) -> DensityMaps<N> {
    let exclusion = exclusion_mask(shots, ships);
    let mut per_length = [[[0u32; N]; N]; SHIP_LENGTHS.len()];

    for (map, &len) in per_length.iter_mut().zip(SHIP_LENGTHS.iter()) {
        for r in 0..N {
            for c in 0..N {
                if !shots.is_unknown((r, c)) || exclusion.contains(r, c) {
                    continue;
                }
                if len == 1 {
                    map[r][c] += 1;
                    continue;
                }
                for orient in [Orientation::Horizontal, Orientation::Vertical] {
                    if run_fits(shots, &exclusion, (r, c), len, orient) {
                        for k in 0..len {
                            let (rr, cc) = orient.step((r, c), k);
                            if shots.is_unknown((rr, cc)) {
                                map[rr][cc] += 1;
                            }
                        }
                    }
                }
            }
        }
    }

    let mut aggregate = [[0u32; N]; N];
    for map in per_length.iter() {
        for r in 0..N {
            for c in 0..N {
                aggregate[r][c] += map[r][c];
            }
        }
    }

    DensityMaps {
        per_length,
        aggregate,
        exclusion,
    }
}

fn run_fits<const N: usize>(
    shots: &ShotResults<N>,
    exclusion: &ExclusionMask<N>,
    start: Coord,
    len: usize,
    orient: Orientation,
) -> bool {
    (0..len).all(|k| {
        let (r, c) = orient.step(start, k);
        r < N && c < N && !exclusion.contains(r, c) && shots.get((r, c)) != Some(CellState::Miss)
    })
}

impl<const N: usize> fmt::Debug for DensityMaps<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (len, map) in SHIP_LENGTHS.iter().zip(self.per_length.iter()) {
            writeln!(f, "Size {}:", len)?;
            write_heat(f, map)?;
        }
        writeln!(f, "Sum:")?;
        write_heat(f, &self.aggregate)
    }
}

fn write_heat<const N: usize>(f: &mut fmt::Formatter<'_>, heat: &Heat<N>) -> fmt::Result {
    for row in heat.iter() {
        for v in row.iter() {
            write!(f, "{:3}", v)?;
        }
        writeln!(f)?;
    }
    Ok(())
}
