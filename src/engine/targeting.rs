//! Hunt/Target decision core.
//!
//! Every call is a pure function of the observed [`ShotResults`] and the
//! defender's ship list (of which only sunk ships are consulted): density maps
//! and the exclusion mask are rebuilt, then
//!
//! * with unresolved hits on the board, Target mode follows them up;
//! * otherwise, or when Target mode finds nothing viable, Hunt mode picks a
//!   maximum-density cell, breaking ties uniformly at random.
//!
//! Game over is not this module's concern; callers stop asking once the
//! match has a winner.

use log::debug;
use rand::Rng;

use crate::engine::common::{Coord, EngineError};
use crate::engine::density::{compute_densities, DensityMaps};
use crate::engine::shots::ShotResults;
use crate::engine::ship::{Orientation, Ship};

/// How a Target-mode cell was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Extending a line of collinear hits along its axis.
    Line(Orientation),
    /// Probing an orthogonal neighbour of the first unresolved hit.
    Adjacent,
}

/// Which mode produced the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Hunt,
    Target(Strategy),
}

/// A targeting decision plus the density snapshot it was computed from.
#[derive(Debug, Clone, Copy)]
pub struct Decision<const N: usize> {
    pub target: Coord,
    pub mode: Mode,
    pub densities: DensityMaps<N>,
}

/// Decide where to fire next.
///
/// Returns [`EngineError::ExhaustedHuntSpace`] when no unknown, unexcluded
/// cell remains. With a live match that means the bookkeeping is broken.
pub fn choose_target<R: Rng + ?Sized, const N: usize>(
    shots: &ShotResults<N>,
    ships: &[Ship],
    rng: &mut R,
) -> Result<Decision<N>, EngineError> {
    let densities = compute_densities(shots, ships);

    if let Some((target, strategy)) = target_mode(shots, &densities, rng) {
        debug!("target mode ({:?}) -> {:?}", strategy, target);
        return Ok(Decision {
            target,
            mode: Mode::Target(strategy),
            densities,
        });
    }

    let target = hunt(shots, &densities, rng).ok_or(EngineError::ExhaustedHuntSpace)?;
    debug!("hunt mode -> {:?} (density {})", target, densities.at(target));
    Ok(Decision {
        target,
        mode: Mode::Hunt,
        densities,
    })
}

fn viable<const N: usize>(shots: &ShotResults<N>, densities: &DensityMaps<N>, cell: Coord) -> bool {
    shots.is_unknown(cell) && !densities.is_excluded(cell)
}

/// Follow up on unresolved hits. `None` when there are none or no neighbour
/// is viable; the caller then hunts.
pub fn target_mode<R: Rng + ?Sized, const N: usize>(
    shots: &ShotResults<N>,
    densities: &DensityMaps<N>,
    rng: &mut R,
) -> Option<(Coord, Strategy)> {
    let mut hits = shots.unresolved_hits();
    let first = hits.next()?;

    let mut count = 1usize;
    let (mut same_row, mut same_col) = (true, true);
    let (mut min_row, mut max_row, mut min_col, mut max_col) = (first.0, first.0, first.1, first.1);
    for (r, c) in hits {
        count += 1;
        same_row &= r == first.0;
        same_col &= c == first.1;
        min_row = min_row.min(r);
        max_row = max_row.max(r);
        min_col = min_col.min(c);
        max_col = max_col.max(c);
    }

    if count > 1 && (same_row || same_col) {
        // A single column of hits is a vertical ship.
        let (orient, low, high) = if same_col {
            let col = first.1;
            (
                Orientation::Vertical,
                min_row.checked_sub(1).map(|r| (r, col)),
                (max_row + 1, col),
            )
        } else {
            let row = first.0;
            (
                Orientation::Horizontal,
                min_col.checked_sub(1).map(|c| (row, c)),
                (row, max_col + 1),
            )
        };
        return low
            .filter(|&cell| viable(shots, densities, cell))
            .or_else(|| Some(high).filter(|&cell| viable(shots, densities, cell)))
            .map(|cell| (cell, Strategy::Line(orient)));
    }

    // One hit, or hits on no common line: commit to the first one found.
    let (row, col) = first;
    let neighbours = [
        row.checked_sub(1).map(|r| (r, col)),
        Some((row + 1, col)),
        col.checked_sub(1).map(|c| (row, c)),
        Some((row, col + 1)),
    ];
    let mut candidates = [(0usize, 0usize); 4];
    let mut n = 0;
    for cell in neighbours.into_iter().flatten() {
        if viable(shots, densities, cell) {
            candidates[n] = cell;
            n += 1;
        }
    }
    if n == 0 {
        return None;
    }
    Some((candidates[rng.random_range(0..n)], Strategy::Adjacent))
}

/// Uniform pick among the unknown, unexcluded cells of maximal aggregate
/// density. `None` when no such cell exists.
pub fn hunt<R: Rng + ?Sized, const N: usize>(
    shots: &ShotResults<N>,
    densities: &DensityMaps<N>,
    rng: &mut R,
) -> Option<Coord> {
    let mut best: Option<u32> = None;
    let mut ties = 0usize;
    for (cell, _) in shots.iter().filter(|&(cell, _)| viable(shots, densities, cell)) {
        let v = densities.at(cell);
        match best {
            Some(b) if v < b => {}
            Some(b) if v == b => ties += 1,
            _ => {
                best = Some(v);
                ties = 1;
            }
        }
    }
    let best = best?;
    let pick = rng.random_range(0..ties);
    shots
        .iter()
        .filter(|&(cell, _)| viable(shots, densities, cell) && densities.at(cell) == best)
        .nth(pick)
        .map(|(cell, _)| cell)
}
