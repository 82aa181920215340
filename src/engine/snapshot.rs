//! Flat, serializable snapshots of a [`Match`] for suspend/resume.

use alloc::vec::Vec;

use crate::engine::board::Board;
use crate::engine::common::{CellState, Coord, EngineError, Side};
use crate::engine::ship::Ship;
use crate::engine::shots::ShotResults;
use crate::engine::turn::{Match, TurnState};

/// A ship as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipSnapshot {
    pub positions: Vec<Coord>,
    pub hit_count: usize,
}

/// One side's fleet and what it has learned about the opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SideSnapshot {
    pub ships: Vec<ShipSnapshot>,
    /// Row-major `N×N` cells.
    pub shots: Vec<CellState>,
}

/// Complete match state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSnapshot {
    pub board_size: usize,
    pub turn: TurnState,
    pub sides: [SideSnapshot; 2],
}

impl<const N: usize> Match<N> {
    /// Capture the full state of the match.
    pub fn snapshot(&self) -> MatchSnapshot {
        let side = |s: Side| SideSnapshot {
            ships: self.boards[s.index()]
                .ships()
                .iter()
                .map(|ship| ShipSnapshot {
                    positions: ship.positions().to_vec(),
                    hit_count: ship.hit_count(),
                })
                .collect(),
            shots: self.shots[s.index()].iter().map(|(_, state)| state).collect(),
        };
        MatchSnapshot {
            board_size: N,
            turn: self.turn,
            sides: [side(Side::First), side(Side::Second)],
        }
    }

    /// Rebuild a match from a snapshot taken on an `N×N` board.
    ///
    /// Each side's shot grid must agree with the opposing fleet: hits and
    /// sunk cells on ships, misses on water, every ship's hit count equal to
    /// its fired-at cells, and `Sunk` cells exactly on sunk ships.
    pub fn restore(snapshot: &MatchSnapshot) -> Result<Self, EngineError> {
        if snapshot.board_size != N {
            return Err(EngineError::Snapshot("board size mismatch"));
        }
        let mut boards = [Board::<N>::new(), Board::<N>::new()];
        let mut shots = [ShotResults::<N>::new(), ShotResults::<N>::new()];
        for (i, side) in snapshot.sides.iter().enumerate() {
            if side.shots.len() != N * N {
                return Err(EngineError::Snapshot("shot grid has the wrong number of cells"));
            }
            let ships = side
                .ships
                .iter()
                .map(|s| Ship::from_parts(s.positions.clone(), s.hit_count))
                .collect();
            boards[i] = Board::from_ships(ships)?;
            for (idx, &state) in side.shots.iter().enumerate() {
                shots[i].set((idx / N, idx % N), state);
            }
        }
        for side in [Side::First, Side::Second] {
            check_shots(&shots[side.index()], &boards[side.opponent().index()])?;
        }
        for side in [Side::First, Side::Second] {
            let stats = snapshot.turn.stats(side);
            let board = &boards[side.index()];
            if stats.total_ships != board.total_ships() || stats.sunk_ships != board.sunk_ships() {
                return Err(EngineError::Snapshot("ship counters disagree with the fleet"));
            }
        }
        Ok(Self {
            boards,
            shots,
            turn: snapshot.turn,
        })
    }
}

fn check_shots<const N: usize>(shots: &ShotResults<N>, defender: &Board<N>) -> Result<(), EngineError> {
    for ((r, c), state) in shots.iter() {
        let occupied = defender.is_occupied((r, c));
        match state {
            CellState::Hit | CellState::Sunk if !occupied => {
                return Err(EngineError::Snapshot("hit recorded on open water"));
            }
            CellState::Miss if occupied => {
                return Err(EngineError::Snapshot("miss recorded on a ship"));
            }
            _ => {}
        }
    }
    for ship in defender.ships() {
        if ship.size() == 0 {
            return Err(EngineError::Snapshot("ship has no cells"));
        }
        let (mut fired, mut marked_sunk) = (0, 0);
        for &cell in ship.positions() {
            match shots.get(cell) {
                Some(CellState::Hit) => fired += 1,
                Some(CellState::Sunk) => {
                    fired += 1;
                    marked_sunk += 1;
                }
                _ => {}
            }
        }
        if fired != ship.hit_count() {
            return Err(EngineError::Snapshot("ship hit count disagrees with the shot grid"));
        }
        let expected = if ship.is_sunk() { ship.size() } else { 0 };
        if marked_sunk != expected {
            return Err(EngineError::Snapshot("sunk cells disagree with the fleet"));
        }
    }
    Ok(())
}
