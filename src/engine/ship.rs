//! Ship classes and placed ships.

use alloc::vec::Vec;

use crate::engine::common::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `offset` steps along this orientation from `(row, col)`.
    #[inline]
    pub fn step(self, (row, col): Coord, offset: usize) -> Coord {
        match self {
            Orientation::Horizontal => (row, col + offset),
            Orientation::Vertical => (row + offset, col),
        }
    }
}

/// A class of ship in the fleet: name, length and how many of them there are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
    count: usize,
}

impl ShipClass {
    pub const fn new(name: &'static str, length: usize, count: usize) -> Self {
        Self {
            name,
            length,
            count,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// A ship placed on the board.
///
/// `hit_count` never exceeds `size`; once it reaches it the ship is sunk and
/// further hits are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    size: usize,
    positions: Vec<Coord>,
    hit_count: usize,
}

impl Ship {
    /// Lay out a ship of `size` cells from `origin` along `orientation`.
    /// Bounds are the caller's concern.
    pub fn new(origin: Coord, size: usize, orientation: Orientation) -> Self {
        let positions = (0..size).map(|i| orientation.step(origin, i)).collect();
        Self {
            size,
            positions,
            hit_count: 0,
        }
    }

    /// Rebuild a ship from raw parts, clamping `hit_count` to `size`.
    pub fn from_parts(positions: Vec<Coord>, hit_count: usize) -> Self {
        let size = positions.len();
        Self {
            size,
            positions,
            hit_count: hit_count.min(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Occupied cells, in placement order.
    pub fn positions(&self) -> &[Coord] {
        &self.positions
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn is_sunk(&self) -> bool {
        self.hit_count == self.size
    }

    pub fn occupies(&self, coord: Coord) -> bool {
        self.positions.contains(&coord)
    }

    /// Credit one hit. Returns `true` only on the hit that sinks the ship.
    pub fn register_hit(&mut self) -> bool {
        if self.is_sunk() {
            return false;
        }
        self.hit_count += 1;
        self.is_sunk()
    }
}
