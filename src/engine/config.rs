use super::ship::ShipClass;

pub const BOARD_SIZE: usize = 10;

/// Ship lengths the density estimator reasons about.
pub const SHIP_LENGTHS: [usize; 4] = [1, 2, 3, 4];

pub const NUM_CLASSES: usize = 4;
pub const FLEET: [ShipClass; NUM_CLASSES] = [
    ShipClass::new("Battleship", 4, 1),
    ShipClass::new("Cruiser", 3, 2),
    ShipClass::new("Destroyer", 2, 3),
    ShipClass::new("Submarine", 1, 4),
];

/// Number of ships in the standard fleet.
pub const TOTAL_SHIPS: usize = 1 + 2 + 3 + 4;

/// Pause before each computer shot, in milliseconds.
pub const THINKING_DELAY_MS: u64 = 1000;

/// How many finished matches the in-memory history keeps.
pub const HISTORY_CAPACITY: usize = 10;

/// Random anchors tried for one ship before the fleet is re-laid.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;
/// Full fleet re-lays before placement gives up.
pub const MAX_FLEET_RESTARTS: usize = 16;

/// Look up the fleet class of a ship by its length.
pub fn class_for_length(length: usize) -> Option<ShipClass> {
    FLEET.iter().copied().find(|class| class.length() == length)
}
