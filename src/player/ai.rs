use log::trace;
use rand::rngs::SmallRng;

use crate::engine::{
    board::Board,
    common::{BoardError, Coord, EngineError},
    config::FLEET,
    placement,
    ship::Ship,
    shots::ShotResults,
    targeting::{self, Mode},
};

use super::Player;

/// Computer opponent driven by the hunt/target state machine.
#[derive(Default)]
pub struct AiPlayer {
    last_mode: Option<Mode>,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mode that produced the most recent target.
    pub fn last_mode(&self) -> Option<Mode> {
        self.last_mode
    }
}

impl Player for AiPlayer {
    fn place_fleet(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        placement::place_fleet(rng, board, &FLEET)
    }

    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        shots: &ShotResults,
        sunk_ships: &[Ship],
    ) -> Result<Coord, EngineError> {
        let decision = targeting::choose_target(shots, sunk_ships, rng)?;
        trace!("density maps:\n{:?}", decision.densities);
        self.last_mode = Some(decision.mode);
        Ok(decision.target)
    }
}
