//! Shot resolution, turn continuation and game-over detection.

use log::info;

use crate::engine::board::Board;
use crate::engine::common::{BoardError, Coord, EngineError, ShotOutcome, Side};
use crate::engine::config::{class_for_length, BOARD_SIZE};
use crate::engine::shots::ShotResults;

/// Resolve a shot at `target` against `defender`, recording it in `shots`.
///
/// On the hit that completes a ship, every cell of that ship becomes `Sunk`
/// and the outcome reports `sunk`. A ship that is already sunk is never
/// reprocessed. Firing at a resolved cell is rejected without side effects.
pub fn resolve_shot<const N: usize>(
    target: Coord,
    defender: &mut Board<N>,
    shots: &mut ShotResults<N>,
) -> Result<ShotOutcome, BoardError> {
    let hit = defender.is_occupied(target);
    let ship_idx = if hit {
        Some(defender.ship_at(target).ok_or(BoardError::UnknownShipHit)?)
    } else {
        None
    };
    shots.mark_shot(target, hit)?;

    let Some(idx) = ship_idx else {
        return Ok(ShotOutcome { hit: false, sunk: false });
    };
    let ship = &mut defender.ships_mut()[idx];
    let sunk = ship.register_hit();
    if sunk {
        shots.mark_sunk(ship.positions());
        let name = class_for_length(ship.size()).map_or("Ship", |class| class.name());
        info!("{} of size {} down", name, ship.size());
    }
    Ok(ShotOutcome { hit: true, sunk })
}

/// Running counters for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SideStats {
    /// Shots this side has fired.
    pub move_count: usize,
    /// Ships of this side that have been sunk.
    pub sunk_ships: usize,
    /// Ships this side started with.
    pub total_ships: usize,
}

/// Why a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum GameOverReason {
    ShipsSunk,
}

/// Final verdict of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOver {
    pub winner: Side,
    pub loser: Side,
    pub reason: GameOverReason,
}

/// Whose turn it is, per-side counters and the verdict once there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub current: Side,
    pub stats: [SideStats; 2],
    pub game_over: Option<GameOver>,
}

impl TurnState {
    pub fn stats(&self, side: Side) -> &SideStats {
        &self.stats[side.index()]
    }

    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
    }
}

/// Everything a presentation layer needs to know about one resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub shooter: Side,
    pub target: Coord,
    pub outcome: ShotOutcome,
    /// Side holding the turn after this shot.
    pub next: Side,
    /// Set on the one shot that ends the match.
    pub game_over: Option<GameOver>,
}

/// Both sides' boards and shot knowledge, plus the turn state.
///
/// `shots[side]` is what `side` has learned about its opponent's board.
#[derive(Debug, Clone)]
pub struct Match<const N: usize = BOARD_SIZE> {
    pub(crate) boards: [Board<N>; 2],
    pub(crate) shots: [ShotResults<N>; 2],
    pub(crate) turn: TurnState,
}

impl<const N: usize> Match<N> {
    /// Start a match between two placed fleets; `starting` fires first.
    pub fn new(first: Board<N>, second: Board<N>, starting: Side) -> Self {
        let stats = [
            SideStats {
                total_ships: first.total_ships(),
                ..SideStats::default()
            },
            SideStats {
                total_ships: second.total_ships(),
                ..SideStats::default()
            },
        ];
        Self {
            boards: [first, second],
            shots: [ShotResults::new(), ShotResults::new()],
            turn: TurnState {
                current: starting,
                stats,
                game_over: None,
            },
        }
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn current(&self) -> Side {
        self.turn.current
    }

    pub fn is_over(&self) -> bool {
        self.turn.is_over()
    }

    pub fn board(&self, side: Side) -> &Board<N> {
        &self.boards[side.index()]
    }

    /// What `observer` knows about its opponent's board.
    pub fn shots(&self, observer: Side) -> &ShotResults<N> {
        &self.shots[observer.index()]
    }

    /// `shooter` fires at `target` on its opponent's board.
    ///
    /// A hit keeps the turn, a miss passes it. Game over is checked after
    /// every shot and is decided exactly once.
    pub fn fire(&mut self, shooter: Side, target: Coord) -> Result<TurnReport, EngineError> {
        if self.turn.is_over() {
            return Err(EngineError::MatchOver);
        }
        if shooter != self.turn.current {
            return Err(EngineError::NotYourTurn);
        }
        let defender = shooter.opponent();
        let outcome = resolve_shot(
            target,
            &mut self.boards[defender.index()],
            &mut self.shots[shooter.index()],
        )?;

        self.turn.stats[shooter.index()].move_count += 1;
        if outcome.sunk {
            self.turn.stats[defender.index()].sunk_ships += 1;
        }
        if !outcome.hit {
            self.turn.current = defender;
        }

        let game_over = self.check_game_over();
        Ok(TurnReport {
            shooter,
            target,
            outcome,
            next: self.turn.current,
            game_over,
        })
    }

    fn check_game_over(&mut self) -> Option<GameOver> {
        if self.turn.game_over.is_some() {
            return None;
        }
        let loser = [Side::First, Side::Second].into_iter().find(|&side| {
            let stats = self.turn.stats(side);
            stats.sunk_ships == stats.total_ships
        })?;
        let verdict = GameOver {
            winner: loser.opponent(),
            loser,
            reason: GameOverReason::ShipsSunk,
        };
        info!("game over: {:?} sank every ship of {:?}", verdict.winner, loser);
        self.turn.game_over = Some(verdict);
        Some(verdict)
    }
}
