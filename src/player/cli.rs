#![cfg(feature = "std")]

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;

use crate::engine::{
    board::Board,
    common::{BoardError, CellState, Coord, EngineError},
    config::{BOARD_SIZE, FLEET},
    placement,
    ship::Ship,
    shots::ShotResults,
    targeting,
    turn::TurnReport,
};

use super::Player;

/// Human player typing coordinates such as `B7` on the terminal.
pub struct CliPlayer {
    hints: bool,
    own_board: Board,
    incoming: ShotResults,
}

impl CliPlayer {
    /// `hints` shows the engine's suggestion at every prompt.
    pub fn new(hints: bool) -> Self {
        Self {
            hints,
            own_board: Board::new(),
            incoming: ShotResults::new(),
        }
    }
}

/// Format a coordinate the way players type it, e.g. `(6, 1)` -> `B7`.
pub fn coord_to_string((r, c): Coord) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse `B7`-style input into a `(row, col)` coordinate.
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    let last_col = (b'A' + BOARD_SIZE as u8 - 1) as char;
    if !col_ch.is_ascii_uppercase() {
        return Err(format!("Invalid column '{}' - must be a letter A-{}", col_ch, last_col));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-{}", col_ch, last_col));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, BOARD_SIZE))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, BOARD_SIZE));
    }
    Ok((row - 1, col))
}

fn header(out: &mut String) {
    out.push_str("    ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
}

fn cell_char(state: CellState) -> char {
    match state {
        CellState::Unknown => '.',
        CellState::Miss => 'o',
        CellState::Hit => 'X',
        CellState::Sunk => '#',
    }
}

/// Render what is known about the opponent's board.
pub fn render_shots(shots: &ShotResults) -> String {
    let mut out = String::new();
    header(&mut out);
    for r in 0..BOARD_SIZE {
        let _ = write!(out, " {:2} ", r + 1);
        for c in 0..BOARD_SIZE {
            let state = shots.get((r, c)).unwrap_or_default();
            let _ = write!(out, " {}", cell_char(state));
        }
        out.push('\n');
    }
    out.push_str("    Legend: X=Hit  #=Sunk  o=Miss  .=Unknown\n");
    out
}

/// Render our own board with the opponent's shots laid over it.
pub fn render_own_board(board: &Board, incoming: &ShotResults) -> String {
    let mut out = String::new();
    header(&mut out);
    for r in 0..BOARD_SIZE {
        let _ = write!(out, " {:2} ", r + 1);
        for c in 0..BOARD_SIZE {
            let ch = match incoming.get((r, c)).unwrap_or_default() {
                CellState::Unknown if board.is_occupied((r, c)) => 'S',
                state => cell_char(state),
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out.push_str("    Legend: S=Ship  X=Hit  #=Sunk  o=Miss  .=Water\n");
    out
}

fn read_line() -> Result<String, EngineError> {
    print!("\nEnter target coordinates (e.g. B7): ");
    io::stdout().flush().map_err(|_| EngineError::PlayerAborted)?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => Err(EngineError::PlayerAborted),
        Ok(_) => Ok(line),
    }
}

impl Player for CliPlayer {
    fn place_fleet(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        placement::place_fleet(rng, board, &FLEET)?;
        self.own_board = board.clone();
        println!("\nYour fleet:");
        print!("{}", render_own_board(&self.own_board, &self.incoming));
        Ok(())
    }

    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        shots: &ShotResults,
        sunk_ships: &[Ship],
    ) -> Result<Coord, EngineError> {
        println!("\nOpponent board:");
        print!("{}", render_shots(shots));
        if self.hints {
            let decision = targeting::choose_target(shots, sunk_ships, rng)?;
            println!("Suggestion: {} ({:?})", coord_to_string(decision.target), decision.mode);
        }
        loop {
            let line = read_line()?;
            match parse_coord(&line) {
                Ok(coord) if shots.is_unknown(coord) => return Ok(coord),
                Ok(coord) => println!("✗ You already fired at {}.", coord_to_string(coord)),
                Err(e) => println!("✗ Invalid coordinate: {}", e),
            }
        }
    }

    fn is_paced(&self) -> bool {
        false
    }

    fn handle_shot_result(&mut self, report: &TurnReport) {
        let at = coord_to_string(report.target);
        match (report.outcome.hit, report.outcome.sunk) {
            (true, true) => println!("💥 SUNK! Your shot at {} finished an enemy ship!", at),
            (true, false) => println!("🎯 HIT at {}! Fire again.", at),
            _ => println!("💧 Miss at {}.", at),
        }
    }

    fn handle_opponent_shot(&mut self, report: &TurnReport) {
        let _ = self.incoming.mark_shot(report.target, report.outcome.hit);
        if report.outcome.sunk {
            if let Some(idx) = self.own_board.ship_at(report.target) {
                self.incoming.mark_sunk(self.own_board.ships()[idx].positions());
            }
        }
        let at = coord_to_string(report.target);
        match (report.outcome.hit, report.outcome.sunk) {
            (true, true) => println!("💀 Enemy sank your ship at {}", at),
            (true, false) => println!("⚠️  Enemy hit your ship at {}", at),
            _ => println!("✓ Enemy missed at {}", at),
        }
        if !report.outcome.hit {
            println!("\nYour board:");
            print!("{}", render_own_board(&self.own_board, &self.incoming));
        }
    }
}
