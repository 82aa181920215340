use salvo::{
    resolve_shot, Board, BoardError, CellState, EngineError, GameOverReason, Match, Orientation,
    ShotOutcome, ShotResults, Side,
};

/// First side: a single submarine at (9,9). Second side: a destroyer at
/// (0,0)-(0,1) and a submarine at (5,5).
fn small_match() -> Match {
    let mut first: Board = Board::new();
    first.place(9, 9, 1, Orientation::Horizontal).unwrap();
    let mut second: Board = Board::new();
    second.place(0, 0, 2, Orientation::Horizontal).unwrap();
    second.place(5, 5, 1, Orientation::Vertical).unwrap();
    Match::new(first, second, Side::First)
}

#[test]
fn sinking_hit_marks_whole_ship() {
    let mut board: Board = Board::new();
    board.place(3, 3, 3, Orientation::Vertical).unwrap();
    let mut shots = ShotResults::new();

    let first = resolve_shot((3, 3), &mut board, &mut shots).unwrap();
    assert_eq!(first, ShotOutcome { hit: true, sunk: false });
    resolve_shot((4, 3), &mut board, &mut shots).unwrap();
    assert_eq!(shots.get((4, 3)), Some(CellState::Hit));

    let last = resolve_shot((5, 3), &mut board, &mut shots).unwrap();
    assert_eq!(last, ShotOutcome { hit: true, sunk: true });
    for cell in [(3, 3), (4, 3), (5, 3)] {
        assert_eq!(shots.get(cell), Some(CellState::Sunk));
    }
    assert_eq!(board.sunk_ships(), 1);
}

#[test]
fn repeated_shot_is_rejected_without_side_effects() {
    let mut board: Board = Board::new();
    board.place(0, 0, 1, Orientation::Horizontal).unwrap();
    let mut shots = ShotResults::new();

    resolve_shot((0, 0), &mut board, &mut shots).unwrap();
    let before = (board.clone(), shots);
    assert_eq!(
        resolve_shot((0, 0), &mut board, &mut shots).unwrap_err(),
        BoardError::AlreadyGuessed
    );
    assert!(before.0 == board);
    assert_eq!(before.1, shots);
    assert_eq!(board.ships()[0].hit_count(), 1);
}

#[test]
fn out_of_range_shot_is_invalid() {
    let mut board: Board = Board::new();
    let mut shots = ShotResults::new();
    assert_eq!(
        resolve_shot((10, 0), &mut board, &mut shots).unwrap_err(),
        BoardError::InvalidIndex
    );
}

#[test]
fn hit_keeps_turn_and_miss_passes_it() {
    let mut game = small_match();

    let report = game.fire(Side::First, (0, 0)).unwrap();
    assert!(report.outcome.hit);
    assert_eq!(report.next, Side::First);
    assert_eq!(game.current(), Side::First);

    let report = game.fire(Side::First, (9, 0)).unwrap();
    assert!(!report.outcome.hit);
    assert_eq!(report.next, Side::Second);
    assert_eq!(game.turn().stats(Side::First).move_count, 2);
}

#[test]
fn firing_out_of_turn_is_rejected() {
    let mut game = small_match();
    assert_eq!(
        game.fire(Side::Second, (0, 0)).unwrap_err(),
        EngineError::NotYourTurn
    );
    assert_eq!(game.turn().stats(Side::Second).move_count, 0);
}

#[test]
fn already_guessed_cell_leaves_counters_alone() {
    let mut game = small_match();
    game.fire(Side::First, (0, 0)).unwrap();
    game.fire(Side::First, (0, 1)).unwrap();
    assert_eq!(game.turn().stats(Side::Second).sunk_ships, 1);

    let err = game.fire(Side::First, (0, 1)).unwrap_err();
    assert_eq!(err, EngineError::Board(BoardError::AlreadyGuessed));
    assert_eq!(game.turn().stats(Side::Second).sunk_ships, 1);
    assert_eq!(game.turn().stats(Side::First).move_count, 2);
    assert_eq!(game.current(), Side::First);
}

#[test]
fn game_over_is_reported_exactly_once() {
    let mut game = small_match();
    let mut verdicts = Vec::new();
    for target in [(0, 0), (0, 1), (5, 5)] {
        let report = game.fire(Side::First, target).unwrap();
        verdicts.extend(report.game_over);
    }

    assert_eq!(verdicts.len(), 1);
    let verdict = verdicts[0];
    assert_eq!(verdict.winner, Side::First);
    assert_eq!(verdict.loser, Side::Second);
    assert_eq!(verdict.reason, GameOverReason::ShipsSunk);
    assert_eq!(game.turn().game_over, Some(verdict));

    assert_eq!(game.fire(Side::First, (7, 7)).unwrap_err(), EngineError::MatchOver);
    assert_eq!(game.fire(Side::Second, (9, 9)).unwrap_err(), EngineError::MatchOver);
}

#[test]
fn shots_are_tracked_per_observer() {
    let mut game = small_match();
    game.fire(Side::First, (3, 3)).unwrap();
    game.fire(Side::Second, (9, 9)).unwrap();

    assert_eq!(game.shots(Side::First).get((3, 3)), Some(CellState::Miss));
    assert_eq!(game.shots(Side::Second).get((9, 9)), Some(CellState::Sunk));
    assert_eq!(game.shots(Side::Second).get((3, 3)), Some(CellState::Unknown));
    // the second side sank the only ship of the first
    assert_eq!(game.turn().game_over.map(|g| g.winner), Some(Side::Second));
}
