use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use sudogen_core::{solver, Board, ConflictKind, Coordinate, Game, GameError, Level};

const PLAYABLE: [Level; 6] = [
    Level::Easy,
    Level::Basic,
    Level::Medium,
    Level::Hard,
    Level::Master,
    Level::Test,
];

const SOLVED_ROWS: [[u8; 9]; 9] = [
    [5, 3, 4, 6, 7, 8, 9, 1, 2],
    [6, 7, 2, 1, 9, 5, 3, 4, 8],
    [1, 9, 8, 3, 4, 2, 5, 6, 7],
    [8, 5, 9, 7, 6, 1, 4, 2, 3],
    [4, 2, 6, 8, 5, 3, 7, 9, 1],
    [7, 1, 3, 9, 2, 4, 8, 5, 6],
    [9, 6, 1, 5, 3, 7, 2, 8, 4],
    [2, 8, 7, 4, 1, 9, 6, 3, 5],
    [3, 4, 5, 2, 8, 6, 1, 7, 9],
];

fn no_dupes(values: [u8; 9]) -> bool {
    let mut seen = [false; 10];
    for v in values {
        if v != 0 {
            if seen[v as usize] {
                return false;
            }
            seen[v as usize] = true;
        }
    }
    true
}

fn assert_no_conflicts(board: &Board) {
    let rows = board.rows();
    for x in 0..9 {
        assert!(no_dupes(rows[x]), "duplicate in row {x}");
    }
    for y in 0..9 {
        let mut col = [0u8; 9];
        for x in 0..9 {
            col[x] = rows[x][y];
        }
        assert!(no_dupes(col), "duplicate in column {y}");
    }
    for bx in (0..9).step_by(3) {
        for by in (0..9).step_by(3) {
            let mut cells = [0u8; 9];
            let mut i = 0;
            for x in bx..bx + 3 {
                for y in by..by + 3 {
                    cells[i] = rows[x][y];
                    i += 1;
                }
            }
            assert!(no_dupes(cells), "duplicate in box ({bx},{by})");
        }
    }
}

fn empty_game_with(rows: &[[u8; 9]]) -> Game {
    let mut game = Game::new(Level::Empty).unwrap();
    for (x, row) in rows.iter().enumerate() {
        game.set_data_row(x, *row).unwrap();
    }
    game
}

#[test]
fn playable_levels_produce_solvable_locked_puzzles() {
    for level in PLAYABLE {
        let game = Game::new(level).expect("generate");
        assert_eq!(game.level(), level);
        assert!(
            !game.locked_coordinates().is_empty(),
            "{level} puzzle has no given cells"
        );
        assert!(solver::is_solvable(game.board()), "{level} puzzle not solvable");
        assert_no_conflicts(game.board());
    }
}

#[test]
fn locked_set_matches_the_given_cells() {
    let game = Game::new(Level::Test).unwrap();
    let mut given = 0;
    for x in 0..9 {
        for y in 0..9 {
            assert_eq!(game.is_locked(x, y), !game.is_empty(x, y));
            if !game.is_empty(x, y) {
                given += 1;
            }
        }
    }
    assert_eq!(game.locked_coordinates().len(), given);
}

#[test]
fn test_level_fills_fourteen_to_fifteen_cells() {
    let game = Game::new(Level::Test).unwrap();
    let given = game
        .board()
        .rows()
        .iter()
        .flatten()
        .filter(|&&v| v != 0)
        .count();
    assert!(
        (14..=15).contains(&given),
        "expected 14..=15 given cells, got {given}"
    );
}

#[test]
fn empty_level_returns_a_blank_game_immediately() {
    let game = Game::new(Level::Empty).unwrap();
    assert_eq!(game.board(), &Board::new());
    assert!(game.locked_coordinates().is_empty());
    assert!(!game.is_solved());
}

#[test]
fn invalid_level_is_rejected() {
    let err = Game::new(Level::Invalid).unwrap_err();
    assert_eq!(err, GameError::InvalidLevel);
}

#[test]
fn validating_a_solved_board_is_clean() {
    let game = empty_game_with(&SOLVED_ROWS);
    assert!(game.is_solved());

    let report = game.validate();
    assert!(report.is_clean());
    assert_eq!(report.count, 0);
    assert!(report.errors.is_empty());
}

#[test]
fn validate_reports_row_conflicts() {
    let game = empty_game_with(&[[1, 1, 0, 0, 0, 0, 0, 0, 0]]);
    let report = game.validate();

    assert_eq!(
        report.of_kind(ConflictKind::Row),
        &[Coordinate::new(0, 0), Coordinate::new(0, 1)][..]
    );
    assert_eq!(report.of_kind(ConflictKind::Empty).len(), 79);
    assert_eq!(report.count, 81);
}

#[test]
fn validate_reports_column_conflicts() {
    let mut rows = [[0u8; 9]; 2];
    rows[0][0] = 5;
    rows[1][0] = 5;
    let report = empty_game_with(&rows).validate();

    assert_eq!(
        report.of_kind(ConflictKind::Column),
        &[Coordinate::new(0, 0), Coordinate::new(1, 0)][..]
    );
    assert!(report.of_kind(ConflictKind::Row).is_empty());
}

#[test]
fn validate_reports_square_conflicts() {
    // same box, different row and column
    let mut rows = [[0u8; 9]; 2];
    rows[0][0] = 7;
    rows[1][1] = 7;
    let report = empty_game_with(&rows).validate();

    assert_eq!(
        report.of_kind(ConflictKind::Square),
        &[Coordinate::new(0, 0), Coordinate::new(1, 1)][..]
    );
    assert!(report.of_kind(ConflictKind::Row).is_empty());
    assert!(report.of_kind(ConflictKind::Column).is_empty());
}

#[test]
fn set_data_row_round_trips_on_empty_level() {
    let mut game = Game::new(Level::Empty).unwrap();
    let data = [9, 8, 7, 6, 5, 4, 3, 2, 1];
    game.set_data_row(4, data).unwrap();
    assert_eq!(game.board().rows()[4], data);
}

#[test]
fn set_data_row_is_rejected_on_playable_levels() {
    let mut game = Game::new(Level::Easy).unwrap();
    let before = game.board().rows()[0];

    let err = game.set_data_row(0, [1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap_err();
    assert_eq!(err, GameError::ReadOnly);
    assert_eq!(game.board().rows()[0], before);
}

#[test]
fn set_data_row_checks_the_row_index() {
    let mut game = Game::new(Level::Empty).unwrap();
    let err = game.set_data_row(9, [0; 9]).unwrap_err();
    assert_eq!(err, GameError::RowOutOfRange(9));
}

#[test]
fn locking_is_idempotent_and_value_keyed() {
    let game = Game::new(Level::Empty).unwrap();
    game.lock(3, 4);
    game.lock(3, 4);
    game.lock_coordinate(Coordinate::new(3, 4));

    let locked = game.locked_coordinates();
    assert_eq!(locked, vec![Coordinate::new(3, 4)]);
    assert!(locked[0].equals_xy(3, 4));
    assert!(game.is_locked(3, 4));
    assert!(game.is_coordinate_locked(Coordinate::new(3, 4)));
    assert!(!game.is_locked(4, 3));
}

#[test]
fn locking_is_safe_across_threads() {
    let game = Arc::new(Game::new(Level::Empty).unwrap());
    let mut handles = Vec::new();
    for _ in 0..4 {
        let game = Arc::clone(&game);
        handles.push(thread::spawn(move || {
            for x in 0..9 {
                game.lock(x, x);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(game.locked_coordinates().len(), 9);
}

#[test]
fn manual_moves_go_through_the_constraint_checks() {
    let mut game = empty_game_with(&[[1, 2, 3, 4, 5, 6, 7, 8, 0]]);

    assert!(!game.is_valid(0, 8, 8));
    assert!(game.is_valid(0, 8, 9));
    game.set(0, 8, 9);
    assert_eq!(game.get(0, 8), 9);
    assert_eq!(game.validate().of_kind(ConflictKind::Empty).len(), 72);
}

#[test]
fn solving_a_game_in_place_keeps_the_given_cells() {
    let mut game = Game::new(Level::Test).unwrap();
    let given: Vec<(Coordinate, u8)> = game
        .locked_coordinates()
        .into_iter()
        .map(|c| (c, game.get(c.x, c.y)))
        .collect();

    assert!(game.solve());
    assert!(game.is_solved());
    assert!(game.validate().is_clean());
    for (c, v) in given {
        assert_eq!(game.get(c.x, c.y), v);
    }
}

#[test]
fn game_serialization_round_trips() {
    let game = Game::new(Level::Test).unwrap();
    let json = serde_json::to_string(&game).unwrap();
    assert!(json.contains("\"level\":\"Test\""));
    assert!(json.contains("\"locked_coordinates\""));
    assert!(json.contains("\"start_time\""));

    let restored: Game = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.level(), game.level());
    assert_eq!(restored.board(), game.board());
    assert_eq!(restored.locked_coordinates(), game.locked_coordinates());
}
