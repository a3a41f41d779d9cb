use crate::board::Board;
use crate::complexity::Level;
use crate::coordinate::Coordinate;
use crate::errors::{ConflictKind, GameError, ValidationReport};
use crate::{generator, solver};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Mutex;
use time::OffsetDateTime;

// Safety net for the regenerate loop; a fresh candidate is almost always
// solvable, so exhausting this means something upstream is broken.
const MAX_GENERATION_ATTEMPTS: usize = 100;

/// A puzzle: board, difficulty, creation time and the set of cells fixed
/// by generation. Only published once generation and the solvability
/// check have both succeeded.
#[derive(Debug, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    level: Level,
    #[serde(with = "time::serde::rfc3339")]
    start_time: OffsetDateTime,
    #[serde(rename = "locked_coordinates", with = "locked_set")]
    locked: Mutex<BTreeSet<Coordinate>>,
}

impl Game {
    /// Builds a puzzle for the level. `Empty` returns a blank, immediately
    /// solvable board with nothing locked; every other playable level
    /// regenerates until a candidate passes the solvability check.
    pub fn new(level: Level) -> Result<Self, GameError> {
        if level == Level::Invalid {
            return Err(GameError::InvalidLevel);
        }

        let board = if level == Level::Empty {
            Board::new()
        } else {
            Self::generate_solvable(level)?
        };

        let game = Self {
            board,
            level,
            start_time: OffsetDateTime::now_utc(),
            locked: Mutex::new(BTreeSet::new()),
        };
        game.lock_initial_coordinates();
        Ok(game)
    }

    // The accepted board is the pre-solve candidate; the solver only ever
    // runs against a copy here.
    fn generate_solvable(level: Level) -> Result<Board, GameError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = generator::generate(level);
            if solver::is_solvable(&candidate) {
                debug!("accepted {level} candidate on attempt {attempt}");
                return Ok(candidate);
            }
            debug!("candidate not solvable, regenerating (attempt {attempt})");
        }
        Err(GameError::GenerationExhausted {
            level,
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    fn lock_initial_coordinates(&self) {
        for x in 0..9 {
            for y in 0..9 {
                if !self.board.is_empty(x, y) {
                    self.lock(x, y);
                }
            }
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn start_time(&self) -> OffsetDateTime {
        self.start_time
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.board.get(x, y)
    }

    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.board.set(x, y, v);
    }

    pub fn is_empty(&self, x: usize, y: usize) -> bool {
        self.board.is_empty(x, y)
    }

    pub fn is_valid(&self, x: usize, y: usize, v: u8) -> bool {
        self.board.is_valid(x, y, v)
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// Solves the board in place; false if no solution exists from the
    /// current position.
    pub fn solve(&mut self) -> bool {
        solver::solve(&mut self.board)
    }

    pub fn lock(&self, x: usize, y: usize) {
        self.lock_coordinate(Coordinate::new(x, y));
    }

    /// Insert is idempotent; the mutex keeps concurrent callers safe.
    pub fn lock_coordinate(&self, coord: Coordinate) {
        self.locked.lock().expect("locked set").insert(coord);
    }

    pub fn is_locked(&self, x: usize, y: usize) -> bool {
        self.is_coordinate_locked(Coordinate::new(x, y))
    }

    pub fn is_coordinate_locked(&self, coord: Coordinate) -> bool {
        self.locked.lock().expect("locked set").contains(&coord)
    }

    pub fn locked_coordinates(&self) -> Vec<Coordinate> {
        self.locked.lock().expect("locked set").iter().copied().collect()
    }

    /// Scans all 81 cells and records at most one finding per cell:
    /// empty first, then row, column and square conflicts, in that order.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        for x in 0..9 {
            for y in 0..9 {
                let v = self.board.get(x, y);
                let kind = if v == 0 {
                    ConflictKind::Empty
                } else if !self.board.is_row_valid(x, y, v) {
                    ConflictKind::Row
                } else if !self.board.is_col_valid(x, y, v) {
                    ConflictKind::Column
                } else if !self.board.is_box_valid(x, y, v) {
                    ConflictKind::Square
                } else {
                    continue;
                };
                report.record(kind, Coordinate::new(x, y));
            }
        }
        report
    }

    /// Replaces a whole row. Only games at the Empty level are writable
    /// this way; everywhere else the puzzle is read-only and unchanged.
    pub fn set_data_row(&mut self, row: usize, data: [u8; 9]) -> Result<(), GameError> {
        if self.level != Level::Empty {
            return Err(GameError::ReadOnly);
        }
        if row > 8 {
            return Err(GameError::RowOutOfRange(row));
        }
        for (y, v) in data.into_iter().enumerate() {
            self.board.set(row, y, v);
        }
        Ok(())
    }
}

mod locked_set {
    use super::Coordinate;
    use serde::de::Deserialize;
    use serde::ser::Error as _;
    use serde::{Deserializer, Serializer};
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    pub fn serialize<S: Serializer>(
        locked: &Mutex<BTreeSet<Coordinate>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let set = locked.lock().map_err(|_| S::Error::custom("locked set poisoned"))?;
        serializer.collect_seq(set.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Mutex<BTreeSet<Coordinate>>, D::Error> {
        Ok(Mutex::new(BTreeSet::deserialize(deserializer)?))
    }
}
