use crate::complexity::Level;
use crate::coordinate::Coordinate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Row replacement is only allowed on Empty-level games.
    #[error("this game cannot be modified")]
    ReadOnly,
    #[error("invalid difficulty level")]
    InvalidLevel,
    #[error("no solvable {level} board found after {attempts} attempts")]
    GenerationExhausted { level: Level, attempts: usize },
    #[error("row {0} out of range")]
    RowOutOfRange(usize),
}

/// What a validation scan found at a cell. At most one kind is recorded
/// per cell, in this declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Empty,
    Row,
    Column,
    Square,
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictKind::Empty => "empty",
            ConflictKind::Row => "row",
            ConflictKind::Column => "column",
            ConflictKind::Square => "square",
        })
    }
}

/// Findings of a full board scan, grouped by kind. Collected, never
/// thrown; a scan always completes and a consistent solved board yields
/// an empty report.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: BTreeMap<ConflictKind, Vec<Coordinate>>,
    pub count: usize,
}

impl ValidationReport {
    pub fn record(&mut self, kind: ConflictKind, coord: Coordinate) {
        self.errors.entry(kind).or_default().push(coord);
        self.count += 1;
    }

    pub fn is_clean(&self) -> bool {
        self.count == 0
    }

    pub fn of_kind(&self, kind: ConflictKind) -> &[Coordinate] {
        self.errors.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}
