pub mod board;
pub mod complexity;
pub mod coordinate;
pub mod errors;
pub mod game;
mod generator;
pub mod solver;

pub use board::Board;
pub use complexity::{BoxTarget, Level, Profile};
pub use coordinate::Coordinate;
pub use errors::{ConflictKind, GameError, ValidationReport};
pub use game::Game;
