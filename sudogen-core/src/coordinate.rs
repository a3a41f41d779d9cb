use serde::{Deserialize, Serialize};

/// Grid position exchanged by value-equality, never identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn equals_xy(&self, x: usize, y: usize) -> bool {
        self.x == x && self.y == y
    }
}
