use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// Named difficulty of a puzzle. Unrecognized names parse to `Invalid`,
/// which the orchestrator rejects before any generation happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    Invalid,
    #[default]
    Easy,
    Basic,
    Medium,
    Hard,
    Master,
    Empty,
    Test,
}

impl Level {
    pub const ALL: [Level; 8] = [
        Level::Invalid,
        Level::Easy,
        Level::Basic,
        Level::Medium,
        Level::Hard,
        Level::Master,
        Level::Empty,
        Level::Test,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Level::Invalid => "Invalid",
            Level::Easy => "Easy",
            Level::Basic => "Basic",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
            Level::Master => "Master",
            Level::Empty => "Empty",
            Level::Test => "Test",
        }
    }

    /// Case-insensitive lookup; anything unknown maps to `Invalid`.
    pub fn from_name(name: &str) -> Level {
        Level::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(name))
            .unwrap_or(Level::Invalid)
    }

    // How many cells the generator tries to place per box, row-major box order.
    fn fill_counts(self) -> [usize; 9] {
        match self {
            Level::Easy => [4, 5, 3, 5, 5, 5, 5, 5, 5],
            Level::Basic => [4, 5, 4, 5, 5, 5, 5, 5, 5],
            Level::Medium => [2, 3, 4, 4, 1, 3, 2, 1, 3],
            Level::Hard => [3, 2, 3, 4, 2, 3, 3, 2, 3],
            Level::Master => [1, 4, 3, 3, 2, 3, 3, 3, 3],
            Level::Test => [1, 4, 1, 1, 1, 4, 1, 1, 1],
            Level::Empty | Level::Invalid => [0; 9],
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Level::from_name(&name))
    }
}

/// Fill target for one 3x3 box: attempt count plus the box's bottom-right
/// cell coordinates.
#[derive(Debug, Clone, Copy)]
pub struct BoxTarget {
    pub fill_count: usize,
    pub x_max: usize,
    pub y_max: usize,
}

/// Per-box fill targets for a level, immutable once built.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub boxes: [BoxTarget; 9],
}

impl Profile {
    pub fn build(level: Level) -> Self {
        let counts = level.fill_counts();
        let mut boxes = [BoxTarget { fill_count: 0, x_max: 0, y_max: 0 }; 9];
        for (i, b) in boxes.iter_mut().enumerate() {
            let (x_max, y_max) = box_bounds(i);
            *b = BoxTarget { fill_count: counts[i], x_max, y_max };
        }
        Self { boxes }
    }
}

// Bottom-right cell of box i, boxes numbered 0..=8 row-major.
pub(crate) fn box_bounds(i: usize) -> (usize, usize) {
    ((i / 3) * 3 + 2, (i % 3) * 3 + 2)
}
