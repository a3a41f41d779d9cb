use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// 9x9 cell matrix; 0 = empty, 1..=9 placed digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board(pub(crate) [[u8; 9]; 9]);

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self([[0; 9]; 9])
    }

    pub fn from_rows(rows: [[u8; 9]; 9]) -> Self {
        Self(rows)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        // Accepts 81 digits with 0/./_ for blanks; other chars are ignored
        let mut digits = Vec::with_capacity(81);
        for ch in text.chars() {
            match ch {
                '1'..='9' => digits.push(ch as u8 - b'0'),
                '0' | '.' | '_' => digits.push(0),
                _ => {}
            }
        }
        if digits.len() != 81 {
            anyhow::bail!("expected 81 digits/dots, got {}", digits.len());
        }
        let mut rows = [[0u8; 9]; 9];
        for (i, v) in digits.into_iter().enumerate() {
            rows[i / 9][i % 9] = v;
        }
        Ok(Self(rows))
    }

    pub fn to_compact(&self) -> String {
        self.0
            .iter()
            .flatten()
            .map(|&v| if v == 0 { '.' } else { char::from(b'0' + v) })
            .collect()
    }

    pub fn rows(&self) -> &[[u8; 9]; 9] {
        &self.0
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.0[x][y]
    }

    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.0[x][y] = v;
    }

    /// True iff the coordinate is in range and holds no digit.
    /// Out-of-range coordinates read as non-empty so scan loops can probe
    /// past a box bound without panicking.
    pub fn is_empty(&self, x: usize, y: usize) -> bool {
        if x > 8 || y > 8 {
            return false;
        }
        self.0[x][y] == 0
    }

    pub fn is_solved(&self) -> bool {
        self.0.iter().flatten().all(|&v| v != 0)
    }

    /// True iff `v` appears nowhere else in row `x`.
    pub fn is_row_valid(&self, x: usize, y: usize, v: u8) -> bool {
        (0..9).filter(|&i| i != y).all(|i| self.0[x][i] != v)
    }

    /// True iff `v` appears nowhere else in column `y`.
    pub fn is_col_valid(&self, x: usize, y: usize, v: u8) -> bool {
        (0..9).filter(|&i| i != x).all(|i| self.0[i][y] != v)
    }

    /// True iff `v` appears nowhere else in the 3x3 box containing (x, y).
    /// The cell under test itself is skipped, same as the row/column scans.
    pub fn is_box_valid(&self, x: usize, y: usize, v: u8) -> bool {
        let (bx, by) = (box_offset(x), box_offset(y));
        for i in bx..bx + 3 {
            for j in by..by + 3 {
                if i == x && j == y {
                    continue;
                }
                if self.0[i][j] == v {
                    return false;
                }
            }
        }
        true
    }

    pub fn is_valid(&self, x: usize, y: usize, v: u8) -> bool {
        self.is_row_valid(x, y, v) && self.is_col_valid(x, y, v) && self.is_box_valid(x, y, v)
    }
}

// Top-left index of the 3-cell band containing i.
pub(crate) fn box_offset(i: usize) -> usize {
    (i / 3) * 3
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for x in 0..9 {
            if x % 3 == 0 {
                writeln!(f, "+-------+-------+-------+")?;
            }
            for y in 0..9 {
                if y % 3 == 0 {
                    write!(f, "| ")?;
                }
                let v = self.0[x][y];
                write!(f, "{} ", if v == 0 { '·' } else { char::from(b'0' + v) })?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+-------+-------+-------+")
    }
}
