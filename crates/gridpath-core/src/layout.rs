//! Text layouts for building a [`GridModel`] from ASCII art and printing it
//! back.
//!
//! One line per row, one character per cell:
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` | open cell |
//! | `#` | obstacle |
//! | `S` | start |
//! | `G` | goal |
//! | `B` | start and goal on the same cell |
//! | `s`, `g`, `b` | as `S`, `G`, `B`, over an obstacle |
//!
//! Surrounding whitespace is trimmed from the text and from each line, so
//! layouts can be indented inside raw string literals.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;
use crate::geom::Pos;
use crate::grid::GridModel;

pub const OPEN: char = '.';
pub const OBSTACLE: char = '#';
pub const START: char = 'S';
pub const GOAL: char = 'G';
pub const BOTH: char = 'B';

impl GridModel {
    /// Build a grid from a text layout.
    ///
    /// All lines must have the same width. If the layout holds several `S`
    /// (or `G`) characters the last one wins, as repeated
    /// [`set_start`](GridModel::set_start) calls would.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if lines.iter().all(|l| l.is_empty()) {
            return Err(GridError::InvalidDimensions {
                rows: 0,
                cols: cols as i32,
            });
        }

        let mut grid = Self::new(rows as i32, cols as i32)?;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::InconsistentLayout {
                    line: row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let p = Pos::new(row as i32, col as i32);
                let (start, goal) = match ch.to_ascii_uppercase() {
                    OPEN | OBSTACLE => (false, false),
                    START => (true, false),
                    GOAL => (false, true),
                    BOTH => (true, true),
                    _ => return Err(GridError::InvalidChar { ch, pos: p }),
                };
                // Lowercase endpoint letters sit over an obstacle.
                let blocked = ch == OBSTACLE || ((start || goal) && ch.is_ascii_lowercase());
                if blocked {
                    grid.set_obstacle(p, true)?;
                }
                if start {
                    grid.set_start(p)?;
                }
                if goal {
                    grid.set_goal(p)?;
                }
            }
        }
        Ok(grid)
    }
}

impl FromStr for GridModel {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the layout format; every cell state has its own character, so
/// printing and parsing back yields an equal grid.
impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, cell) in self.iter() {
            if p.col == 0 && p.row > 0 {
                writeln!(f)?;
            }
            let ch = match (cell.is_start, cell.is_goal) {
                (true, true) => BOTH,
                (true, false) => START,
                (false, true) => GOAL,
                (false, false) if cell.is_obstacle => OBSTACLE,
                (false, false) => OPEN,
            };
            let ch = if cell.is_endpoint() && cell.is_obstacle {
                ch.to_ascii_lowercase()
            } else {
                ch
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
