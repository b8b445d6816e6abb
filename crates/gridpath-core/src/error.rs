//! Errors raised by [`GridModel`](crate::GridModel) construction and edits.

use std::fmt;

use crate::geom::{Dims, Pos};

/// Errors that can occur when building or editing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns were zero or negative.
    InvalidDimensions { rows: i32, cols: i32 },
    /// A coordinate fell outside the grid.
    OutOfBounds { pos: Pos, dims: Dims },
    /// Layout lines have different widths.
    InconsistentLayout { line: usize, expected: usize, found: usize },
    /// A character outside the layout alphabet was found.
    InvalidChar { ch: char, pos: Pos },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {rows}x{cols}")
            }
            Self::OutOfBounds { pos, dims } => {
                write!(f, "position {pos} is outside the {dims} grid")
            }
            Self::InconsistentLayout {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
