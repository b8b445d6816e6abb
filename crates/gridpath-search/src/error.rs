use std::fmt;

use gridpath_core::{Dims, Pos};

/// Errors detected before a search starts. A started run never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The grid has no start or no goal designated.
    MissingEndpoints {
        start: Option<Pos>,
        goal: Option<Pos>,
    },
    /// An endpoint handed to [`PathEngine::search`](crate::PathEngine::search)
    /// lies outside the engine's dimensions.
    OutOfBounds { pos: Pos, dims: Dims },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints { start, goal } => {
                let missing = match (start, goal) {
                    (None, None) => "start and goal",
                    (None, Some(_)) => "start",
                    _ => "goal",
                };
                write!(f, "cannot search: no {missing} set")
            }
            Self::OutOfBounds { pos, dims } => {
                write!(f, "endpoint {pos} is outside the {dims} search area")
            }
        }
    }
}

impl std::error::Error for SearchError {}
