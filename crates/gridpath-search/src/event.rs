use gridpath_core::Pos;

use crate::engine::PathNode;

/// One step of search progress, in the order the engine produces them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    /// The cell was taken off the frontier and finalized.
    Evaluating(Pos),
    /// A frontier cell whose scores and predecessor were just (re)assigned.
    Expanded(PathNode),
    /// Terminal: the path from start to goal, both included.
    PathFound(Vec<Pos>),
    /// Terminal: the frontier ran dry without reaching the goal.
    NoPathExists,
}

impl SearchEvent {
    /// Whether this event ends the run.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::PathFound(_) | Self::NoPathExists)
    }

    /// The cell this event is about, for per-cell events.
    pub fn pos(&self) -> Option<Pos> {
        match self {
            Self::Evaluating(p) => Some(*p),
            Self::Expanded(node) => Some(node.pos),
            _ => None,
        }
    }
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// Initialized; no event consumed yet.
    Idle,
    Running,
    PathFound,
    NoPath,
}

impl RunState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::PathFound | Self::NoPath)
    }
}

/// How a completed run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Found(Vec<Pos>),
    NoPath,
}

impl Outcome {
    /// The found path, if any.
    pub fn path(&self) -> Option<&[Pos]> {
        match self {
            Self::Found(p) => Some(p),
            Self::NoPath => None,
        }
    }
}

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// `Evaluating` events emitted.
    pub evaluated: usize,
    /// `Expanded` events emitted.
    pub expanded: usize,
}

/// Outcome and counters of a run driven to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchReport {
    pub outcome: Outcome,
    pub stats: SearchStats,
}
