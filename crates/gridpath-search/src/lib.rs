//! Step-by-step A* search over a [`GridModel`](gridpath_core::GridModel).
//!
//! The engine turns one search into a finite sequence of [`SearchEvent`]s so
//! a presentation layer can animate the frontier and the final path without
//! the algorithm knowing anything about rendering or timing:
//!
//! - [`PathEngine::run`] returns a lazy [`Run`] iterator; drop it to cancel.
//! - [`PathEngine::run_with`] / [`PathEngine::run_collect`] drive a run eagerly.
//! - [`animate`] drives a run with a [`Pace`] between events.
//!
//! Search is A* with unit step cost and the Manhattan heuristic over the four
//! orthogonal neighbours (up, down, left, right). The frontier pops the lowest
//! `f`, breaking ties by the order in which cells joined it; an open neighbour
//! reached again at equal cost keeps its first predecessor. Both rules make
//! the returned path reproducible.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`AstarPather`] : [`Pather`] | admissible heuristic |
//!
//! [`GridPather`] implements both for a `GridModel`.

mod astar;
mod distance;
mod engine;
mod error;
mod event;
mod pace;
mod pather;
mod traits;

pub use astar::Run;
pub use distance::manhattan;
pub use engine::{NodeStatus, PathEngine, PathNode, UNREACHABLE};
pub use error::SearchError;
pub use event::{Outcome, RunState, SearchEvent, SearchReport, SearchStats};
pub use pace::{DEFAULT_STEP_DELAY, FixedDelay, NoDelay, Pace, animate};
pub use pather::GridPather;
pub use traits::{AstarPather, Pather};
