//! **gridpath-core** — the grid model for shortest-path visualization.
//!
//! This crate owns the static state of a search problem: a fixed
//! `rows x cols` array of [`Cell`]s, the designated start and goal, and the
//! obstacle flags. The search itself lives in `gridpath-search`, which reads
//! a [`GridModel`] and never mutates it.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::Cell;
pub use error::GridError;
pub use geom::{Dims, Pos};
pub use grid::GridModel;
