use gridpath_core::{GridModel, Pos};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather};

/// Read-only view of a [`GridModel`] as seen by the search.
///
/// Neighbours are the in-bounds orthogonal cells in the order up, down,
/// left, right. A neighbour is passable when it is not an obstacle, or when
/// it is the start or the goal: endpoints stay reachable even if an obstacle
/// was toggled onto them.
#[derive(Clone, Copy, Debug)]
pub struct GridPather<'a> {
    grid: &'a GridModel,
}

impl<'a> GridPather<'a> {
    pub fn new(grid: &'a GridModel) -> Self {
        Self { grid }
    }

    /// The underlying grid.
    pub fn grid(&self) -> &'a GridModel {
        self.grid
    }

    /// Whether the search may step onto `p`.
    pub fn passable(&self, p: Pos) -> bool {
        self.grid.is_accessible(p) || self.is_endpoint(p)
    }

    fn is_endpoint(&self, p: Pos) -> bool {
        self.grid.start() == Some(p) || self.grid.goal() == Some(p)
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        buf.extend(self.grid.neighbors_of(p).filter(|&n| self.passable(n)));
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        manhattan(from, to)
    }
}
