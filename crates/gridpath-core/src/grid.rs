//! The [`GridModel`] type — a fixed `rows x cols` array of [`Cell`]s with
//! at most one start and one goal.

use crate::cell::Cell;
use crate::error::GridError;
use crate::geom::{Dims, Pos};

/// A rectangular grid of cells, with start/goal designation and obstacles.
///
/// Dimensions are fixed at construction. Cells are stored row-major, so the
/// cell at index `i` always sits at `dims().pos(i)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    cells: Vec<Cell>,
    dims: Dims,
    start: Option<Pos>,
    goal: Option<Pos>,
}

impl GridModel {
    /// Create a grid with no obstacles, no start and no goal.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        let dims = Dims::new(rows, cols);
        if dims.is_empty() {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            cells: vec![Cell::default(); dims.len()],
            dims,
            start: None,
            goal: None,
        })
    }

    /// Grid dimensions.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.dims.cols
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.dims.contains(p)
    }

    /// The current start position, if one is designated.
    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// The current goal position, if one is designated.
    #[inline]
    pub fn goal(&self) -> Option<Pos> {
        self.goal
    }

    /// Read the cell at `p`.
    pub fn cell(&self, p: Pos) -> Result<&Cell, GridError> {
        let i = self.index(p)?;
        Ok(&self.cells[i])
    }

    /// Designate `p` as the start, clearing the previous start cell.
    pub fn set_start(&mut self, p: Pos) -> Result<(), GridError> {
        let i = self.index(p)?;
        if let Some(old) = self.start.and_then(|s| self.dims.index(s)) {
            self.cells[old].is_start = false;
        }
        self.cells[i].is_start = true;
        self.start = Some(p);
        Ok(())
    }

    /// Designate `p` as the goal, clearing the previous goal cell.
    pub fn set_goal(&mut self, p: Pos) -> Result<(), GridError> {
        let i = self.index(p)?;
        if let Some(old) = self.goal.and_then(|g| self.dims.index(g)) {
            self.cells[old].is_goal = false;
        }
        self.cells[i].is_goal = true;
        self.goal = Some(p);
        Ok(())
    }

    /// Flip the obstacle flag at `p` and return the new value.
    ///
    /// Endpoints may be toggled too; the search treats them as accessible
    /// regardless.
    pub fn toggle_obstacle(&mut self, p: Pos) -> Result<bool, GridError> {
        let i = self.index(p)?;
        let cell = &mut self.cells[i];
        cell.is_obstacle = !cell.is_obstacle;
        Ok(cell.is_obstacle)
    }

    /// Set the obstacle flag at `p`.
    pub fn set_obstacle(&mut self, p: Pos, is_obstacle: bool) -> Result<(), GridError> {
        let i = self.index(p)?;
        self.cells[i].is_obstacle = is_obstacle;
        Ok(())
    }

    /// Remove every obstacle, keeping start and goal.
    pub fn clear_obstacles(&mut self) {
        for c in &mut self.cells {
            c.is_obstacle = false;
        }
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_obstacle).count()
    }

    /// Whether `p` is inside the grid and not an obstacle.
    ///
    /// This is the raw storage predicate; it knows nothing about endpoints.
    #[inline]
    pub fn is_accessible(&self, p: Pos) -> bool {
        self.dims
            .index(p)
            .is_some_and(|i| !self.cells[i].is_obstacle)
    }

    /// The in-bounds orthogonal neighbours of `p`, in the fixed order
    /// up, down, left, right.
    pub fn neighbors_of(&self, p: Pos) -> impl Iterator<Item = Pos> {
        let dims = self.dims;
        p.neighbors_4().into_iter().filter(move |&n| dims.contains(n))
    }

    /// Row-major iterator over `(Pos, &Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> {
        self.dims.iter().zip(self.cells.iter())
    }

    #[inline]
    fn index(&self, p: Pos) -> Result<usize, GridError> {
        self.dims.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            dims: self.dims,
        })
    }
}
