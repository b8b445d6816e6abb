//! The [`Cell`] type — static flags of one grid position.

/// The static part of a grid position: whether it blocks movement and
/// whether it is the designated start or goal.
///
/// Search scores are not stored here; they live in the search engine's node
/// arena for the duration of a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub is_obstacle: bool,
    pub is_start: bool,
    pub is_goal: bool,
}

impl Cell {
    /// Set the obstacle flag (builder).
    #[inline]
    pub const fn with_obstacle(mut self, is_obstacle: bool) -> Self {
        self.is_obstacle = is_obstacle;
        self
    }

    /// Whether this cell is either endpoint.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        self.is_start || self.is_goal
    }
}
