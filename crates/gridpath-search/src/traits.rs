use gridpath_core::Pos;

/// Minimal search interface: enumerates the positions reachable in one step.
pub trait Pather {
    /// Append the passable neighbours of `p` into `buf`, in a deterministic
    /// order. The caller clears `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>);
}

/// Pather with an admissible heuristic, as required by A*.
///
/// Every step costs 1; there is no weighted terrain.
pub trait AstarPather: Pather {
    /// Heuristic estimate of the number of steps from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Pos, to: Pos) -> i32;
}
