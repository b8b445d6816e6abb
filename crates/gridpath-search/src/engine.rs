use std::cmp::Ordering;

use gridpath_core::{Dims, Pos};

/// A position with its search scores, as reported in
/// [`SearchEvent::Expanded`](crate::SearchEvent::Expanded) and by
/// [`PathEngine::node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Pos,
    /// Cost from the start.
    pub g: i32,
    /// Heuristic estimate to the goal.
    pub h: i32,
    /// `g + h`.
    pub f: i32,
    /// Predecessor on the best known path from the start.
    pub came_from: Option<Pos>,
}

/// Whether a cell has been reached in the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Unvisited,
    /// On the frontier.
    Open,
    /// Evaluated; never revisited.
    Closed,
}

/// Sentinel for "no path known yet" in `g` and `f`.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Internal node arena
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    /// Order in which the node first joined the frontier this run.
    pub(crate) seq: u64,
    pub(crate) generation: u32,
    pub(crate) open: bool,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            h: 0,
            f: UNREACHABLE,
            parent: usize::MAX,
            seq: 0,
            generation: 0,
            open: false,
            closed: false,
        }
    }
}

/// Frontier entry, ordered for `BinaryHeap` so that the smallest `f` pops
/// first and, among equal `f`, the node that joined the frontier first.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathEngine
// ---------------------------------------------------------------------------

/// A* search engine over a grid of fixed dimensions.
///
/// `PathEngine` owns the per-cell search state (scores, back-pointers,
/// open/closed flags) in a flat arena indexed row-major, so back-pointers are
/// plain indices. The arena is reused across runs: starting a run bumps a
/// generation counter, and any node from an older generation reads as
/// unvisited (g = f = [`UNREACHABLE`], h = 0, no predecessor).
///
/// The engine is borrowed mutably by a [`Run`](crate::Run) for its whole
/// lifetime, so two runs can never interleave on the same state.
pub struct PathEngine {
    pub(crate) dims: Dims,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    // scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Pos>,
}

impl Default for PathEngine {
    fn default() -> Self {
        Self::new(Dims::default())
    }
}

impl PathEngine {
    /// Create an engine for grids of the given dimensions.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            nodes: vec![Node::default(); dims.len()],
            generation: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the dimensions, reallocating the arena only if it is too
    /// small.
    pub fn set_dims(&mut self, dims: Dims) {
        if dims == self.dims {
            return;
        }
        let new_len = dims.len();
        self.dims = dims;
        if new_len <= self.nodes.len() {
            // Indices change meaning; stale nodes must not be read back.
            self.next_generation();
            return;
        }
        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
    }

    /// The dimensions currently searched.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Scores of `p` in the current (or last) run. Unvisited nodes read as
    /// reset. Returns `None` if `p` is outside the dimensions.
    pub fn node(&self, p: Pos) -> Option<PathNode> {
        let i = self.idx(p)?;
        let n = &self.nodes[i];
        if n.generation != self.generation {
            return Some(PathNode {
                pos: p,
                g: UNREACHABLE,
                h: 0,
                f: UNREACHABLE,
                came_from: None,
            });
        }
        Some(self.path_node(i))
    }

    /// Open/closed status of `p` in the current (or last) run.
    pub fn status(&self, p: Pos) -> NodeStatus {
        let Some(i) = self.idx(p) else {
            return NodeStatus::Unvisited;
        };
        let n = &self.nodes[i];
        if n.generation != self.generation {
            NodeStatus::Unvisited
        } else if n.closed {
            NodeStatus::Closed
        } else if n.open {
            NodeStatus::Open
        } else {
            NodeStatus::Unvisited
        }
    }

    // -----------------------------------------------------------------------
    // Arena helpers
    // -----------------------------------------------------------------------

    /// Invalidate every node. Generation 0 is reserved for never-touched
    /// nodes, so a wrap-around clears the arena explicitly.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for n in &mut self.nodes {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.generation
    }

    #[inline]
    pub(crate) fn idx(&self, p: Pos) -> Option<usize> {
        self.dims.index(p)
    }

    #[inline]
    pub(crate) fn pos(&self, idx: usize) -> Pos {
        self.dims.pos(idx)
    }

    pub(crate) fn path_node(&self, idx: usize) -> PathNode {
        let n = &self.nodes[idx];
        PathNode {
            pos: self.pos(idx),
            g: n.g,
            h: n.h,
            f: n.f,
            came_from: (n.parent != usize::MAX).then(|| self.pos(n.parent)),
        }
    }

    /// Follow back-pointers from `goal` to the start, returned start-first.
    pub(crate) fn trace_back(&self, goal: usize) -> Vec<Pos> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != usize::MAX {
            path.push(self.pos(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn heap_pops_lowest_f_then_earliest_seq() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, f: 5, seq: 0 });
        heap.push(NodeRef { idx: 1, f: 4, seq: 2 });
        heap.push(NodeRef { idx: 2, f: 4, seq: 1 });
        heap.push(NodeRef { idx: 3, f: 6, seq: 3 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|r| r.idx)).collect();
        assert_eq!(order, vec![2, 1, 0, 3]);
    }

    #[test]
    fn set_dims_smaller_preserves_capacity() {
        let mut e = PathEngine::new(Dims::new(20, 20));
        let cap = e.nodes.len();
        e.set_dims(Dims::new(5, 5));
        assert_eq!(e.dims(), Dims::new(5, 5));
        assert_eq!(e.nodes.len(), cap);
        assert!(e.generation > 0);
    }

    #[test]
    fn set_dims_larger_reallocates() {
        let mut e = PathEngine::new(Dims::new(5, 5));
        e.set_dims(Dims::new(20, 20));
        assert_eq!(e.nodes.len(), 400);
    }

    #[test]
    fn fresh_engine_reads_unvisited() {
        let e = PathEngine::new(Dims::new(3, 3));
        let n = e.node(Pos::new(1, 1)).unwrap();
        assert_eq!(n.g, UNREACHABLE);
        assert_eq!(n.h, 0);
        assert_eq!(n.came_from, None);
        assert_eq!(e.status(Pos::new(1, 1)), NodeStatus::Unvisited);
        assert_eq!(e.node(Pos::new(3, 0)), None);
    }

    #[test]
    fn generation_wrap_clears_nodes() {
        let mut e = PathEngine::new(Dims::new(2, 2));
        e.generation = u32::MAX;
        e.nodes[0].generation = 1;
        assert_eq!(e.next_generation(), 1);
        assert_eq!(e.nodes[0].generation, 0);
    }
}
