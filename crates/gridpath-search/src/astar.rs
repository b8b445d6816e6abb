use std::collections::{BinaryHeap, VecDeque};

use gridpath_core::{GridModel, Pos};
use log::{debug, trace};

use crate::engine::{NodeRef, PathEngine, UNREACHABLE};
use crate::error::SearchError;
use crate::event::{Outcome, RunState, SearchEvent, SearchReport, SearchStats};
use crate::pace::{NoDelay, animate};
use crate::pather::GridPather;
use crate::traits::AstarPather;

impl PathEngine {
    /// Start an A* run on `grid` from its start to its goal.
    ///
    /// Fails with [`SearchError::MissingEndpoints`] before touching any state
    /// if either endpoint is unset. The returned [`Run`] yields events lazily;
    /// dropping it abandons the search.
    pub fn run<'g>(
        &mut self,
        grid: &'g GridModel,
    ) -> Result<Run<'_, GridPather<'g>>, SearchError> {
        let (Some(start), Some(goal)) = (grid.start(), grid.goal()) else {
            return Err(SearchError::MissingEndpoints {
                start: grid.start(),
                goal: grid.goal(),
            });
        };
        self.set_dims(grid.dims());
        self.search(GridPather::new(grid), start, goal)
    }

    /// Start an A* run over any pather within the engine's dimensions.
    pub fn search<P: AstarPather>(
        &mut self,
        pather: P,
        start: Pos,
        goal: Pos,
    ) -> Result<Run<'_, P>, SearchError> {
        let dims = self.dims;
        let start_idx = self
            .idx(start)
            .ok_or(SearchError::OutOfBounds { pos: start, dims })?;
        let goal_idx = self
            .idx(goal)
            .ok_or(SearchError::OutOfBounds { pos: goal, dims })?;

        let cur_gen = self.next_generation();
        debug!("A* run {start} -> {goal} on {dims} grid");

        let h = pather.estimate(start, goal);
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.h = h;
            node.f = h;
            node.parent = usize::MAX;
            node.seq = 0;
            node.generation = cur_gen;
            node.open = true;
            node.closed = false;
        }

        let mut open = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: h,
            seq: 0,
        });
        let nbuf = std::mem::take(&mut self.nbuf);

        Ok(Run {
            engine: self,
            pather,
            goal,
            goal_idx,
            cur_gen,
            open,
            seq: 1,
            nbuf,
            pending: VecDeque::new(),
            state: RunState::Idle,
            stats: SearchStats::default(),
        })
    }

    /// Run to completion, handing every event to `sink`.
    pub fn run_with(
        &mut self,
        grid: &GridModel,
        sink: impl FnMut(&SearchEvent),
    ) -> Result<SearchReport, SearchError> {
        let run = self.run(grid)?;
        Ok(animate(run, &mut NoDelay, sink))
    }

    /// Run to completion and collect every event.
    pub fn run_collect(&mut self, grid: &GridModel) -> Result<Vec<SearchEvent>, SearchError> {
        let run = self.run(grid)?;
        Ok(run.collect())
    }

    /// Shortest path from the grid's start to its goal, or `None` if the
    /// goal is unreachable.
    pub fn shortest_path(&mut self, grid: &GridModel) -> Result<Option<Vec<Pos>>, SearchError> {
        let report = self.run_with(grid, |_| {})?;
        Ok(match report.outcome {
            Outcome::Found(path) => Some(path),
            Outcome::NoPath => None,
        })
    }
}

/// A single A* run, yielding [`SearchEvent`]s as an iterator.
///
/// Each call to `next` either returns an event left over from the current
/// step or performs one whole step (pop the best frontier cell, close it,
/// relax its neighbours) and queues the events it produced. The sequence
/// ends right after `PathFound` or `NoPathExists`.
///
/// Frontier order: lowest `f` first; among equal `f`, the cell that joined
/// the frontier first. A cell keeps its join order when its scores improve.
pub struct Run<'e, P> {
    engine: &'e mut PathEngine,
    pather: P,
    goal: Pos,
    goal_idx: usize,
    cur_gen: u32,
    open: BinaryHeap<NodeRef>,
    seq: u64,
    nbuf: Vec<Pos>,
    pending: VecDeque<SearchEvent>,
    state: RunState,
    stats: SearchStats,
}

impl<P: AstarPather> Run<'_, P> {
    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Counters so far.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Read-only access to the engine's node scores mid-run.
    #[inline]
    pub fn engine(&self) -> &PathEngine {
        &*self.engine
    }

    /// Run to completion without pacing, handing every event to `sink`.
    pub fn drive(self, sink: impl FnMut(&SearchEvent)) -> SearchReport {
        animate(self, &mut NoDelay, sink)
    }

    /// Pop the best live frontier entry, skipping stale heap entries.
    fn pop_best(&mut self) -> Option<usize> {
        while let Some(entry) = self.open.pop() {
            let n = &self.engine.nodes[entry.idx];
            if n.generation == self.cur_gen && n.open && n.f == entry.f {
                return Some(entry.idx);
            }
        }
        None
    }

    fn step(&mut self) {
        let Some(ci) = self.pop_best() else {
            debug!(
                "no path: {} evaluated, {} expanded",
                self.stats.evaluated, self.stats.expanded
            );
            self.state = RunState::NoPath;
            self.pending.push_back(SearchEvent::NoPathExists);
            return;
        };

        if ci == self.goal_idx {
            let path = self.engine.trace_back(ci);
            debug!(
                "path found: {} cells, {} evaluated, {} expanded",
                path.len(),
                self.stats.evaluated,
                self.stats.expanded
            );
            self.state = RunState::PathFound;
            self.pending.push_back(SearchEvent::PathFound(path));
            return;
        }

        let current_g = {
            let n = &mut self.engine.nodes[ci];
            n.open = false;
            n.closed = true;
            n.g
        };
        let current = self.engine.pos(ci);
        trace!("evaluating {current} g={current_g}");
        self.stats.evaluated += 1;
        self.pending.push_back(SearchEvent::Evaluating(current));

        self.nbuf.clear();
        self.pather.neighbors(current, &mut self.nbuf);

        for k in 0..self.nbuf.len() {
            let np = self.nbuf[k];
            let Some(ni) = self.engine.idx(np) else {
                continue;
            };
            let tentative_g = current_g + 1;

            let seq = {
                let n = &mut self.engine.nodes[ni];
                if n.generation != self.cur_gen {
                    n.generation = self.cur_gen;
                    n.g = UNREACHABLE;
                    n.open = true;
                    n.closed = false;
                    n.seq = self.seq;
                    self.seq += 1;
                } else if n.closed || tentative_g >= n.g {
                    // Equal cost keeps the first-found predecessor.
                    continue;
                }
                n.seq
            };

            let h = self.pather.estimate(np, self.goal);
            let n = &mut self.engine.nodes[ni];
            n.g = tentative_g;
            n.h = h;
            n.f = tentative_g + h;
            n.parent = ci;
            let f = n.f;

            self.open.push(NodeRef { idx: ni, f, seq });
            self.stats.expanded += 1;
            self.pending
                .push_back(SearchEvent::Expanded(self.engine.path_node(ni)));
        }
    }
}

impl<P: AstarPather> Iterator for Run<'_, P> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        if let Some(ev) = self.pending.pop_front() {
            return Some(ev);
        }
        if self.state.is_terminal() {
            return None;
        }
        self.state = RunState::Running;
        self.step();
        self.pending.pop_front()
    }
}

impl<P> Drop for Run<'_, P> {
    fn drop(&mut self) {
        // Hand the scratch buffer back for the next run.
        self.engine.nbuf = std::mem::take(&mut self.nbuf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NodeStatus;

    fn grid(s: &str) -> GridModel {
        GridModel::parse(s).unwrap()
    }

    fn events(g: &GridModel) -> Vec<SearchEvent> {
        PathEngine::default().run_collect(g).unwrap()
    }

    #[test]
    fn open_3x3_takes_down_then_right() {
        let g = grid(
            "
            S..
            ...
            ..G",
        );
        let path = PathEngine::default().shortest_path(&g).unwrap().unwrap();
        assert_eq!(
            path,
            vec![
                Pos::new(0, 0),
                Pos::new(1, 0),
                Pos::new(2, 0),
                Pos::new(2, 1),
                Pos::new(2, 2)
            ]
        );
    }

    #[test]
    fn first_step_event_order() {
        let g = grid(
            "
            S..
            ...
            ..G",
        );
        let evs = events(&g);
        assert_eq!(evs[0], SearchEvent::Evaluating(Pos::new(0, 0)));
        assert_eq!(
            evs[1],
            SearchEvent::Expanded(crate::PathNode {
                pos: Pos::new(1, 0),
                g: 1,
                h: 3,
                f: 4,
                came_from: Some(Pos::new(0, 0)),
            })
        );
        assert_eq!(evs[2].pos(), Some(Pos::new(0, 1)));
        assert!(evs.last().unwrap().is_terminal());
        assert_eq!(evs.iter().filter(|e| e.is_terminal()).count(), 1);
    }

    #[test]
    fn blocked_column_has_no_path() {
        let g = grid(
            "
            S#.
            .#.
            .#G",
        );
        let evs = events(&g);
        assert_eq!(evs.last(), Some(&SearchEvent::NoPathExists));
        let evaluated = evs
            .iter()
            .filter(|e| matches!(e, SearchEvent::Evaluating(_)))
            .count();
        assert_eq!(evaluated, 3);
    }

    #[test]
    fn missing_endpoints_fails_before_search() {
        let mut g = GridModel::new(3, 3).unwrap();
        let mut engine = PathEngine::default();
        let err = engine.run(&g).err().unwrap();
        assert_eq!(
            err,
            SearchError::MissingEndpoints {
                start: None,
                goal: None
            }
        );
        g.set_start(Pos::new(0, 0)).unwrap();
        let mut seen = 0;
        assert!(engine.run_with(&g, |_| seen += 1).is_err());
        assert_eq!(seen, 0);
    }

    #[test]
    fn start_equals_goal() {
        let mut g = GridModel::new(2, 2).unwrap();
        g.set_start(Pos::new(1, 1)).unwrap();
        g.set_goal(Pos::new(1, 1)).unwrap();
        assert_eq!(events(&g), vec![SearchEvent::PathFound(vec![Pos::new(1, 1)])]);
    }

    #[test]
    fn obstacle_on_goal_is_ignored() {
        let mut g = grid(
            "
            S.G",
        );
        g.toggle_obstacle(Pos::new(0, 2)).unwrap();
        let path = PathEngine::default().shortest_path(&g).unwrap();
        assert_eq!(path.map(|p| p.len()), Some(3));
    }

    #[test]
    fn detour_around_wall() {
        let g = grid(
            "
            S#G
            .#.
            ...",
        );
        let path = PathEngine::default().shortest_path(&g).unwrap().unwrap();
        assert_eq!(path.len(), 7);
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn state_transitions() {
        let g = grid("S.G");
        let mut engine = PathEngine::default();
        let mut run = engine.run(&g).unwrap();
        assert_eq!(run.state(), RunState::Idle);
        assert!(run.next().is_some());
        assert_eq!(run.state(), RunState::Running);
        let rest: Vec<_> = run.by_ref().collect();
        assert!(matches!(rest.last(), Some(SearchEvent::PathFound(_))));
        assert_eq!(run.state(), RunState::PathFound);
        assert_eq!(run.next(), None);
    }

    #[test]
    fn abandoned_run_does_not_leak_into_next() {
        let g = grid(
            "
            S...
            ....
            ...G",
        );
        let mut engine = PathEngine::default();
        {
            let mut run = engine.run(&g).unwrap();
            run.next();
            run.next();
        }
        let report = engine.run_with(&g, |_| {}).unwrap();
        assert_eq!(report.outcome.path().map(<[Pos]>::len), Some(6));
    }

    #[test]
    fn scores_visible_after_run() {
        let g = grid("S..G");
        let mut engine = PathEngine::default();
        engine.run_with(&g, |_| {}).unwrap();
        let n = engine.node(Pos::new(0, 2)).unwrap();
        assert_eq!((n.g, n.h, n.f), (2, 1, 3));
        assert_eq!(n.came_from, Some(Pos::new(0, 1)));
        assert_eq!(engine.status(Pos::new(0, 0)), NodeStatus::Closed);
        assert_eq!(engine.status(Pos::new(0, 3)), NodeStatus::Open);
    }

    #[test]
    fn rerun_hides_previous_scores() {
        let mut engine = PathEngine::default();
        engine.run_with(&grid("S..G\n...."), |_| {}).unwrap();
        assert_eq!(engine.status(Pos::new(0, 2)), NodeStatus::Closed);

        engine.run_with(&grid("SG..\n...."), |_| {}).unwrap();
        assert_eq!(engine.status(Pos::new(0, 2)), NodeStatus::Unvisited);
        let n = engine.node(Pos::new(0, 2)).unwrap();
        assert_eq!((n.g, n.came_from), (UNREACHABLE, None));
        assert_eq!(engine.node(Pos::new(2, 0)), None);
    }

    #[test]
    fn stats_match_events() {
        let g = grid(
            "
            S.#.
            .##.
            ...G",
        );
        let mut engine = PathEngine::default();
        let mut evaluated = 0;
        let mut expanded = 0;
        let report = engine
            .run_with(&g, |ev| match ev {
                SearchEvent::Evaluating(_) => evaluated += 1,
                SearchEvent::Expanded(_) => expanded += 1,
                _ => {}
            })
            .unwrap();
        assert_eq!(report.stats.evaluated, evaluated);
        assert_eq!(report.stats.expanded, expanded);
        assert!(matches!(report.outcome, Outcome::Found(_)));
    }

    #[test]
    fn search_rejects_out_of_bounds_endpoint() {
        let g = GridModel::new(2, 2).unwrap();
        let mut engine = PathEngine::new(g.dims());
        let err = engine
            .search(GridPather::new(&g), Pos::new(0, 0), Pos::new(5, 5))
            .err();
        assert!(matches!(err, Some(SearchError::OutOfBounds { .. })));
    }
}
