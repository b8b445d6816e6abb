//! Pacing between search events.
//!
//! The search itself never sleeps. A presentation layer that wants a visible
//! animation passes a [`Pace`] to [`animate`], which pauses only between
//! events, never inside a step.

use std::thread;
use std::time::Duration;

use crate::event::{Outcome, SearchEvent, SearchReport, SearchStats};
use crate::traits::AstarPather;
use crate::Run;

/// Default pause after each evaluated cell, and per cell when revealing the
/// final path.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(50);

/// Decides how long to wait after an event has been handed to the sink.
pub trait Pace {
    /// Called after every non-terminal event.
    fn pause(&mut self, event: &SearchEvent);

    /// Called by presentation code once per cell while revealing a found
    /// path.
    fn pause_path_cell(&mut self) {}
}

/// No pacing at all; runs as fast as the search goes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pace for NoDelay {
    #[inline]
    fn pause(&mut self, _event: &SearchEvent) {}
}

/// Sleep a fixed time after each evaluated cell and per revealed path cell.
/// `Expanded` events are not paced, so a step's frontier updates show up
/// together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    pub step: Duration,
    pub path_cell: Duration,
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP_DELAY,
            path_cell: DEFAULT_STEP_DELAY,
        }
    }
}

impl FixedDelay {
    /// The same delay for steps and path cells.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            step: delay,
            path_cell: delay,
        }
    }
}

impl Pace for FixedDelay {
    fn pause(&mut self, event: &SearchEvent) {
        if matches!(event, SearchEvent::Evaluating(_)) && !self.step.is_zero() {
            thread::sleep(self.step);
        }
    }

    fn pause_path_cell(&mut self) {
        if !self.path_cell.is_zero() {
            thread::sleep(self.path_cell);
        }
    }
}

/// Any closure over events works as a pacer, e.g. to count pauses in tests
/// or to yield to an event loop.
impl<F: FnMut(&SearchEvent)> Pace for F {
    fn pause(&mut self, event: &SearchEvent) {
        self(event)
    }
}

/// Drive `run` to completion: each event goes to `sink`, then to `pace`
/// unless it is the terminal event.
pub fn animate<P, Q>(run: Run<'_, P>, pace: &mut Q, mut sink: impl FnMut(&SearchEvent)) -> SearchReport
where
    P: AstarPather,
    Q: Pace + ?Sized,
{
    let mut outcome = Outcome::NoPath;
    let mut stats = SearchStats::default();
    for event in run {
        match &event {
            SearchEvent::Evaluating(_) => stats.evaluated += 1,
            SearchEvent::Expanded(_) => stats.expanded += 1,
            SearchEvent::PathFound(path) => outcome = Outcome::Found(path.clone()),
            SearchEvent::NoPathExists => outcome = Outcome::NoPath,
        }
        sink(&event);
        if !event.is_terminal() {
            pace.pause(&event);
        }
    }
    SearchReport { outcome, stats }
}
