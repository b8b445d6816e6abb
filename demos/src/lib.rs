//! Terminal presentation of a gridpath search.
//!
//! Demonstrates the event protocol end to end: a [`Canvas`] turns
//! [`SearchEvent`]s into per-cell shades, and a [`TermView`] paints them with
//! crossterm, pausing between events through a [`Pace`].

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use gridpath_core::{Dims, GridError, GridModel, Pos};
use gridpath_search::{AstarPather, Outcome, Pace, Run, SearchEvent, SearchReport};
use rand::{Rng, RngExt, SeedableRng};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Animate an A* search on a grid in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct DemoConfig {
    /// Number of rows of a generated grid.
    #[arg(long, default_value_t = 12)]
    pub rows: i32,

    /// Number of columns of a generated grid.
    #[arg(long, default_value_t = 12)]
    pub cols: i32,

    /// Share of cells turned into obstacles in a generated grid.
    #[arg(long, default_value_t = 0.25)]
    pub density: f64,

    /// Seed for the generated grid; random if omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause after each evaluated cell and each revealed path cell.
    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Read the grid from a text layout (`.` open, `#` obstacle, `S`, `G`, `B`).
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Print the final picture only, without terminal animation.
    #[arg(long)]
    pub no_animate: bool,
}

/// Build a `rows x cols` grid with obstacles at the given density, the start
/// in the top-left corner and the goal in the bottom-right one.
pub fn random_grid<R: Rng + ?Sized>(
    rng: &mut R,
    rows: i32,
    cols: i32,
    density: f64,
) -> Result<GridModel, GridError> {
    let mut grid = GridModel::new(rows, cols)?;
    for p in grid.dims() {
        let r: f64 = rng.random();
        if r < density {
            grid.set_obstacle(p, true)?;
        }
    }
    grid.set_start(Pos::new(0, 0))?;
    grid.set_goal(Pos::new(rows - 1, cols - 1))?;
    Ok(grid)
}

/// [`random_grid`] from an optional seed.
pub fn seeded_grid(cfg: &DemoConfig) -> Result<GridModel, GridError> {
    let mut rng = match cfg.seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => rand::rngs::StdRng::seed_from_u64(rand::rng().random()),
    };
    random_grid(&mut rng, cfg.rows, cfg.cols, cfg.density)
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// What a cell currently looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    Open,
    Obstacle,
    Start,
    Goal,
    Frontier,
    Evaluated,
    Path,
}

impl Shade {
    fn ch(self) -> char {
        match self {
            Self::Open => '.',
            Self::Obstacle => '#',
            Self::Start => 'S',
            Self::Goal => 'G',
            Self::Frontier => '+',
            Self::Evaluated => 'o',
            Self::Path => '*',
        }
    }

    fn color(self) -> Color {
        match self {
            Self::Open => COL_OPEN,
            Self::Obstacle => COL_OBSTACLE,
            Self::Start => COL_START,
            Self::Goal => COL_GOAL,
            Self::Frontier => COL_FRONTIER,
            Self::Evaluated => COL_EVALUATED,
            Self::Path => COL_PATH,
        }
    }

    fn is_search(self) -> bool {
        matches!(self, Self::Frontier | Self::Evaluated)
    }
}

const COL_OPEN: Color = Color::Rgb { r: 235, g: 235, b: 235 };
const COL_OBSTACLE: Color = Color::Rgb { r: 40, g: 40, b: 50 };
const COL_START: Color = Color::Rgb { r: 60, g: 180, b: 75 };
const COL_GOAL: Color = Color::Rgb { r: 220, g: 50, b: 50 };
const COL_FRONTIER: Color = Color::Rgb { r: 150, g: 200, b: 255 };
const COL_EVALUATED: Color = Color::Rgb { r: 255, g: 210, b: 90 };
const COL_PATH: Color = Color::Rgb { r: 50, g: 120, b: 255 };
const COL_TEXT: Color = Color::Rgb { r: 200, g: 200, b: 200 };

/// Per-cell shades of a grid as search events arrive. Start and goal keep
/// their shade whatever happens to them.
#[derive(Clone, Debug)]
pub struct Canvas {
    dims: Dims,
    shades: Vec<Shade>,
}

impl Canvas {
    pub fn from_grid(grid: &GridModel) -> Self {
        let shades = grid
            .iter()
            .map(|(_, c)| {
                if c.is_start {
                    Shade::Start
                } else if c.is_goal {
                    Shade::Goal
                } else if c.is_obstacle {
                    Shade::Obstacle
                } else {
                    Shade::Open
                }
            })
            .collect();
        Self {
            dims: grid.dims(),
            shades,
        }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Shade at `p`; out-of-range positions read as open.
    pub fn shade(&self, p: Pos) -> Shade {
        self.dims
            .index(p)
            .map_or(Shade::Open, |i| self.shades[i])
    }

    /// Update the canvas for `event` and return the cells that changed.
    pub fn apply(&mut self, event: &SearchEvent) -> Vec<Pos> {
        match event {
            SearchEvent::Evaluating(p) => self.paint(*p, Shade::Evaluated).into_iter().collect(),
            SearchEvent::Expanded(n) => self.paint(n.pos, Shade::Frontier).into_iter().collect(),
            SearchEvent::PathFound(path) => {
                let mut changed = self.clear_search();
                changed.extend(path.iter().filter_map(|&p| self.paint(p, Shade::Path)));
                changed
            }
            SearchEvent::NoPathExists => Vec::new(),
        }
    }

    /// Turn every frontier and evaluated cell back to open.
    pub fn clear_search(&mut self) -> Vec<Pos> {
        let mut changed = Vec::new();
        for (i, s) in self.shades.iter_mut().enumerate() {
            if s.is_search() {
                *s = Shade::Open;
                changed.push(self.dims.pos(i));
            }
        }
        changed
    }

    /// Set the shade of a non-endpoint cell; returns `p` if it changed.
    pub fn paint(&mut self, p: Pos, shade: Shade) -> Option<Pos> {
        let i = self.dims.index(p)?;
        let cur = &mut self.shades[i];
        if matches!(*cur, Shade::Start | Shade::Goal) || *cur == shade {
            return None;
        }
        *cur = shade;
        Some(p)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.shades.iter().enumerate() {
            if i > 0 && self.dims.pos(i).col == 0 {
                writeln!(f)?;
            }
            write!(f, "{}", s.ch())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TermView
// ---------------------------------------------------------------------------

/// Paints a [`Canvas`] into a terminal, two columns per cell.
///
/// Between [`begin`](TermView::begin) and [`end`](TermView::end) the cursor
/// is hidden; dropping the view in that window shows it again.
pub struct TermView<W: Write> {
    out: W,
    canvas: Canvas,
    active: bool,
}

impl<W: Write> TermView<W> {
    pub fn new(out: W, canvas: Canvas) -> Self {
        Self {
            out,
            canvas,
            active: false,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Clear the screen, hide the cursor and draw the whole grid.
    pub fn begin(&mut self) -> io::Result<()> {
        self.active = true;
        execute!(self.out, terminal::Clear(ClearType::All), cursor::Hide)?;
        for p in self.canvas.dims() {
            self.draw_cell(p)?;
        }
        self.out.flush()
    }

    /// Play `run` to completion, pacing between events and while revealing
    /// the path.
    pub fn play<P, Q>(&mut self, mut run: Run<'_, P>, pace: &mut Q) -> io::Result<SearchReport>
    where
        P: AstarPather,
        Q: Pace + ?Sized,
    {
        let mut outcome = Outcome::NoPath;
        for event in run.by_ref() {
            match &event {
                SearchEvent::PathFound(path) => {
                    for p in self.canvas.clear_search() {
                        self.draw_cell(p)?;
                    }
                    for &p in path {
                        if self.canvas.paint(p, Shade::Path).is_some() {
                            self.draw_cell(p)?;
                            self.out.flush()?;
                            pace.pause_path_cell();
                        }
                    }
                    outcome = Outcome::Found(path.clone());
                }
                SearchEvent::NoPathExists => {}
                ev => {
                    for p in self.canvas.apply(ev) {
                        self.draw_cell(p)?;
                    }
                    self.out.flush()?;
                    pace.pause(ev);
                }
            }
        }
        Ok(SearchReport {
            outcome,
            stats: run.stats(),
        })
    }

    /// Print a status line under the grid and restore the cursor.
    pub fn end(&mut self, msg: &str) -> io::Result<()> {
        let (_, below) = screen_xy(Pos::new(self.canvas.dims().rows.max(0).saturating_add(1), 0))?;
        queue!(
            self.out,
            cursor::MoveTo(0, below),
            SetForegroundColor(COL_TEXT),
            Print(msg),
            ResetColor,
            Print("\n"),
            cursor::Show
        )?;
        self.out.flush()?;
        self.active = false;
        Ok(())
    }

    fn draw_cell(&mut self, p: Pos) -> io::Result<()> {
        let shade = self.canvas.shade(p);
        let (x, y) = screen_xy(p)?;
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetBackgroundColor(shade.color()),
            Print("  "),
            ResetColor
        )
    }
}

impl<W: Write> Drop for TermView<W> {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(self.out, ResetColor, cursor::Show);
        }
    }
}

/// Terminal column and row of the top-left corner of cell `p`.
fn screen_xy(p: Pos) -> io::Result<(u16, u16)> {
    let x = p.col.checked_mul(2).and_then(|x| u16::try_from(x).ok());
    let y = u16::try_from(p.row).ok();
    match (x, y) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("cell {p} does not fit on a terminal screen"),
        )),
    }
}

/// One-line summary of a finished run.
pub fn summary(report: &SearchReport) -> String {
    let s = report.stats;
    match &report.outcome {
        Outcome::Found(path) => format!(
            "Path found: {} cells ({} evaluated, {} expanded)",
            path.len(),
            s.evaluated,
            s.expanded
        ),
        Outcome::NoPath => format!(
            "No path exists ({} evaluated, {} expanded)",
            s.evaluated, s.expanded
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_search::{NoDelay, PathEngine};
    use rand::rngs::StdRng;

    const LAYOUT: &str = "
        S.#
        ..#
        ..G";

    #[test]
    fn canvas_starts_from_layout() {
        let g = GridModel::parse(LAYOUT).unwrap();
        assert_eq!(Canvas::from_grid(&g).to_string(), "S.#\n..#\n..G");
    }

    #[test]
    fn canvas_tracks_events() {
        let g = GridModel::parse(LAYOUT).unwrap();
        let mut canvas = Canvas::from_grid(&g);
        PathEngine::default()
            .run_with(&g, |ev| {
                canvas.apply(ev);
            })
            .unwrap();
        assert_eq!(canvas.to_string(), "S.#\n*.#\n**G");
    }

    #[test]
    fn endpoints_are_never_repainted() {
        let g = GridModel::parse(LAYOUT).unwrap();
        let mut canvas = Canvas::from_grid(&g);
        assert_eq!(canvas.paint(Pos::new(0, 0), Shade::Evaluated), None);
        assert_eq!(canvas.shade(Pos::new(0, 0)), Shade::Start);
        assert_eq!(canvas.paint(Pos::new(0, 1), Shade::Frontier), Some(Pos::new(0, 1)));
        assert_eq!(canvas.paint(Pos::new(0, 1), Shade::Frontier), None);
    }

    #[test]
    fn play_writes_frames_and_reports() {
        let g = GridModel::parse(LAYOUT).unwrap();
        let mut engine = PathEngine::default();
        let mut view = TermView::new(Vec::new(), Canvas::from_grid(&g));
        view.begin().unwrap();
        let report = view.play(engine.run(&g).unwrap(), &mut NoDelay).unwrap();
        view.end(&summary(&report)).unwrap();
        assert_eq!(report.outcome.path().map(<[Pos]>::len), Some(5));
        assert!(report.stats.evaluated > 0);
        assert_eq!(view.canvas().to_string(), "S.#\n*.#\n**G");
        assert!(!view.out.is_empty());
    }

    #[test]
    fn dropping_mid_play_restores_cursor() {
        let g = GridModel::parse(LAYOUT).unwrap();
        let mut buf = Vec::new();
        {
            let mut view = TermView::new(&mut buf, Canvas::from_grid(&g));
            view.begin().unwrap();
        }
        let text = String::from_utf8_lossy(&buf);
        assert!(text.ends_with("\x1b[?25h"), "{text:?}");
    }

    #[test]
    fn end_disarms_drop_guard() {
        let g = GridModel::parse(LAYOUT).unwrap();
        let mut buf = Vec::new();
        {
            let mut view = TermView::new(&mut buf, Canvas::from_grid(&g));
            view.begin().unwrap();
            view.end("done").unwrap();
        }
        let text = String::from_utf8_lossy(&buf);
        assert_eq!(text.matches("\x1b[?25h").count(), 1);
    }

    #[test]
    fn oversized_grid_is_rejected_not_wrapped() {
        let g = GridModel::new(1, 40_000).unwrap();
        let mut view = TermView::new(Vec::new(), Canvas::from_grid(&g));
        let err = view.begin().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(screen_xy(Pos::new(3, 5)).unwrap(), (10, 3));
        assert!(screen_xy(Pos::new(70_000, 0)).is_err());
        assert!(screen_xy(Pos::new(0, -1)).is_err());
    }

    #[test]
    fn random_grid_places_endpoints_in_corners() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = random_grid(&mut rng, 5, 7, 0.5).unwrap();
        assert_eq!(g.start(), Some(Pos::new(0, 0)));
        assert_eq!(g.goal(), Some(Pos::new(4, 6)));
        assert!(random_grid(&mut rng, 0, 7, 0.5).is_err());
    }

    #[test]
    fn summary_mentions_outcome() {
        let report = SearchReport {
            outcome: Outcome::NoPath,
            stats: Default::default(),
        };
        assert!(summary(&report).starts_with("No path exists"));
    }

    #[test]
    fn config_parses_flags() {
        let cfg = DemoConfig::parse_from(["gridpath-demo", "--rows", "5", "--seed", "3", "--no-animate"]);
        assert_eq!(cfg.rows, 5);
        assert_eq!(cfg.cols, 12);
        assert_eq!(cfg.seed, Some(3));
        assert!(cfg.no_animate);
        assert_eq!(cfg.delay_ms, 50);
    }
}
