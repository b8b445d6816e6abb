//! Terminal A* demo.
//!
//! Run: cargo run --bin gridpath-demo -- --rows 16 --cols 30 --seed 7

use std::error::Error;
use std::fs;
use std::io;
use std::time::Duration;

use clap::Parser;
use env_logger::Env;
use gridpath_core::GridModel;
use gridpath_demo::{Canvas, DemoConfig, TermView, seeded_grid, summary};
use gridpath_search::{FixedDelay, PathEngine, SearchError};
use log::{info, warn};

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cfg = DemoConfig::parse();

    if let Err(e) = run(&cfg) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cfg: &DemoConfig) -> Result<(), Box<dyn Error>> {
    let grid = match &cfg.layout {
        Some(path) => GridModel::parse(&fs::read_to_string(path)?)?,
        None => seeded_grid(cfg)?,
    };
    info!(
        "grid {} with {} obstacles",
        grid.dims(),
        grid.obstacle_count()
    );

    let mut engine = PathEngine::new(grid.dims());

    if cfg.no_animate {
        let mut canvas = Canvas::from_grid(&grid);
        let report = match engine.run_with(&grid, |ev| {
            canvas.apply(ev);
        }) {
            Ok(report) => report,
            Err(e @ SearchError::MissingEndpoints { .. }) => return notice(&e),
            Err(e) => return Err(e.into()),
        };
        println!("{canvas}");
        println!("{}", summary(&report));
        return Ok(());
    }

    let run = match engine.run(&grid) {
        Ok(run) => run,
        Err(e @ SearchError::MissingEndpoints { .. }) => return notice(&e),
        Err(e) => return Err(e.into()),
    };
    let mut pace = FixedDelay::uniform(Duration::from_millis(cfg.delay_ms));
    let mut view = TermView::new(io::stdout(), Canvas::from_grid(&grid));
    view.begin()?;
    let report = view.play(run, &mut pace)?;
    view.end(&summary(&report))?;
    info!("{}", summary(&report));
    Ok(())
}

/// Missing endpoints are a user mistake, reported without failing.
fn notice(e: &SearchError) -> Result<(), Box<dyn Error>> {
    warn!("{e}");
    eprintln!("{e}: place a start (S) and a goal (G) in the layout");
    Ok(())
}
