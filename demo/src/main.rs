//! Text-mode front end for gridstar: scatters random barriers over a square
//! grid, searches from the top-left to the bottom-right corner, and prints
//! every cell event followed by the final grid.
//!
//! Run: cargo run -p gridstar-demo -- --size 20 --density 30 --step

mod options;

use std::io::{self, BufRead, Write};

use gridstar_core::{Grid, Point};
use gridstar_search::{Mode, Outcome, SearchRun, Searcher};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use options::{Options, OptionsError};

fn build_grid(opts: &Options) -> Result<Grid, Box<dyn std::error::Error>> {
    let mut grid = Grid::new(opts.size);
    let start = Point::new(0, 0);
    let end = Point::new(opts.size - 1, opts.size - 1);
    let mut rng = StdRng::seed_from_u64(opts.seed);
    for y in 0..opts.size {
        for x in 0..opts.size {
            let p = Point::new(x, y);
            if p != start && p != end && rng.random_range(0..100) < opts.density {
                grid.set_barrier(p)?;
            }
        }
    }
    grid.set_start(start)?;
    grid.set_end(end)?;
    Ok(grid)
}

/// Drive a stepped run from stdin: Enter advances, `q` cancels.
fn step_interactively(run: &mut SearchRun<'_>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let status = run.advance();
        for e in run.drain_events() {
            println!("{e}");
        }
        if status.is_terminal() {
            return Ok(());
        }
        if let Some(p) = run.current() {
            println!("{}\n-- popped {p} [Enter: advance, q: cancel]", run.grid());
        } else {
            println!("{}\n-- relaxed [Enter: advance, q: cancel]", run.grid());
        }
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => String::from("q"),
        };
        if line.trim() == "q" {
            run.cancel();
            return Ok(());
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = match Options::parse(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(OptionsError::Help) => {
            println!("{}", options::USAGE);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut grid = build_grid(&opts)?;
    for e in grid.drain_events() {
        log::debug!("config: {e}");
    }
    log::info!(
        "{0}x{0} grid, {1}% barriers, seed {2}, {3:?} {4:?}",
        opts.size,
        opts.density,
        opts.seed,
        opts.config.mode,
        opts.config.metric
    );

    let searcher = Searcher::new(opts.config);
    let mut run = searcher.run_configured(&mut grid)?;
    match opts.config.mode {
        Mode::Stepped => step_interactively(&mut run)?,
        Mode::Continuous => {
            for e in &mut run {
                println!("{e}");
            }
        }
    }
    let status = run.status();
    let outcome = run.outcome();
    let stats = run.stats();
    drop(run);

    println!("{grid}");
    match outcome {
        Some(Outcome::Found { path, cost }) => {
            println!("found: {} cells between the endpoints, cost {cost}", path.len())
        }
        Some(Outcome::Exhausted) => println!("no path"),
        Some(Outcome::Cancelled) | None => println!("cancelled"),
    }
    log::info!(
        "{status:?}: expanded {}, pushed {}, skipped {} stale",
        stats.expanded,
        stats.pushes,
        stats.stale_pops
    );
    Ok(())
}
