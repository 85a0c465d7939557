//! Randomised checks of the search laws on small grids.

use gridstar_core::{CellState, Grid, Point};
use gridstar_search::{Outcome, Searcher, euclidean};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

struct Setup {
    dimension: i32,
    barriers: Vec<Point>,
    start: Point,
    end: Point,
}

impl Setup {
    fn random(rng: &mut StdRng, max_dim: i32, density: u32) -> Self {
        let dimension = rng.random_range(2..=max_dim);
        let mut barriers = Vec::new();
        for y in 0..dimension {
            for x in 0..dimension {
                if rng.random_range(0..100) < density {
                    barriers.push(Point::new(x, y));
                }
            }
        }
        let start = Point::new(rng.random_range(0..dimension), rng.random_range(0..dimension));
        let mut end = start;
        while end == start {
            end = Point::new(rng.random_range(0..dimension), rng.random_range(0..dimension));
        }
        barriers.retain(|&p| p != start && p != end);
        Self {
            dimension,
            barriers,
            start,
            end,
        }
    }

    fn apply(&self, grid: &mut Grid) {
        for &b in &self.barriers {
            grid.set_barrier(b).unwrap();
        }
        grid.set_start(self.start).unwrap();
        grid.set_end(self.end).unwrap();
    }

    fn build(&self) -> Grid {
        let mut grid = Grid::new(self.dimension);
        self.apply(&mut grid);
        grid
    }
}

/// 8-way flood fill from `from`, avoiding barriers.
fn reachable(grid: &Grid, from: Point, to: Point) -> bool {
    let mut seen = vec![false; grid.len()];
    let mut stack = vec![from];
    while let Some(p) = stack.pop() {
        if p == to {
            return true;
        }
        for n in p.neighbors_8() {
            let Some(id) = grid.id(n) else { continue };
            if seen[id.index()] || grid[id].is_barrier() {
                continue;
            }
            seen[id.index()] = true;
            stack.push(n);
        }
    }
    false
}

fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

#[test]
fn found_exactly_when_reachable() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..300 {
        let setup = Setup::random(&mut rng, 9, 35);
        let mut grid = setup.build();
        let expect = reachable(&grid, setup.start, setup.end);
        let report = Searcher::default().run_configured(&mut grid).unwrap().finish();

        match report.outcome {
            Outcome::Found { path, cost } => {
                assert!(expect, "found a path through barriers:\n{grid}");
                let full: Vec<Point> = std::iter::once(setup.start)
                    .chain(path.iter().copied())
                    .chain(std::iter::once(setup.end))
                    .collect();
                let mut sum = 0;
                for w in full.windows(2) {
                    assert!(w[0].is_adjacent(w[1]), "{} -> {}", w[0], w[1]);
                    sum += euclidean(w[0], w[1]);
                }
                for p in &path {
                    assert_eq!(grid.at(*p).unwrap().state(), CellState::Path);
                }
                assert_eq!(cost, sum);
            }
            Outcome::Exhausted => {
                assert!(!expect, "missed a path:\n{grid}");
                assert!(report.events.iter().all(|e| e.state != CellState::Path));
            }
            Outcome::Cancelled => panic!("continuous run cancelled"),
        }
    }
}

#[test]
fn barrier_free_paths_use_fewest_cells() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let setup = Setup::random(&mut rng, 10, 0);
        let mut grid = setup.build();
        let report = Searcher::default().run_configured(&mut grid).unwrap().finish();
        let path = report.outcome.path().expect("empty grid always has a path");
        assert_eq!(
            path.len() as i32,
            chebyshev(setup.start, setup.end) - 1,
            "{} -> {}:\n{grid}",
            setup.start,
            setup.end
        );
    }
}

#[test]
fn reset_and_rebuild_replays_identically() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let setup = Setup::random(&mut rng, 8, 25);
        let mut grid = setup.build();
        let first = Searcher::default().run_configured(&mut grid).unwrap().finish();
        let first_picture = grid.to_string();

        grid.reset();
        setup.apply(&mut grid);
        let second = Searcher::default().run_configured(&mut grid).unwrap().finish();

        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.events, second.events);
        assert_eq!(first.stats, second.stats);
        assert_eq!(first_picture, grid.to_string());
    }
}

#[test]
fn every_expansion_closes_or_keeps_an_endpoint() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let setup = Setup::random(&mut rng, 8, 20);
        let mut grid = setup.build();
        let report = Searcher::default().run_configured(&mut grid).unwrap().finish();
        let closed_events = report
            .events
            .iter()
            .filter(|e| e.state == CellState::Closed)
            .count();
        // The start is expanded first but keeps its Start state.
        assert_eq!(closed_events + 1, report.stats.expanded);
    }
}
