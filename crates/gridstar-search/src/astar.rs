//! A* over the 8-connected lattice.
//!
//! A run is an explicit resumable state object ([`SearchRun`]) rather than a
//! blocking loop, so stepped execution is just a matter of when the caller
//! calls [`SearchRun::advance`] again:
//!
//! ```text
//! Idle ──advance──▶ Running ──▶ Found | Exhausted | Cancelled
//! ```

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use gridstar_core::{CellEvent, CellId, CellState, Direction, Grid, Point};

use crate::config::{Metric, Mode, SearchConfig};
use crate::error::{EndpointProblem, SearchError};
use crate::queue::SearchQueue;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Where a run is in its life cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Initialised, not yet advanced.
    Idle,
    /// Suspended between steps.
    Running,
    /// Reached the end cell.
    Found,
    /// The open list ran dry: no path exists.
    Exhausted,
    /// Stopped by [`SearchRun::cancel`].
    Cancelled,
}

impl Status {
    /// Whether the run can make no further progress.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted | Self::Cancelled)
    }
}

/// Terminal result of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// `path` holds the intermediate cells in start → end order (both
    /// endpoints excluded); `cost` is `f` of the end cell.
    Found { path: Vec<Point>, cost: i32 },
    Exhausted,
    Cancelled,
}

impl Outcome {
    /// The intermediate cells, if a path was found.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Found { path, .. } => Some(path.as_slice()),
            _ => None,
        }
    }

    /// The path cost, if a path was found.
    pub fn cost(&self) -> Option<i32> {
        match self {
            Self::Found { cost, .. } => Some(*cost),
            _ => None,
        }
    }
}

/// Counters collected during a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells whose neighbours were relaxed.
    pub expanded: usize,
    /// Queue entries created, including re-pushes after a cost improvement.
    pub pushes: u64,
    /// Superseded entries discarded on pop.
    pub stale_pops: usize,
}

/// Everything a completed run produced.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub outcome: Outcome,
    /// Events not drained before the run completed.
    pub events: Vec<CellEvent>,
    pub stats: SearchStats,
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Entry point for A* runs.
#[derive(Clone, Debug, Default)]
pub struct Searcher {
    config: SearchConfig,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Start a run from `start` to `end`.
    ///
    /// Endpoints must agree with the grid's configured Start/End, if any.
    ///
    /// Bookkeeping from any previous run is wiped (see [`Grid::clear_search`])
    /// and links to barriers are pruned before the start cell is queued. The
    /// run borrows the grid mutably until it is dropped, so the grid cannot be
    /// reconfigured mid-run.
    pub fn run<'g>(
        &self,
        grid: &'g mut Grid,
        start: Point,
        end: Point,
    ) -> Result<SearchRun<'g>, SearchError> {
        let invalid = SearchError::InvalidEndpoints;
        let s = grid
            .id(start)
            .ok_or(invalid(EndpointProblem::OutOfBounds(start)))?;
        let e = grid
            .id(end)
            .ok_or(invalid(EndpointProblem::OutOfBounds(end)))?;
        if s == e {
            return Err(invalid(EndpointProblem::Identical(start)));
        }
        for (id, p) in [(s, start), (e, end)] {
            if grid[id].is_barrier() {
                return Err(invalid(EndpointProblem::Barrier(p)));
            }
        }
        if grid.start().is_some_and(|id| id != s) {
            return Err(invalid(EndpointProblem::Conflict(start)));
        }
        if grid.end().is_some_and(|id| id != e) {
            return Err(invalid(EndpointProblem::Conflict(end)));
        }

        log::debug!(
            "astar: {start} -> {end} on {dim}x{dim} ({:?}, {:?})",
            self.config.mode,
            self.config.metric,
            dim = grid.dimension(),
        );

        grid.clear_search();
        grid.prune_barrier_links();

        let metric = self.config.metric;
        let mut queue = SearchQueue::new();
        let mut in_queue = FixedBitSet::with_capacity(grid.len());
        grid[s].set_g(0);
        grid[s].set_h(metric.distance(start, end));
        queue.push(grid, s);
        in_queue.insert(s.index());

        Ok(SearchRun {
            grid,
            mode: self.config.mode,
            metric,
            start: s,
            end: e,
            queue,
            in_queue,
            phase: Phase::Select,
            status: Status::Idle,
            events: VecDeque::new(),
            path: Vec::new(),
            expanded: 0,
        })
    }

    /// Run with the grid's own Start and End cells.
    pub fn run_configured<'g>(&self, grid: &'g mut Grid) -> Result<SearchRun<'g>, SearchError> {
        let start = grid.start().map(|id| grid.pos(id));
        let end = grid.end().map(|id| grid.pos(id));
        match (start, end) {
            (Some(start), Some(end)) => self.run(grid, start, end),
            _ => Err(SearchError::InvalidEndpoints(EndpointProblem::Missing)),
        }
    }

    /// Run from `start` to `end` to completion, ignoring the configured mode.
    pub fn search(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
    ) -> Result<SearchReport, SearchError> {
        Ok(self.run(grid, start, end)?.finish())
    }
}

// ---------------------------------------------------------------------------
// SearchRun
// ---------------------------------------------------------------------------

/// Next unit of work of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    /// Pop the best valid candidate.
    Select,
    /// Relax the neighbours of the popped cell, then close it.
    Expand(CellId),
    Done,
}

/// An in-progress A* run over a borrowed grid.
///
/// In [`Mode::Stepped`], each [`advance`](Self::advance) performs one phase
/// and suspends: after a cell is popped, and again after its neighbours have
/// been relaxed. In [`Mode::Continuous`], `advance` runs to a terminal state.
///
/// State changes are buffered as [`CellEvent`]s; take them with
/// [`drain_events`](Self::drain_events), or iterate the run itself to drive
/// it lazily event by event.
pub struct SearchRun<'g> {
    grid: &'g mut Grid,
    mode: Mode,
    metric: Metric,
    start: CellId,
    end: CellId,
    queue: SearchQueue,
    /// Cells holding a currently-valid queue entry.
    in_queue: FixedBitSet,
    phase: Phase,
    status: Status,
    events: VecDeque<CellEvent>,
    path: Vec<Point>,
    expanded: usize,
}

impl SearchRun<'_> {
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The grid in its current partial state.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// The cell that has been popped but not yet expanded, if suspended
    /// between the two steps of an expansion.
    pub fn current(&self) -> Option<Point> {
        match self.phase {
            Phase::Expand(id) => Some(self.grid.pos(id)),
            _ => None,
        }
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            expanded: self.expanded,
            pushes: self.queue.pushes(),
            stale_pops: self.queue.stale_pops(),
        }
    }

    /// The terminal result, or `None` while the run can still progress.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Found => Some(Outcome::Found {
                path: self.path.clone(),
                cost: self.grid[self.end].f(),
            }),
            Status::Exhausted => Some(Outcome::Exhausted),
            Status::Cancelled => Some(Outcome::Cancelled),
            Status::Idle | Status::Running => None,
        }
    }

    /// Resume the run up to the next suspension point (stepped mode) or to
    /// completion (continuous mode). No-op once terminal.
    pub fn advance(&mut self) -> Status {
        match self.mode {
            Mode::Stepped => {
                self.step();
            }
            Mode::Continuous => {
                while !self.step().is_terminal() {}
            }
        }
        self.status
    }

    /// Stop the run, leaving the grid in its partial state. No-op once
    /// terminal.
    pub fn cancel(&mut self) -> Status {
        if !self.status.is_terminal() {
            log::debug!("astar: cancelled after {} expansions", self.expanded);
            self.phase = Phase::Done;
            self.status = Status::Cancelled;
        }
        self.status
    }

    /// Take the buffered events.
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, CellEvent> {
        self.events.drain(..)
    }

    /// Run to completion regardless of mode and collect the result.
    pub fn finish(mut self) -> SearchReport {
        while !self.step().is_terminal() {}
        SearchReport {
            outcome: self.outcome().unwrap_or(Outcome::Cancelled),
            events: self.events.drain(..).collect(),
            stats: self.stats(),
        }
    }

    /// Perform one phase.
    fn step(&mut self) -> Status {
        match self.phase {
            Phase::Select => {
                self.status = Status::Running;
                self.select();
            }
            Phase::Expand(current) => {
                self.expand(current);
                self.phase = Phase::Select;
            }
            Phase::Done => {}
        }
        self.status
    }

    fn select(&mut self) {
        let Some(entry) = self.queue.pop_valid(self.grid) else {
            self.terminate(Status::Exhausted);
            return;
        };
        let current = entry.cell;
        self.in_queue.set(current.index(), false);
        if current == self.end {
            self.trace_path();
            self.terminate(Status::Found);
            return;
        }
        self.phase = Phase::Expand(current);
    }

    fn expand(&mut self, current: CellId) {
        let cur_pos = self.grid.pos(current);
        let cur_g = self.grid[current].g();
        let end_pos = self.grid.pos(self.end);
        log::trace!("astar: expanding {cur_pos} (g={cur_g})");

        for d in Direction::ALL {
            let Some(n) = self.grid[current].neighbor(d) else {
                continue;
            };
            if self.grid[n].is_closed() {
                continue;
            }
            debug_assert!(!self.grid[n].is_barrier(), "barrier link survived pruning");
            let n_pos = self.grid.pos(n);
            let tentative = cur_g + self.metric.distance(cur_pos, n_pos);

            let cell = &mut self.grid[n];
            let updated = tentative < cell.g();
            if updated {
                cell.set_g(tentative);
                cell.set_prev(Some(current));
            }
            cell.set_h(self.metric.distance(n_pos, end_pos));

            if !self.in_queue.contains(n.index()) {
                self.queue.push(self.grid, n);
                self.in_queue.insert(n.index());
                self.transition(n, CellState::Open);
            } else if updated {
                self.queue.push(self.grid, n);
            }
        }

        self.grid[current].set_closed(true);
        self.transition(current, CellState::Closed);
        self.expanded += 1;
    }

    /// Walk `prev` back from the end, marking the cells between the
    /// endpoints as Path. Events follow the walk (end → start); the stored
    /// path is in start → end order.
    fn trace_path(&mut self) {
        let mut path = Vec::new();
        let mut cur = self.grid[self.end].prev();
        while let Some(id) = cur {
            if id == self.start {
                break;
            }
            self.transition(id, CellState::Path);
            path.push(self.grid.pos(id));
            cur = self.grid[id].prev();
        }
        debug_assert!(cur == Some(self.start), "prev chain does not reach the start");
        path.reverse();
        self.path = path;
    }

    /// Change a cell's display state and record the event. The endpoints keep
    /// their display state.
    fn transition(&mut self, id: CellId, state: CellState) {
        if id == self.start || id == self.end {
            return;
        }
        let cell = &mut self.grid[id];
        cell.set_state(state);
        self.events
            .push_back(CellEvent::new(cell.pos(), state, cell.f()));
    }

    fn terminate(&mut self, status: Status) {
        self.phase = Phase::Done;
        self.status = status;
        let stats = self.stats();
        log::debug!(
            "astar: {status:?} after {} expansions ({} pushes, {} stale)",
            stats.expanded,
            stats.pushes,
            stats.stale_pops
        );
    }
}

impl Iterator for SearchRun<'_> {
    type Item = CellEvent;

    /// Yield the next event, advancing the run phase by phase as needed
    /// (suspension points are not honoured).
    fn next(&mut self) -> Option<CellEvent> {
        loop {
            if let Some(e) = self.events.pop_front() {
                return Some(e);
            }
            if self.status.is_terminal() {
                return None;
            }
            self.step();
        }
    }
}
