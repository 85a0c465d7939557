//! The [`Cell`] type — one lattice position with its search bookkeeping.

use std::fmt;

use crate::geom::{Direction, Point};

/// Sentinel cost meaning "unreachable" (+∞) for `g`, `h` and `f`.
pub const UNREACHABLE: i32 = i32::MAX;

/// Index of a [`Cell`] in its grid's row-major arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    /// The raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// Discovered and queued, not yet expanded.
    Open,
    /// Fully expanded.
    Closed,
    /// On the reconstructed path.
    Path,
}

impl CellState {
    /// Whether this is the Start or End state.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Single-character glyph used by the grid's text form.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Barrier => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Open => 'o',
            Self::Closed => 'x',
            Self::Path => '*',
        }
    }
}

/// A single graph node.
///
/// `f` is kept equal to `g + h` (saturating at [`UNREACHABLE`]) by every
/// setter, so it can never go stale.
#[derive(Clone, Debug)]
pub struct Cell {
    pos: Point,
    state: CellState,
    closed: bool,
    g: i32,
    h: i32,
    f: i32,
    prev: Option<CellId>,
    neighbors: [Option<CellId>; 8],
    queue_item: Option<u64>,
}

impl Cell {
    /// Create an Empty cell at `pos` with no neighbours.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            state: CellState::Empty,
            closed: false,
            g: UNREACHABLE,
            h: UNREACHABLE,
            f: UNREACHABLE,
            prev: None,
            neighbors: [None; 8],
            queue_item: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row()
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col()
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    /// Overwrite the display state.
    #[inline]
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    /// Whether the cell has been expanded in the current run.
    ///
    /// Tracked apart from [`state`](Self::state) so Start and End keep their
    /// display state once expanded.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Best known cost from the start.
    #[inline]
    pub fn g(&self) -> i32 {
        self.g
    }

    /// Heuristic estimate to the end.
    #[inline]
    pub fn h(&self) -> i32 {
        self.h
    }

    /// `g + h`, the queue priority.
    #[inline]
    pub fn f(&self) -> i32 {
        self.f
    }

    pub fn set_g(&mut self, g: i32) {
        debug_assert!(g >= 0, "negative path cost {g}");
        self.g = g;
        self.update_f();
    }

    pub fn set_h(&mut self, h: i32) {
        debug_assert!(h >= 0, "negative heuristic {h}");
        self.h = h;
        self.update_f();
    }

    #[inline]
    fn update_f(&mut self) {
        self.f = self.g.saturating_add(self.h);
    }

    /// Predecessor on the best known path.
    #[inline]
    pub fn prev(&self) -> Option<CellId> {
        self.prev
    }

    #[inline]
    pub fn set_prev(&mut self, prev: Option<CellId>) {
        self.prev = prev;
    }

    /// Neighbour slots, clockwise from north (see [`Direction`]).
    #[inline]
    pub fn neighbors(&self) -> &[Option<CellId>; 8] {
        &self.neighbors
    }

    #[inline]
    pub fn neighbor(&self, d: Direction) -> Option<CellId> {
        self.neighbors[d.index()]
    }

    #[inline]
    pub(crate) fn link(&mut self, d: Direction, other: Option<CellId>) {
        self.neighbors[d.index()] = other;
    }

    /// Sequence number of the cell's currently-valid queue entry, if any.
    #[inline]
    pub fn queue_item(&self) -> Option<u64> {
        self.queue_item
    }

    #[inline]
    pub fn set_queue_item(&mut self, item: Option<u64>) {
        self.queue_item = item;
    }

    /// Drop all search bookkeeping; Open/Closed/Path revert to Empty.
    pub(crate) fn clear_search(&mut self) {
        if matches!(self.state, CellState::Open | CellState::Closed | CellState::Path) {
            self.state = CellState::Empty;
        }
        self.closed = false;
        self.g = UNREACHABLE;
        self.h = UNREACHABLE;
        self.f = UNREACHABLE;
        self.prev = None;
        self.queue_item = None;
    }
}
