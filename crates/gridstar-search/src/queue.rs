//! Min-priority queue of search candidates with lazy invalidation.
//!
//! There is no decrease-key: when a queued cell gets cheaper, a fresh entry
//! is pushed and becomes the cell's current item. The old entry stays in the
//! heap and is reported as invalid when it is eventually popped.
//!
//! Entries are stored in a min-heap keyed by `(f, h, sequence)`. Lower `f`
//! pops first; ties prefer the lower `h` (closer to the goal) and then the
//! earlier push.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use gridstar_core::{CellId, Grid};

/// A queue admission ticket for one cell.
#[derive(Debug, Clone, Copy)]
pub struct PriorityEntry {
    pub cell: CellId,
    /// Monotonically increasing per queue; the final tie-break.
    pub sequence: u64,
    /// Snapshot of the cell's `f` when pushed.
    pub f: i32,
    /// Snapshot of the cell's `h` when pushed.
    pub h: i32,
    /// Whether the entry was still its cell's current item when popped.
    /// Always `true` on the value returned by [`SearchQueue::push`].
    pub valid: bool,
}

impl PriorityEntry {
    #[inline]
    fn key(&self) -> (i32, i32, u64) {
        (self.f, self.h, self.sequence)
    }
}

impl PartialEq for PriorityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PriorityEntry {}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order; the heap wraps entries in `Reverse`.
        self.key().cmp(&other.key())
    }
}

/// The open list of an A* run.
#[derive(Debug, Default)]
pub struct SearchQueue {
    heap: BinaryHeap<Reverse<PriorityEntry>>,
    seq: u64,
    stale: usize,
}

impl SearchQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `cell` with its current `f`/`h`, making the new entry the cell's
    /// current item. Any earlier entry for the cell becomes invalid.
    pub fn push(&mut self, grid: &mut Grid, cell: CellId) -> PriorityEntry {
        let sequence = self.seq;
        self.seq += 1;
        let c = grid.cell_mut(cell);
        c.set_queue_item(Some(sequence));
        let entry = PriorityEntry {
            cell,
            sequence,
            f: c.f(),
            h: c.h(),
            valid: true,
        };
        self.heap.push(Reverse(entry));
        entry
    }

    /// Remove the minimum entry.
    ///
    /// The caller must check [`PriorityEntry::valid`] and pop again when it
    /// is `false`. Popping a valid entry unbinds it from its cell.
    pub fn pop(&mut self, grid: &mut Grid) -> Option<PriorityEntry> {
        let Reverse(mut entry) = self.heap.pop()?;
        let cell = grid.cell_mut(entry.cell);
        entry.valid = cell.queue_item() == Some(entry.sequence);
        if entry.valid {
            cell.set_queue_item(None);
        } else {
            self.stale += 1;
        }
        Some(entry)
    }

    /// Pop until a valid entry is found or the queue runs dry.
    pub fn pop_valid(&mut self, grid: &mut Grid) -> Option<PriorityEntry> {
        while let Some(entry) = self.pop(grid) {
            if entry.valid {
                return Some(entry);
            }
            log::trace!("skipping stale entry #{} for {}", entry.sequence, grid.pos(entry.cell));
        }
        None
    }

    /// Whether the heap holds no entries (valid or not).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries in the heap, including invalid ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Number of entries pushed so far.
    #[inline]
    pub fn pushes(&self) -> u64 {
        self.seq
    }

    /// Number of invalid entries popped so far.
    #[inline]
    pub fn stale_pops(&self) -> usize {
        self.stale
    }
}
