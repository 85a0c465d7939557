//! The [`Grid`] type — a square arena of [`Cell`]s with 8-way adjacency.
//!
//! Cells live in a flat row-major `Vec` and refer to each other through
//! [`CellId`] indices, so neighbour links and `prev` back-pointers never
//! involve shared ownership.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::cell::{Cell, CellId, CellState};
use crate::error::GridError;
use crate::event::CellEvent;
use crate::geom::{Direction, Point};

/// Slots wired while walking the arena in row-major order: each one points at
/// a cell that already exists, and the opposite slot is filled at the same time.
const BACKWARD: [Direction; 4] = [
    Direction::North,
    Direction::NorthEast,
    Direction::West,
    Direction::NorthWest,
];

/// A `dimension × dimension` lattice of cells.
#[derive(Debug, Clone)]
pub struct Grid {
    dimension: i32,
    cells: Vec<Cell>,
    start: Option<CellId>,
    end: Option<CellId>,
    events: Vec<CellEvent>,
}

impl Grid {
    /// Build a grid of Empty cells, each linked to its (up to) 8 neighbours.
    ///
    /// A negative dimension is treated as zero.
    pub fn new(dimension: i32) -> Self {
        let dimension = dimension.max(0);
        let cells = (0..dimension)
            .flat_map(|row| (0..dimension).map(move |col| Cell::new(Point::from_row_col(row, col))))
            .collect();
        let mut grid = Self {
            dimension,
            cells,
            start: None,
            end: None,
            events: Vec::new(),
        };
        grid.link_all();
        grid
    }

    /// Cells per side.
    #[inline]
    pub fn dimension(&self) -> i32 {
        self.dimension
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.dimension && p.y < self.dimension
    }

    /// Id of the cell at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn id(&self, p: Point) -> Option<CellId> {
        if !self.contains(p) {
            return None;
        }
        Some(CellId((p.y * self.dimension + p.x) as usize))
    }

    /// Position of the cell with the given id.
    #[inline]
    pub fn pos(&self, id: CellId) -> Point {
        self.cells[id.0].pos()
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    #[inline]
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.id(p).map(|id| &self.cells[id.0])
    }

    /// Row-major iterator over `(CellId, &Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    /// The Start cell, if one has been placed.
    #[inline]
    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    /// The End cell, if one has been placed.
    #[inline]
    pub fn end(&self) -> Option<CellId> {
        self.end
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Mark the cell at `p` as a barrier.
    ///
    /// Rejected if `p` is the Start or End cell. Marking an existing barrier
    /// again does nothing.
    pub fn set_barrier(&mut self, p: Point) -> Result<(), GridError> {
        let id = self.id(p).ok_or(GridError::OutOfBounds(p))?;
        let cell = &mut self.cells[id.0];
        match cell.state() {
            s if s.is_endpoint() => return Err(GridError::EndpointConflict(p)),
            CellState::Barrier => return Ok(()),
            _ => {}
        }
        cell.set_state(CellState::Barrier);
        let f = cell.f();
        self.emit(CellEvent::new(p, CellState::Barrier, f));
        Ok(())
    }

    /// Place the Start cell at `p`, moving it if one already exists.
    ///
    /// A barrier at `p` is cleared. Rejected if `p` is the End cell.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        self.place_endpoint(p, CellState::Start)
    }

    /// Place the End cell at `p`, moving it if one already exists.
    ///
    /// A barrier at `p` is cleared. Rejected if `p` is the Start cell.
    pub fn set_end(&mut self, p: Point) -> Result<(), GridError> {
        self.place_endpoint(p, CellState::End)
    }

    fn place_endpoint(&mut self, p: Point, state: CellState) -> Result<(), GridError> {
        let id = self.id(p).ok_or(GridError::OutOfBounds(p))?;
        let (slot, other) = match state {
            CellState::Start => (self.start, self.end),
            _ => (self.end, self.start),
        };
        if other == Some(id) {
            return Err(GridError::EndpointConflict(p));
        }
        if slot == Some(id) {
            return Ok(());
        }
        if let Some(old) = slot {
            let cell = &mut self.cells[old.0];
            cell.set_state(CellState::Empty);
            let event = CellEvent::new(cell.pos(), CellState::Empty, cell.f());
            self.emit(event);
        }
        let cell = &mut self.cells[id.0];
        cell.set_state(state);
        let f = cell.f();
        match state {
            CellState::Start => self.start = Some(id),
            _ => self.end = Some(id),
        }
        self.emit(CellEvent::new(p, state, f));
        Ok(())
    }

    /// Unlink every neighbour slot that points at a barrier.
    ///
    /// Links stay pruned until [`clear_search`](Self::clear_search) or
    /// [`reset`](Self::reset).
    pub fn prune_barrier_links(&mut self) {
        let barrier: Vec<bool> = self.cells.iter().map(Cell::is_barrier).collect();
        for cell in &mut self.cells {
            for d in Direction::ALL {
                if cell.neighbor(d).is_some_and(|n| barrier[n.0]) {
                    cell.link(d, None);
                }
            }
        }
    }

    /// Discard every cell and rebuild an Empty grid of the same dimension.
    pub fn reset(&mut self) {
        *self = Self::new(self.dimension);
    }

    /// Wipe the bookkeeping of a previous search while keeping barriers and
    /// endpoints, and restore pruned links.
    pub fn clear_search(&mut self) {
        for cell in &mut self.cells {
            cell.clear_search();
        }
        self.link_all();
    }

    /// Take the configuration events recorded since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, CellEvent> {
        self.events.drain(..)
    }

    fn emit(&mut self, event: CellEvent) {
        self.events.push(event);
    }

    fn link_all(&mut self) {
        for cell in &mut self.cells {
            for d in Direction::ALL {
                cell.link(d, None);
            }
        }
        for i in 0..self.cells.len() {
            let id = CellId(i);
            let p = self.cells[i].pos();
            for d in BACKWARD {
                if let Some(n) = self.id(p.step(d)) {
                    self.cells[id.0].link(d, Some(n));
                    self.cells[n.0].link(d.opposite(), Some(id));
                }
            }
        }
    }
}

impl Index<CellId> for Grid {
    type Output = Cell;

    #[inline]
    fn index(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }
}

impl IndexMut<CellId> for Grid {
    #[inline]
    fn index_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }
}

impl fmt::Display for Grid {
    /// One glyph per cell (see [`CellState::glyph`]), rows separated by `\n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.dimension.max(1) as usize).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{}", cell.state().glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_count(g: &Grid, p: Point) -> usize {
        g.at(p).unwrap().neighbors().iter().flatten().count()
    }

    #[test]
    fn corner_edge_and_inner_degrees() {
        let g = Grid::new(4);
        assert_eq!(g.len(), 16);
        assert_eq!(link_count(&g, Point::new(0, 0)), 3);
        assert_eq!(link_count(&g, Point::new(3, 3)), 3);
        assert_eq!(link_count(&g, Point::new(1, 0)), 5);
        assert_eq!(link_count(&g, Point::new(2, 2)), 8);
    }

    #[test]
    fn links_are_geometric() {
        let g = Grid::new(5);
        for (id, cell) in g.iter() {
            for d in Direction::ALL {
                if let Some(n) = cell.neighbor(d) {
                    assert_eq!(g.pos(n), g.pos(id).step(d));
                }
            }
        }
    }

    #[test]
    fn links_are_symmetric() {
        let g = Grid::new(6);
        for (id, cell) in g.iter() {
            for d in Direction::ALL {
                if let Some(n) = cell.neighbor(d) {
                    assert_eq!(g[n].neighbor(d.opposite()), Some(id));
                }
            }
        }
    }

    #[test]
    fn empty_grid() {
        let g = Grid::new(0);
        assert!(g.is_empty());
        assert_eq!(g.id(Point::ZERO), None);
        assert_eq!(g.to_string(), "");
    }

    #[test]
    fn barrier_rejected_on_endpoints() {
        let mut g = Grid::new(3);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_end(Point::new(2, 2)).unwrap();
        assert_eq!(
            g.set_barrier(Point::new(0, 0)),
            Err(GridError::EndpointConflict(Point::new(0, 0)))
        );
        assert_eq!(
            g.set_barrier(Point::new(9, 0)),
            Err(GridError::OutOfBounds(Point::new(9, 0)))
        );
        assert!(g.set_barrier(Point::new(1, 1)).is_ok());
        assert!(g.at(Point::new(1, 1)).unwrap().is_barrier());
    }

    #[test]
    fn endpoints_move_and_clear_barriers() {
        let mut g = Grid::new(3);
        g.set_barrier(Point::new(1, 1)).unwrap();
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_start(Point::new(1, 1)).unwrap();
        assert_eq!(g.start(), g.id(Point::new(1, 1)));
        assert_eq!(g.at(Point::new(0, 0)).unwrap().state(), CellState::Empty);
        assert_eq!(g.at(Point::new(1, 1)).unwrap().state(), CellState::Start);

        g.set_end(Point::new(2, 2)).unwrap();
        assert_eq!(
            g.set_end(Point::new(1, 1)),
            Err(GridError::EndpointConflict(Point::new(1, 1)))
        );
        assert_eq!(
            g.set_start(Point::new(2, 2)),
            Err(GridError::EndpointConflict(Point::new(2, 2)))
        );
    }

    #[test]
    fn configuration_events() {
        let mut g = Grid::new(3);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_barrier(Point::new(1, 0)).unwrap();
        g.set_barrier(Point::new(1, 0)).unwrap();
        g.set_start(Point::new(0, 1)).unwrap();
        let states: Vec<_> = g.drain_events().map(|e| (e.pos, e.state)).collect();
        assert_eq!(
            states,
            vec![
                (Point::new(0, 0), CellState::Start),
                (Point::new(1, 0), CellState::Barrier),
                (Point::new(0, 0), CellState::Empty),
                (Point::new(0, 1), CellState::Start),
            ]
        );
        assert_eq!(g.drain_events().count(), 0);
    }

    #[test]
    fn prune_and_restore() {
        let mut g = Grid::new(3);
        g.set_barrier(Point::new(1, 1)).unwrap();
        g.prune_barrier_links();
        for (_, cell) in g.iter() {
            let center = g.id(Point::new(1, 1));
            assert!(cell.neighbors().iter().all(|n| *n != center));
        }
        // Barrier's own links are kept; only links *to* it go.
        assert_eq!(link_count(&g, Point::new(1, 1)), 8);
        assert_eq!(link_count(&g, Point::new(0, 0)), 2);

        g.clear_search();
        assert_eq!(link_count(&g, Point::new(0, 0)), 3);
        assert!(g.at(Point::new(1, 1)).unwrap().is_barrier());
    }

    #[test]
    fn reset_rebuilds() {
        let mut g = Grid::new(3);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_barrier(Point::new(1, 1)).unwrap();
        g.prune_barrier_links();
        g.reset();
        assert_eq!(g.start(), None);
        assert!(g.iter().all(|(_, c)| c.state() == CellState::Empty));
        assert_eq!(link_count(&g, Point::new(0, 0)), 3);
        assert_eq!(g.drain_events().count(), 0);
    }

    #[test]
    fn display_glyphs() {
        let mut g = Grid::new(2);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_end(Point::new(1, 1)).unwrap();
        g.set_barrier(Point::new(1, 0)).unwrap();
        assert_eq!(g.to_string(), "S#\n.E");
    }
}
