//! **gridstar-core** — the lattice model for grid A* search.
//!
//! This crate provides the graph the search engine runs over: geometry
//! primitives, [`Cell`]s with their path-cost bookkeeping, and the
//! [`Grid`] arena that owns them and wires 8-directional adjacency.
//! Every state change a presentation layer needs to draw is reported as a
//! [`CellEvent`].

pub mod cell;
pub mod error;
pub mod event;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{Cell, CellId, CellState, UNREACHABLE};
pub use error::{GridError, LayoutError};
pub use event::CellEvent;
pub use geom::{Direction, Point};
pub use grid::Grid;
