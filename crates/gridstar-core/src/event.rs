//! Outbound notifications: [`CellEvent`].

use std::fmt;

use crate::cell::{CellState, UNREACHABLE};
use crate::geom::Point;

/// One cell state transition, as consumed by a presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellEvent {
    pub pos: Point,
    pub state: CellState,
    /// The cell's `f` at the time of the transition ([`UNREACHABLE`] if unknown).
    pub f: i32,
}

impl CellEvent {
    #[inline]
    pub const fn new(pos: Point, state: CellState, f: i32) -> Self {
        Self { pos, state, f }
    }

    /// The `f` value, or `None` if it is still infinite.
    #[inline]
    pub fn cost(&self) -> Option<i32> {
        (self.f != UNREACHABLE).then_some(self.f)
    }
}

impl fmt::Display for CellEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cost() {
            Some(c) => write!(f, "{} -> {:?} (f={c})", self.pos, self.state),
            None => write!(f, "{} -> {:?}", self.pos, self.state),
        }
    }
}
