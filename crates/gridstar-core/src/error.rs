//! Errors raised while configuring a [`Grid`](crate::Grid).

use std::fmt;

use crate::geom::Point;

/// Errors from grid configuration operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The position lies outside the grid.
    OutOfBounds(Point),
    /// The operation would overwrite the Start or End cell.
    EndpointConflict(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "grid: position {p} is out of bounds"),
            Self::EndpointConflict(p) => {
                write!(f, "grid: position {p} is already the start or end cell")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Errors that can occur when parsing a text layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Lines have inconsistent widths.
    InconsistentSize(String),
    /// The layout is not square.
    NotSquare { width: i32, height: i32 },
    /// A character other than `.`, `#`, `S` or `E` was found.
    InvalidRune { ch: char, pos: Point },
    /// More than one `S` or more than one `E`.
    DuplicateEndpoint { ch: char, pos: Point },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize(s) => write!(f, "layout: inconsistent size:\n{s}"),
            Self::NotSquare { width, height } => {
                write!(f, "layout: expected a square grid, got {width}x{height}")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateEndpoint { ch, pos } => {
                write!(f, "layout: second \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

