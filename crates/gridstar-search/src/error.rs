use std::fmt;

use gridstar_core::Point;

/// Why a pair of endpoints was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointProblem {
    /// The grid has no Start or no End cell.
    Missing,
    /// The endpoint is outside the grid.
    OutOfBounds(Point),
    /// Start and end are the same cell.
    Identical(Point),
    /// The endpoint is a barrier.
    Barrier(Point),
    /// The grid's configured Start or End is a different cell.
    Conflict(Point),
}

/// Errors returned when starting a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Start/end missing, identical, or a barrier.
    InvalidEndpoints(EndpointProblem),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoints(EndpointProblem::Missing) => {
                f.write_str("invalid endpoints: start or end cell not placed")
            }
            Self::InvalidEndpoints(EndpointProblem::OutOfBounds(p)) => {
                write!(f, "invalid endpoints: {p} is not on the grid")
            }
            Self::InvalidEndpoints(EndpointProblem::Identical(p)) => {
                write!(f, "invalid endpoints: start and end are both {p}")
            }
            Self::InvalidEndpoints(EndpointProblem::Barrier(p)) => {
                write!(f, "invalid endpoints: {p} is a barrier")
            }
            Self::InvalidEndpoints(EndpointProblem::Conflict(p)) => {
                write!(f, "invalid endpoints: {p} disagrees with the grid's start/end")
            }
        }
    }
}

impl std::error::Error for SearchError {}
