//! A* shortest-path search over a [`gridstar_core::Grid`].
//!
//! - [`Searcher`] validates the endpoints and starts a [`SearchRun`]
//! - [`SearchRun`] is a resumable run: [`advance`](SearchRun::advance) it
//!   continuously or one step at a time, [`cancel`](SearchRun::cancel) it,
//!   and drain the [`CellEvent`](gridstar_core::CellEvent)s it produces
//! - [`SearchQueue`] is the open list; it substitutes lazy invalidation for
//!   decrease-key
//!
//! Edge cost and heuristic share one [`Metric`]. The default is Euclidean
//! distance scaled by 10 and truncated, so a straight step costs 10 and a
//! diagonal step 14.
//!
//! ```
//! use gridstar_core::{Grid, Point};
//! use gridstar_search::{Outcome, Searcher};
//!
//! let mut grid = Grid::new(5);
//! let report = Searcher::default()
//!     .search(&mut grid, Point::new(0, 0), Point::new(4, 4))
//!     .unwrap();
//! assert_eq!(report.outcome.cost(), Some(56));
//! assert!(matches!(report.outcome, Outcome::Found { .. }));
//! ```

mod astar;
mod config;
mod distance;
mod error;
mod queue;

pub use astar::{Outcome, SearchReport, SearchRun, SearchStats, Searcher, Status};
pub use config::{Metric, Mode, SearchConfig};
pub use distance::{DIAGONAL_COST, STRAIGHT_COST, euclidean, octile};
pub use error::{EndpointProblem, SearchError};
pub use queue::{PriorityEntry, SearchQueue};
