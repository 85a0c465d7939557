//! Search configuration: execution [`Mode`] and distance [`Metric`].

use gridstar_core::Point;

use crate::distance;

/// How a run yields control back to its caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Run to a terminal state on the first `advance`.
    #[default]
    Continuous,
    /// Suspend twice per expanded cell: after it is popped and after its
    /// neighbours have been relaxed.
    Stepped,
}

/// Distance function used for both edge cost and heuristic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// `⌊10·√(Δx² + Δy²)⌋`. Diagonal steps cost 14.
    #[default]
    Euclidean,
    /// `14·min + 10·(max − min)`. Never overestimates, so paths are optimal;
    /// costs differ from [`Metric::Euclidean`] on long diagonals.
    Octile,
}

impl Metric {
    /// Distance between two points under this metric.
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> i32 {
        match self {
            Self::Euclidean => distance::euclidean(a, b),
            Self::Octile => distance::octile(a, b),
        }
    }
}

/// Configuration for a [`Searcher`](crate::Searcher).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: Mode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub metric: Metric,
}

impl SearchConfig {
    /// Continuous mode with the Euclidean metric.
    pub const fn new() -> Self {
        Self {
            mode: Mode::Continuous,
            metric: Metric::Euclidean,
        }
    }

    /// Set the execution mode (builder).
    #[inline]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the distance metric (builder).
    #[inline]
    pub const fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SearchConfig::default();
        assert_eq!(c, SearchConfig::new());
        assert_eq!(c.mode, Mode::Continuous);
        assert_eq!(c.metric, Metric::Euclidean);
    }

    #[test]
    fn builders() {
        let c = SearchConfig::new()
            .with_mode(Mode::Stepped)
            .with_metric(Metric::Octile);
        assert_eq!(c.mode, Mode::Stepped);
        assert_eq!(c.metric.distance(Point::ZERO, Point::new(2, 1)), 24);
    }
}
