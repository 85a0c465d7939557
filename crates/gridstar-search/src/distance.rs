use gridstar_core::Point;

/// Cost of one straight step.
pub const STRAIGHT_COST: i32 = 10;

/// Euclidean distance scaled by 10 and truncated: `⌊10·√(Δx² + Δy²)⌋`.
///
/// A straight step costs 10, a diagonal step 14.
#[inline]
pub fn euclidean(a: Point, b: Point) -> i32 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (f64::from(STRAIGHT_COST) * (dx * dx + dy * dy).sqrt()) as i32
}

/// Cost of one diagonal step, `⌊10·√2⌋`.
pub const DIAGONAL_COST: i32 = 14;

/// Octile distance: `14·min + 10·(max − min)` over the absolute axis deltas.
/// Equals the cheapest king-move step sum on an open grid.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = (dx.min(dy), dx.max(dy));
    DIAGONAL_COST * lo + STRAIGHT_COST * (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_unit_steps() {
        let o = Point::ZERO;
        assert_eq!(euclidean(o, o), 0);
        assert_eq!(euclidean(o, Point::new(1, 0)), 10);
        assert_eq!(euclidean(o, Point::new(1, 1)), 14);
        assert_eq!(euclidean(o, Point::new(3, 4)), 50);
    }

    #[test]
    fn euclidean_truncates() {
        // 10 * sqrt(32) = 56.568...
        assert_eq!(euclidean(Point::new(0, 0), Point::new(4, 4)), 56);
        // 10 * sqrt(5) = 22.36...
        assert_eq!(euclidean(Point::new(2, 1), Point::new(0, 0)), 22);
    }

    #[test]
    fn euclidean_is_symmetric() {
        let a = Point::new(-3, 7);
        let b = Point::new(5, 2);
        assert_eq!(euclidean(a, b), euclidean(b, a));
    }

    #[test]
    fn octile_values() {
        let o = Point::ZERO;
        assert_eq!(octile(o, Point::new(1, 1)), 14);
        assert_eq!(octile(o, Point::new(4, 4)), 56);
        assert_eq!(octile(o, Point::new(2, 1)), 24);
        assert_eq!(octile(o, Point::new(0, 5)), 50);
        // Euclidean truncation overshoots here; octile does not.
        assert_eq!(octile(o, Point::new(10, 10)), 140);
        assert_eq!(euclidean(o, Point::new(10, 10)), 141);
    }

    #[test]
    fn octile_never_below_euclidean() {
        for x in 0..8 {
            for y in 0..8 {
                let p = Point::new(x, y);
                assert!(octile(Point::ZERO, p) >= euclidean(Point::ZERO, p));
            }
        }
    }
}
