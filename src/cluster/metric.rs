//! Pairwise distance functions for [`Dbscan`](super::Dbscan).
//!
//! Any function that is symmetric, non-negative, and zero exactly for
//! identical points can be passed to [`Dbscan::fit_with`](super::Dbscan::fit_with).

use crate::point::Point;

/// Plain function pointer form of a distance metric.
pub type DistanceFn = fn(Point, Point) -> f64;

/// Euclidean distance.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Squared Euclidean distance.
///
/// Monotone in [`euclidean`], so clustering with it at `ε²` gives the same
/// partition as Euclidean at `ε`.
#[inline]
pub fn squared_euclidean(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Manhattan (L1) distance.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_four_five() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(euclidean(a, b), 5.0);
        assert_eq!(squared_euclidean(a, b), 25.0);
        assert_eq!(manhattan(a, b), 7.0);
    }

    #[test]
    fn metrics_are_symmetric_and_zero_on_identity() {
        let a = Point::new(-1.5, 2.25);
        let b = Point::new(4.0, -0.5);
        for metric in [euclidean as DistanceFn, squared_euclidean, manhattan] {
            assert_eq!(metric(a, b), metric(b, a));
            assert_eq!(metric(a, a), 0.0);
        }
    }
}
