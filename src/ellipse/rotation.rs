use crate::point::Point;

/// Rotate `p` by `-alpha` about the origin.
///
/// `x' = x cos α + y sin α`, `y' = y cos α − x sin α`.
#[inline]
pub fn rotate(p: Point, alpha: f64) -> Point {
    let (sin, cos) = alpha.sin_cos();
    Point::new(p.x * cos + p.y * sin, p.y * cos - p.x * sin)
}

/// Inverse of [`rotate`]: rotate `p` by `+alpha` about the origin.
#[inline]
pub fn unrotate(p: Point, alpha: f64) -> Point {
    let (sin, cos) = alpha.sin_cos();
    Point::new(p.x * cos - p.y * sin, p.y * cos + p.x * sin)
}

/// A point cloud recentered on `center` and rotated by `-alpha`.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedFrame {
    /// Rotation angle in radians.
    pub alpha: f64,
    /// Point mapped to the frame origin.
    pub center: Point,
    /// Transformed points, in input order.
    pub points: Vec<Point>,
}

impl RotatedFrame {
    /// Recenter every point on `center` and rotate by `-alpha`.
    pub fn new(points: &[Point], center: Point, alpha: f64) -> Self {
        let points = points
            .iter()
            .map(|p| rotate(p.offset_from(center), alpha))
            .collect();
        Self {
            alpha,
            center,
            points,
        }
    }

    /// Map a frame point back to source coordinates.
    pub fn to_source(&self, p: Point) -> Point {
        let q = unrotate(p, self.alpha);
        Point::new(q.x + self.center.x, q.y + self.center.y)
    }

    /// Rotated x coordinates.
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Rotated y coordinates.
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}
