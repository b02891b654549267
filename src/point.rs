//! Planar points and the GPS fixes they are derived from.
//!
//! A [`Point`] is a plain `(x, y)` pair. Equality and hashing compare the raw
//! bit patterns of both coordinates, so repeated fixes at one location compare
//! equal and can be counted, while `0.0` and `-0.0` stay distinct.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 2D coordinate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point {
    /// First coordinate.
    pub x: f64,
    /// Second coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Canonical key for exact duplicate detection.
    #[inline]
    pub fn key(&self) -> PointKey {
        PointKey(self.x.to_bits(), self.y.to_bits())
    }

    /// Component-wise difference `self - origin`.
    #[inline]
    pub fn offset_from(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Bit-exact identity of a [`Point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(u64, u64);

impl PointKey {
    /// The point this key was built from.
    pub fn point(&self) -> Point {
        Point::new(f64::from_bits(self.0), f64::from_bits(self.1))
    }
}

/// A single position record as delivered by the input provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Fix {
    /// Create a fix.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Planar offset of this fix from `origin`, in degrees.
    ///
    /// Latitude maps to `x`, longitude to `y`.
    pub fn offset_from(&self, origin: Fix) -> Point {
        Point::new(
            self.latitude - origin.latitude,
            self.longitude - origin.longitude,
        )
    }
}

/// Convert fixes to points relative to `origin`, preserving order.
pub fn points_from_fixes(fixes: &[Fix], origin: Fix) -> Vec<Point> {
    fixes.iter().map(|fix| fix.offset_from(origin)).collect()
}

/// Split a point set into its x and y coordinate sequences.
pub fn split_axes(points: &[Point]) -> (Vec<f64>, Vec<f64>) {
    points.iter().map(|p| (p.x, p.y)).unzip()
}

/// Arithmetic mean of a point set.
pub fn centroid(points: &[Point]) -> Result<Point> {
    if points.is_empty() {
        return Err(Error::InsufficientData {
            required: 1,
            got: 0,
        });
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Ok(Point::new(sx / n, sy / n))
}
