use serde::Serialize;
use tracing::{debug, trace};

use super::rotation::RotatedFrame;
use crate::error::{Axis, Error, Result};
use crate::point::{split_axes, Point};
use crate::stats::{mean, mean_confidence_interval, pearson, sample_stddev, ConfidenceLevel};

/// Semi-axes of a confidence ellipse in the rotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ellipse {
    /// Semi-axis along the rotated x axis.
    pub a: f64,
    /// Semi-axis along the rotated y axis.
    pub b: f64,
}

impl Ellipse {
    /// Normalized squared radius `(x/a)² + (y/b)²` of a frame point.
    ///
    /// A zero semi-axis contributes nothing for a zero coordinate and is an
    /// error for any other coordinate.
    pub fn normalized_radius(&self, p: Point) -> Result<f64> {
        Ok(axis_term(p.x, self.a, Axis::X)? + axis_term(p.y, self.b, Axis::Y)?)
    }

    /// True iff the frame point lies on or inside the boundary.
    pub fn contains(&self, p: Point) -> Result<bool> {
        Ok(self.normalized_radius(p)? <= 1.0)
    }
}

#[inline]
fn axis_term(coord: f64, semi_axis: f64, axis: Axis) -> Result<f64> {
    if semi_axis == 0.0 {
        if coord == 0.0 {
            return Ok(0.0);
        }
        return Err(Error::DegenerateAxis { axis });
    }
    let u = coord / semi_axis;
    Ok(u * u)
}

/// Ellipse membership of every point, with the quantities that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EllipseClassification {
    /// Confidence level the semi-axes were computed at.
    pub confidence: f64,
    /// Mean of the cloud (the ellipse center).
    pub mean: Point,
    /// Sample standard deviation of x.
    pub stddev_x: f64,
    /// Sample standard deviation of y.
    pub stddev_y: f64,
    /// Pearson correlation between x and y.
    pub correlation: f64,
    /// Rotation angle of the principal axis, radians.
    pub alpha: f64,
    /// Semi-axes in the rotated frame.
    pub ellipse: Ellipse,
    /// One flag per input point, in input order.
    pub inside: Vec<bool>,
}

impl EllipseClassification {
    /// Number of points on or inside the ellipse.
    pub fn inside_count(&self) -> usize {
        self.inside.iter().filter(|&&b| b).count()
    }

    /// Indices of points on or inside the ellipse.
    pub fn inside_indices(&self) -> Vec<usize> {
        self.inside
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }
}

/// Confidence-ellipse classifier.
#[derive(Debug, Clone)]
pub struct EllipseClassifier {
    confidence: f64,
}

impl EllipseClassifier {
    /// Create a classifier for a confidence level in (0, 1).
    pub fn new(confidence: f64) -> Self {
        Self { confidence }
    }

    /// Set the confidence level.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Configured confidence level.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Classify every point as inside or outside the confidence ellipse.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if the confidence is outside (0, 1).
    /// - [`Error::InsufficientData`] for fewer than two points.
    /// - [`Error::DegenerateAxis`] if x has zero spread, or a zero semi-axis
    ///   meets a point off the center on that axis.
    /// - [`Error::DegenerateInput`] if y has zero spread.
    pub fn classify(&self, points: &[Point]) -> Result<EllipseClassification> {
        let level = ConfidenceLevel::new(self.confidence)?;
        if points.len() < 2 {
            return Err(Error::InsufficientData {
                required: 2,
                got: points.len(),
            });
        }

        let (xs, ys) = split_axes(points);
        let center = Point::new(mean(&xs)?, mean(&ys)?);
        let stddev_x = sample_stddev(&xs)?;
        let stddev_y = sample_stddev(&ys)?;
        if stddev_x == 0.0 {
            return Err(Error::DegenerateAxis { axis: Axis::X });
        }
        let r = pearson(&xs, &ys)?;
        let alpha = (r * stddev_y / stddev_x).atan();
        debug!(r, alpha, "principal axis");

        let frame = RotatedFrame::new(points, center, alpha);
        let a = mean_confidence_interval(&frame.xs(), level)?.half_width;
        let b = mean_confidence_interval(&frame.ys(), level)?.half_width;
        let ellipse = Ellipse { a, b };
        debug!(confidence = level.get(), a, b, "confidence ellipse");

        let inside = frame
            .points
            .iter()
            .map(|&p| {
                let radius = ellipse.normalized_radius(p)?;
                trace!(x = p.x, y = p.y, radius, "classified");
                Ok(radius <= 1.0)
            })
            .collect::<Result<Vec<bool>>>()?;

        Ok(EllipseClassification {
            confidence: level.get(),
            mean: center,
            stddev_x,
            stddev_y,
            correlation: r,
            alpha,
            ellipse,
            inside,
        })
    }
}

/// Classify the same cloud at each confidence level, in the order given.
///
/// Stops at the first failure.
pub fn classify_levels(points: &[Point], levels: &[f64]) -> Result<Vec<EllipseClassification>> {
    levels
        .iter()
        .map(|&c| EllipseClassifier::new(c).classify(points))
        .collect()
}
