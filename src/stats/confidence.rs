//! Confidence levels and confidence intervals for the mean.

use serde::{Deserialize, Serialize};

use super::special::student_t_ppf;
use super::summary::{mean, sample_stddev};
use crate::error::{Error, Result};

/// A two-sided confidence level strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Validate and wrap a confidence level.
    pub fn new(level: f64) -> Result<Self> {
        if !(level > 0.0 && level < 1.0) {
            return Err(Error::InvalidParameter {
                name: "confidence",
                message: "must lie strictly between 0 and 1",
            });
        }
        Ok(Self(level))
    }

    /// The wrapped level.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Two-sided Student-t critical value for `dof` degrees of freedom.
    pub fn t_critical(self, dof: usize) -> Result<f64> {
        student_t_ppf(1.0 - (1.0 - self.0) / 2.0, dof as f64)
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = Error;

    fn try_from(level: f64) -> Result<Self> {
        Self::new(level)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

/// Two-sided confidence interval for a sample mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Distance from the mean to either bound.
    pub half_width: f64,
}

/// Confidence interval for the mean of `xs`, using the Student-t critical
/// value for `n - 1` degrees of freedom.
pub fn mean_confidence_interval(xs: &[f64], confidence: ConfidenceLevel) -> Result<ConfidenceInterval> {
    let s = sample_stddev(xs)?;
    let m = mean(xs)?;
    let n = xs.len();
    let t = confidence.t_critical(n - 1)?;
    let half_width = t * s / (n as f64).sqrt();
    Ok(ConfidenceInterval {
        lower: m - half_width,
        upper: m + half_width,
        half_width,
    })
}
