//! Mean, sample standard deviation, and Pearson correlation.

use serde::Serialize;

use crate::error::{Axis, Error, Result};

fn require(xs: &[f64], required: usize) -> Result<()> {
    if xs.len() < required {
        return Err(Error::InsufficientData {
            required,
            got: xs.len(),
        });
    }
    Ok(())
}

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> Result<f64> {
    require(xs, 1)?;
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Sum of squared deviations from `m`.
fn sum_sq_dev(xs: &[f64], m: f64) -> f64 {
    xs.iter().map(|x| (x - m) * (x - m)).sum()
}

/// Sample standard deviation (n − 1 denominator).
pub fn sample_stddev(xs: &[f64]) -> Result<f64> {
    require(xs, 2)?;
    let m = mean(xs)?;
    Ok((sum_sq_dev(xs, m) / (xs.len() - 1) as f64).sqrt())
}

/// Pearson correlation coefficient of two equal-length sequences.
///
/// Zero variance in either sequence is reported as [`Error::DegenerateInput`]
/// rather than returning NaN.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(Error::LengthMismatch {
            expected: xs.len(),
            found: ys.len(),
        });
    }
    require(xs, 2)?;

    let mx = mean(xs)?;
    let my = mean(ys)?;

    let mut cov = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        return Err(Error::DegenerateInput { axis: Axis::X });
    }
    if syy == 0.0 {
        return Err(Error::DegenerateInput { axis: Axis::Y });
    }

    Ok(cov / (sxx.sqrt() * syy.sqrt()))
}

/// Location and spread of one coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub stddev: f64,
}

impl AxisSummary {
    /// Summarize one axis (needs at least two samples).
    pub fn compute(xs: &[f64]) -> Result<Self> {
        Ok(Self {
            mean: mean(xs)?,
            stddev: sample_stddev(xs)?,
        })
    }
}

/// Summary statistics for a pair of coordinate sequences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    /// First axis.
    pub x: AxisSummary,
    /// Second axis.
    pub y: AxisSummary,
    /// Pearson correlation between the axes.
    pub correlation: f64,
}

impl SummaryStats {
    /// Compute both axis summaries and their correlation.
    pub fn compute(xs: &[f64], ys: &[f64]) -> Result<Self> {
        let correlation = pearson(xs, ys)?;
        Ok(Self {
            x: AxisSummary::compute(xs)?,
            y: AxisSummary::compute(ys)?,
            correlation,
        })
    }
}
