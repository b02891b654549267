//! Descriptive statistics for coordinate sequences.
//!
//! The ellipse classifier needs three things from a coordinate sequence: its
//! mean, its sample standard deviation, and the half-width of a confidence
//! interval for its mean. For a sample of size n with standard deviation s,
//!
//! ```text
//! half_width = t(1 - (1 - c)/2; n - 1) · s / √n
//! ```
//!
//! where `t(p; ν)` is the Student-t quantile. The quantile is computed in
//! [`special`] from the regularized incomplete beta function.
//!
//! ## Usage
//!
//! ```rust
//! use fixspread::stats::{mean_confidence_interval, pearson, ConfidenceLevel};
//!
//! let xs = [0.0, 1.0, 0.0, 1.0];
//! let ys = [0.0, 0.0, 1.0, 1.0];
//! assert_eq!(pearson(&xs, &ys).unwrap(), 0.0);
//!
//! let ci = mean_confidence_interval(&xs, ConfidenceLevel::new(0.95).unwrap()).unwrap();
//! assert!(ci.lower < 0.5 && 0.5 < ci.upper);
//! ```

mod confidence;
pub mod special;
mod summary;

pub use confidence::{mean_confidence_interval, ConfidenceInterval, ConfidenceLevel};
pub use summary::{mean, pearson, sample_stddev, AxisSummary, SummaryStats};
