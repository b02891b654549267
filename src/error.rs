use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// One of the two coordinate axes of a planar point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    /// First coordinate (`x`, latitude offset for GPS fixes).
    X,
    /// Second coordinate (`y`, longitude offset for GPS fixes).
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Errors returned by the statistics, ellipse, and clustering routines in this crate.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum Error {
    /// Fewer samples than the computation needs.
    #[error("insufficient data: need at least {required} samples, got {got}")]
    InsufficientData {
        /// Minimum number of samples.
        required: usize,
        /// Number of samples supplied.
        got: usize,
    },

    /// A sequence has zero variance where a correlation needs it.
    #[error("degenerate input: {axis} values have zero variance")]
    DegenerateInput {
        /// Axis whose values are all equal.
        axis: Axis,
    },

    /// A zero-length standard deviation or ellipse semi-axis cannot be normalized by.
    #[error("degenerate ellipse: zero-length {axis} axis")]
    DegenerateAxis {
        /// Axis with zero extent.
        axis: Axis,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Paired sequences have different lengths.
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Length of the first sequence.
        expected: usize,
        /// Length of the second sequence.
        found: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
