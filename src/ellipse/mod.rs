//! Confidence ellipses for a 2D point cloud.
//!
//! ## Method
//!
//! 1. Compute the mean, sample standard deviation, and Pearson correlation `r`
//!    of the x and y coordinates.
//! 2. Take the principal-axis angle
//!
//!    ```text
//!    α = atan(r · σ_y / σ_x)
//!    ```
//!
//! 3. Recenter every point on the mean and rotate by `-α`, so the correlated
//!    direction lies along the new x axis.
//! 4. The semi-axes `a` and `b` are the half-widths of the confidence
//!    intervals for the mean of the rotated x and y coordinates.
//! 5. A point is inside iff `(x'/a)² + (y'/b)² ≤ 1`.
//!
//! The two rotated axes are treated as independent, and the semi-axes bound
//! the sampling distribution of the mean rather than the spread of the cloud.
//! With many fixes the ellipse is therefore small, and GPS precision studies
//! use confidence levels very close to 1.
//!
//! ## Usage
//!
//! ```rust
//! use fixspread::{EllipseClassifier, Point};
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(0.0, 1.0),
//!     Point::new(1.0, 1.0),
//! ];
//! let result = EllipseClassifier::new(0.99).classify(&points).unwrap();
//! assert_eq!(result.mean, Point::new(0.5, 0.5));
//! assert_eq!(result.inside, vec![true; 4]);
//! ```

mod classifier;
mod rotation;

pub use classifier::{classify_levels, Ellipse, EllipseClassification, EllipseClassifier};
pub use rotation::{rotate, unrotate, RotatedFrame};
