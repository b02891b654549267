use crate::error::Result;
use crate::point::Point;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model and return one label per input point.
    ///
    /// `Some(id)` is a cluster id in discovery order; `None` marks noise.
    fn fit_predict(&self, points: &[Point]) -> Result<Vec<Option<usize>>>;
}
