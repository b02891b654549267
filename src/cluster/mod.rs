//! Density-based clustering of point sets.
//!
//! ## DBSCAN
//!
//! Density-based clustering that discovers clusters of arbitrary shape and
//! identifies outliers (noise points) without specifying the number of
//! clusters in advance. For GPS precision work, the dense cluster holds the
//! fixes that agree with each other and the noise holds the stray ones.
//!
//! ## Distance
//!
//! The metric is an argument, not a property of [`Point`](crate::Point):
//! [`Dbscan::fit`] uses [`metric::euclidean`], and [`Dbscan::fit_with`]
//! accepts any symmetric, non-negative function that is zero exactly for
//! identical points. Clustering raw degree offsets and clustering recentered
//! or rotated coordinates use the same code.
//!
//! ## Usage
//!
//! ```rust
//! use fixspread::cluster::{metric, Clustering, Dbscan};
//! use fixspread::Point;
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 0.000_000_5),
//!     Point::new(0.0, 0.000_001_0),
//!     Point::new(10.0, 10.0),
//! ];
//!
//! let result = Dbscan::new(0.000_002, 2).fit(&points).unwrap();
//! assert_eq!(result.clusters[0].members, vec![0, 1, 2]);
//! assert_eq!(result.noise, vec![3]);
//!
//! // Same partition with a different metric, through the trait.
//! let labels = Dbscan::new(0.000_002, 2).fit_predict(&points).unwrap();
//! assert_eq!(labels, vec![Some(0), Some(0), Some(0), None]);
//! let l1 = Dbscan::new(0.000_002, 2).fit_with(&points, metric::manhattan).unwrap();
//! assert_eq!(l1.labels, labels);
//! ```

mod dbscan;
pub mod metric;
mod traits;

pub use dbscan::{Cluster, ClusteringResult, Dbscan, PointRole};
pub use metric::DistanceFn;
pub use traits::Clustering;
