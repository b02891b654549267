//! Precision analysis for batches of GPS fixes.
//!
//! `fixspread` characterizes how tightly a receiver's recorded positions
//! scatter around their mean. Two analyses run over the same point set:
//!
//! - [`ellipse`]: rotate the cloud onto its principal axis and classify each
//!   point as inside or outside a confidence ellipse.
//! - [`cluster`]: DBSCAN with a pluggable distance, separating the dense
//!   cluster of agreeing fixes from outliers.
//!
//! [`AnalysisRunner`] runs both for a list of confidence levels and clustering
//! parameter sets. Parsing receiver logs and rendering plots are left to the
//! caller: the crate takes [`Fix`]es or [`Point`]s and returns plain data.
//!
//! ```rust
//! use fixspread::{points_from_fixes, AnalysisConfig, AnalysisRunner, Dbscan, Fix};
//!
//! let origin = Fix::new(55.653_42, 37.551_96);
//! let fixes = [
//!     Fix::new(55.653_421, 37.551_962),
//!     Fix::new(55.653_423, 37.551_961),
//!     Fix::new(55.653_422, 37.551_964),
//!     Fix::new(55.653_420, 37.551_963),
//!     Fix::new(55.653_500, 37.552_100),
//! ];
//! let points = points_from_fixes(&fixes, origin);
//!
//! let runner = AnalysisRunner::new(AnalysisConfig {
//!     confidence_levels: vec![0.9, 0.999],
//!     clustering: vec![Dbscan::new(0.000_005, 2)],
//! })
//! .unwrap();
//! let report = runner.run(&points);
//!
//! let clusters = report.clusterings[0].outcome.as_ref().unwrap();
//! assert_eq!(clusters.noise, vec![4]);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod ellipse;
pub mod error;
pub mod multiset;
pub mod point;
pub mod runner;
pub mod stats;

pub use cluster::{Cluster, Clustering, ClusteringResult, Dbscan, DistanceFn, PointRole};
pub use ellipse::{Ellipse, EllipseClassification, EllipseClassifier, RotatedFrame};
pub use error::{Axis, Error, Result};
pub use multiset::{MultisetEntry, PointMultiset};
pub use point::{centroid, points_from_fixes, Fix, Point, PointKey};
pub use runner::{AnalysisConfig, AnalysisReport, AnalysisRunner, ClusteringRecord, EllipseRecord};
pub use stats::{ConfidenceInterval, ConfidenceLevel, SummaryStats};
