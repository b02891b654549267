//! Run both analyses over one dataset for a list of configurations.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cluster::{metric, ClusteringResult, Dbscan};
use crate::ellipse::{EllipseClassification, EllipseClassifier};
use crate::error::{Error, Result};
use crate::point::{centroid, Point};
use crate::stats::ConfidenceLevel;

/// What to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Confidence levels for the ellipse analysis, each in (0, 1).
    pub confidence_levels: Vec<f64>,
    /// Parameter sets for the density clustering.
    pub clustering: Vec<Dbscan>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_levels: vec![0.5, 0.9, 0.95, 0.99],
            clustering: vec![Dbscan::new(0.000_002, 2)],
        }
    }
}

impl AnalysisConfig {
    /// Check every configuration before any work starts.
    pub fn validate(&self) -> Result<()> {
        for &level in &self.confidence_levels {
            ConfidenceLevel::new(level)?;
        }
        for params in &self.clustering {
            params.validate()?;
        }
        Ok(())
    }
}

/// Ellipse analysis at one confidence level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EllipseRecord {
    /// Confidence level.
    pub confidence: f64,
    /// Classification, or why it could not be computed.
    pub outcome: std::result::Result<EllipseClassification, Error>,
}

/// Clustering with one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteringRecord {
    /// Parameters used.
    pub params: Dbscan,
    /// Partition, or why it could not be computed.
    pub outcome: std::result::Result<ClusteringResult, Error>,
}

/// Results of one run, records in configuration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Number of input points.
    pub n_points: usize,
    /// Mean of the input, `None` when empty.
    pub mean: Option<Point>,
    /// One record per confidence level.
    pub ellipses: Vec<EllipseRecord>,
    /// One record per clustering parameter set.
    pub clusterings: Vec<ClusteringRecord>,
}

/// Orchestrates ellipse classification and clustering over one point set.
#[derive(Debug, Clone)]
pub struct AnalysisRunner {
    config: AnalysisConfig,
}

impl AnalysisRunner {
    /// Create a runner, rejecting invalid configurations up front.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every configuration with Euclidean clustering distance.
    pub fn run(&self, points: &[Point]) -> AnalysisReport {
        self.run_with(points, metric::euclidean)
    }

    /// Run every configuration with a caller-supplied clustering distance.
    pub fn run_with<F>(&self, points: &[Point], distance: F) -> AnalysisReport
    where
        F: Fn(Point, Point) -> f64 + Sync,
    {
        debug!(
            n_points = points.len(),
            n_levels = self.config.confidence_levels.len(),
            n_clusterings = self.config.clustering.len(),
            "starting analysis"
        );

        let ellipse = |&confidence: &f64| {
            let outcome = EllipseClassifier::new(confidence).classify(points);
            if let Err(err) = &outcome {
                warn!(confidence, %err, "ellipse analysis failed");
            }
            EllipseRecord {
                confidence,
                outcome,
            }
        };
        let clustering = |params: &Dbscan| {
            let outcome = params.fit_with(points, &distance);
            if let Err(err) = &outcome {
                warn!(
                    epsilon = params.epsilon(),
                    min_pts = params.min_pts(),
                    %err,
                    "clustering failed"
                );
            }
            ClusteringRecord {
                params: *params,
                outcome,
            }
        };

        #[cfg(feature = "parallel")]
        let (ellipses, clusterings): (Vec<EllipseRecord>, Vec<ClusteringRecord>) = rayon::join(
            || self.config.confidence_levels.par_iter().map(ellipse).collect(),
            || self.config.clustering.par_iter().map(clustering).collect(),
        );
        #[cfg(not(feature = "parallel"))]
        let (ellipses, clusterings): (Vec<EllipseRecord>, Vec<ClusteringRecord>) = (
            self.config.confidence_levels.iter().map(ellipse).collect(),
            self.config.clustering.iter().map(clustering).collect(),
        );

        AnalysisReport {
            n_points: points.len(),
            mean: centroid(points).ok(),
            ellipses,
            clusterings,
        }
    }
}
