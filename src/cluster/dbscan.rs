//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN groups points by neighborhood density. For GPS fixes it separates
//! the dense knot of repeated, mutually consistent positions from scattered
//! outliers, without knowing the number of clusters in advance.
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance between two points to be neighbors.
//! - **MinPts**: Minimum size of a point's ε-neighborhood, the point itself
//!   included, for it to be "core".
//! - **Core point**: Its ε-neighborhood has at least MinPts points.
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! Coincident points count individually: ten fixes reported at one location
//! form a neighborhood of ten.
//!
//! ## Algorithm Steps
//!
//! 1. For each unvisited point P, in input order:
//!    - If P is not core, mark it as noise (may change later).
//!    - Else start a new cluster and expand from P.
//!
//! 2. Expansion (breadth-first, neighbors in ascending index order):
//!    - Absorb every neighbor not yet in a cluster.
//!    - If an absorbed point is core, queue its neighbors too.
//!
//! The scan and expansion orders are fixed, so identical input always yields
//! an identical partition.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) distance evaluations; each point is queried once.
//! - **Space**: O(n). Neighborhoods are computed on demand and dropped after
//!   use, and a point is claimed as it is queued, so the queue never holds
//!   more than n entries.
//!
//! With the `parallel` feature each neighborhood query is spread across
//! threads; expansion always runs sequentially.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use std::collections::VecDeque;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::metric;
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::point::Point;

/// DBSCAN clustering algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dbscan {
    /// Epsilon: maximum distance for neighborhood.
    epsilon: f64,
    /// Minimum neighborhood size (self included) for a core point.
    min_pts: usize,
}

/// Role a point ended up with after clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PointRole {
    /// Dense enough to grow a cluster.
    Core,
    /// Reached from a core point, not dense itself.
    Border,
    /// In no cluster.
    Noise,
}

/// A density-connected group of points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    /// Discovery-order id.
    pub id: usize,
    /// Input indices of the members, ascending.
    pub members: Vec<usize>,
}

impl Cluster {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the cluster has no members. Clusters returned by
    /// [`Dbscan::fit`] always have at least one.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member coordinates, in index order.
    pub fn points(&self, points: &[Point]) -> Vec<Point> {
        self.members.iter().map(|&i| points[i]).collect()
    }
}

/// Partition of a point set into clusters and noise.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusteringResult {
    /// Clusters in discovery order.
    pub clusters: Vec<Cluster>,
    /// Indices of noise points, ascending.
    pub noise: Vec<usize>,
    /// Per-point cluster id, `None` for noise.
    pub labels: Vec<Option<usize>>,
    /// Per-point role.
    pub roles: Vec<PointRole>,
}

impl ClusteringResult {
    /// Number of clusters found.
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// True if point `idx` is noise.
    pub fn is_noise(&self, idx: usize) -> bool {
        self.labels[idx].is_none()
    }

    /// The largest cluster; ties go to the earliest discovered.
    pub fn largest(&self) -> Option<&Cluster> {
        self.clusters.iter().rev().max_by_key(|c| c.len())
    }

    /// Coordinates of the noise points, in index order.
    pub fn noise_points(&self, points: &[Point]) -> Vec<Point> {
        self.noise.iter().map(|&i| points[i]).collect()
    }
}

// Expansion state of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Unvisited,
    // Visited, not density-reachable so far (may be promoted to border).
    Noise,
    Member(usize),
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Maximum distance between two points to be neighbors.
    /// * `min_pts` - Minimum neighborhood size, the point itself included.
    ///
    /// # Typical Values
    ///
    /// For fixes in raw degree space, an ε of a few 1e-6 (tenths of a metre)
    /// with `min_pts = 2` separates repeated fixes from stray ones.
    pub fn new(epsilon: f64, min_pts: usize) -> Self {
        Self { epsilon, min_pts }
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Neighborhood radius.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Minimum neighborhood size.
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Check the parameters without clustering anything.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be positive and finite",
            });
        }

        if self.min_pts == 0 {
            return Err(Error::InvalidParameter {
                name: "min_pts",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Cluster with Euclidean distance.
    pub fn fit(&self, points: &[Point]) -> Result<ClusteringResult> {
        self.fit_with(points, metric::euclidean)
    }

    /// Cluster with a caller-supplied distance function.
    ///
    /// Empty input yields an empty result.
    pub fn fit_with<F>(&self, points: &[Point], distance: F) -> Result<ClusteringResult>
    where
        F: Fn(Point, Point) -> f64 + Sync,
    {
        self.validate()?;

        let n = points.len();
        if n == 0 {
            return Ok(ClusteringResult::default());
        }

        let mut labels = vec![Label::Unvisited; n];
        let mut roles = vec![PointRole::Noise; n];
        let mut clusters: Vec<Cluster> = Vec::new();

        for point_idx in 0..n {
            if labels[point_idx] != Label::Unvisited {
                continue;
            }

            let neighbors = self.region_query(points, point_idx, &distance);
            if neighbors.len() < self.min_pts {
                // Not dense: noise unless a later expansion reaches it.
                labels[point_idx] = Label::Noise;
                continue;
            }

            let cluster_id = clusters.len();
            let members = self.expand_cluster(
                points,
                point_idx,
                &neighbors,
                &distance,
                &mut labels,
                &mut roles,
                cluster_id,
            );
            trace!(cluster_id, seed = point_idx, size = members.len(), "expanded cluster");
            clusters.push(Cluster {
                id: cluster_id,
                members,
            });
        }

        let mut noise = Vec::new();
        let labels: Vec<Option<usize>> = labels
            .into_iter()
            .enumerate()
            .map(|(i, l)| match l {
                Label::Member(id) => Some(id),
                _ => {
                    noise.push(i);
                    None
                }
            })
            .collect();

        debug!(
            n_points = n,
            n_clusters = clusters.len(),
            n_noise = noise.len(),
            epsilon = self.epsilon,
            min_pts = self.min_pts,
            "dbscan finished"
        );

        Ok(ClusteringResult {
            clusters,
            noise,
            labels,
            roles,
        })
    }

    /// Find all points within epsilon, the point itself included, in
    /// ascending index order.
    fn region_query<F>(&self, points: &[Point], point_idx: usize, distance: &F) -> Vec<usize>
    where
        F: Fn(Point, Point) -> f64 + Sync,
    {
        let point = points[point_idx];
        let within =
            |idx: &usize| *idx == point_idx || distance(point, points[*idx]) <= self.epsilon;

        #[cfg(feature = "parallel")]
        {
            (0..points.len()).into_par_iter().filter(within).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..points.len()).filter(within).collect()
        }
    }

    /// Grow a cluster from a core seed. Returns its members, ascending.
    ///
    /// A point is claimed when it is queued, so each point enters the queue
    /// at most once and is queried at most once.
    #[allow(clippy::too_many_arguments)]
    fn expand_cluster<F>(
        &self,
        points: &[Point],
        seed: usize,
        seed_neighbors: &[usize],
        distance: &F,
        labels: &mut [Label],
        roles: &mut [PointRole],
        cluster_id: usize,
    ) -> Vec<usize>
    where
        F: Fn(Point, Point) -> f64 + Sync,
    {
        labels[seed] = Label::Member(cluster_id);
        roles[seed] = PointRole::Core;
        let mut members = vec![seed];
        let mut queue = VecDeque::new();

        absorb(seed_neighbors, cluster_id, labels, roles, &mut members, &mut queue);

        while let Some(idx) = queue.pop_front() {
            let neighbors = self.region_query(points, idx, distance);
            if neighbors.len() >= self.min_pts {
                roles[idx] = PointRole::Core;
                absorb(&neighbors, cluster_id, labels, roles, &mut members, &mut queue);
            } else {
                roles[idx] = PointRole::Border;
            }
        }

        members.sort_unstable();
        members
    }
}

/// Claim every neighbor not yet in a cluster. Unvisited points are queued
/// for their own query; noise points become border without one.
fn absorb(
    neighbors: &[usize],
    cluster_id: usize,
    labels: &mut [Label],
    roles: &mut [PointRole],
    members: &mut Vec<usize>,
    queue: &mut VecDeque<usize>,
) {
    for &nn in neighbors {
        match labels[nn] {
            Label::Member(_) => {}
            Label::Noise => {
                labels[nn] = Label::Member(cluster_id);
                roles[nn] = PointRole::Border;
                members.push(nn);
            }
            Label::Unvisited => {
                labels[nn] = Label::Member(cluster_id);
                members.push(nn);
                queue.push_back(nn);
            }
        }
    }
}

impl Default for Dbscan {
    fn default() -> Self {
        Self::new(0.5, 5)
    }
}

impl Clustering for Dbscan {
    fn fit_predict(&self, points: &[Point]) -> Result<Vec<Option<usize>>> {
        Ok(self.fit(points)?.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&c| Point::from(c)).collect()
    }

    #[test]
    fn test_dbscan_two_clusters() {
        let data = pts(&[
            // Cluster 1: around (0, 0)
            (0.0, 0.0),
            (0.1, 0.0),
            (0.0, 0.1),
            (0.1, 0.1),
            (0.05, 0.05),
            // Cluster 2: around (5, 5)
            (5.0, 5.0),
            (5.1, 5.0),
            (5.0, 5.1),
            (5.1, 5.1),
            (5.05, 5.05),
        ]);

        let result = Dbscan::new(0.3, 3).fit(&data).unwrap();

        assert_eq!(result.n_clusters(), 2);
        assert_eq!(result.clusters[0].members, vec![0, 1, 2, 3, 4]);
        assert_eq!(result.clusters[1].members, vec![5, 6, 7, 8, 9]);
        assert!(result.noise.is_empty());
        assert!(result.roles.iter().all(|&r| r == PointRole::Core));
    }

    #[test]
    fn test_dbscan_with_noise() {
        let data = pts(&[
            (0.0, 0.0),
            (0.1, 0.0),
            (0.0, 0.1),
            (0.1, 0.1),
            // Outlier
            (100.0, 100.0),
            (5.0, 5.0),
            (5.1, 5.0),
            (5.0, 5.1),
            (5.1, 5.1),
        ]);

        let labels = Dbscan::new(0.3, 3).fit_predict(&data).unwrap();

        assert_eq!(labels.len(), 9);
        assert!(labels[4].is_none());
        for (i, label) in labels.iter().enumerate() {
            if i != 4 {
                assert!(label.is_some());
            }
        }
    }

    #[test]
    fn test_dbscan_all_noise() {
        let data = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0)]);

        let result = Dbscan::new(0.5, 3).fit(&data).unwrap();

        assert!(result.clusters.is_empty());
        assert_eq!(result.noise, vec![0, 1, 2, 3]);
        assert!(result.roles.iter().all(|&r| r == PointRole::Noise));
    }

    #[test]
    fn test_dbscan_empty() {
        let result = Dbscan::new(0.5, 3).fit(&[]).unwrap();
        assert!(result.clusters.is_empty());
        assert!(result.noise.is_empty());
        assert!(result.labels.is_empty());
    }

    #[test]
    fn test_dbscan_invalid_params() {
        let data = pts(&[(0.0, 0.0)]);

        assert!(Dbscan::new(0.0, 3).fit(&data).is_err());
        assert!(Dbscan::new(-1.0, 3).fit(&data).is_err());
        assert!(Dbscan::new(f64::NAN, 3).fit(&data).is_err());
        assert!(Dbscan::new(0.5, 0).fit(&data).is_err());

        // Rejected even when there is nothing to cluster.
        assert!(Dbscan::new(0.5, 0).fit(&[]).is_err());
    }

    #[test]
    fn test_dbscan_chain() {
        // Chain of points - DBSCAN should connect them
        let data: Vec<Point> = (0..10).map(|i| Point::new(i as f64 * 0.3, 0.0)).collect();

        let result = Dbscan::new(0.5, 2).fit(&data).unwrap();

        assert_eq!(result.n_clusters(), 1);
        assert_eq!(result.clusters[0].len(), 10);
    }

    #[test]
    fn border_point_promoted_from_noise() {
        // Point 0 is scanned first and is not core, but lies within ε of the
        // core point 1.
        let data = pts(&[(0.0, 0.0), (0.9, 0.0), (1.5, 0.0), (1.6, 0.0)]);

        let result = Dbscan::new(1.0, 3).fit(&data).unwrap();

        assert_eq!(result.n_clusters(), 1);
        assert_eq!(result.clusters[0].members, vec![0, 1, 2, 3]);
        assert_eq!(result.roles[0], PointRole::Border);
        assert_eq!(result.roles[1], PointRole::Core);
        assert!(result.noise.is_empty());
    }

    #[test]
    fn border_point_goes_to_first_cluster() {
        // Point 4 is within ε of both dense groups but is not core itself.
        let data = pts(&[
            (0.0, 0.0),
            (0.125, 0.0),
            (0.25, 0.0),
            (0.5, 0.0),
            (1.375, 0.0),
            (2.25, 0.0),
            (2.5, 0.0),
            (2.625, 0.0),
            (2.75, 0.0),
        ]);

        let result = Dbscan::new(1.0, 4).fit(&data).unwrap();

        assert_eq!(result.n_clusters(), 2);
        assert_eq!(result.clusters[0].members, vec![0, 1, 2, 3, 4]);
        assert_eq!(result.clusters[1].members, vec![5, 6, 7, 8]);
        assert_eq!(result.roles[4], PointRole::Border);
        assert_eq!(result.labels[4], Some(0));
    }

    #[test]
    fn duplicates_count_toward_min_pts() {
        let data = pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0), (9.0, 9.0)]);

        let result = Dbscan::new(1e-9, 3).fit(&data).unwrap();

        assert_eq!(result.n_clusters(), 1);
        assert_eq!(result.clusters[0].members, vec![0, 1, 2]);
        assert_eq!(result.noise, vec![3]);
    }

    #[test]
    fn min_pts_one_makes_every_point_core() {
        let data = pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);

        let result = Dbscan::new(1.0, 1).fit(&data).unwrap();

        assert_eq!(result.n_clusters(), 3);
        assert!(result.noise.is_empty());
    }

    #[test]
    fn custom_metric_changes_neighborhoods() {
        let data = pts(&[(0.0, 0.0), (0.6, 0.6), (1.2, 1.2)]);

        // Euclidean step is ~0.85, Manhattan step is 1.2.
        let euclid = Dbscan::new(1.0, 2).fit(&data).unwrap();
        assert_eq!(euclid.n_clusters(), 1);

        let l1 = Dbscan::new(1.0, 2).fit_with(&data, metric::manhattan).unwrap();
        assert_eq!(l1.n_clusters(), 0);
        assert_eq!(l1.noise, vec![0, 1, 2]);
    }

    #[test]
    fn largest_prefers_first_on_tie() {
        let data = pts(&[(0.0, 0.0), (0.1, 0.0), (5.0, 5.0), (5.1, 5.0)]);
        let result = Dbscan::new(0.5, 2).fit(&data).unwrap();
        assert_eq!(result.largest().map(|c| c.id), Some(0));
    }

    #[test]
    fn large_block_of_identical_points_is_one_cluster() {
        // Every point neighbors every other one: the expansion must still
        // queue and query each point only once.
        let n = 5_000;
        let data = vec![Point::new(0.0, 0.0); n];
        let result = Dbscan::new(1e-6, 2).fit(&data).unwrap();

        assert_eq!(result.n_clusters(), 1);
        assert!(result.noise.is_empty());
        assert_eq!(result.clusters[0].members, (0..n).collect::<Vec<_>>());
        assert!(result.roles.iter().all(|&r| r == PointRole::Core));
    }

    #[test]
    fn cluster_is_empty_reports_membership() {
        let cluster = Cluster {
            id: 0,
            members: Vec::new(),
        };
        assert!(cluster.is_empty());

        let data = pts(&[(0.0, 0.0), (0.1, 0.0)]);
        let result = Dbscan::new(0.5, 2).fit(&data).unwrap();
        assert!(result.clusters.iter().all(|c| !c.is_empty()));
    }

    /// Straightforward DBSCAN over precomputed neighborhoods, used to check
    /// the threaded query path against.
    #[cfg(feature = "parallel")]
    fn reference_labels(points: &[Point], eps: f64, min_pts: usize) -> Vec<Option<usize>> {
        let n = points.len();
        let nbrs: Vec<Vec<usize>> = (0..n)
            .map(|i| {
                (0..n)
                    .filter(|&j| i == j || metric::euclidean(points[i], points[j]) <= eps)
                    .collect()
            })
            .collect();
        let mut labels: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut next = 0;
        for i in 0..n {
            if visited[i] || nbrs[i].len() < min_pts {
                continue;
            }
            let mut queue: VecDeque<usize> = VecDeque::from([i]);
            visited[i] = true;
            labels[i] = Some(next);
            while let Some(p) = queue.pop_front() {
                if nbrs[p].len() < min_pts {
                    continue;
                }
                for &q in &nbrs[p] {
                    if labels[q].is_none() {
                        labels[q] = Some(next);
                    }
                    if !visited[q] && labels[q] == Some(next) {
                        visited[q] = true;
                        queue.push_back(q);
                    }
                }
            }
            next += 1;
        }
        labels
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_queries_match_reference_labels() {
        let data: Vec<Point> = (0..400)
            .map(|i| {
                let i = i as f64;
                Point::new((i * 0.37).sin() * 3.0 + (i * 0.05).floor(), (i * 0.71).cos() * 3.0)
            })
            .collect();

        for &(eps, min_pts) in &[(0.3, 3), (0.6, 5), (1.0, 2), (0.05, 1)] {
            let result = Dbscan::new(eps, min_pts).fit(&data).unwrap();
            assert_eq!(result.labels, reference_labels(&data, eps, min_pts), "eps {eps}");
        }
    }
}
