// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clustering of near-duplicate edge endpoints.
//!
//! Endpoints closer than the merge threshold are pulled to their common mean,
//! pass after pass, until a full pass moves nothing. Each pass rebuilds a
//! spatial grid over the current endpoint positions; the scan within a pass
//! updates positions in place.

use nalgebra::{Point3, Vector3};
use navwall_geometry::{ground, Rect2, SpatialGrid};

use crate::edges::Edge;

/// Default cap on merge passes.
pub const DEFAULT_MAX_MERGE_PASSES: usize = 64;

/// How a merge run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStatus {
    /// A full pass moved no endpoint. `passes` includes that final pass.
    Converged { passes: usize },
    /// The pass cap was reached while endpoints were still moving.
    IterationLimit { passes: usize },
}

impl MergeStatus {
    pub fn converged(&self) -> bool {
        matches!(self, MergeStatus::Converged { .. })
    }

    pub fn passes(&self) -> usize {
        match *self {
            MergeStatus::Converged { passes } | MergeStatus::IterationLimit { passes } => passes,
        }
    }
}

/// Merged edges plus the outcome of the fixed-point iteration.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Input edges in input order, with endpoints moved to their cluster means
    pub edges: Vec<Edge>,
    pub status: MergeStatus,
}

/// Cluster edge endpoints closer than `threshold` (Euclidean, strict).
///
/// Edge order, vertex indices and triangle counts are preserved; only the
/// endpoint positions change. A non-positive threshold merges nothing.
pub fn merge_vertices(edges: &[Edge], threshold: f64, max_passes: usize) -> MergeOutcome {
    let mut positions: Vec<Point3<f64>> = edges.iter().flat_map(|e| e.positions).collect();

    let status = if positions.is_empty() || threshold <= 0.0 || !threshold.is_finite() {
        MergeStatus::Converged { passes: 0 }
    } else {
        run_passes(&mut positions, threshold, max_passes)
    };

    let merged = edges
        .iter()
        .zip(positions.chunks_exact(2))
        .map(|(edge, ends)| Edge::new(edge.indices, [ends[0], ends[1]], edge.triangle_count))
        .collect();

    MergeOutcome {
        edges: merged,
        status,
    }
}

fn run_passes(positions: &mut [Point3<f64>], threshold: f64, max_passes: usize) -> MergeStatus {
    for pass in 1..=max_passes {
        let moved = merge_pass(positions, threshold);
        tracing::trace!(pass, moved, "vertex merge pass");
        if moved == 0 {
            return MergeStatus::Converged { passes: pass };
        }
    }

    tracing::warn!(
        max_passes,
        threshold,
        "vertex merge did not converge within the pass limit"
    );
    MergeStatus::IterationLimit { passes: max_passes }
}

/// One sweep over all positions. Returns the number of clusters moved.
fn merge_pass(positions: &mut [Point3<f64>], threshold: f64) -> usize {
    let margin = 2.0 * threshold;
    let mut grid = SpatialGrid::new(margin);
    for (i, p) in positions.iter().enumerate() {
        grid.add(i, &Rect2::around(&ground(p), margin));
    }

    let threshold_sq = threshold * threshold;
    let mut moved = 0;
    let mut cluster: Vec<usize> = Vec::new();

    for i in 0..positions.len() {
        let current = positions[i];

        cluster.clear();
        cluster.extend(
            grid.query(&Rect2::around(&ground(&current), margin))
                .into_iter()
                .filter(|&j| (positions[j] - current).norm_squared() < threshold_sq),
        );
        // Deterministic summation order regardless of hash-set iteration
        cluster.sort_unstable();

        if cluster.iter().all(|&j| positions[j] == current) {
            continue;
        }

        let sum = cluster
            .iter()
            .fold(Vector3::zeros(), |acc, &j| acc + positions[j].coords);
        let mean = Point3::from(sum / cluster.len() as f64);

        for &j in &cluster {
            positions[j] = mean;
        }
        moved += 1;
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn p(x: f64, z: f64) -> Point3<f64> {
        Point3::new(x, 0.0, z)
    }

    fn edge(a: Point3<f64>, b: Point3<f64>) -> Edge {
        Edge::new([0, 1], [a, b], 1)
    }

    #[test]
    fn near_endpoints_meet_at_mean() {
        let edges = vec![
            edge(p(0.0, 0.0), p(1.0, 0.0)),
            edge(p(1.02, 0.0), p(1.0, 1.0)),
        ];
        let outcome = merge_vertices(&edges, 0.05, DEFAULT_MAX_MERGE_PASSES);

        assert!(outcome.status.converged());
        let joint_a = outcome.edges[0].positions[1];
        let joint_b = outcome.edges[1].positions[0];
        assert_eq!(joint_a, joint_b);
        assert_relative_eq!(joint_a.x, 1.01, epsilon = 1e-12);

        // Far endpoints untouched
        assert_eq!(outcome.edges[0].positions[0], p(0.0, 0.0));
        assert_eq!(outcome.edges[1].positions[1], p(1.0, 1.0));
    }

    #[test]
    fn threshold_is_strict_and_three_dimensional() {
        let edges = vec![
            edge(p(0.0, 0.0), p(5.0, 5.0)),
            edge(Point3::new(0.0, 0.5, 0.0), p(9.0, 9.0)),
        ];
        let outcome = merge_vertices(&edges, 0.5, DEFAULT_MAX_MERGE_PASSES);
        assert_eq!(outcome.edges, edges);
        assert_eq!(outcome.status, MergeStatus::Converged { passes: 1 });
    }

    #[test]
    fn chains_collapse_over_passes() {
        // Each neighbour is within threshold of the next, the ends are not
        let edges = vec![
            edge(p(0.0, 0.0), p(0.08, 0.0)),
            edge(p(0.13, 0.0), p(10.0, 0.0)),
        ];
        let outcome = merge_vertices(&edges, 0.1, DEFAULT_MAX_MERGE_PASSES);
        assert!(outcome.status.converged());
        let a = outcome.edges[0].positions[0];
        assert_eq!(outcome.edges[0].positions[1], a);
        assert_eq!(outcome.edges[1].positions[0], a);
        assert_eq!(outcome.edges[1].positions[1], p(10.0, 0.0));
    }

    #[test]
    fn pass_limit_is_reported() {
        let edges = vec![edge(p(0.0, 0.0), p(0.01, 0.0))];
        let outcome = merge_vertices(&edges, 0.1, 1);
        assert_eq!(outcome.status, MergeStatus::IterationLimit { passes: 1 });
        assert_eq!(outcome.edges[0].positions[0], outcome.edges[0].positions[1]);
    }

    #[test]
    fn preserves_indices_and_counts() {
        let edges = vec![
            Edge::new([4, 9], [p(0.0, 0.0), p(1.0, 0.0)], 1),
            Edge::new([9, 2], [p(1.0, 0.001), p(1.0, 1.0)], 3),
        ];
        let outcome = merge_vertices(&edges, 0.01, DEFAULT_MAX_MERGE_PASSES);
        assert_eq!(outcome.edges[0].indices, [4, 9]);
        assert_eq!(outcome.edges[1].indices, [9, 2]);
        assert_eq!(outcome.edges[1].triangle_count, 3);
    }

    #[test]
    fn empty_and_zero_threshold_are_no_ops() {
        let outcome = merge_vertices(&[], 0.1, DEFAULT_MAX_MERGE_PASSES);
        assert!(outcome.edges.is_empty());
        assert_eq!(outcome.status, MergeStatus::Converged { passes: 0 });

        let edges = vec![edge(p(0.0, 0.0), p(0.0, 0.0))];
        let outcome = merge_vertices(&edges, 0.0, DEFAULT_MAX_MERGE_PASSES);
        assert_eq!(outcome.edges, edges);
    }

    fn arb_edges() -> impl Strategy<Value = Vec<Edge>> {
        let point = (-5.0..5.0f64, -0.5..0.5f64, -5.0..5.0f64)
            .prop_map(|(x, y, z)| Point3::new(x, y, z));
        prop::collection::vec((point.clone(), point), 0..24)
            .prop_map(|pairs| pairs.into_iter().map(|(a, b)| edge(a, b)).collect())
    }

    proptest! {
        #[test]
        fn merging_is_idempotent(edges in arb_edges(), threshold in 0.05..1.5f64) {
            let first = merge_vertices(&edges, threshold, 10_000);
            prop_assume!(first.status.converged());

            let second = merge_vertices(&first.edges, threshold, 10_000);
            prop_assert_eq!(second.status, MergeStatus::Converged { passes: 1 });
            prop_assert_eq!(second.edges, first.edges);
        }
    }
}
