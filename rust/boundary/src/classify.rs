// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary edge classification.
//!
//! Two independent filters that can be chained:
//! - topological: an edge is on the boundary iff exactly one triangle uses it
//! - geometric: an edge is on the boundary iff its midpoint lies within a
//!   threshold of the walkable surface's edge, as reported by an external
//!   [`BoundaryDistance`] oracle

use nalgebra::Point3;

use crate::edges::Edge;

/// Default distance threshold for the oracle filter. A numerical tolerance,
/// not a semantic radius.
pub const DEFAULT_BOUNDARY_THRESHOLD: f64 = 0.001;

/// Distance from a point to the boundary of the walkable surface.
///
/// Implemented for any `Fn(&Point3<f64>) -> f64`, so closures can be passed
/// directly.
pub trait BoundaryDistance {
    fn distance_to_boundary(&self, point: &Point3<f64>) -> f64;
}

impl<F> BoundaryDistance for F
where
    F: Fn(&Point3<f64>) -> f64,
{
    #[inline]
    fn distance_to_boundary(&self, point: &Point3<f64>) -> f64 {
        self(point)
    }
}

/// Edges split into boundary and interior sets, each in input order.
#[derive(Debug, Clone, Default)]
pub struct EdgePartition {
    pub boundary: Vec<Edge>,
    pub interior: Vec<Edge>,
}

/// Split edges by triangle count: count 1 is boundary, anything else interior.
pub fn partition_by_triangle_count<I>(edges: I) -> EdgePartition
where
    I: IntoIterator<Item = Edge>,
{
    let (boundary, interior) = edges.into_iter().partition(Edge::is_outer);
    EdgePartition { boundary, interior }
}

/// Keep only edges used by exactly one triangle.
pub fn filter_by_triangle_count<I>(edges: I) -> Vec<Edge>
where
    I: IntoIterator<Item = Edge>,
{
    edges.into_iter().filter(Edge::is_outer).collect()
}

/// Split edges by the oracle distance at their midpoint: `distance <= threshold`
/// is boundary, `distance > threshold` is interior.
///
/// Edges whose distance is NaN satisfy neither comparison and are dropped.
pub fn partition_by_boundary_distance<I, D>(edges: I, oracle: &D, threshold: f64) -> EdgePartition
where
    I: IntoIterator<Item = Edge>,
    D: BoundaryDistance + ?Sized,
{
    let mut partition = EdgePartition::default();
    for edge in edges {
        let distance = oracle.distance_to_boundary(&edge.midpoint());
        if distance <= threshold {
            partition.boundary.push(edge);
        } else if distance > threshold {
            partition.interior.push(edge);
        }
    }
    partition
}

/// Keep edges near the boundary (`return_outer`) or away from it (`!return_outer`).
pub fn filter_by_boundary_distance<I, D>(
    edges: I,
    oracle: &D,
    threshold: f64,
    return_outer: bool,
) -> Vec<Edge>
where
    I: IntoIterator<Item = Edge>,
    D: BoundaryDistance + ?Sized,
{
    let partition = partition_by_boundary_distance(edges, oracle, threshold);
    if return_outer {
        partition.boundary
    } else {
        partition.interior
    }
}
