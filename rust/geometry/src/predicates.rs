// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stateless geometric tests used by the boundary pipeline.
//!
//! All tests are tolerant of degenerate input: zero-area triangles and
//! zero-length segments never panic, they simply fail the test they cannot
//! satisfy.

use nalgebra::{Point2, Point3, Vector2};
use smallvec::SmallVec;

use crate::primitives::{Line2, Line3, Triangle2, Triangle3};

/// Below this absolute barycentric denominator a triangle is treated as degenerate.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Sine of the smallest angle still treated as non-parallel.
pub const PARALLEL_EPSILON: f64 = 1e-12;

/// Distance below which a line counts as lying inside a plane.
pub const COPLANAR_EPSILON: f64 = 1e-9;

/// Relative slack on the segment end checks, so touching endpoints count.
pub const SEGMENT_EPSILON: f64 = 1e-9;

/// Height difference below which two surfaces count as level.
pub const LEVEL_EPSILON: f64 = 1e-9;

/// Intersection points between two triangles' footprints (at most 9 + 6)
pub type OverlapPoints = SmallVec<[Point2<f64>; 16]>;

/// Result of intersecting a line with the plane of a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinePlaneIntersection {
    /// Line is parallel to the plane and off it
    NoIntersection,
    /// Line lies in the plane
    Parallel,
    /// Line crosses the plane at a single point
    Point(Point3<f64>),
}

#[inline]
fn cross2(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Barycentric point-in-triangle test.
///
/// With `include_edges` a point on a side or corner counts as inside.
/// Degenerate (collinear) triangles contain nothing.
pub fn point_in_triangle(p: &Point2<f64>, triangle: &Triangle2, include_edges: bool) -> bool {
    let (a, b, c) = (triangle.a, triangle.b, triangle.c);

    let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if det.abs() < DEGENERATE_EPSILON {
        return false;
    }

    let u = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / det;
    let v = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / det;
    let w = 1.0 - u - v;

    if include_edges {
        u >= 0.0 && v >= 0.0 && w >= 0.0
    } else {
        u > 0.0 && v > 0.0 && w > 0.0
    }
}

/// Intersection point of two segments, or `None` when they are parallel or
/// do not reach each other.
pub fn segment_intersection_2d(first: &Line2, second: &Line2) -> Option<Point2<f64>> {
    let d1 = first.end - first.start;
    let d2 = second.end - second.start;

    let denom = cross2(&d1, &d2);
    if denom.abs() <= PARALLEL_EPSILON * d1.norm() * d2.norm() {
        return None;
    }

    // Intersection of the infinite lines
    let t = cross2(&(second.start - first.start), &d2) / denom;
    let p = first.start + d1 * t;

    // Reject unless p lies between both endpoints of both segments
    let within = |line: &Line2, dir: &Vector2<f64>| {
        let slack = -SEGMENT_EPSILON * dir.norm_squared();
        (p - line.start).dot(dir) >= slack && (line.end - p).dot(dir) >= slack
    };

    if within(first, &d1) && within(second, &d2) {
        Some(p)
    } else {
        None
    }
}

/// All points where the two triangles' outlines cross, plus every corner of
/// one triangle lying inside or on the other.
///
/// The result is neither deduplicated nor ordered.
pub fn triangle_intersection_2d(first: &Triangle2, second: &Triangle2) -> OverlapPoints {
    let mut points = OverlapPoints::new();

    for side_a in first.sides() {
        for side_b in second.sides() {
            if let Some(p) = segment_intersection_2d(&side_a, &side_b) {
                points.push(p);
            }
        }
    }

    points.extend(
        first
            .corners()
            .into_iter()
            .filter(|p| point_in_triangle(p, second, true)),
    );
    points.extend(
        second
            .corners()
            .into_iter()
            .filter(|p| point_in_triangle(p, first, true)),
    );

    points
}

/// Intersect an infinite line with the plane through a triangle.
pub fn line_plane_intersection_3d(line: &Line3, plane: &Triangle3) -> LinePlaneIntersection {
    let normal = (plane.b - plane.a).cross(&(plane.c - plane.a));
    let dir = line.end - line.start;

    let numerator = (plane.a - line.start).dot(&normal);
    let denominator = dir.dot(&normal);
    let normal_len = normal.norm();

    if denominator.abs() <= PARALLEL_EPSILON * normal_len * dir.norm() {
        return if numerator.abs() <= COPLANAR_EPSILON * normal_len {
            LinePlaneIntersection::Parallel
        } else {
            LinePlaneIntersection::NoIntersection
        };
    }

    LinePlaneIntersection::Point(line.start + dir * (numerator / denominator))
}

/// Surface heights `(first, second)` at each comparable overlap point.
///
/// Points where a vertical probe misses either plane are skipped.
fn overlap_heights(first: &Triangle3, second: &Triangle3) -> impl Iterator<Item = (f64, f64)> {
    let first = *first;
    let second = *second;
    triangle_intersection_2d(&first.ground(), &second.ground())
        .into_iter()
        .filter_map(move |p| {
            let probe = Line3::vertical(&p);
            match (
                line_plane_intersection_3d(&probe, &first),
                line_plane_intersection_3d(&probe, &second),
            ) {
                (LinePlaneIntersection::Point(h1), LinePlaneIntersection::Point(h2)) => {
                    Some((h1.y, h2.y))
                }
                _ => None,
            }
        })
}

/// True iff `upper` lies strictly above `lower` at every point where their
/// footprints overlap.
///
/// Triangles whose footprints do not overlap dominate each other vacuously.
pub fn triangle_dominates_vertically(upper: &Triangle3, lower: &Triangle3) -> bool {
    overlap_heights(upper, lower).all(|(h1, h2)| h1 > h2)
}

/// True iff the footprints overlap at one or more comparable points and the two
/// surfaces have the same height (within [`LEVEL_EPSILON`]) at all of them.
pub fn triangles_level(first: &Triangle3, second: &Triangle3) -> bool {
    let mut compared = false;
    for (h1, h2) in overlap_heights(first, second) {
        if (h1 - h2).abs() > LEVEL_EPSILON {
            return false;
        }
        compared = true;
    }
    compared
}

/// True iff any corner of `first` is exactly equal to any corner of `second`.
pub fn share_any_vertex(first: &Triangle3, second: &Triangle3) -> bool {
    let theirs = second.corners();
    first
        .corners()
        .iter()
        .any(|p| theirs.iter().any(|q| p == q))
}
