// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plain geometric value types.
//!
//! The walkable surface is Y-up: the "ground" projection of a 3D point is its
//! `(x, z)` pair, and heights are measured along `y`.

use nalgebra::{Point2, Point3};

/// Project a 3D point onto the ground plane, `(x, y, z) -> (x, z)`.
#[inline]
pub fn ground(point: &Point3<f64>) -> Point2<f64> {
    Point2::new(point.x, point.z)
}

/// Lift a ground position back to 3D at the given height.
#[inline]
pub fn lift(point: &Point2<f64>, height: f64) -> Point3<f64> {
    Point3::new(point.x, height, point.y)
}

/// 2D segment stored as an ordered pair of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Line2 {
    #[inline]
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }
}

/// 3D segment stored as an ordered pair of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Line3 {
    #[inline]
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Unit-length vertical line through a ground position, used as a height probe.
    #[inline]
    pub fn vertical(at: &Point2<f64>) -> Self {
        Self {
            start: lift(at, 0.0),
            end: lift(at, 1.0),
        }
    }
}

/// 2D triangle; winding order is not significant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle2 {
    pub a: Point2<f64>,
    pub b: Point2<f64>,
    pub c: Point2<f64>,
}

impl Triangle2 {
    #[inline]
    pub fn new(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn corners(&self) -> [Point2<f64>; 3] {
        [self.a, self.b, self.c]
    }

    /// The three sides in corner order: ab, bc, ca.
    #[inline]
    pub fn sides(&self) -> [Line2; 3] {
        [
            Line2::new(self.a, self.b),
            Line2::new(self.b, self.c),
            Line2::new(self.c, self.a),
        ]
    }

    pub fn bounds(&self) -> Rect2 {
        Rect2::from_points(&self.corners()).unwrap_or_else(|| Rect2::from_corners(self.a, self.a))
    }
}

/// 3D triangle; winding order is not significant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3 {
    pub a: Point3<f64>,
    pub b: Point3<f64>,
    pub c: Point3<f64>,
}

impl Triangle3 {
    #[inline]
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn corners(&self) -> [Point3<f64>; 3] {
        [self.a, self.b, self.c]
    }

    /// Projection onto the ground plane
    #[inline]
    pub fn ground(&self) -> Triangle2 {
        Triangle2::new(ground(&self.a), ground(&self.b), ground(&self.c))
    }

    pub fn bounds(&self) -> Box3 {
        Box3::from_points(&self.corners()).unwrap_or_else(|| Box3::from_corners(self.a, self.a))
    }
}

/// Axis-aligned rectangle. `min <= max` holds on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2 {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Rect2 {
    /// Build from two opposite corners given in any order.
    pub fn from_corners(p: Point2<f64>, q: Point2<f64>) -> Self {
        Self {
            min: Point2::new(p.x.min(q.x), p.y.min(q.y)),
            max: Point2::new(p.x.max(q.x), p.y.max(q.y)),
        }
    }

    /// Tight bounds of a point set, or `None` when it is empty.
    pub fn from_points(points: &[Point2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;

        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Some(Self { min, max })
    }

    /// Square of side `2 * half_extent` centred on `center`.
    pub fn around(center: &Point2<f64>, half_extent: f64) -> Self {
        Self::from_corners(
            Point2::new(center.x - half_extent, center.y - half_extent),
            Point2::new(center.x + half_extent, center.y + half_extent),
        )
    }

    /// Grow (or, for a negative margin, shrink) every side by `margin`.
    pub fn expanded(&self, margin: f64) -> Self {
        Self::from_corners(
            Point2::new(self.min.x - margin, self.min.y - margin),
            Point2::new(self.max.x + margin, self.max.y + margin),
        )
    }

    /// Closed-interval overlap test; touching rectangles intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect2) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    #[inline]
    pub fn contains_point(&self, p: &Point2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Axis-aligned box. `min <= max` holds on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box3 {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Box3 {
    /// Build from two opposite corners given in any order.
    pub fn from_corners(p: Point3<f64>, q: Point3<f64>) -> Self {
        Self {
            min: Point3::new(p.x.min(q.x), p.y.min(q.y), p.z.min(q.z)),
            max: Point3::new(p.x.max(q.x), p.y.max(q.y), p.z.max(q.z)),
        }
    }

    /// Tight bounds of a point set, or `None` when it is empty.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;

        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    /// Ground-plane footprint `(x, z)`
    #[inline]
    pub fn ground(&self) -> Rect2 {
        Rect2 {
            min: ground(&self.min),
            max: ground(&self.max),
        }
    }
}
