// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exact position keys.
//!
//! Vertex deduplication throughout the pipeline is by exact coordinate
//! equality, not by tolerance. `PointKey` turns a position into a hashable,
//! totally ordered value so it can key hash maps directly.

use std::cmp::Ordering;

use nalgebra::Point3;

/// Hashable key for an exact 3D position.
///
/// Two positions map to the same key iff their coordinates compare equal
/// (`-0.0` and `+0.0` are folded together).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey([u64; 3]);

impl PointKey {
    #[inline]
    pub fn new(point: &Point3<f64>) -> Self {
        Self([bits(point.x), bits(point.y), bits(point.z)])
    }

    /// Recover the position this key was built from.
    #[inline]
    pub fn point(&self) -> Point3<f64> {
        Point3::new(
            f64::from_bits(self.0[0]),
            f64::from_bits(self.0[1]),
            f64::from_bits(self.0[2]),
        )
    }
}

impl From<&Point3<f64>> for PointKey {
    fn from(point: &Point3<f64>) -> Self {
        Self::new(point)
    }
}

impl PartialOrd for PointKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointKey {
    /// Lexicographic on x, then y, then z.
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.point();
        let b = other.point();
        a.x.total_cmp(&b.x)
            .then_with(|| a.y.total_cmp(&b.y))
            .then_with(|| a.z.total_cmp(&b.z))
    }
}

#[inline]
fn bits(value: f64) -> u64 {
    // -0.0 == 0.0 but their bit patterns differ
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Lexicographic comparison of two positions (x, then y, then z).
#[inline]
pub fn compare_points(a: &Point3<f64>, b: &Point3<f64>) -> Ordering {
    PointKey::new(a).cmp(&PointKey::new(b))
}
