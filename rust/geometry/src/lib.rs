// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Navwall Geometry
//!
//! Geometric primitives, predicates and spatial hashing for triangulated
//! walkable surfaces, built on nalgebra. The surface is Y-up; 2D tests work
//! on the ground-plane projection `(x, z)`.

pub mod error;
pub mod grid;
pub mod key;
pub mod mesh;
pub mod predicates;
pub mod primitives;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use error::{Error, Result};
pub use grid::{cell_size_for_density, SpatialGrid};
pub use key::{compare_points, PointKey};
pub use mesh::{MeshBuilder, SurfaceMesh};
pub use predicates::{
    line_plane_intersection_3d, point_in_triangle, segment_intersection_2d, share_any_vertex,
    triangle_dominates_vertically, triangle_intersection_2d, triangles_level,
    LinePlaneIntersection,
};
pub use primitives::{ground, lift, Box3, Line2, Line3, Rect2, Triangle2, Triangle3};
