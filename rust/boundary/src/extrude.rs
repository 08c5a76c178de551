// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion of boundary edges into a vertical wall mesh

use nalgebra::Point3;
use navwall_geometry::{MeshBuilder, SurfaceMesh};

use crate::edges::Edge;

/// Height of the wall tops: the highest vertex of `mesh` plus `min_height`.
///
/// An empty mesh is treated as lying at height zero.
pub fn extrusion_top(mesh: &SurfaceMesh, min_height: f64) -> f64 {
    mesh.bounds().map(|b| b.max.y).unwrap_or(0.0) + min_height
}

/// Turn each edge into a vertical quad reaching up to `top_y`.
///
/// Each quad is two triangles between the edge's ground endpoints and their
/// copies raised to `top_y`. Vertices are shared by exact position, so a
/// closed loop of N edges yields 2N vertices and 2N triangles.
pub fn extrude_boundary(edges: &[Edge], top_y: f64) -> SurfaceMesh {
    let mut builder = MeshBuilder::with_capacity(edges.len() * 2, edges.len() * 2);

    for edge in edges {
        let [p0, p1] = edge.positions;
        let t0 = Point3::new(p0.x, top_y, p0.z);
        let t1 = Point3::new(p1.x, top_y, p1.z);

        builder.triangle(&p0, &p1, &t1);
        builder.triangle(&p0, &t1, &t0);
    }

    builder.build()
}
