// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Upper-surface extraction.
//!
//! Multi-storey walkable surfaces overlap in plan view. A triangle survives
//! only if it lies above every other triangle whose footprint it overlaps,
//! unless the two are connected (share a corner) or level with each other.

use navwall_geometry::{
    cell_size_for_density, share_any_vertex, triangle_dominates_vertically, triangles_level,
    MeshBuilder, SpatialGrid, SurfaceMesh, Triangle3,
};

/// Average number of footprints per grid cell.
const GRID_DENSITY: f64 = 4.0;

/// Footprint margin so that triangles touching along an edge still meet in the grid.
pub const OVERLAP_MARGIN: f64 = 0.1;

/// Indices (ascending) of the triangles visible from above.
///
/// `main` is dropped as soon as it overlaps some `other` that it does not
/// share a corner with, is not level with, and does not lie strictly above.
/// Overlapping coplanar triangles keep each other.
pub fn upper_surface_triangles(mesh: &SurfaceMesh) -> Vec<usize> {
    let triangles: Vec<Triangle3> = mesh.triangles().collect();
    if triangles.is_empty() {
        return Vec::new();
    }

    let footprints: Vec<_> = triangles
        .iter()
        .map(|t| t.ground().bounds().expanded(OVERLAP_MARGIN))
        .collect();

    let cell_size = footprint_cell_size(mesh, triangles.len());

    let mut grid = SpatialGrid::new(cell_size);
    for (i, footprint) in footprints.iter().enumerate() {
        grid.add(i, footprint);
    }

    let mut kept = Vec::with_capacity(triangles.len());
    for (i, main) in triangles.iter().enumerate() {
        let mut candidates: Vec<usize> = grid.query(&footprints[i]).into_iter().collect();
        candidates.sort_unstable();

        let hidden = candidates.into_iter().any(|j| {
            let other = &triangles[j];
            if j == i || other == main {
                return false;
            }
            !share_any_vertex(main, other)
                && !triangle_dominates_vertically(main, other)
                && !triangles_level(main, other)
        });

        if !hidden {
            kept.push(i);
        }
    }

    tracing::debug!(
        triangles = triangles.len(),
        kept = kept.len(),
        cell_size,
        "extracted upper surface"
    );
    kept
}

/// Grid cell size for `count` footprints over `mesh`.
///
/// Never smaller than an expanded footprint's margin span, so each footprint
/// touches a bounded number of cells on fine meshes.
fn footprint_cell_size(mesh: &SurfaceMesh, count: usize) -> f64 {
    mesh.bounds()
        .map(|b| cell_size_for_density(&b.ground(), count, GRID_DENSITY))
        .unwrap_or(1.0)
        .max(2.0 * OVERLAP_MARGIN)
}

/// Rebuild `mesh` with only its upper-surface triangles, compacting the
/// vertex buffer (vertices deduplicated by exact position).
pub fn remove_lower_triangles(mesh: &SurfaceMesh) -> SurfaceMesh {
    let kept = upper_surface_triangles(mesh);
    let mut builder = MeshBuilder::with_capacity(kept.len() * 3, kept.len());
    for i in kept {
        let t = mesh.triangle(i);
        builder.triangle(&t.a, &t.b, &t.c);
    }
    builder.build()
}
