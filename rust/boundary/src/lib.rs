// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Navwall Boundary
//!
//! Boundary extraction and wall extrusion for triangulated walkable surfaces.
//!
//! Given a navigation surface as flat vertex and index buffers, the pipeline
//! finds the edges on the rim of the surface, optionally welds near-duplicate
//! endpoints, and raises each rim edge into a vertical wall quad. A separate
//! stage drops triangles hidden underneath other triangles (lower storeys) so
//! that only the surface visible from above contributes edges.
//!
//! Every stage is a pure batch transform over its inputs.

pub mod classify;
pub mod config;
pub mod edges;
pub mod error;
pub mod extrude;
pub mod merge;
pub mod pipeline;
pub mod upper_surface;

pub use classify::{
    filter_by_boundary_distance, filter_by_triangle_count, partition_by_boundary_distance,
    partition_by_triangle_count, BoundaryDistance, EdgePartition,
};
pub use config::BoundaryConfig;
pub use edges::{Edge, EdgeKey, EdgeSet};
pub use error::{Error, Result};
pub use extrude::{extrude_boundary, extrusion_top};
pub use merge::{merge_vertices, MergeOutcome, MergeStatus};
pub use pipeline::{BoundaryPipeline, BoundaryWalls};
pub use upper_surface::{remove_lower_triangles, upper_surface_triangles};

pub use navwall_geometry::{Point3, SurfaceMesh};
