// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end boundary extraction and wall extrusion.
//!
//! ```text
//! surface ─▶ [upper surface] ─▶ edges ─▶ [count filter] ─▶ [distance filter]
//!         ─▶ [vertex merge] ─▶ extrude ─▶ walls
//! ```
//!
//! Bracketed stages are switched by [`BoundaryConfig`]. The pipeline holds no
//! state between runs.

use std::time::Instant;

use navwall_geometry::SurfaceMesh;

use crate::classify::{filter_by_boundary_distance, filter_by_triangle_count, BoundaryDistance};
use crate::config::BoundaryConfig;
use crate::edges::{Edge, EdgeSet};
use crate::error::{Error, Result};
use crate::extrude::{extrude_boundary, extrusion_top};
use crate::merge::{merge_vertices, MergeStatus};
use crate::upper_surface::remove_lower_triangles;

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct BoundaryWalls {
    /// Extruded wall mesh
    pub walls: SurfaceMesh,
    /// Boundary edges the walls were built from (after merging, if enabled)
    pub boundary_edges: Vec<Edge>,
    /// Reduced surface, when lower triangles were excluded
    pub upper_surface: Option<SurfaceMesh>,
    /// Merge outcome, when vertex merging ran
    pub merge: Option<MergeStatus>,
    /// Height of the wall tops
    pub top_y: f64,
}

/// Configured boundary pipeline.
#[derive(Debug, Clone)]
pub struct BoundaryPipeline {
    config: BoundaryConfig,
}

impl BoundaryPipeline {
    /// Create a pipeline, rejecting invalid configuration.
    pub fn new(config: BoundaryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    /// Run every enabled stage over `mesh`.
    ///
    /// `oracle` is required only when the boundary-distance filter is enabled.
    pub fn run(
        &self,
        mesh: &SurfaceMesh,
        oracle: Option<&dyn BoundaryDistance>,
    ) -> Result<BoundaryWalls> {
        let config = &self.config;
        let start = Instant::now();

        mesh.validate()?;
        if config.use_boundary_distance_filter && oracle.is_none() {
            return Err(Error::MissingBoundaryOracle);
        }

        let upper_surface = config
            .exclude_lower_triangles
            .then(|| remove_lower_triangles(mesh));
        let surface = upper_surface.as_ref().unwrap_or(mesh);

        let edge_set = EdgeSet::from_mesh(surface);
        tracing::debug!(
            triangles = surface.triangle_count(),
            edges = edge_set.len(),
            non_manifold = edge_set.non_manifold_count(),
            "built edge adjacency"
        );

        let mut edges = edge_set.into_edges();
        if config.use_triangle_count_filter {
            edges = filter_by_triangle_count(edges);
            tracing::debug!(remaining = edges.len(), "filtered edges by triangle count");
        }
        if let (true, Some(oracle)) = (config.use_boundary_distance_filter, oracle) {
            edges = filter_by_boundary_distance(
                edges,
                oracle,
                config.boundary_distance_threshold,
                config.return_outer,
            );
            tracing::debug!(remaining = edges.len(), "filtered edges by boundary distance");
        }

        let mut merge = None;
        if config.merge_vertices {
            let outcome = merge_vertices(
                &edges,
                config.vertex_merge_threshold,
                config.max_merge_passes,
            );
            tracing::debug!(passes = outcome.status.passes(), "merged edge endpoints");
            edges = outcome.edges;
            merge = Some(outcome.status);
        }

        let top_y = extrusion_top(mesh, config.min_extrusion_height);
        let walls = extrude_boundary(&edges, top_y);

        tracing::info!(
            boundary_edges = edges.len(),
            wall_vertices = walls.vertex_count(),
            wall_triangles = walls.triangle_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "extruded boundary walls"
        );

        Ok(BoundaryWalls {
            walls,
            boundary_edges: edges,
            upper_surface,
            merge,
            top_y,
        })
    }
}
