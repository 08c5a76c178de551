// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration.

use crate::classify::DEFAULT_BOUNDARY_THRESHOLD;
use crate::error::{Error, Result};
use crate::merge::DEFAULT_MAX_MERGE_PASSES;

/// Boundary pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoundaryConfig {
    /// Wall height above the highest vertex of the input surface.
    pub min_extrusion_height: f64,
    /// Keep only edges used by exactly one triangle.
    pub use_triangle_count_filter: bool,
    /// Filter edges by the boundary-distance oracle.
    pub use_boundary_distance_filter: bool,
    /// Distance at or below which an edge midpoint counts as on the boundary.
    pub boundary_distance_threshold: f64,
    /// Keep edges near the boundary (true) or away from it (false).
    pub return_outer: bool,
    /// Cluster near-duplicate edge endpoints before extruding.
    pub merge_vertices: bool,
    /// Endpoints closer than this are merged.
    pub vertex_merge_threshold: f64,
    /// Cap on vertex merge passes.
    pub max_merge_passes: usize,
    /// Drop triangles hidden below other triangles before extracting edges.
    pub exclude_lower_triangles: bool,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            min_extrusion_height: 2.0,
            use_triangle_count_filter: true,
            use_boundary_distance_filter: false,
            boundary_distance_threshold: DEFAULT_BOUNDARY_THRESHOLD,
            return_outer: true,
            merge_vertices: false,
            vertex_merge_threshold: 0.05,
            max_merge_passes: DEFAULT_MAX_MERGE_PASSES,
            exclude_lower_triangles: false,
        }
    }
}

impl BoundaryConfig {
    /// Load configuration from `NAVWALL_*` environment variables, falling
    /// back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse_f64 = |key: &str, default: f64| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        let parse_bool = |key: &str, default: bool| {
            lookup(key)
                .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Some(true),
                    "0" | "false" | "no" | "off" => Some(false),
                    _ => None,
                })
                .unwrap_or(default)
        };

        Self {
            min_extrusion_height: parse_f64(
                "NAVWALL_MIN_EXTRUSION_HEIGHT",
                defaults.min_extrusion_height,
            ),
            use_triangle_count_filter: parse_bool(
                "NAVWALL_USE_TRIANGLE_COUNT_FILTER",
                defaults.use_triangle_count_filter,
            ),
            use_boundary_distance_filter: parse_bool(
                "NAVWALL_USE_BOUNDARY_DISTANCE_FILTER",
                defaults.use_boundary_distance_filter,
            ),
            boundary_distance_threshold: parse_f64(
                "NAVWALL_BOUNDARY_DISTANCE_THRESHOLD",
                defaults.boundary_distance_threshold,
            ),
            return_outer: parse_bool("NAVWALL_RETURN_OUTER", defaults.return_outer),
            merge_vertices: parse_bool("NAVWALL_MERGE_VERTICES", defaults.merge_vertices),
            vertex_merge_threshold: parse_f64(
                "NAVWALL_VERTEX_MERGE_THRESHOLD",
                defaults.vertex_merge_threshold,
            ),
            max_merge_passes: lookup("NAVWALL_MAX_MERGE_PASSES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_merge_passes),
            exclude_lower_triangles: parse_bool(
                "NAVWALL_EXCLUDE_LOWER_TRIANGLES",
                defaults.exclude_lower_triangles,
            ),
        }
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.min_extrusion_height.is_finite() || self.min_extrusion_height < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_extrusion_height must be a finite non-negative number, got {}",
                self.min_extrusion_height
            )));
        }
        if !self.boundary_distance_threshold.is_finite() || self.boundary_distance_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "boundary_distance_threshold must be a finite non-negative number, got {}",
                self.boundary_distance_threshold
            )));
        }
        if self.merge_vertices {
            if !self.vertex_merge_threshold.is_finite() || self.vertex_merge_threshold <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "vertex_merge_threshold must be a finite positive number, got {}",
                    self.vertex_merge_threshold
                )));
            }
            if self.max_merge_passes == 0 {
                return Err(Error::InvalidConfig(
                    "max_merge_passes must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }
}
