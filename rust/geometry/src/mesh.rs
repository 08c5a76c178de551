// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::key::PointKey;
use crate::primitives::{Box3, Triangle3};

/// Triangle mesh stored as a pair of flat buffers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f64>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(triangle_count * 3),
        }
    }

    /// Wrap externally produced buffers, rejecting malformed ones.
    pub fn from_buffers(positions: Vec<f64>, indices: Vec<u32>) -> Result<Self> {
        let mesh = Self { positions, indices };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Build from vertex positions and index triples.
    pub fn from_triangles(vertices: &[Point3<f64>], triangles: &[[u32; 3]]) -> Result<Self> {
        let mut mesh = Self::with_capacity(vertices.len(), triangles.len());
        for v in vertices {
            mesh.add_vertex(v);
        }
        for t in triangles {
            mesh.add_triangle(t[0], t[1], t[2]);
        }
        mesh.validate()?;
        Ok(mesh)
    }

    /// Check buffer shapes and that every index references an existing vertex.
    pub fn validate(&self) -> Result<()> {
        if self.positions.len() % 3 != 0 {
            return Err(Error::MalformedBuffer(format!(
                "vertex buffer length {} is not a multiple of 3",
                self.positions.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(Error::MalformedBuffer(format!(
                "index buffer length {} is not a multiple of 3",
                self.indices.len()
            )));
        }

        let vertex_count = self.vertex_count();
        if let Some(pos) = self
            .indices
            .iter()
            .position(|&i| i as usize >= vertex_count)
        {
            return Err(Error::IndexOutOfRange {
                triangle: pos / 3,
                index: self.indices[pos],
                vertex_count,
            });
        }

        Ok(())
    }

    /// Append a vertex, returning its index
    #[inline]
    pub fn add_vertex(&mut self, position: &Point3<f64>) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.push(position.x);
        self.positions.push(position.y);
        self.positions.push(position.z);
        index
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Position of vertex `index`.
    ///
    /// # Panics
    /// If `index` is out of range.
    #[inline]
    pub fn vertex(&self, index: u32) -> Point3<f64> {
        let i = index as usize * 3;
        Point3::new(self.positions[i], self.positions[i + 1], self.positions[i + 2])
    }

    /// Index triple of triangle `index`.
    #[inline]
    pub fn triangle_indices(&self, index: usize) -> [u32; 3] {
        let i = index * 3;
        [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
    }

    /// Resolved corners of triangle `index`.
    #[inline]
    pub fn triangle(&self, index: usize) -> Triangle3 {
        let [a, b, c] = self.triangle_indices(index);
        Triangle3::new(self.vertex(a), self.vertex(b), self.vertex(c))
    }

    /// Iterate over resolved triangles in buffer order
    pub fn triangles(&self) -> impl Iterator<Item = Triangle3> + '_ {
        (0..self.triangle_count()).map(move |i| self.triangle(i))
    }

    /// Iterate over vertex positions in buffer order
    pub fn vertices(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounds, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Box3> {
        if self.is_empty() {
            return None;
        }

        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        Some(Box3 { min, max })
    }
}

/// Incrementally builds a mesh whose vertices are deduplicated by exact
/// position, so triangles emitted against the same corner share an index.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    mesh: SurfaceMesh,
    lookup: FxHashMap<PointKey, u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            mesh: SurfaceMesh::with_capacity(vertex_count, triangle_count),
            lookup: FxHashMap::with_capacity_and_hasher(vertex_count, Default::default()),
        }
    }

    /// Index of the vertex at exactly `position`, appending it if new.
    pub fn vertex(&mut self, position: &Point3<f64>) -> u32 {
        let mesh = &mut self.mesh;
        *self
            .lookup
            .entry(PointKey::new(position))
            .or_insert_with(|| mesh.add_vertex(position))
    }

    pub fn triangle(&mut self, a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) {
        let (ia, ib, ic) = (self.vertex(a), self.vertex(b), self.vertex(c));
        self.mesh.add_triangle(ia, ib, ic);
    }

    pub fn build(self) -> SurfaceMesh {
        self.mesh
    }
}
