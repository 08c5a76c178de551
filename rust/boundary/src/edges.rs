// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge adjacency for triangle soups.
//!
//! Edges are identified by the positions of their endpoints rather than by
//! vertex index, so two triangles that reference duplicated vertices at the
//! same location still share an edge. Each edge counts how many triangles
//! use it as a side:
//!
//! - 1: boundary edge
//! - 2: interior edge of a manifold surface
//! - more: non-manifold edge (tolerated)

use nalgebra::Point3;
use navwall_geometry::{PointKey, SurfaceMesh};
use rustc_hash::FxHashMap;

/// Direction-independent key for an edge: its endpoint keys in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    low: PointKey,
    high: PointKey,
}

impl EdgeKey {
    /// `EdgeKey::new(a, b) == EdgeKey::new(b, a)` for all positions.
    pub fn new(a: &Point3<f64>, b: &Point3<f64>) -> Self {
        let (ka, kb) = (PointKey::new(a), PointKey::new(b));
        if ka <= kb {
            Self { low: ka, high: kb }
        } else {
            Self { low: kb, high: ka }
        }
    }
}

/// One side of one or more triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Vertex indices of the first triangle side that produced this edge
    pub indices: [u32; 2],
    /// Endpoint positions, in the same order as `indices`
    pub positions: [Point3<f64>; 2],
    /// Number of triangles having this edge as a side
    pub triangle_count: u32,
}

impl Edge {
    pub fn new(indices: [u32; 2], positions: [Point3<f64>; 2], triangle_count: u32) -> Self {
        Self {
            indices,
            positions,
            triangle_count,
        }
    }

    #[inline]
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.positions[0], &self.positions[1])
    }

    #[inline]
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.positions[0], &self.positions[1])
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.positions[1] - self.positions[0]).norm()
    }

    /// Both endpoints at the same position
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.positions[0] == self.positions[1]
    }

    /// Used by exactly one triangle
    #[inline]
    pub fn is_outer(&self) -> bool {
        self.triangle_count == 1
    }
}

/// Deduplicated edges of a mesh with per-edge triangle counts.
///
/// Records live in a vector in first-occurrence order; the map only stores
/// indices into it, so counts are updated in place.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    lookup: FxHashMap<EdgeKey, usize>,
    edges: Vec<Edge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the sides of every triangle in `mesh`.
    ///
    /// # Panics
    /// If the index buffer references a vertex past the end of the vertex
    /// buffer. Use [`SurfaceMesh::validate`] first for untrusted input.
    pub fn from_mesh(mesh: &SurfaceMesh) -> Self {
        let mut set = Self {
            lookup: FxHashMap::with_capacity_and_hasher(
                mesh.triangle_count() * 3 / 2,
                Default::default(),
            ),
            edges: Vec::with_capacity(mesh.triangle_count() * 3 / 2),
        };

        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle_indices(t);
            for (i, j) in [(a, b), (b, c), (c, a)] {
                set.insert(i, j, mesh.vertex(i), mesh.vertex(j));
            }
        }

        set
    }

    /// Record one triangle side, bumping the count if the edge is known.
    pub fn insert(&mut self, i: u32, j: u32, pi: Point3<f64>, pj: Point3<f64>) {
        let key = EdgeKey::new(&pi, &pj);
        match self.lookup.get(&key) {
            Some(&slot) => self.edges[slot].triangle_count += 1,
            None => {
                self.lookup.insert(key, self.edges.len());
                self.edges.push(Edge::new([i, j], [pi, pj], 1));
            }
        }
    }

    /// Look up the edge between two positions, in either order.
    pub fn get(&self, a: &Point3<f64>, b: &Point3<f64>) -> Option<&Edge> {
        self.lookup
            .get(&EdgeKey::new(a, b))
            .map(|&slot| &self.edges[slot])
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of triangle counts; equals `3 * triangle_count` of the source mesh.
    pub fn total_membership(&self) -> usize {
        self.edges.iter().map(|e| e.triangle_count as usize).sum()
    }

    /// Edges used by exactly one triangle
    pub fn boundary_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_outer()).count()
    }

    /// Edges used by more than two triangles
    pub fn non_manifold_count(&self) -> usize {
        self.edges.iter().filter(|e| e.triangle_count > 2).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    fn quad() -> SurfaceMesh {
        SurfaceMesh::from_triangles(
            &[
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 0.0, 1.0),
                p(0.0, 0.0, 1.0),
            ],
            &[[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn single_triangle_has_three_outer_edges() {
        let mesh = SurfaceMesh::from_triangles(
            &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 0.0, 1.0)],
            &[[0, 1, 2]],
        )
        .unwrap();
        let set = EdgeSet::from_mesh(&mesh);
        assert_eq!(set.len(), 3);
        assert_eq!(set.boundary_count(), 3);
        assert_eq!(set.edges()[0].indices, [0, 1]);
    }

    #[test]
    fn quad_diagonal_is_shared() {
        let set = EdgeSet::from_mesh(&quad());
        assert_eq!(set.len(), 5);
        assert_eq!(set.boundary_count(), 4);
        assert_eq!(set.total_membership(), 6);

        let diagonal = set.get(&p(1.0, 0.0, 1.0), &p(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(diagonal.triangle_count, 2);
    }

    #[test]
    fn duplicated_vertices_collapse_by_position() {
        // Same quad, but the second triangle uses its own copies of the diagonal
        let mesh = SurfaceMesh::from_triangles(
            &[
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 0.0, 1.0),
                p(0.0, 0.0, 1.0),
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 1.0),
            ],
            &[[0, 1, 2], [4, 5, 3]],
        )
        .unwrap();
        let set = EdgeSet::from_mesh(&mesh);
        assert_eq!(set.len(), 5);
        assert_eq!(set.boundary_count(), 4);
    }

    #[test]
    fn non_manifold_edges_are_counted() {
        // Three triangles fanning off the same edge
        let mesh = SurfaceMesh::from_triangles(
            &[
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(0.5, 0.0, 1.0),
                p(0.5, 1.0, 0.0),
                p(0.5, 0.0, -1.0),
            ],
            &[[0, 1, 2], [1, 0, 3], [0, 1, 4]],
        )
        .unwrap();
        let set = EdgeSet::from_mesh(&mesh);
        assert_eq!(set.non_manifold_count(), 1);
        assert_eq!(set.get(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0)).unwrap().triangle_count, 3);
        assert_eq!(set.total_membership(), 9);
    }

    #[test]
    fn empty_mesh_has_no_edges() {
        let set = EdgeSet::from_mesh(&SurfaceMesh::new());
        assert!(set.is_empty());
        assert_eq!(set.total_membership(), 0);
    }

    #[test]
    fn edge_helpers() {
        let e = Edge::new([0, 1], [p(0.0, 0.0, 0.0), p(3.0, 0.0, 4.0)], 1);
        assert_eq!(e.length(), 5.0);
        assert_eq!(e.midpoint(), p(1.5, 0.0, 2.0));
        assert!(!e.is_degenerate());
        assert!(e.is_outer());
    }

    fn arb_point() -> impl Strategy<Value = Point3<f64>> {
        // Small integer lattice so that positions repeat often
        (0..4i32, 0..2i32, 0..4i32).prop_map(|(x, y, z)| p(x as f64, y as f64, z as f64))
    }

    proptest! {
        #[test]
        fn edge_key_is_symmetric(a in arb_point(), b in arb_point()) {
            prop_assert_eq!(EdgeKey::new(&a, &b), EdgeKey::new(&b, &a));
        }

        #[test]
        fn membership_sums_to_three_per_triangle(
            vertices in prop::collection::vec(arb_point(), 3..20),
            picks in prop::collection::vec(prop::array::uniform3(0usize..1000), 0..30),
        ) {
            let n = vertices.len();
            let triangles: Vec<[u32; 3]> = picks
                .iter()
                .map(|t| [(t[0] % n) as u32, (t[1] % n) as u32, (t[2] % n) as u32])
                .collect();
            let mesh = SurfaceMesh::from_triangles(&vertices, &triangles).unwrap();
            let set = EdgeSet::from_mesh(&mesh);
            prop_assert_eq!(set.total_membership(), 3 * triangles.len());
        }
    }
}
