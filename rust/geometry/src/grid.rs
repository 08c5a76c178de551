// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial hash grid for 2D range queries.
//!
//! The grid divides the ground plane into square cells of side `cell_size`.
//! A payload is stored in every cell its bounding rectangle touches, so a
//! query only has to visit the cells under the query rectangle. Results are a
//! superset of the payloads whose rectangles truly intersect the query;
//! callers filter false positives with an exact test.

use std::hash::Hash;

use nalgebra::Point2;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::primitives::Rect2;

/// Smallest cell size the grid accepts; smaller requests are clamped.
pub const MIN_CELL_SIZE: f64 = 1e-9;

/// A spatial hash grid mapping integer cell coordinates to payloads.
///
/// Built once per query batch and read-only afterwards.
#[derive(Debug, Clone)]
pub struct SpatialGrid<T> {
    cell_size: f64,
    cells: FxHashMap<(i64, i64), Vec<T>>,
}

impl<T: Copy + Eq + Hash> SpatialGrid<T> {
    /// Creates an empty grid with the given cell size.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() {
            cell_size.max(MIN_CELL_SIZE)
        } else {
            1.0
        };
        Self {
            cell_size,
            cells: FxHashMap::default(),
        }
    }

    /// Inserts `payload` into every cell overlapped by `bounds`.
    pub fn add(&mut self, payload: T, bounds: &Rect2) {
        let (min_x, min_y) = self.cell_of(&bounds.min);
        let (max_x, max_y) = self.cell_of(&bounds.max);

        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                self.cells.entry((cx, cy)).or_default().push(payload);
            }
        }
    }

    /// Returns every payload stored in a cell overlapped by `bounds`.
    pub fn query(&self, bounds: &Rect2) -> FxHashSet<T> {
        let (min_x, min_y) = self.cell_of(&bounds.min);
        let (max_x, max_y) = self.cell_of(&bounds.max);
        let mut result = FxHashSet::default();

        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                if let Some(payloads) = self.cells.get(&(cx, cy)) {
                    result.extend(payloads.iter().copied());
                }
            }
        }

        result
    }

    /// Integer cell coordinate of a point (rounded to the nearest cell).
    #[inline]
    pub fn cell_of(&self, p: &Point2<f64>) -> (i64, i64) {
        (
            (p.x / self.cell_size).round() as i64,
            (p.y / self.cell_size).round() as i64,
        )
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of occupied cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Cell size that puts roughly `density` payloads in each cell when `count`
/// payloads are spread over `bounds`: `sqrt(density * area / count)`.
///
/// Falls back to the larger side of `bounds` (or 1.0) when the estimate is
/// not usable, e.g. for an empty set or a zero-area region.
pub fn cell_size_for_density(bounds: &Rect2, count: usize, density: f64) -> f64 {
    let size = (density * bounds.area() / count as f64).sqrt();
    if count > 0 && size.is_finite() && size > MIN_CELL_SIZE {
        return size;
    }

    let extent = bounds.width().max(bounds.height());
    if extent.is_finite() && extent > MIN_CELL_SIZE {
        extent
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect2 {
        Rect2::from_corners(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn query_finds_inserted_payload() {
        let mut grid = SpatialGrid::new(1.0);
        grid.add(7u32, &rect(0.0, 0.0, 0.4, 0.4));
        grid.add(9u32, &rect(10.0, 10.0, 11.0, 11.0));

        let hits = grid.query(&rect(0.2, 0.2, 0.3, 0.3));
        assert!(hits.contains(&7));
        assert!(!hits.contains(&9));
    }

    #[test]
    fn payload_spans_multiple_cells() {
        let mut grid = SpatialGrid::new(1.0);
        grid.add(1u32, &rect(0.0, 0.0, 3.0, 0.0));
        assert_eq!(grid.len(), 4);

        // Far end of the rectangle is still found
        assert!(grid.query(&rect(3.0, 0.0, 3.0, 0.0)).contains(&1));
    }

    #[test]
    fn query_results_are_deduplicated() {
        let mut grid = SpatialGrid::new(0.5);
        grid.add(3usize, &rect(0.0, 0.0, 5.0, 5.0));
        let hits = grid.query(&rect(0.0, 0.0, 5.0, 5.0));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn cell_coordinates_round() {
        let grid: SpatialGrid<u32> = SpatialGrid::new(2.0);
        assert_eq!(grid.cell_of(&Point2::new(0.9, -0.9)), (0, 0));
        assert_eq!(grid.cell_of(&Point2::new(1.1, -1.1)), (1, -1));
    }

    #[test]
    fn invalid_cell_size_is_clamped() {
        let grid: SpatialGrid<u32> = SpatialGrid::new(0.0);
        assert_eq!(grid.cell_size(), MIN_CELL_SIZE);
        let grid: SpatialGrid<u32> = SpatialGrid::new(f64::NAN);
        assert_eq!(grid.cell_size(), 1.0);
    }

    #[test]
    fn density_cell_size() {
        let bounds = rect(0.0, 0.0, 10.0, 10.0);
        assert!((cell_size_for_density(&bounds, 100, 4.0) - 2.0).abs() < 1e-12);
        assert_eq!(cell_size_for_density(&bounds, 0, 4.0), 10.0);
        assert_eq!(cell_size_for_density(&rect(1.0, 1.0, 1.0, 1.0), 5, 4.0), 1.0);
    }

    fn arb_rect() -> impl Strategy<Value = Rect2> {
        (-50.0..50.0f64, -50.0..50.0f64, 0.0..8.0f64, 0.0..8.0f64)
            .prop_map(|(x, y, w, h)| rect(x, y, x + w, y + h))
    }

    proptest! {
        #[test]
        fn query_has_no_false_negatives(
            cell_size in 0.25..6.0f64,
            entries in prop::collection::vec(arb_rect(), 0..40),
            probe in arb_rect(),
        ) {
            let mut grid = SpatialGrid::new(cell_size);
            for (i, r) in entries.iter().enumerate() {
                grid.add(i, r);
            }

            let hits = grid.query(&probe);
            for (i, r) in entries.iter().enumerate() {
                if r.intersects(&probe) {
                    prop_assert!(hits.contains(&i), "entry {} missing from query", i);
                }
            }
        }
    }
}
