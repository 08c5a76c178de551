// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use navwall_geometry::{
    triangle_dominates_vertically, triangle_intersection_2d, triangles_level, Point3, Triangle3,
};
use proptest::prelude::*;

/// Ground-plane doubled area of a triangle
fn ground_area2(t: &Triangle3) -> f64 {
    let g = t.ground();
    let (ab, ac) = (g.b - g.a, g.c - g.a);
    (ab.x * ac.y - ab.y * ac.x).abs()
}

/// Triangle with ground corners in [-5, 5]^2 and corner heights in `heights`.
fn arb_triangle(heights: std::ops::Range<f64>) -> impl Strategy<Value = Triangle3> {
    let corner = (-5.0..5.0f64, heights, -5.0..5.0f64).prop_map(|(x, y, z)| Point3::new(x, y, z));
    (corner.clone(), corner.clone(), corner).prop_map(|(a, b, c)| Triangle3::new(a, b, c))
}

proptest! {
    #[test]
    fn separated_layers_dominate_one_way(
        low in arb_triangle(0.0..1.0),
        high in arb_triangle(2.0..3.0),
    ) {
        prop_assume!(ground_area2(&low) > 1.0 && ground_area2(&high) > 1.0);
        prop_assume!(!triangle_intersection_2d(&low.ground(), &high.ground()).is_empty());

        prop_assert!(triangle_dominates_vertically(&high, &low));
        prop_assert!(!triangle_dominates_vertically(&low, &high));
        prop_assert!(!triangles_level(&low, &high));
    }
}

#[test]
fn stacked_floors() {
    let floor = |y: f64| {
        Triangle3::new(
            Point3::new(0.0, y, 0.0),
            Point3::new(10.0, y, 0.0),
            Point3::new(0.0, y, 10.0),
        )
    };
    let (ground, first, second) = (floor(0.0), floor(3.0), floor(6.0));

    assert!(triangle_dominates_vertically(&first, &ground));
    assert!(triangle_dominates_vertically(&second, &first));
    assert!(triangle_dominates_vertically(&second, &ground));
    assert!(!triangle_dominates_vertically(&ground, &second));

    assert!(triangles_level(&first, &floor(3.0)));
}
