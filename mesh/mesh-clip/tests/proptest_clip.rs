//! Property-based tests for half-space clipping.
//!
//! Run with: cargo test -p mesh-clip -- proptest

#![allow(clippy::unwrap_used)]

use mesh_clip::clip_below;
use mesh_types::{IndexedMesh, Point3, Vector3, box_mesh};
use proptest::prelude::*;

fn signed_volume(mesh: &IndexedMesh) -> f64 {
    mesh.triangles().map(|t| t.signed_tetra_volume()).sum()
}

fn arb_box() -> impl Strategy<Value = (Point3<f64>, Vector3<f64>)> {
    (
        prop::array::uniform3(-100.0..100.0f64),
        prop::array::uniform3(1.0..50.0f64),
    )
        .prop_map(|(o, s)| (Point3::new(o[0], o[1], o[2]), Vector3::new(s[0], s[1], s[2])))
}

proptest! {
    #[test]
    fn proptest_box_clip_matches_prism((origin, size) in arb_box(), fraction in 0.0..1.0f64) {
        let hull = box_mesh(origin, origin + size);
        let cut = origin.z + fraction * size.z;

        let lower = clip_below(&hull, cut).unwrap();
        let expected = size.x * size.y * (cut - origin.z);

        prop_assert!((signed_volume(&lower) - expected).abs() < 1e-6 * size.x * size.y * size.z);
    }

    #[test]
    fn proptest_clipped_volume_is_monotonic(
        angle in 0.0..360.0f64,
        a in -1.0..1.0f64,
        b in -1.0..1.0f64,
    ) {
        let hull = box_mesh(Point3::new(-3.0, -1.0, -2.0), Point3::new(3.0, 1.0, 2.0))
            .rotated_about(Vector3::x(), angle.to_radians());
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let v_lo = signed_volume(&clip_below(&hull, lo * 4.0).unwrap());
        let v_hi = signed_volume(&clip_below(&hull, hi * 4.0).unwrap());

        prop_assert!(v_lo <= v_hi + 1e-9);
    }
}
