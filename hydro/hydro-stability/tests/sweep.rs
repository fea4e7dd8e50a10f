//! Full sweeps: periodicity, sinking, axis and formula handling.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_relative_eq;
use hydro_stability::{
    Axis, Body, GeometryService, MeshGeometry, StabilityConfig, StabilityError, StabilityFormula,
    StabilityResult, SweepOutcome, analyze, classify, classify_outcome, find_ride_angles,
    lever_arm, righting_moment, run_sweep, solve_angle, zero_hull,
};
use mesh_types::{Aabb, IndexedMesh, Point3, Vector3, box_mesh};

/// Counts slices and delegates everything to [`MeshGeometry`].
#[derive(Default)]
struct RecordingGeometry {
    slices: AtomicUsize,
}

impl RecordingGeometry {
    fn slices(&self) -> usize {
        self.slices.load(Ordering::Relaxed)
    }
}

impl GeometryService for RecordingGeometry {
    fn bounding_box(&self, mesh: &IndexedMesh) -> Aabb {
        MeshGeometry.bounding_box(mesh)
    }

    fn translate(&self, mesh: &IndexedMesh, offset: Vector3<f64>) -> IndexedMesh {
        MeshGeometry.translate(mesh, offset)
    }

    fn rotate_about_axis(
        &self,
        mesh: &IndexedMesh,
        angle_deg: f64,
        axis: Vector3<f64>,
    ) -> IndexedMesh {
        MeshGeometry.rotate_about_axis(mesh, angle_deg, axis)
    }

    fn slice_below(&self, mesh: &IndexedMesh, height: f64) -> StabilityResult<IndexedMesh> {
        self.slices.fetch_add(1, Ordering::Relaxed);
        MeshGeometry.slice_below(mesh, height)
    }
}

/// 1 m cube with its CG at height `cg_z` above the keel.
fn cube(mass_kg: f64, cg_z: f64) -> Body {
    let hull = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(1000.0, 1000.0, 1000.0));
    Body::new(hull, mass_kg, Point3::new(0.0, 0.0, cg_z))
}

/// 2000 x 800 x 400 mm barge, a quarter of its displacement.
fn barge(cg_z: f64) -> Body {
    let hull = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(2000.0, 800.0, 400.0));
    Body::new(hull, 0.25 * 652.8, Point3::new(0.0, 0.0, cg_z))
}

#[test]
fn quarter_turn_sweep_closes_the_circle() {
    let body = cube(400.0, 200.0);
    let config = StabilityConfig::default().with_resolution(90.0);

    let outcome = run_sweep(&MeshGeometry, &body, &config).unwrap();
    let sweep = outcome.as_floats().unwrap();
    let angles: Vec<f64> = sweep.samples().iter().map(|s| s.angle_deg).collect();
    assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);

    let moments = classify(sweep, &body).moments;

    // Sampling 360 directly lands where 0 started
    let hull = zero_hull(&MeshGeometry, &body, config.formula);
    let closing = solve_angle(&MeshGeometry, &hull, &body, &config, 360.0).unwrap();
    let closing_moment = righting_moment(lever_arm(&closing, 1), body.mass_kg);

    assert_relative_eq!(moments.at(0.0).unwrap(), closing_moment, epsilon = 1e-6);
}

#[test]
fn sinking_body_takes_no_slices() {
    let geometry = RecordingGeometry::default();
    let body = cube(1500.0, 0.0);

    let outcome = run_sweep(&geometry, &body, &StabilityConfig::default()).unwrap();
    let verdict = classify_outcome(&outcome, &body);

    assert!(outcome.sinks());
    assert!(!verdict.is_stable);
    assert!(verdict.moments.is_empty());
    assert_eq!(geometry.slices(), 0);
}

#[test]
fn flat_hull_is_degenerate() {
    let geometry = RecordingGeometry::default();
    // Two coincident opposite triangles: closed, but zero volume
    let sheet = IndexedMesh::from_parts(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(100.0, 0.0, 0.0),
            Point3::new(0.0, 100.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 2, 1]],
    );
    let body = Body::new(sheet, 1.0, Point3::origin());

    let err = run_sweep(&geometry, &body, &StabilityConfig::default()).unwrap_err();

    assert!(matches!(err, StabilityError::DegenerateGeometry(_)), "{err:?}");
    assert_eq!(geometry.slices(), 0);
}

#[test]
fn bad_params_rejected_before_slicing() {
    let geometry = RecordingGeometry::default();

    let weightless = cube(0.0, 0.0);
    let err = run_sweep(&geometry, &weightless, &StabilityConfig::default()).unwrap_err();
    assert!(matches!(err, StabilityError::InvalidParams(_)), "{err:?}");

    let exact = StabilityConfig::default().with_tolerance(0.0);
    let err = run_sweep(&geometry, &cube(510.0, 0.0), &exact).unwrap_err();
    assert!(matches!(err, StabilityError::InvalidParams(_)), "{err:?}");

    assert_eq!(geometry.slices(), 0);
}

#[test]
fn floating_body_slices_every_angle() {
    let geometry = RecordingGeometry::default();
    let body = cube(510.0, 0.0);

    let report = analyze(&geometry, &body, &StabilityConfig::default()).unwrap();

    assert_eq!(report.rows.len(), 8);
    let iterations = geometry.slices();
    assert!(iterations >= 8, "got {iterations} slices");
}

#[test]
fn bottom_heavy_cube_rights_itself() {
    let body = cube(510.0, 0.0);
    let report = analyze(&MeshGeometry, &body, &StabilityConfig::default()).unwrap();

    assert!(report.is_stable);
    assert_eq!(report.ride_angles, vec![0.0]);

    for row in &report.rows {
        let expected_sign = if row.angle_deg < 175.0 { -1.0 } else { 1.0 };
        if row.angle_deg > 5.0 && (row.angle_deg - 180.0).abs() > 5.0 {
            assert!(row.righting_moment * expected_sign > 0.0, "{row:?}");
        }
    }
}

#[test]
fn roll_and_pitch_agree_on_square_hull() {
    let body = cube(510.0, 100.0);
    let roll = StabilityConfig::default().with_resolution(30.0);
    let pitch = roll.clone().with_axis(Axis::Y);

    let by_roll = analyze(&MeshGeometry, &body, &roll).unwrap();
    let by_pitch = analyze(&MeshGeometry, &body, &pitch).unwrap();

    assert_eq!(by_roll.is_stable, by_pitch.is_stable);
    for (r, p) in by_roll.rows.iter().zip(&by_pitch.rows) {
        assert_relative_eq!(r.righting_moment, p.righting_moment, epsilon = 1e-3);
    }
}

#[test]
fn tall_cg_capsizes() {
    let report = analyze(&MeshGeometry, &cube(510.0, 900.0), &StabilityConfig::default()).unwrap();
    assert!(!report.is_stable);
}

#[test]
fn origin_relative_ignores_cg() {
    let config = StabilityConfig::default()
        .with_resolution(30.0)
        .with_formula(StabilityFormula::OriginRelative);

    let low = analyze(&MeshGeometry, &barge(0.0), &config).unwrap();
    let high = analyze(&MeshGeometry, &barge(350.0), &config).unwrap();

    assert_eq!(low.rows, high.rows);

    // Same pivot as a CG-relative run with the CG on the keel
    let keel = analyze(
        &MeshGeometry,
        &barge(0.0),
        &config.clone().with_formula(StabilityFormula::CgRelative),
    )
    .unwrap();
    for (a, b) in low.rows.iter().zip(&keel.rows) {
        assert_relative_eq!(a.righting_moment, b.righting_moment, epsilon = 1e-9);
    }
}

#[test]
fn ride_angle_interpolates_between_samples() {
    let moments: Vec<(f64, f64)> = (0u32..18)
        .map(|i| {
            let angle = f64::from(i) * 20.0;
            let moment = if (20.0..=80.0).contains(&angle) { 2.0 } else { -1.0 };
            (angle, moment)
        })
        .collect();

    let angles = find_ride_angles(&moments);
    assert_eq!(angles.len(), 1);
    assert_relative_eq!(angles[0], 80.0 + (-2.0 * 20.0) / (-1.0 - 2.0), epsilon = 1e-9);
}

#[test]
fn sweep_outcome_is_independent_of_scheduling() {
    let body = barge(100.0);
    let config = StabilityConfig::default().with_resolution(15.0);

    let parallel = run_sweep(&MeshGeometry, &body, &config).unwrap();
    let serial = run_sweep(&MeshGeometry, &body, &config.clone().with_parallel(false)).unwrap();

    assert_eq!(parallel, serial);
    let SweepOutcome::Floats(result) = parallel else {
        panic!("barge floats");
    };
    assert_eq!(result.len(), 24);
}
