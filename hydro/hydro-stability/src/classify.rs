//! Righting moments and the stable/unstable verdict.

use tracing::debug;

use crate::body::Body;
use crate::sweep::{BuoyancySample, SweepOutcome, SweepResult};

/// Standard gravity (m/s²).
pub const GRAVITY_M_S2: f64 = 9.81;

/// Half-width (degrees) of the bands around 0° and 180° that the verdict
/// ignores, where moments are dominated by numerical noise.
pub const IGNORE_BAND_DEG: f64 = 5.0;

/// Righting moment (N·m) per tilt angle, ordered by angle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RightingMoments {
    entries: Vec<(f64, f64)>,
}

impl RightingMoments {
    /// Build from `(angle_deg, moment)` pairs in any order.
    #[must_use]
    pub fn new(mut entries: Vec<(f64, f64)>) -> Self {
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { entries }
    }

    /// `(angle_deg, moment)` pairs in ascending angle order.
    #[must_use]
    pub fn entries(&self) -> &[(f64, f64)] {
        &self.entries
    }

    /// Number of angles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no moments (e.g. the hull sank).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moment at an angle, within 1e-9 degrees.
    #[must_use]
    pub fn at(&self, angle_deg: f64) -> Option<f64> {
        self.entries
            .iter()
            .find(|(a, _)| (a - angle_deg).abs() < 1e-9)
            .map(|&(_, m)| m)
    }
}

/// Result of classifying a sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification {
    /// No evaluated angle pushes the body further over.
    pub is_stable: bool,

    /// Moment at every swept angle.
    pub moments: RightingMoments,
}

/// Righting moment (N·m) for a lever arm in mm.
#[must_use]
pub fn righting_moment(arm_mm: f64, mass_kg: f64) -> f64 {
    arm_mm / 1000.0 * mass_kg * GRAVITY_M_S2
}

/// Lateral lever arm (mm) of a sample.
///
/// The hull was tilted about the origin of its analysis frame, so the
/// lateral coordinate of the center of buoyancy is the arm: the offset from
/// the center of gravity under `CgRelative` (where the CG is the origin),
/// or from the zeroed hull origin under `OriginRelative`.
#[must_use]
pub fn lever_arm(sample: &BuoyancySample, lateral_index: usize) -> f64 {
    sample.center_of_buoyancy[lateral_index]
}

/// Whether the verdict skips this angle.
#[must_use]
pub fn in_ignore_band(angle_deg: f64) -> bool {
    let folded = angle_deg.rem_euclid(180.0);
    folded <= IGNORE_BAND_DEG || folded >= 180.0 - IGNORE_BAND_DEG
}

/// Whether `moment` pushes the body away from upright at `angle_deg`.
///
/// Negative moments restore for angles in `[0, 180]`, positive ones for
/// `(180, 360)`.
#[must_use]
pub fn is_capsizing(angle_deg: f64, moment: f64) -> bool {
    if angle_deg.rem_euclid(360.0) <= 180.0 {
        moment > 0.0
    } else {
        moment < 0.0
    }
}

/// Compute moments for every sample and decide stability.
#[must_use]
pub fn classify(sweep: &SweepResult, body: &Body) -> Classification {
    let lateral = sweep.axis().lateral_index();
    let moments = RightingMoments::new(
        sweep
            .samples()
            .iter()
            .map(|s| {
                let arm = lever_arm(s, lateral);
                (s.angle_deg, righting_moment(arm, body.mass_kg))
            })
            .collect(),
    );

    let capsizing = moments
        .entries()
        .iter()
        .find(|&&(angle, moment)| !in_ignore_band(angle) && is_capsizing(angle, moment));

    if let Some(&(angle, moment)) = capsizing {
        debug!(angle, moment, "Capsizing moment");
    }

    Classification {
        is_stable: capsizing.is_none(),
        moments,
    }
}

/// Classify a sweep outcome; a sinking hull is unstable with no moments.
#[must_use]
pub fn classify_outcome(outcome: &SweepOutcome, body: &Body) -> Classification {
    match outcome {
        SweepOutcome::Floats(sweep) => classify(sweep, body),
        SweepOutcome::Sinks { .. } => Classification {
            is_stable: false,
            moments: RightingMoments::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Axis, StabilityFormula};
    use approx::assert_relative_eq;
    use mesh_types::{Point3, unit_cube};

    fn sample(angle_deg: f64, lateral: f64) -> BuoyancySample {
        BuoyancySample {
            angle_deg,
            center_of_buoyancy: Point3::new(0.0, lateral, -10.0),
            waterline_height: 0.0,
            submerged_mass_kg: 100.0,
            iterations: 1,
        }
    }

    fn body() -> Body {
        Body::new(unit_cube(), 100.0, Point3::origin())
    }

    fn sweep(samples: Vec<BuoyancySample>) -> SweepResult {
        SweepResult::new(samples, Axis::X, StabilityFormula::CgRelative)
    }

    #[test]
    fn test_righting_moment() {
        // 10 mm arm, 100 kg
        assert_relative_eq!(righting_moment(10.0, 100.0), 9.81, epsilon = 1e-12);
        assert_relative_eq!(righting_moment(-10.0, 100.0), -9.81, epsilon = 1e-12);
    }

    #[test]
    fn test_ignore_band() {
        for angle in [0.0, 3.0, 5.0, 175.0, 180.0, 184.0, 355.0, 360.0] {
            assert!(in_ignore_band(angle), "{angle} should be ignored");
        }
        for angle in [6.0, 45.0, 90.0, 174.0, 186.0, 270.0, 354.0] {
            assert!(!in_ignore_band(angle), "{angle} should be evaluated");
        }
    }

    #[test]
    fn test_capsizing_sign_rule() {
        assert!(is_capsizing(45.0, 1.0));
        assert!(!is_capsizing(45.0, -1.0));
        assert!(is_capsizing(180.0, 1.0));
        assert!(is_capsizing(270.0, -1.0));
        assert!(!is_capsizing(270.0, 1.0));
    }

    #[test]
    fn test_stable_when_all_restoring() {
        let result = classify(
            &sweep(vec![
                sample(0.0, 0.0),
                sample(90.0, -50.0),
                sample(180.0, 0.0),
                sample(270.0, 50.0),
            ]),
            &body(),
        );

        assert!(result.is_stable);
        assert_eq!(result.moments.len(), 4);
        assert_relative_eq!(result.moments.at(90.0).unwrap_or(0.0), -49.05, epsilon = 1e-9);
    }

    #[test]
    fn test_unstable_on_wrong_sign() {
        let result = classify(
            &sweep(vec![sample(0.0, 0.0), sample(90.0, 5.0), sample(270.0, 50.0)]),
            &body(),
        );
        assert!(!result.is_stable);
    }

    #[test]
    fn test_noise_in_ignore_band_is_skipped() {
        let result = classify(
            &sweep(vec![
                sample(0.0, 3.0),
                sample(5.0, 2.0),
                sample(90.0, -50.0),
                sample(178.0, 1.0),
                sample(270.0, 50.0),
            ]),
            &body(),
        );
        assert!(result.is_stable);
    }

    #[test]
    fn test_pitch_uses_x_arm() {
        let mut s = sample(90.0, -50.0);
        s.center_of_buoyancy.x = 20.0;
        let result = classify(
            &SweepResult::new(vec![s], Axis::Y, StabilityFormula::CgRelative),
            &body(),
        );

        // X arm is positive, so pitch at 90 degrees capsizes
        assert!(!result.is_stable);
    }

    #[test]
    fn test_sinking_outcome() {
        let result = classify_outcome(&SweepOutcome::Sinks { displacement_kg: 1.0 }, &body());
        assert!(!result.is_stable);
        assert!(result.moments.is_empty());
    }
}
