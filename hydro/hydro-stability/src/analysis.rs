//! End-to-end stability analysis.

use mesh_types::Point3;
use tracing::info;

use crate::body::Body;
use crate::classify::classify_outcome;
use crate::config::{Axis, StabilityConfig, StabilityFormula};
use crate::error::StabilityResult;
use crate::geometry::{GeometryService, MeshGeometry};
use crate::ride::find_ride_angles;
use crate::sweep::{SweepOutcome, run_sweep};

/// One row of the report: equilibrium at a tilt angle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentRow {
    /// Tilt angle (degrees).
    pub angle_deg: f64,

    /// Center of buoyancy (mm, analysis frame).
    pub center_of_buoyancy: Point3<f64>,

    /// Water surface height (mm).
    pub waterline_height: f64,

    /// Righting moment (N·m).
    pub righting_moment: f64,
}

/// Whether the body floats at all.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flotation {
    /// Hull displacement exceeds body mass.
    Floats,
    /// Hull displacement falls short of body mass.
    Sinks {
        /// Mass of seawater the fully submerged hull displaces (kg).
        displacement_kg: f64,
    },
}

/// Full result of a stability analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabilityReport {
    /// Float or sink.
    pub flotation: Flotation,

    /// Overall verdict; always false for a sinking body.
    pub is_stable: bool,

    /// Per-angle rows in ascending angle order; empty if the body sinks.
    pub rows: Vec<MomentRow>,

    /// Ride angles in `(-180, 180]`, closest to upright first.
    pub ride_angles: Vec<f64>,

    /// Tilt axis.
    pub axis: Axis,

    /// Lever arm reference.
    pub formula: StabilityFormula,
}

impl StabilityReport {
    /// Whether the body sinks.
    #[must_use]
    pub const fn sinks(&self) -> bool {
        matches!(self.flotation, Flotation::Sinks { .. })
    }

    /// Resting angle closest to upright.
    #[must_use]
    pub fn primary_ride_angle(&self) -> Option<f64> {
        self.ride_angles.first().copied()
    }

    /// Moment at an angle, within 1e-9 degrees.
    #[must_use]
    pub fn moment_at(&self, angle_deg: f64) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| (r.angle_deg - angle_deg).abs() < 1e-9)
            .map(|r| r.righting_moment)
    }
}

/// Run the sweep, classify it and find ride angles.
///
/// # Errors
///
/// Any error from [`run_sweep`]. A sinking body is a normal report with
/// [`Flotation::Sinks`].
pub fn analyze<G>(
    geometry: &G,
    body: &Body,
    config: &StabilityConfig,
) -> StabilityResult<StabilityReport>
where
    G: GeometryService + ?Sized,
{
    let outcome = run_sweep(geometry, body, config)?;
    let classification = classify_outcome(&outcome, body);

    let (flotation, rows) = match &outcome {
        SweepOutcome::Sinks { displacement_kg } => (
            Flotation::Sinks {
                displacement_kg: *displacement_kg,
            },
            Vec::new(),
        ),
        SweepOutcome::Floats(sweep) => {
            let rows = sweep
                .samples()
                .iter()
                .zip(classification.moments.entries())
                .map(|(sample, &(_, righting_moment))| MomentRow {
                    angle_deg: sample.angle_deg,
                    center_of_buoyancy: sample.center_of_buoyancy,
                    waterline_height: sample.waterline_height,
                    righting_moment,
                })
                .collect();
            (Flotation::Floats, rows)
        }
    };

    let ride_angles = find_ride_angles(classification.moments.entries());

    info!(
        stable = classification.is_stable,
        sinks = outcome.sinks(),
        ride_angles = ?ride_angles,
        "Stability analysis complete"
    );

    Ok(StabilityReport {
        flotation,
        is_stable: classification.is_stable,
        rows,
        ride_angles,
        axis: config.axis,
        formula: config.formula,
    })
}

/// [`analyze`] with the default [`MeshGeometry`].
///
/// # Errors
///
/// See [`analyze`].
pub fn analyze_hull(body: &Body, config: &StabilityConfig) -> StabilityResult<StabilityReport> {
    analyze(&MeshGeometry, body, config)
}
