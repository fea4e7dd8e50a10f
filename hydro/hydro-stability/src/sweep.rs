//! Per-angle buoyancy sweep.

use mesh_types::{IndexedMesh, Point3, Vector3};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::body::Body;
use crate::config::{Axis, StabilityConfig, StabilityFormula};
use crate::error::{StabilityError, StabilityResult};
use crate::geometry::GeometryService;
use crate::integrals::{centroid, mm3_to_kg, signed_volume};
use crate::waterline::find_waterline;

/// Equilibrium state of the hull at one tilt angle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuoyancySample {
    /// Tilt angle (degrees).
    pub angle_deg: f64,

    /// Centroid of the submerged volume (mm, zeroed frame).
    pub center_of_buoyancy: Point3<f64>,

    /// Water surface height (mm).
    pub waterline_height: f64,

    /// Displaced seawater mass at the waterline (kg).
    pub submerged_mass_kg: f64,

    /// Bisection steps taken.
    pub iterations: usize,
}

/// Samples of a completed sweep, ordered by angle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepResult {
    samples: Vec<BuoyancySample>,
    axis: Axis,
    formula: StabilityFormula,
}

impl SweepResult {
    /// Build a result, sorting samples by angle.
    #[must_use]
    pub fn new(mut samples: Vec<BuoyancySample>, axis: Axis, formula: StabilityFormula) -> Self {
        samples.sort_by(|a, b| a.angle_deg.total_cmp(&b.angle_deg));
        Self {
            samples,
            axis,
            formula,
        }
    }

    /// All samples in ascending angle order.
    #[must_use]
    pub fn samples(&self) -> &[BuoyancySample] {
        &self.samples
    }

    /// Tilt axis the sweep used.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Lever arm reference the hull was zeroed for.
    #[must_use]
    pub const fn formula(&self) -> StabilityFormula {
        self.formula
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the sweep has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at an angle, within 1e-9 degrees.
    #[must_use]
    pub fn at(&self, angle_deg: f64) -> Option<&BuoyancySample> {
        self.samples
            .iter()
            .find(|s| (s.angle_deg - angle_deg).abs() < 1e-9)
    }
}

/// What a sweep found.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepOutcome {
    /// The whole hull displaces less than the body mass.
    Sinks {
        /// Mass of seawater the fully submerged hull displaces (kg).
        displacement_kg: f64,
    },
    /// The hull floats; one sample per tilt angle.
    Floats(SweepResult),
}

impl SweepOutcome {
    /// The samples, if the hull floats.
    #[must_use]
    pub const fn as_floats(&self) -> Option<&SweepResult> {
        match self {
            Self::Floats(result) => Some(result),
            Self::Sinks { .. } => None,
        }
    }

    /// Whether the hull sinks.
    #[must_use]
    pub const fn sinks(&self) -> bool {
        matches!(self, Self::Sinks { .. })
    }
}

/// Move the hull into the analysis frame.
///
/// The bounding box is centered on X and Y with its lowest point at Z = 0.
/// Under [`StabilityFormula::CgRelative`] the hull is then shifted by the
/// center of gravity so that the CG sits at the origin, which is the
/// rotation pivot.
#[must_use]
pub fn zero_hull<G>(geometry: &G, body: &Body, formula: StabilityFormula) -> IndexedMesh
where
    G: GeometryService + ?Sized,
{
    let bounds = geometry.bounding_box(&body.mesh);
    let center = bounds.center();
    let mut offset = Vector3::new(-center.x, -center.y, -bounds.min.z);
    if formula == StabilityFormula::CgRelative {
        offset -= body.center_of_gravity.coords;
    }
    geometry.translate(&body.mesh, offset)
}

/// Solve the waterline of the zeroed hull tilted to one angle.
///
/// # Errors
///
/// Propagates waterline and centroid errors unwrapped; [`run_sweep`] adds
/// the angle.
pub fn solve_angle<G>(
    geometry: &G,
    hull: &IndexedMesh,
    body: &Body,
    config: &StabilityConfig,
    angle_deg: f64,
) -> StabilityResult<BuoyancySample>
where
    G: GeometryService + ?Sized,
{
    let tilted = geometry.rotate_about_axis(hull, angle_deg, config.axis.rotation_vector());
    let waterline = find_waterline(
        geometry,
        &tilted,
        body.mass_kg,
        config.tolerance_kg,
        &config.limits,
    )?;
    let center_of_buoyancy = centroid(&waterline.submerged)?;

    debug!(
        angle = angle_deg,
        iterations = waterline.iterations,
        waterline = waterline.height,
        cb_x = center_of_buoyancy.x,
        cb_y = center_of_buoyancy.y,
        cb_z = center_of_buoyancy.z,
        "Solved angle"
    );

    Ok(BuoyancySample {
        angle_deg,
        center_of_buoyancy,
        waterline_height: waterline.height,
        submerged_mass_kg: waterline.mass_kg,
        iterations: waterline.iterations,
    })
}

/// Sweep the body through every configured tilt angle.
///
/// Returns [`SweepOutcome::Sinks`] without slicing anything when the whole
/// hull cannot carry the body's mass.
///
/// # Errors
///
/// - [`StabilityError::InvalidParams`] / [`StabilityError::EmptyMesh`] from
///   validation, before any geometry work
/// - [`StabilityError::DegenerateGeometry`] if the hull encloses no volume
/// - [`StabilityError::AngleFailed`] naming the first angle (in result
///   order) whose waterline or centroid could not be found
///
/// # Example
///
/// ```
/// use hydro_stability::{Body, MeshGeometry, StabilityConfig, SweepOutcome, run_sweep};
/// use mesh_types::{Point3, box_mesh};
///
/// let hull = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(1000.0, 1000.0, 1000.0));
/// let body = Body::new(hull, 510.0, Point3::origin());
///
/// let outcome = run_sweep(&MeshGeometry, &body, &StabilityConfig::default()).unwrap();
/// let SweepOutcome::Floats(result) = outcome else { panic!("cube floats") };
/// assert_eq!(result.len(), 8);
/// ```
pub fn run_sweep<G>(
    geometry: &G,
    body: &Body,
    config: &StabilityConfig,
) -> StabilityResult<SweepOutcome>
where
    G: GeometryService + ?Sized,
{
    config.validate()?;
    body.validate()?;

    let hull = zero_hull(geometry, body, config.formula);
    let displaced = signed_volume(&hull);
    if !displaced.is_normal() {
        return Err(StabilityError::degenerate(format!(
            "hull encloses {displaced} mm³"
        )));
    }

    let displacement_kg = mm3_to_kg(displaced);
    if displacement_kg < body.mass_kg {
        warn!(
            displacement_kg,
            mass_kg = body.mass_kg,
            "Hull displaces less than its mass, body sinks"
        );
        return Ok(SweepOutcome::Sinks { displacement_kg });
    }

    let angles = config.sample_angles();
    info!(
        angles = angles.len(),
        axis = %config.axis,
        formula = %config.formula,
        mass_kg = body.mass_kg,
        parallel = config.parallel,
        "Starting stability sweep"
    );

    let solve = |&angle: &f64| {
        solve_angle(geometry, &hull, body, config, angle).map_err(|source| {
            StabilityError::AngleFailed {
                angle,
                source: Box::new(source),
            }
        })
    };

    let samples = if config.parallel {
        angles
            .par_iter()
            .map(&solve)
            .collect::<StabilityResult<Vec<_>>>()?
    } else {
        angles
            .iter()
            .map(&solve)
            .collect::<StabilityResult<Vec<_>>>()?
    };

    let total_iterations: usize = samples.iter().map(|s| s.iterations).sum();
    info!(
        samples = samples.len(),
        total_iterations, "Stability sweep complete"
    );

    Ok(SweepOutcome::Floats(SweepResult::new(
        samples,
        config.axis,
        config.formula,
    )))
}
