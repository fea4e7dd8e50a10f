//! Equilibrium waterline search.
//!
//! Bisects the slice height between the lowest and highest point of the
//! hull until the displaced seawater mass matches the body mass.

use std::time::{Duration, Instant};

use mesh_types::IndexedMesh;
use tracing::trace;

use crate::config::SolverLimits;
use crate::error::{StabilityError, StabilityResult};
use crate::geometry::GeometryService;
use crate::integrals::{mm3_to_kg, signed_volume};

/// Converged waterline for one hull orientation.
#[derive(Debug, Clone)]
pub struct Waterline {
    /// Closed mesh of the submerged part.
    pub submerged: IndexedMesh,

    /// Water surface height (mm).
    pub height: f64,

    /// Mass of displaced seawater at that height (kg).
    pub mass_kg: f64,

    /// Bisection steps taken.
    pub iterations: usize,
}

/// Find the height at which the submerged part of `mesh` displaces
/// `target_mass_kg` of seawater, to within `tolerance_kg`.
///
/// Submerged mass is non-decreasing in height for a closed hull, so each
/// step halves the bracket `[lower, upper]`, which starts as the mesh's Z
/// extent.
///
/// # Errors
///
/// - [`StabilityError::InvalidParams`] for a non-positive target or tolerance
/// - [`StabilityError::EmptyMesh`] if the mesh has no extent
/// - [`StabilityError::NumericalConvergence`] after `limits.max_iterations`
///   steps without a match
/// - [`StabilityError::DeadlineExceeded`] if `limits.deadline` elapses
/// - any error from [`GeometryService::slice_below`]
pub fn find_waterline<G>(
    geometry: &G,
    mesh: &IndexedMesh,
    target_mass_kg: f64,
    tolerance_kg: f64,
    limits: &SolverLimits,
) -> StabilityResult<Waterline>
where
    G: GeometryService + ?Sized,
{
    if !(target_mass_kg.is_finite() && target_mass_kg > 0.0) {
        return Err(StabilityError::invalid_params(format!(
            "target mass must be positive, got {target_mass_kg} kg"
        )));
    }
    if !(tolerance_kg.is_finite() && tolerance_kg > 0.0) {
        return Err(StabilityError::invalid_params(format!(
            "tolerance must be positive, got {tolerance_kg} kg"
        )));
    }

    let bounds = geometry.bounding_box(mesh);
    if bounds.is_empty() {
        return Err(StabilityError::EmptyMesh);
    }

    let started = Instant::now();
    let mut lower = bounds.min.z;
    let mut upper = bounds.max.z;
    let mut height = lower;
    let mut residual = f64::NAN;

    for iteration in 1..=limits.max_iterations {
        check_deadline(started, limits.deadline, iteration - 1)?;

        height = lower + (upper - lower) * 0.5;
        let submerged = geometry.slice_below(mesh, height)?;
        let mass_kg = mm3_to_kg(signed_volume(&submerged));
        residual = mass_kg - target_mass_kg;

        trace!(iteration, height, mass_kg, residual, "Bisection step");

        if residual.abs() < tolerance_kg {
            return Ok(Waterline {
                submerged,
                height,
                mass_kg,
                iterations: iteration,
            });
        }

        if mass_kg < target_mass_kg {
            lower = height;
        } else {
            upper = height;
        }
    }

    Err(StabilityError::NumericalConvergence {
        iterations: limits.max_iterations,
        height,
        residual_kg: residual,
    })
}

fn check_deadline(
    started: Instant,
    deadline: Option<Duration>,
    iterations: usize,
) -> StabilityResult<()> {
    let Some(limit) = deadline else {
        return Ok(());
    };
    let elapsed = started.elapsed();
    if elapsed > limit {
        return Err(StabilityError::DeadlineExceeded {
            iterations,
            elapsed,
        });
    }
    Ok(())
}
