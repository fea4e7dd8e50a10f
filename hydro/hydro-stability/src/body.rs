//! The floating body under analysis.

use mesh_types::{IndexedMesh, Point3};

use crate::error::{StabilityError, StabilityResult};

/// A rigid hull with its mass properties.
///
/// The center of gravity is given in the zeroed frame: X and Y relative to
/// the center of the hull's bounding box, Z relative to its lowest point.
/// Analysis never modifies a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Closed, outward oriented hull surface (mm).
    pub mesh: IndexedMesh,

    /// Total mass (kg).
    pub mass_kg: f64,

    /// Center of gravity (mm).
    pub center_of_gravity: Point3<f64>,
}

impl Body {
    /// Create a body.
    #[must_use]
    pub const fn new(mesh: IndexedMesh, mass_kg: f64, center_of_gravity: Point3<f64>) -> Self {
        Self {
            mesh,
            mass_kg,
            center_of_gravity,
        }
    }

    /// Check mass, center of gravity and mesh indices.
    ///
    /// # Errors
    ///
    /// - [`StabilityError::EmptyMesh`] if the mesh has no faces
    /// - [`StabilityError::InvalidParams`] for a non-positive or non-finite
    ///   mass, a non-finite center of gravity, or out-of-range face indices
    pub fn validate(&self) -> StabilityResult<()> {
        if self.mesh.is_empty() {
            return Err(StabilityError::EmptyMesh);
        }
        if !self.mesh.has_valid_indices() {
            return Err(StabilityError::invalid_params(
                "mesh face references a missing vertex",
            ));
        }
        if !(self.mass_kg.is_finite() && self.mass_kg > 0.0) {
            return Err(StabilityError::invalid_params(format!(
                "mass must be positive, got {} kg",
                self.mass_kg
            )));
        }
        if !self.center_of_gravity.iter().all(|c| c.is_finite()) {
            return Err(StabilityError::invalid_params(
                "center of gravity must be finite",
            ));
        }
        Ok(())
    }
}
