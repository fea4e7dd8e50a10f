//! Volume and centroid of closed triangle meshes.
//!
//! Each face forms a signed tetrahedron with the origin; summing those
//! (divergence theorem) gives the enclosed volume, positive for outward
//! facing triangles.

use mesh_types::{IndexedMesh, Point3, Vector3};

use crate::error::{StabilityError, StabilityResult};

/// Density of seawater in kg/m³.
pub const SEAWATER_DENSITY_KG_M3: f64 = 1020.0;

/// Cubic millimeters per cubic meter.
const MM3_PER_M3: f64 = 1.0e9;

/// Signed enclosed volume of a mesh.
///
/// Positive for outward oriented faces, negative if the mesh is inside
/// out. Units are the mesh units cubed.
///
/// # Panics
///
/// Panics if a face references a vertex out of range. Callers validate
/// meshes first (see [`Body::validate`](crate::Body::validate)).
#[must_use]
pub fn signed_volume(mesh: &IndexedMesh) -> f64 {
    mesh.triangles().map(|tri| tri.signed_tetra_volume()).sum()
}

/// Enclosed volume magnitude.
#[must_use]
pub fn volume(mesh: &IndexedMesh) -> f64 {
    signed_volume(mesh).abs()
}

/// Volume-weighted centroid of the enclosed solid.
///
/// # Errors
///
/// Returns [`StabilityError::DegenerateGeometry`] if the mesh encloses
/// zero (or a non-finite) volume.
///
/// # Example
///
/// ```
/// use hydro_stability::integrals::centroid;
/// use mesh_types::{Point3, box_mesh};
///
/// let hull = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0));
/// let c = centroid(&hull).unwrap();
/// assert!((c.z - 3.0).abs() < 1e-12);
/// ```
pub fn centroid(mesh: &IndexedMesh) -> StabilityResult<Point3<f64>> {
    let (total, moment) = mesh.triangles().fold(
        (0.0, Vector3::zeros()),
        |(total, moment), tri| {
            let v = tri.signed_tetra_volume();
            (total + v, moment + tri.tetra_centroid().coords * v)
        },
    );

    if !total.is_normal() {
        return Err(StabilityError::degenerate(format!(
            "enclosed volume is {total}, centroid undefined"
        )));
    }

    Ok(Point3::from(moment / total))
}

/// Mass of seawater displaced by a volume given in mm³.
#[must_use]
pub fn mm3_to_kg(volume_mm3: f64) -> f64 {
    volume_mm3 / MM3_PER_M3 * SEAWATER_DENSITY_KG_M3
}
