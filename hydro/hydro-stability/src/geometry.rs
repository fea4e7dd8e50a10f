//! Geometry primitives used by the analysis.
//!
//! The sweep and waterline solver only touch meshes through
//! [`GeometryService`], so a different clipping kernel (or an
//! instrumented one in tests) can be swapped in.

use mesh_clip::clip_below;
use mesh_types::{Aabb, IndexedMesh, Vector3};

use crate::error::StabilityResult;

/// Mesh operations needed for hydrostatic analysis.
///
/// Implementations must be pure: the same input yields the same output and
/// inputs are never modified. `Sync` lets the sweep share one service
/// across rayon workers.
pub trait GeometryService: Sync {
    /// Axis-aligned bounding box of the mesh.
    fn bounding_box(&self, mesh: &IndexedMesh) -> Aabb;

    /// Copy of the mesh moved by `offset`.
    fn translate(&self, mesh: &IndexedMesh, offset: Vector3<f64>) -> IndexedMesh;

    /// Copy of the mesh rotated by `angle_deg` about `axis` through the origin.
    fn rotate_about_axis(
        &self,
        mesh: &IndexedMesh,
        angle_deg: f64,
        axis: Vector3<f64>,
    ) -> IndexedMesh;

    /// Closed mesh of the part of `mesh` at or below `height`.
    ///
    /// # Errors
    ///
    /// Implementation defined; the solver propagates them unchanged.
    fn slice_below(&self, mesh: &IndexedMesh, height: f64) -> StabilityResult<IndexedMesh>;
}

/// Default [`GeometryService`] backed by `mesh-types` transforms and the
/// `mesh-clip` half-space clip.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshGeometry;

impl GeometryService for MeshGeometry {
    fn bounding_box(&self, mesh: &IndexedMesh) -> Aabb {
        mesh.bounds()
    }

    fn translate(&self, mesh: &IndexedMesh, offset: Vector3<f64>) -> IndexedMesh {
        mesh.translated(offset)
    }

    fn rotate_about_axis(
        &self,
        mesh: &IndexedMesh,
        angle_deg: f64,
        axis: Vector3<f64>,
    ) -> IndexedMesh {
        mesh.rotated_about(axis, angle_deg.to_radians())
    }

    fn slice_below(&self, mesh: &IndexedMesh, height: f64) -> StabilityResult<IndexedMesh> {
        Ok(clip_below(mesh, height)?)
    }
}
