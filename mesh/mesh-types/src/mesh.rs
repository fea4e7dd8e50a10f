//! Indexed triangle mesh.

use crate::{Aabb, Triangle};
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Stores vertex positions and faces separately, with faces referencing
/// vertices by index. The hull is expected to be closed and outward
/// oriented; nothing in this crate checks that.
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Point3};
///
/// let mesh = IndexedMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True if the mesh has no vertices or no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// True if every face index points at an existing vertex.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.vertices.len();
        self.faces
            .iter()
            .all(|face| face.iter().all(|&i| (i as usize) < n))
    }

    /// Iterate over all triangles with resolved vertex positions.
    ///
    /// # Panics
    ///
    /// Panics if a face references a missing vertex; see
    /// [`has_valid_indices`](Self::has_valid_indices).
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|&[i0, i1, i2]| {
            Triangle::new(
                self.vertices[i0 as usize],
                self.vertices[i1 as usize],
                self.vertices[i2 as usize],
            )
        })
    }

    /// Axis-aligned bounding box of the vertices.
    ///
    /// Returns an empty box for a mesh without vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }

    /// A copy of this mesh moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| p + offset).collect(),
            faces: self.faces.clone(),
        }
    }

    /// A copy of this mesh rotated by `angle` radians about the line through
    /// the origin along `axis` (right-hand rule).
    ///
    /// A zero-length axis yields an unrotated copy.
    #[must_use]
    pub fn rotated_about(&self, axis: Vector3<f64>, angle: f64) -> Self {
        let Some(axis) = Unit::try_new(axis, f64::EPSILON) else {
            return self.clone();
        };
        let rotation = UnitQuaternion::from_axis_angle(&axis, angle);
        Self {
            vertices: self.vertices.iter().map(|p| rotation * p).collect(),
            faces: self.faces.clone(),
        }
    }

    /// A copy with every face's winding reversed (inside-out).
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            faces: self.faces.iter().map(|&[a, b, c]| [a, c, b]).collect(),
        }
    }
}

/// Closed axis-aligned box spanning `min` to `max`, outward oriented.
///
/// # Example
///
/// ```
/// use mesh_types::{box_mesh, Point3};
///
/// let hull = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 3.0, 4.0));
/// assert_eq!(hull.vertex_count(), 8);
/// assert_eq!(hull.face_count(), 12);
/// ```
#[must_use]
pub fn box_mesh(min: Point3<f64>, max: Point3<f64>) -> IndexedMesh {
    let b = Aabb::new(min, max);
    let (lo, hi) = (b.min, b.max);

    let vertices = vec![
        Point3::new(lo.x, lo.y, lo.z), // 0
        Point3::new(hi.x, lo.y, lo.z), // 1
        Point3::new(hi.x, hi.y, lo.z), // 2
        Point3::new(lo.x, hi.y, lo.z), // 3
        Point3::new(lo.x, lo.y, hi.z), // 4
        Point3::new(hi.x, lo.y, hi.z), // 5
        Point3::new(hi.x, hi.y, hi.z), // 6
        Point3::new(lo.x, hi.y, hi.z), // 7
    ];

    // Two CCW triangles per side, viewed from outside
    let faces = vec![
        [0, 2, 1],
        [0, 3, 2], // -Z
        [4, 5, 6],
        [4, 6, 7], // +Z
        [0, 1, 5],
        [0, 5, 4], // -Y
        [3, 7, 6],
        [3, 6, 2], // +Y
        [0, 4, 7],
        [0, 7, 3], // -X
        [1, 2, 6],
        [1, 6, 5], // +X
    ];

    IndexedMesh::from_parts(vertices, faces)
}

/// Unit cube from (0,0,0) to (1,1,1) with outward-facing normals.
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    box_mesh(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
}
