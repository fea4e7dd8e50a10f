//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// );
///
/// // Tetrahedron spanned with the origin
/// assert!((tri.signed_tetra_volume() - 1.0 / 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Cross product of the two edges leaving `v0`; twice the area, along the normal.
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Triangle area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Signed volume of the tetrahedron formed by this face and the origin.
    ///
    /// `dot(cross(v0, v1), v2) / 6`. Positive when the origin lies behind
    /// the face (on the side opposite its normal).
    #[must_use]
    pub fn signed_tetra_volume(&self) -> f64 {
        self.v0.coords.cross(&self.v1.coords).dot(&self.v2.coords) / 6.0
    }

    /// Centroid of the tetrahedron formed by this face and the origin.
    #[must_use]
    pub fn tetra_centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        )
    }

    #[test]
    fn area_of_right_triangle() {
        assert_relative_eq!(right_triangle().area(), 0.5);
    }

    #[test]
    fn tetra_volume_sign_follows_winding() {
        let tri = right_triangle();
        // Normal +Z, origin below: positive
        assert_relative_eq!(tri.signed_tetra_volume(), 1.0 / 6.0, epsilon = 1e-12);

        let flipped = Triangle::new(tri.v0, tri.v2, tri.v1);
        assert_relative_eq!(flipped.signed_tetra_volume(), -1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn tetra_centroid_includes_origin() {
        let c = right_triangle().tetra_centroid();
        assert_relative_eq!(c.x, 0.25);
        assert_relative_eq!(c.y, 0.25);
        assert_relative_eq!(c.z, 0.75);
    }
}
