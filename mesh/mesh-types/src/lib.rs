//! Core mesh types for hull stability analysis.
//!
//! This crate provides the foundational geometry the stability solver works on:
//!
//! - [`IndexedMesh`] - A closed triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! Every transform on [`IndexedMesh`] returns a new mesh. The analysis shares
//! one zeroed hull between worker threads, so nothing here mutates in place.
//!
//! # Units
//!
//! Coordinates are `f64`. The stability crates assume millimeters.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: width (port/starboard)
//! - Y: length (bow/stern)
//! - Z: height (keel up)
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{box_mesh, Point3, Vector3};
//!
//! let hull = box_mesh(Point3::new(-1.0, -1.0, 0.0), Point3::new(1.0, 1.0, 2.0));
//! let moved = hull.translated(Vector3::new(0.0, 0.0, -1.0));
//!
//! assert_eq!(moved.face_count(), 12);
//! assert!((moved.bounds().min.z + 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod triangle;

pub use bounds::Aabb;
pub use mesh::{IndexedMesh, box_mesh, unit_cube};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
