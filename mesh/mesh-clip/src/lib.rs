//! Half-space clipping for closed triangle meshes.
//!
//! [`clip_below`] removes all material above a horizontal plane and closes
//! the cut with a cap, so the result is again a closed surface whose
//! divergence-theorem volume and centroid are exact. The stability solver
//! uses it as its "slice below height" primitive.
//!
//! # Example
//!
//! ```
//! use mesh_clip::clip_below;
//! use mesh_types::{box_mesh, Point3};
//!
//! let hull = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
//! let lower = clip_below(&hull, 0.5).unwrap();
//!
//! assert!((lower.bounds().max.z - 0.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod clip;
mod error;

pub use clip::clip_below;
pub use error::{ClipError, ClipResult};
