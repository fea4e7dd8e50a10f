//! Hydrostatic stability of rigid floating hulls.
//!
//! Given a closed hull mesh, a mass and a center of gravity, this crate
//! tilts the hull through a full turn about a horizontal axis and, at each
//! angle, finds the waterline where displaced seawater balances the mass.
//! The center of buoyancy of the submerged part gives a righting moment;
//! the moment curve decides stability and yields the ride angles.
//!
//! # Pipeline
//!
//! - [`integrals`]: divergence-theorem volume and centroid
//! - [`find_waterline`]: bounded bisection on the slice height
//! - [`run_sweep`]: per-angle rotate, solve, integrate (parallel with rayon)
//! - [`classify()`]: righting moments and the stable/unstable verdict
//! - [`find_ride_angles`]: stable zero crossings of the moment curve
//! - [`analyze`]: all of the above into a [`StabilityReport`]
//!
//! Mesh operations go through the [`GeometryService`] trait;
//! [`MeshGeometry`] is the default backed by `mesh-clip`.
//!
//! # Units
//!
//! Lengths are millimeters, masses kilograms, moments newton-meters and
//! angles degrees. Seawater is 1020 kg/m³.
//!
//! # Example
//!
//! ```
//! use hydro_stability::{Body, StabilityConfig, analyze_hull};
//! use mesh_types::{Point3, box_mesh};
//!
//! // 1 m cube, half its displacement, weighted at the keel
//! let hull = box_mesh(Point3::new(0.0, 0.0, 0.0), Point3::new(1000.0, 1000.0, 1000.0));
//! let body = Body::new(hull, 510.0, Point3::origin());
//!
//! let report = analyze_hull(&body, &StabilityConfig::default()).unwrap();
//! assert!(report.is_stable);
//! assert_eq!(report.primary_ride_angle(), Some(0.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod analysis;
mod body;
mod classify;
mod config;
mod error;
mod geometry;
pub mod integrals;
mod ride;
mod sweep;
mod waterline;

pub use analysis::{Flotation, MomentRow, StabilityReport, analyze, analyze_hull};
pub use body::Body;
pub use classify::{
    Classification, GRAVITY_M_S2, IGNORE_BAND_DEG, RightingMoments, classify, classify_outcome,
    in_ignore_band, is_capsizing, lever_arm, righting_moment,
};
pub use config::{Axis, SolverLimits, StabilityConfig, StabilityFormula};
pub use error::{StabilityError, StabilityResult};
pub use geometry::{GeometryService, MeshGeometry};
pub use integrals::{SEAWATER_DENSITY_KG_M3, centroid, mm3_to_kg, signed_volume, volume};
pub use ride::{MOMENT_DECIMALS, find_ride_angles, interpolate_crossing, to_signed_angle};
pub use sweep::{BuoyancySample, SweepOutcome, SweepResult, run_sweep, solve_angle, zero_hull};
pub use waterline::{Waterline, find_waterline};
