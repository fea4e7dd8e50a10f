//! Error types for stability analysis.

use std::time::Duration;

use mesh_clip::ClipError;
use thiserror::Error;

/// Result type alias for stability operations.
pub type StabilityResult<T> = Result<T, StabilityError>;

/// Errors that can occur during stability analysis.
///
/// A hull that sinks is not an error; see
/// [`SweepOutcome::Sinks`](crate::SweepOutcome::Sinks).
#[derive(Debug, Error)]
pub enum StabilityError {
    /// Input mesh has no vertices or no faces.
    #[error("input mesh is empty")]
    EmptyMesh,

    /// Mesh encloses no volume, so it has no centroid.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Waterline bisection used up its iteration cap.
    #[error(
        "waterline search did not converge after {iterations} iterations \
         (last height {height:.4} mm, residual {residual_kg:.6} kg)"
    )]
    NumericalConvergence {
        /// Iterations performed.
        iterations: usize,
        /// Slice height of the last iteration (mm).
        height: f64,
        /// Submerged mass minus target mass at the last iteration (kg).
        residual_kg: f64,
    },

    /// Waterline bisection ran past its deadline.
    #[error("waterline search ran out of time after {iterations} iterations ({elapsed:?})")]
    DeadlineExceeded {
        /// Iterations completed before the deadline hit.
        iterations: usize,
        /// Time spent in the search.
        elapsed: Duration,
    },

    /// A single tilt angle failed; the sweep stops there.
    #[error("analysis failed at {angle} degrees: {source}")]
    AngleFailed {
        /// Tilt angle in degrees.
        angle: f64,
        /// What went wrong at that angle.
        #[source]
        source: Box<StabilityError>,
    },

    /// Invalid analysis parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Unrecognized rotation axis name.
    #[error("invalid rotation axis '{0}', expected 'x' or 'y'")]
    InvalidAxis(String),

    /// Unrecognized stability formula name.
    #[error("invalid stability formula '{0}', expected 'cg-relative' or 'origin-relative'")]
    InvalidFormula(String),

    /// The slice-below-height primitive failed.
    #[error("slice failed: {0}")]
    Clip(#[from] ClipError),
}

impl StabilityError {
    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }

    /// Create a degenerate geometry error.
    #[must_use]
    pub fn degenerate(details: impl Into<String>) -> Self {
        Self::DegenerateGeometry(details.into())
    }

    /// Tilt angle this error is attributed to, if any.
    #[must_use]
    pub fn angle(&self) -> Option<f64> {
        match self {
            Self::AngleFailed { angle, .. } => Some(*angle),
            _ => None,
        }
    }
}
