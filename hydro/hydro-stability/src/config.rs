//! Analysis configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use nalgebra::Vector3;

use crate::error::{StabilityError, StabilityResult};

/// Horizontal axis the body is tilted about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Roll: rotate about +X, lever arms measured along Y.
    #[default]
    X,
    /// Pitch: rotate about -Y, lever arms measured along X.
    Y,
}

impl Axis {
    /// Rotation vector used for tilting.
    ///
    /// Y uses the negated unit vector so that, for positive angles, the top
    /// of the body leans toward the negative lateral axis on both axes.
    #[must_use]
    pub fn rotation_vector(self) -> Vector3<f64> {
        match self {
            Self::X => Vector3::x(),
            Self::Y => -Vector3::y(),
        }
    }

    /// Coordinate index (0 = x, 1 = y) along which lever arms are measured.
    #[must_use]
    pub const fn lateral_index(self) -> usize {
        match self {
            Self::X => 1,
            Self::Y => 0,
        }
    }
}

impl FromStr for Axis {
    type Err = StabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            _ => Err(StabilityError::InvalidAxis(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Reference point for lever arms and the rotation pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StabilityFormula {
    /// The hull is shifted so the center of gravity sits at the origin and
    /// is tilted about it. Arms are the offset of the center of buoyancy
    /// from the center of gravity.
    #[default]
    CgRelative,
    /// The hull is tilted about the origin of the zeroed frame (bottom
    /// center of its bounding box). Arms are measured from that origin and
    /// the center of gravity is not used.
    OriginRelative,
}

impl FromStr for StabilityFormula {
    type Err = StabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "cg-relative" | "cg" => Ok(Self::CgRelative),
            "origin-relative" | "origin" => Ok(Self::OriginRelative),
            _ => Err(StabilityError::InvalidFormula(s.to_string())),
        }
    }
}

impl fmt::Display for StabilityFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CgRelative => write!(f, "cg-relative"),
            Self::OriginRelative => write!(f, "origin-relative"),
        }
    }
}

/// Bounds on a single waterline search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverLimits {
    /// Maximum bisection steps before giving up.
    pub max_iterations: usize,

    /// Wall-clock budget for one search, if any.
    pub deadline: Option<Duration>,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_iterations: 64,
            deadline: None,
        }
    }
}

/// Parameters for a stability analysis.
///
/// # Example
///
/// ```
/// use hydro_stability::{Axis, StabilityConfig};
///
/// let config = StabilityConfig::default()
///     .with_resolution(15.0)
///     .with_axis(Axis::Y);
///
/// assert_eq!(config.sample_angles().len(), 24);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabilityConfig {
    /// Step between sampled tilt angles, in degrees.
    pub angular_resolution_deg: f64,

    /// Allowed mismatch between submerged and body mass, in kg.
    pub tolerance_kg: f64,

    /// Tilt axis.
    pub axis: Axis,

    /// Lever arm reference.
    pub formula: StabilityFormula,

    /// Per-angle waterline search limits.
    pub limits: SolverLimits,

    /// Solve angles on the rayon pool.
    pub parallel: bool,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            angular_resolution_deg: 45.0,
            tolerance_kg: 0.001,
            axis: Axis::X,
            formula: StabilityFormula::CgRelative,
            limits: SolverLimits::default(),
            parallel: true,
        }
    }
}

impl StabilityConfig {
    /// Set the angular step in degrees.
    #[must_use]
    pub const fn with_resolution(mut self, degrees: f64) -> Self {
        self.angular_resolution_deg = degrees;
        self
    }

    /// Set the buoyancy tolerance in kg.
    #[must_use]
    pub const fn with_tolerance(mut self, kg: f64) -> Self {
        self.tolerance_kg = kg;
        self
    }

    /// Set the tilt axis.
    #[must_use]
    pub const fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Set the lever arm reference.
    #[must_use]
    pub const fn with_formula(mut self, formula: StabilityFormula) -> Self {
        self.formula = formula;
        self
    }

    /// Set the bisection iteration cap.
    #[must_use]
    pub const fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.limits.max_iterations = iterations;
        self
    }

    /// Set a wall-clock budget for each waterline search.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.limits.deadline = Some(deadline);
        self
    }

    /// Enable or disable parallel angle solving.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the parameters before any geometry work.
    ///
    /// # Errors
    ///
    /// Returns [`StabilityError::InvalidParams`] if the angular step is not
    /// in `(0, 360]`, the tolerance is not positive, or the iteration cap is
    /// zero.
    pub fn validate(&self) -> StabilityResult<()> {
        let step = self.angular_resolution_deg;
        if !(step.is_finite() && step > 0.0 && step <= 360.0) {
            return Err(StabilityError::invalid_params(format!(
                "angular resolution must be in (0, 360] degrees, got {step}"
            )));
        }
        if !(self.tolerance_kg.is_finite() && self.tolerance_kg > 0.0) {
            return Err(StabilityError::invalid_params(format!(
                "buoyancy tolerance must be positive, got {}",
                self.tolerance_kg
            )));
        }
        if self.limits.max_iterations == 0 {
            return Err(StabilityError::invalid_params(
                "iteration cap must be at least 1",
            ));
        }
        Ok(())
    }

    /// Tilt angles of a sweep: `0, step, 2*step, ...` while below 360.
    ///
    /// Returns an empty list for a non-positive or non-finite step.
    #[must_use]
    pub fn sample_angles(&self) -> Vec<f64> {
        let step = self.angular_resolution_deg;
        if !(step.is_finite() && step > 0.0) {
            return Vec::new();
        }
        // Guards against 360 - ulp showing up as a sample for steps that
        // divide the circle inexactly.
        let end = 360.0 - 1e-9;
        (0u32..)
            .map(|i| f64::from(i) * step)
            .take_while(|&angle| angle < end)
            .collect()
    }
}
