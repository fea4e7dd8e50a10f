//! Ride angles: stable zeros of the righting moment curve.
//!
//! A stable equilibrium is where the moment goes from positive to negative
//! with increasing angle. The curve is cyclic, so the last sample brackets
//! with the first.

/// Decimal places moments are rounded to before sign comparisons.
pub const MOMENT_DECIMALS: i32 = 4;

/// Angles closer than this (degrees) are reported once.
const DUPLICATE_EPS_DEG: f64 = 1e-9;

/// Find ride angles in a moment curve.
///
/// `moments` are `(angle_deg, moment)` pairs in ascending angle order, as
/// produced by [`RightingMoments::entries`](crate::RightingMoments::entries).
/// Each result lies in `(-180, 180]`. Results are sorted by magnitude,
/// positive first on ties, so the first entry is the resting angle closest
/// to upright.
///
/// # Example
///
/// ```
/// use hydro_stability::find_ride_angles;
///
/// let moments = [(0.0, 0.0), (90.0, -3.0), (180.0, 0.0), (270.0, 3.0)];
/// assert_eq!(find_ride_angles(&moments), vec![0.0]);
/// ```
#[must_use]
pub fn find_ride_angles(moments: &[(f64, f64)]) -> Vec<f64> {
    let n = moments.len();
    let rounded: Vec<f64> = moments.iter().map(|&(_, m)| round_moment(m)).collect();

    let mut found = Vec::new();
    for i in 0..n {
        let prev = (i + n - 1) % n;
        let next = (i + 1) % n;

        if rounded[prev] > 0.0 && rounded[i] < 0.0 {
            found.push(interpolate_crossing(moments[prev], moments[i]));
        } else if is_zero(rounded[i]) && rounded[prev] > 0.0 && rounded[next] < 0.0 {
            found.push(moments[i].0);
        }
    }

    let mut angles: Vec<f64> = found.into_iter().map(to_signed_angle).collect();
    angles.sort_by(|a, b| a.abs().total_cmp(&b.abs()).then(b.total_cmp(a)));
    angles.dedup_by(|a, b| (*a - *b).abs() < DUPLICATE_EPS_DEG);
    angles
}

/// Angle where the line through two `(angle, moment)` samples crosses zero.
///
/// If the bracket wraps past 360 (`a1 < a0`), `a0` is moved down a turn so
/// the interpolation runs over the short gap.
#[must_use]
pub fn interpolate_crossing((a0, m0): (f64, f64), (a1, m1): (f64, f64)) -> f64 {
    let a0 = if a1 < a0 { a0 - 360.0 } else { a0 };
    a0 + (-m0 * (a1 - a0)) / (m1 - m0)
}

/// Map an angle in `[-360, 360)` into `(-180, 180]`.
#[must_use]
pub fn to_signed_angle(angle_deg: f64) -> f64 {
    if angle_deg > 180.0 {
        angle_deg - 360.0
    } else if angle_deg <= -180.0 {
        angle_deg + 360.0
    } else {
        angle_deg
    }
}

fn round_moment(moment: f64) -> f64 {
    let scale = 10f64.powi(MOMENT_DECIMALS);
    (moment * scale).round() / scale
}

#[allow(clippy::float_cmp)]
// Rounded moments are exact multiples of the rounding step
fn is_zero(rounded: f64) -> bool {
    rounded == 0.0
}
