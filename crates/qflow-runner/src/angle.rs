//! Angle resolution.
//!
//! Clients may send angles in radians or degrees without saying which.
//! Magnitudes up to 2π are taken as radians; anything larger is degrees.
//! Values close to 2π are inherently ambiguous.

use std::f64::consts::PI;

use crate::error::{RunnerError, RunnerResult};
use crate::record::ParamValue;

/// Largest magnitude still read as radians.
pub const RADIAN_LIMIT: f64 = 2.0 * PI;

/// Resolve a raw parameter to radians.
pub fn resolve_angle(value: &ParamValue) -> RunnerResult<f64> {
    let parsed = match value {
        ParamValue::Number(n) => Some(*n),
        ParamValue::Text(s) => s.trim().parse::<f64>().ok(),
    };

    match parsed {
        Some(angle) if angle.is_finite() => Ok(to_radians(angle)),
        _ => Err(RunnerError::InvalidAngle {
            value: value.to_string(),
        }),
    }
}

/// Apply the radians-or-degrees heuristic to a finite number.
pub fn to_radians(angle: f64) -> f64 {
    if angle.abs() <= RADIAN_LIMIT {
        angle
    } else {
        angle * PI / 180.0
    }
}
