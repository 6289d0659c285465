//! Remanence and coercivity via axis-crossing detection.
//!
//! Both are "where does this branch cross an axis" questions: remanence is B
//! at H = 0, coercivity is H at B = 0. The scan walks the key sequence for
//! the first sign change (zero counts as its own sign, so touching the axis
//! is detected too) and linearly interpolates the companion value inside the
//! bracketing pair. A branch that never crosses the axis yields `None`.

use crate::domain::{CharacteristicPoints, Curve};
use crate::error::AppError;

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Linearly interpolated `values` entry where `keys` crosses zero, or `None`
/// when no sign change exists.
fn value_at_zero(keys: &[f64], values: &[f64]) -> Result<Option<f64>, AppError> {
    if keys.len() < 2 {
        return Ok(None);
    }
    for i in 0..keys.len() - 1 {
        if sign(keys[i]) == sign(keys[i + 1]) {
            continue;
        }
        let dk = keys[i + 1] - keys[i];
        if !dk.is_finite() || dk == 0.0 {
            return Err(AppError::NumericDegenerate(format!(
                "degenerate key spacing at crossing index {i}"
            )));
        }
        let t = -keys[i] / dk;
        return Ok(Some(values[i] + t * (values[i + 1] - values[i])));
    }
    Ok(None)
}

/// Extract all four characteristic points from the two hysteresis branches.
///
/// The upper (descending) branch carries the positive remanence and the
/// negative coercivity; the lower branch carries their mirror images.
pub fn extract(upper: &Curve, lower: &Curve) -> Result<CharacteristicPoints, AppError> {
    Ok(CharacteristicPoints {
        upper_remanence: value_at_zero(&upper.h, &upper.b)?,
        lower_remanence: value_at_zero(&lower.h, &lower.b)?,
        negative_coercivity: value_at_zero(&upper.b, &upper.h)?,
        positive_coercivity: value_at_zero(&lower.b, &lower.h)?,
    })
}
