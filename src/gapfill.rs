//! Gap repair for raw instrument columns.
//!
//! Cells that failed to parse arrive as NaN. Interior gaps are closed by
//! linear interpolation between the nearest valid neighbors (sample index as
//! abscissa); whatever remains is filled from the back first, then from the
//! front — i.e. leading gaps take the first valid value and trailing gaps the
//! last one. A column with no valid sample at all cannot be repaired and is
//! reported as `InsufficientData`, never passed through silently.

use crate::domain::{Curve, CurveSet};
use crate::error::AppError;

/// Repair one column. Output length equals input length and every valid
/// input value is preserved unchanged at its position.
pub fn fill_series(values: &[f64]) -> Result<Vec<f64>, AppError> {
    let mut out = values.to_vec();

    let first_valid = values.iter().position(|v| !v.is_nan());
    let Some(first_valid) = first_valid else {
        return Err(AppError::InsufficientData(
            "column contains no numeric samples to interpolate from".into(),
        ));
    };
    let last_valid = values.iter().rposition(|v| !v.is_nan()).unwrap_or(first_valid);

    // Interior gaps: linear interpolation over the sample index.
    let mut prev = first_valid;
    let mut i = first_valid + 1;
    while i <= last_valid {
        if out[i].is_nan() {
            let next = (i + 1..=last_valid)
                .find(|&j| !values[j].is_nan())
                .unwrap_or(last_valid);
            let span = (next - prev) as f64;
            let y0 = out[prev];
            let y1 = out[next];
            for j in i..next {
                out[j] = y0 + (y1 - y0) * ((j - prev) as f64) / span;
            }
            prev = next;
            i = next + 1;
        } else {
            prev = i;
            i += 1;
        }
    }

    // Backward fill (leading gaps), then forward fill (trailing gaps).
    for j in 0..first_valid {
        out[j] = out[first_valid];
    }
    for j in last_valid + 1..out.len() {
        out[j] = out[last_valid];
    }

    Ok(out)
}

/// Repair both columns of a curve independently.
pub fn fill_curve(curve: &Curve) -> Result<Curve, AppError> {
    Ok(Curve::new(fill_series(&curve.h)?, fill_series(&curve.b)?))
}

/// Repair every branch of a set.
pub fn fill_curve_set(set: &CurveSet) -> Result<CurveSet, AppError> {
    Ok(CurveSet {
        kind: set.kind,
        initial: fill_curve(&set.initial)?,
        upper: fill_curve(&set.upper)?,
        lower: fill_curve(&set.lower)?,
    })
}
