//! Regenerate a branch at an arbitrary point count.
//!
//! Unlike the resampler this stage does not dedupe or smooth; it sorts the
//! branch by H, fits one interpolant (cubic spline or local quadratic) and
//! evaluates it at `n` evenly spaced field values. A refit of the same kind
//! through the reshaped points is then evaluated back at the original H
//! values; the worst absolute B mismatch is reported as `max_residual` so a
//! caller can judge how much detail the chosen point count discards.

use crate::domain::{Branch, Curve, ReshapeMethod, ReshapeResult};
use crate::error::AppError;
use crate::math::{CubicSpline, QuadraticInterp, linspace};

enum Interpolant {
    Cubic(CubicSpline),
    Quadratic(QuadraticInterp),
}

impl Interpolant {
    fn new(method: ReshapeMethod, h: Vec<f64>, b: Vec<f64>) -> Result<Self, AppError> {
        Ok(match method {
            ReshapeMethod::Cubic => Interpolant::Cubic(CubicSpline::new(h, b)?),
            ReshapeMethod::Quadratic => Interpolant::Quadratic(QuadraticInterp::new(h, b)?),
        })
    }

    fn evaluate(&self, x: f64) -> f64 {
        match self {
            Interpolant::Cubic(s) => s.evaluate(x),
            Interpolant::Quadratic(q) => q.evaluate(x),
        }
    }
}

/// Reshape one branch to `points` evenly spaced samples.
pub fn reshape_branch(
    branch: Branch,
    curve: &Curve,
    points: usize,
    method: ReshapeMethod,
) -> Result<ReshapeResult, AppError> {
    if points < 2 {
        return Err(AppError::invalid(
            "reshape_points",
            format!("need at least 2 points, got {points}"),
        ));
    }

    let mut order: Vec<usize> = (0..curve.len()).collect();
    order.sort_by(|&a, &b| curve.h[a].total_cmp(&curve.h[b]));
    let h: Vec<f64> = order.iter().map(|&i| curve.h[i]).collect();
    let b: Vec<f64> = order.iter().map(|&i| curve.b[i]).collect();

    let lo = h[0];
    let hi = h[h.len() - 1];
    let interp = Interpolant::new(method, h, b)?;

    let new_h = linspace(lo, hi, points);
    let new_b: Vec<f64> = new_h.iter().map(|&x| interp.evaluate(x)).collect();
    let reshaped = Curve::new(new_h, new_b);

    // Refit through the reshaped points and measure against the raw samples.
    let refit = Interpolant::new(method, reshaped.h.clone(), reshaped.b.clone())?;
    let max_residual = curve
        .h
        .iter()
        .zip(&curve.b)
        .map(|(&x, &y)| (y - refit.evaluate(x)).abs())
        .fold(0.0_f64, f64::max);

    Ok(ReshapeResult {
        branch,
        method,
        curve: reshaped,
        max_residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_curve() -> Curve {
        let h: Vec<f64> = (0..40).map(|i| i as f64 * 0.5 - 10.0).collect();
        let b: Vec<f64> = h.iter().map(|&x| (x / 4.0).tanh()).collect();
        Curve::new(h, b)
    }

    #[test]
    fn cubic_reshape_at_same_count_is_lossless() {
        let curve = sample_curve();
        let out = reshape_branch(Branch::Upper, &curve, curve.len(), ReshapeMethod::Cubic)
            .unwrap();
        // Input is already evenly spaced, so the reshape grid hits every
        // original knot exactly.
        for (x, y) in out.curve.h.iter().zip(&out.curve.b) {
            assert!((y - (x / 4.0).tanh()).abs() < 1e-12);
        }
        assert!(out.max_residual < 1e-12);
    }

    #[test]
    fn quadratic_reshape_reports_residual() {
        let curve = sample_curve();
        let out = reshape_branch(Branch::Lower, &curve, 9, ReshapeMethod::Quadratic).unwrap();
        assert_eq!(out.curve.len(), 9);
        assert_eq!(out.curve.h[0], -10.0);
        assert_eq!(out.curve.h[8], 9.5);
        // 9 points cannot carry the full tanh shape.
        assert!(out.max_residual > 0.0);
        assert!(out.max_residual < 0.1);
    }

    #[test]
    fn unsorted_input_is_sorted_before_fitting() {
        let curve = Curve::new(vec![3.0, 0.0, 1.0, 2.0], vec![9.0, 0.0, 1.0, 4.0]);
        let out = reshape_branch(Branch::Initial, &curve, 7, ReshapeMethod::Cubic).unwrap();
        for (x, y) in out.curve.h.iter().zip(&out.curve.b) {
            assert!((y - x * x).abs() < 1e-9);
        }
    }

    #[test]
    fn fewer_than_two_points_is_invalid() {
        let err = reshape_branch(Branch::Upper, &sample_curve(), 1, ReshapeMethod::Cubic)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidParameter {
                name: "reshape_points",
                ..
            }
        ));
    }
}
