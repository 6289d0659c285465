//! Dedupe + dual-pass spline resampling.
//!
//! Raw branches repeat H values (the instrument holds the field while B
//! settles) and are not evenly spaced. The resampler:
//!
//! 1. collapses samples sharing an exact H value into one sample with the
//!    mean B (then sorts ascending, which the grouping implies)
//! 2. fits a cubic interpolant and evaluates it at
//!    `n1 = max(10, rows / subsample)` even points — the coarse pass, which
//!    also shaves residual ripple when `subsample > 1`
//! 3. fits a second cubic interpolant through the coarse points and
//!    evaluates it at `rows` even points — the final dense curve
//!
//! Evaluation points that drift epsilon-outside the knot range (floating
//! point only) extrapolate instead of raising; excursions beyond the
//! configured tolerance set the `extrapolated` flag.

pub mod reshape;

pub use reshape::*;

use crate::domain::{Branch, Curve, ResampleConfig, ResampledBranch};
use crate::error::AppError;
use crate::math::{CubicSpline, linspace};

/// Collapse duplicate H keys into their mean B and sort ascending.
pub fn dedupe_by_h(curve: &Curve) -> Result<Curve, AppError> {
    if curve.h.iter().chain(&curve.b).any(|v| !v.is_finite()) {
        return Err(AppError::NumericDegenerate(
            "non-finite sample in resampler input".into(),
        ));
    }

    let mut order: Vec<usize> = (0..curve.len()).collect();
    order.sort_by(|&a, &b| curve.h[a].total_cmp(&curve.h[b]));

    let mut h = Vec::with_capacity(curve.len());
    let mut b = Vec::with_capacity(curve.len());
    let mut i = 0;
    while i < order.len() {
        let key = curve.h[order[i]];
        let mut sum = 0.0;
        let mut count = 0usize;
        while i < order.len() && curve.h[order[i]] == key {
            sum += curve.b[order[i]];
            count += 1;
            i += 1;
        }
        h.push(key);
        b.push(sum / count as f64);
    }

    Ok(Curve::new(h, b))
}

/// Resample one branch to `rows` evenly spaced points via the dual pass.
pub fn resample_branch(
    branch: Branch,
    curve: &Curve,
    config: &ResampleConfig,
) -> Result<ResampledBranch, AppError> {
    config.validate()?;

    let rows = curve.len();
    let deduped = dedupe_by_h(curve)?;

    let n1 = (rows / config.subsample).max(10);

    let first = CubicSpline::new(deduped.h, deduped.b)?;
    let coarse_h = linspace(first.min_x(), first.max_x(), n1);
    let mut extrapolated = excursion_exceeds(&coarse_h, &first, config.extrapolation_tolerance);
    let coarse_b: Vec<f64> = coarse_h.iter().map(|&x| first.evaluate(x)).collect();
    let coarse = Curve::new(coarse_h, coarse_b);

    let second = CubicSpline::new(coarse.h.clone(), coarse.b.clone())?;
    let fine_h = linspace(second.min_x(), second.max_x(), rows);
    extrapolated |= excursion_exceeds(&fine_h, &second, config.extrapolation_tolerance);
    let fine_b: Vec<f64> = fine_h.iter().map(|&x| second.evaluate(x)).collect();
    let fine = Curve::new(fine_h, fine_b);

    Ok(ResampledBranch {
        branch,
        coarse,
        fine,
        extrapolated,
    })
}

/// True when any evaluation point lies outside the knot range by more than
/// `tol` relative to the span.
fn excursion_exceeds(points: &[f64], spline: &CubicSpline, tol: f64) -> bool {
    let span = spline.max_x() - spline.min_x();
    let limit = tol * span.abs();
    points
        .iter()
        .any(|&x| spline.min_x() - x > limit || x - spline.max_x() > limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic(x: f64) -> f64 {
        0.01 * x * x * x - 0.2 * x + 1.0
    }

    #[test]
    fn duplicates_collapse_to_mean_and_sort() {
        let curve = Curve::new(vec![2.0, 1.0, 2.0, 0.0], vec![4.0, 1.0, 6.0, 0.0]);
        let out = dedupe_by_h(&curve).unwrap();
        assert_eq!(out.h, vec![0.0, 1.0, 2.0]);
        assert_eq!(out.b, vec![0.0, 1.0, 5.0]);
    }

    #[test]
    fn output_is_evenly_spaced_and_strictly_increasing() {
        let h: Vec<f64> = (0..80).map(|i| (i as f64 * 0.37).sin() * 50.0).collect();
        let b: Vec<f64> = h.iter().map(|&x| cubic(x)).collect();
        let out = resample_branch(
            Branch::Initial,
            &Curve::new(h, b),
            &ResampleConfig::default(),
        )
        .unwrap();

        assert_eq!(out.fine.len(), 80);
        let step = out.fine.h[1] - out.fine.h[0];
        for w in out.fine.h.windows(2) {
            assert!(w[1] > w[0]);
            assert!((w[1] - w[0] - step).abs() < 1e-9 * step.abs().max(1.0));
        }
        assert!(!out.extrapolated);
    }

    #[test]
    fn round_trips_polynomial_data() {
        // Unsorted, duplicate-keyed samples of a cubic: the dual pass must
        // land back on the same cubic.
        let mut h: Vec<f64> = (0..60).map(|i| ((i * 7) % 60) as f64 / 3.0 - 10.0).collect();
        h.push(h[0]);
        let b: Vec<f64> = h.iter().map(|&x| cubic(x)).collect();
        let curve = Curve::new(h, b);

        let out = resample_branch(Branch::Upper, &curve, &ResampleConfig::default()).unwrap();
        for (x, y) in out.fine.h.iter().zip(&out.fine.b) {
            assert!((y - cubic(*x)).abs() < 1e-8, "mismatch at H={x}");
        }
    }

    #[test]
    fn coarse_pass_respects_subsample_floor() {
        let h: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let b: Vec<f64> = h.iter().map(|&x| cubic(x)).collect();
        let out = resample_branch(
            Branch::Lower,
            &Curve::new(h, b),
            &ResampleConfig {
                subsample: 4,
                ..Default::default()
            },
        )
        .unwrap();
        // 12 / 4 = 3 would be below the floor of 10.
        assert_eq!(out.coarse.len(), 10);
        assert_eq!(out.fine.len(), 12);
    }

    #[test]
    fn zero_subsample_is_invalid() {
        let curve = Curve::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        let err = resample_branch(
            Branch::Initial,
            &curve,
            &ResampleConfig {
                subsample: 0,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter { .. }));
    }

    #[test]
    fn single_valued_h_is_insufficient() {
        let curve = Curve::new(vec![5.0, 5.0, 5.0], vec![1.0, 2.0, 3.0]);
        let err =
            resample_branch(Branch::Initial, &curve, &ResampleConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::InsufficientData(_)));
    }
}
