//! Hysteresis loss from the area between the upper and lower branches.
//!
//! Both branches become piecewise-linear interpolants over H. The stage then
//! finds every branch intersection on `[0, min(maxH)]` and each branch's own
//! B zero crossing, integrates each branch from its crossing up to a shared
//! bound (first intersection, else the shorter branch's last H), and reports
//! 2·|ΔA| as the loss proxy. With a measurement duration and material
//! density the proxy scales to a specific loss figure and an implied
//! remagnetization frequency.

use crate::domain::{Curve, LossConfig, LossReport, LossScaling};
use crate::error::AppError;
use crate::math::{LinearInterp, first_root, linspace, scan_roots, trapezoid};

/// Fraction of the measurement window the remagnetization actually occupies.
const DUTY_CYCLE: f64 = 0.8;

/// Compute the loss report for one upper/lower branch pair.
pub fn compute_loss(
    upper: &Curve,
    lower: &Curve,
    config: &LossConfig,
) -> Result<LossReport, AppError> {
    config.validate()?;
    let res = config.grid_resolution;

    let interp_u = LinearInterp::new(&upper.h, &upper.b)?;
    let interp_l = LinearInterp::new(&lower.h, &lower.b)?;

    let shared_max = interp_u.max_x().min(interp_l.max_x());
    let intersections = scan_roots(
        |x| interp_u.evaluate(x) - interp_l.evaluate(x),
        0.0,
        shared_max,
        res,
    );

    let upper_zero_crossing =
        first_root(|x| interp_u.evaluate(x), interp_u.min_x(), interp_u.max_x(), res);
    let lower_zero_crossing =
        first_root(|x| interp_l.evaluate(x), interp_l.min_x(), interp_l.max_x(), res);

    let upper_bound = intersections.first().copied().unwrap_or(shared_max);

    let area_upper = upper_zero_crossing.map(|from| branch_area(&interp_u, from, upper_bound, res));
    let area_lower = lower_zero_crossing.map(|from| branch_area(&interp_l, from, upper_bound, res));

    let total_area = match (area_upper, area_lower) {
        (Some(au), Some(al)) => Some(2.0 * (au - al).abs()),
        _ => None,
    };

    let scaling = match (total_area, config.duration, config.density) {
        (Some(total), Some(duration), Some(density)) => {
            let window = DUTY_CYCLE * duration;
            let loss_factor = total / (window * density);
            Some(LossScaling {
                loss_factor,
                frequency: 1.0 / window,
                loss_factor_50hz: loss_factor * 50.0 * window,
            })
        }
        _ => None,
    };

    Ok(LossReport {
        intersections,
        upper_zero_crossing,
        lower_zero_crossing,
        upper_bound,
        area_upper,
        area_lower,
        total_area,
        scaling,
    })
}

/// ∫ B dH over `[from, to]` on a fine even grid of the branch interpolant.
fn branch_area(interp: &LinearInterp, from: f64, to: f64, resolution: usize) -> f64 {
    let grid = linspace(from, to, resolution);
    let values: Vec<f64> = grid.iter().map(|&x| interp.evaluate(x)).collect();
    trapezoid(&values, &grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A near-ideal rectangular loop: B flips sign in a sliver just left of
    /// H = 0 and holds ±1 out to H = 10.
    fn rectangle() -> (Curve, Curve) {
        let upper = Curve::new(vec![-2e-6, -1e-6, 10.0], vec![-1.0, 1.0, 1.0]);
        let lower = Curve::new(vec![-2e-6, -1e-6, 10.0], vec![1.0, -1.0, -1.0]);
        (upper, lower)
    }

    #[test]
    fn rectangle_loop_areas() {
        let (upper, lower) = rectangle();
        let report = compute_loss(&upper, &lower, &LossConfig::default()).unwrap();

        assert!(report.intersections.is_empty());
        assert!(report.upper_zero_crossing.unwrap().abs() < 1e-5);
        assert!(report.lower_zero_crossing.unwrap().abs() < 1e-5);
        assert_eq!(report.upper_bound, 10.0);
        assert!((report.area_upper.unwrap() - 10.0).abs() < 1e-3);
        assert!((report.area_lower.unwrap() + 10.0).abs() < 1e-3);
        assert!((report.total_area.unwrap() - 40.0).abs() < 1e-2);
        assert!(report.scaling.is_none());
    }

    #[test]
    fn rectangle_loop_scaling() {
        let (upper, lower) = rectangle();
        let config = LossConfig {
            duration: Some(0.02),
            density: Some(7650.0),
            ..Default::default()
        };
        let report = compute_loss(&upper, &lower, &config).unwrap();
        let scaling = report.scaling.unwrap();

        assert!((scaling.frequency - 62.5).abs() < 1e-9);
        assert!((scaling.loss_factor - 0.3268).abs() < 1e-3);
        // 50 / 62.5 of the measured-frequency figure.
        assert!((scaling.loss_factor_50hz - scaling.loss_factor * 0.8).abs() < 1e-9);
    }

    #[test]
    fn first_intersection_caps_the_integration() {
        // Upper: B = 3 − H/2 (zero at 6); lower: B = H/2 − 2 (zero at 4);
        // they meet at H = 5, before either branch's end.
        let h = vec![0.0, 10.0];
        let upper = Curve::new(h.clone(), vec![3.0, -2.0]);
        let lower = Curve::new(h, vec![-2.0, 3.0]);
        let report = compute_loss(&upper, &lower, &LossConfig::default()).unwrap();

        assert_eq!(report.intersections.len(), 1);
        assert!((report.intersections[0] - 5.0).abs() < 1e-9);
        assert!((report.upper_bound - 5.0).abs() < 1e-9);
        assert!((report.upper_zero_crossing.unwrap() - 6.0).abs() < 1e-9);
        assert!((report.lower_zero_crossing.unwrap() - 4.0).abs() < 1e-9);
        // ∫₆⁵ (3 − H/2) dH = −0.25, ∫₄⁵ (H/2 − 2) dH = 0.25.
        assert!((report.area_upper.unwrap() + 0.25).abs() < 1e-6);
        assert!((report.area_lower.unwrap() - 0.25).abs() < 1e-6);
        assert!((report.total_area.unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn missing_zero_crossing_leaves_area_unset() {
        // The lower branch never reaches B = 0.
        let upper = Curve::new(vec![-1.0, 8.0], vec![-1.0, 1.0]);
        let lower = Curve::new(vec![-1.0, 10.0], vec![-2.0, -1.0]);
        let report = compute_loss(&upper, &lower, &LossConfig::default()).unwrap();

        // No intersection, so the shorter branch's last H bounds the range.
        assert!(report.intersections.is_empty());
        assert_eq!(report.upper_bound, 8.0);
        assert!(report.upper_zero_crossing.is_some());
        assert!(report.lower_zero_crossing.is_none());
        assert!(report.area_upper.is_some());
        assert!(report.area_lower.is_none());
        assert!(report.total_area.is_none());
        assert!(report.scaling.is_none());
    }

    #[test]
    fn undersized_branch_is_insufficient() {
        let upper = Curve::new(vec![0.0], vec![1.0]);
        let lower = Curve::new(vec![0.0, 1.0], vec![-1.0, -1.0]);
        let err = compute_loss(&upper, &lower, &LossConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::InsufficientData(_)));
    }
}
