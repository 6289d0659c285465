//! Piecewise-linear interpolation with end-segment extrapolation.
//!
//! This mirrors the loss-area stage's contract: build over a branch sorted by
//! H and extrapolate linearly beyond the sampled range rather than raising.

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct LinearInterp {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterp {
    /// Build from (possibly unsorted) pairs; samples are sorted by x.
    ///
    /// Duplicate x values are tolerated: evaluation inside a zero-width
    /// segment deterministically returns the left sample's y.
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, AppError> {
        assert_eq!(xs.len(), ys.len(), "xs and ys must have equal length");
        if xs.len() < 2 {
            return Err(AppError::InsufficientData(format!(
                "linear interpolation needs at least 2 samples, got {}",
                xs.len()
            )));
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(AppError::NumericDegenerate(
                "non-finite sample in linear interpolation input".into(),
            ));
        }

        let mut order: Vec<usize> = (0..xs.len()).collect();
        order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));
        let sorted_x: Vec<f64> = order.iter().map(|&i| xs[i]).collect();
        let sorted_y: Vec<f64> = order.iter().map(|&i| ys[i]).collect();

        Ok(Self {
            xs: sorted_x,
            ys: sorted_y,
        })
    }

    /// Evaluate at `x`, extrapolating with the first/last segment outside
    /// the sampled range.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] > x {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let dx = self.xs[hi] - self.xs[lo];
        if dx == 0.0 {
            return self.ys[lo];
        }
        self.ys[lo] + (self.ys[hi] - self.ys[lo]) * (x - self.xs[lo]) / dx
    }

    pub fn min_x(&self) -> f64 {
        self.xs[0]
    }

    pub fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_and_extrapolates_a_line() {
        let li = LinearInterp::new(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
        assert!((li.evaluate(0.5) - 1.0).abs() < 1e-12);
        assert!((li.evaluate(3.0) - 6.0).abs() < 1e-12);
        assert!((li.evaluate(-1.0) - -2.0).abs() < 1e-12);
    }

    #[test]
    fn sorts_unsorted_input() {
        let li = LinearInterp::new(&[2.0, 0.0, 1.0], &[4.0, 0.0, 2.0]).unwrap();
        assert!((li.evaluate(1.5) - 3.0).abs() < 1e-12);
        assert_eq!(li.min_x(), 0.0);
        assert_eq!(li.max_x(), 2.0);
    }

    #[test]
    fn zero_width_end_segment_returns_left_value() {
        let li = LinearInterp::new(&[0.0, 1.0, 2.0, 2.0], &[0.0, 5.0, 7.0, 8.0]).unwrap();
        assert_eq!(li.evaluate(2.0), 7.0);
        // Interior duplicates resolve to the rightmost segment at the knot.
        let li = LinearInterp::new(&[0.0, 1.0, 1.0, 2.0], &[0.0, 5.0, 7.0, 8.0]).unwrap();
        assert_eq!(li.evaluate(1.0), 7.0);
    }

    #[test]
    fn rejects_single_sample() {
        let err = LinearInterp::new(&[1.0], &[1.0]).unwrap_err();
        assert!(matches!(err, AppError::InsufficientData(_)));
    }
}
