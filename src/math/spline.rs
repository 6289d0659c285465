//! Spline interpolation over sorted (H, B) samples.
//!
//! Two interpolants live here:
//!
//! - [`CubicSpline`]: a not-a-knot cubic spline. Not-a-knot (rather than
//!   natural) boundary conditions matter: data sampled from a cubic
//!   polynomial is reproduced exactly, including near the ends, so the
//!   resampler's round-trip property holds on smooth inputs.
//! - [`QuadraticInterp`]: a local three-point quadratic (Lagrange) used by
//!   the reshaper's quadratic mode.
//!
//! Both extrapolate with their boundary polynomial instead of raising when an
//! evaluation point falls outside the knot range.

use crate::error::AppError;

/// Second-derivative formulation of a cubic spline with not-a-knot ends.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    /// Strictly increasing knots.
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot.
    sigma: Vec<f64>,
}

impl CubicSpline {
    /// Construct the spline.
    ///
    /// Errors: fewer than 2 knots is `InsufficientData`; non-finite or
    /// non-strictly-increasing knots are `NumericDegenerate`.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, AppError> {
        validate_knots(&xs, &ys)?;
        let sigma = second_derivatives(&xs, &ys);
        Ok(Self { xs, ys, sigma })
    }

    /// Evaluate at `x`. Points outside the knot range use the boundary
    /// segment's cubic.
    pub fn evaluate(&self, x: f64) -> f64 {
        let lo = segment_index(&self.xs, x);
        let hi = lo + 1;

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.sigma[lo] + (b * b * b - b) * self.sigma[hi]) * h * h / 6.0
    }

    pub fn min_x(&self) -> f64 {
        self.xs[0]
    }

    pub fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

/// Local three-point quadratic interpolant.
///
/// Each evaluation uses the Lagrange parabola through the knot triple nearest
/// the query segment. Knot values are interpolated exactly and data lying on
/// a single quadratic is reproduced exactly. Falls back to linear for
/// exactly two knots.
#[derive(Debug, Clone)]
pub struct QuadraticInterp {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl QuadraticInterp {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, AppError> {
        validate_knots(&xs, &ys)?;
        Ok(Self { xs, ys })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if n == 2 {
            let t = (x - self.xs[0]) / (self.xs[1] - self.xs[0]);
            return self.ys[0] + t * (self.ys[1] - self.ys[0]);
        }

        let seg = segment_index(&self.xs, x);
        let c = seg.clamp(1, n - 2);
        let (x0, x1, x2) = (self.xs[c - 1], self.xs[c], self.xs[c + 1]);
        let (y0, y1, y2) = (self.ys[c - 1], self.ys[c], self.ys[c + 1]);

        let l0 = (x - x1) * (x - x2) / ((x0 - x1) * (x0 - x2));
        let l1 = (x - x0) * (x - x2) / ((x1 - x0) * (x1 - x2));
        let l2 = (x - x0) * (x - x1) / ((x2 - x0) * (x2 - x1));
        y0 * l0 + y1 * l1 + y2 * l2
    }
}

fn validate_knots(xs: &[f64], ys: &[f64]) -> Result<(), AppError> {
    assert_eq!(xs.len(), ys.len(), "knots and values must have equal length");
    if xs.len() < 2 {
        return Err(AppError::InsufficientData(format!(
            "interpolation needs at least 2 samples, got {}",
            xs.len()
        )));
    }
    for (x, y) in xs.iter().zip(ys) {
        if !(x.is_finite() && y.is_finite()) {
            return Err(AppError::NumericDegenerate(
                "non-finite sample in interpolation input".into(),
            ));
        }
    }
    for (i, w) in xs.windows(2).enumerate() {
        if w[1] <= w[0] {
            return Err(AppError::NumericDegenerate(format!(
                "interpolation abscissae not strictly increasing at index {i} ({} >= {})",
                w[0], w[1]
            )));
        }
    }
    Ok(())
}

/// Index of the segment containing `x`, clamped to `[0, n-2]`.
fn segment_index(xs: &[f64], x: f64) -> usize {
    let n = xs.len();
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] > x {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}

/// Solve for the not-a-knot second derivatives.
fn second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    if n == 2 {
        return vec![0.0; 2];
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let d: Vec<f64> = ys
        .windows(2)
        .zip(&h)
        .map(|(w, hi)| (w[1] - w[0]) / hi)
        .collect();

    if n == 3 {
        // A single parabola through the three points: the second derivative
        // is constant, twice the second divided difference.
        let s = 2.0 * (d[1] - d[0]) / (xs[2] - xs[0]);
        return vec![s; 3];
    }

    // Continuity equations for the interior knots i = 1..n-2:
    //   h[i-1]·σ[i-1] + 2(h[i-1]+h[i])·σ[i] + h[i]·σ[i+1] = 6(d[i] - d[i-1])
    // with the boundary σ₀, σ_{n-1} eliminated via third-derivative
    // continuity at the first and last interior knots (not-a-knot):
    //   σ₀     = (1+r₀)σ₁ − r₀σ₂,          r₀ = h₀/h₁
    //   σ_{n-1} = (1+r₁)σ_{n-2} − r₁σ_{n-3}, r₁ = h_{n-2}/h_{n-3}
    let m = n - 2;
    let mut sub = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];
    let mut rhs = vec![0.0; m];

    for i in 1..=m {
        sub[i - 1] = h[i - 1];
        diag[i - 1] = 2.0 * (h[i - 1] + h[i]);
        sup[i - 1] = h[i];
        rhs[i - 1] = 6.0 * (d[i] - d[i - 1]);
    }

    let r0 = h[0] / h[1];
    diag[0] += h[0] * (1.0 + r0);
    sup[0] -= h[0] * r0;

    let r1 = h[n - 2] / h[n - 3];
    diag[m - 1] += h[n - 2] * (1.0 + r1);
    sub[m - 1] -= h[n - 2] * r1;

    let interior = solve_tridiagonal(&sub, &mut diag, &sup, &mut rhs);

    let mut sigma = vec![0.0; n];
    sigma[1..=m].copy_from_slice(&interior);
    sigma[0] = (1.0 + r0) * sigma[1] - r0 * sigma[2];
    sigma[n - 1] = (1.0 + r1) * sigma[n - 2] - r1 * sigma[n - 3];
    sigma
}

/// Thomas algorithm. `sub[0]` and `sup[m-1]` are ignored.
fn solve_tridiagonal(sub: &[f64], diag: &mut [f64], sup: &[f64], rhs: &mut [f64]) -> Vec<f64> {
    let m = diag.len();
    for i in 1..m {
        let w = sub[i] / diag[i - 1];
        diag[i] -= w * sup[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }
    let mut x = vec![0.0; m];
    x[m - 1] = rhs[m - 1] / diag[m - 1];
    for i in (0..m - 1).rev() {
        x[i] = (rhs[i] - sup[i] * x[i + 1]) / diag[i];
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::linspace;

    #[test]
    fn spline_passes_through_knots() {
        let xs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = vec![2.0, 3.0, 5.0, 4.0, 1.0];
        let s = CubicSpline::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(&ys) {
            assert!((s.evaluate(*x) - y).abs() < 1e-12);
        }
    }

    #[test]
    fn spline_reproduces_cubic_polynomial() {
        let p = |x: f64| 0.5 * x * x * x - 2.0 * x * x + x - 3.0;
        let xs = linspace(-2.0, 4.0, 9);
        let ys: Vec<f64> = xs.iter().map(|&x| p(x)).collect();
        let s = CubicSpline::new(xs, ys).unwrap();
        for &x in &linspace(-2.0, 4.0, 200) {
            assert!((s.evaluate(x) - p(x)).abs() < 1e-9, "mismatch at {x}");
        }
        // Not-a-knot extrapolation continues the same cubic.
        assert!((s.evaluate(4.5) - p(4.5)).abs() < 1e-8);
        assert!((s.evaluate(-2.5) - p(-2.5)).abs() < 1e-8);
    }

    #[test]
    fn spline_three_point_parabola() {
        let xs = vec![0.0, 1.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|&x| x * x + 1.0).collect();
        let s = CubicSpline::new(xs, ys).unwrap();
        assert!((s.evaluate(2.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn spline_two_points_is_linear() {
        let s = CubicSpline::new(vec![0.0, 2.0], vec![1.0, 5.0]).unwrap();
        assert!((s.evaluate(1.0) - 3.0).abs() < 1e-12);
        assert!((s.evaluate(3.0) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn spline_rejects_duplicate_knots() {
        let err = CubicSpline::new(vec![0.0, 1.0, 1.0, 2.0], vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, AppError::NumericDegenerate(_)));
    }

    #[test]
    fn spline_rejects_single_sample() {
        let err = CubicSpline::new(vec![0.0], vec![0.0]).unwrap_err();
        assert!(matches!(err, AppError::InsufficientData(_)));
    }

    #[test]
    fn quadratic_reproduces_parabola() {
        let p = |x: f64| 3.0 * x * x - x + 2.0;
        let xs = linspace(-1.0, 5.0, 13);
        let ys: Vec<f64> = xs.iter().map(|&x| p(x)).collect();
        let q = QuadraticInterp::new(xs, ys).unwrap();
        for &x in &linspace(-1.0, 5.0, 100) {
            assert!((q.evaluate(x) - p(x)).abs() < 1e-9);
        }
    }

    #[test]
    fn quadratic_interpolates_knots() {
        let xs = vec![0.0, 1.0, 2.5, 4.0, 4.5];
        let ys = vec![1.0, -1.0, 0.5, 2.0, -3.0];
        let q = QuadraticInterp::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(&ys) {
            assert!((q.evaluate(*x) - y).abs() < 1e-12);
        }
    }
}
