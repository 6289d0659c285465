//! Savitzky–Golay polynomial smoothing.
//!
//! A fixed-width window slides over the sequence; each output sample is the
//! value at the window center of the least-squares polynomial fit inside the
//! window. For the interior this reduces to a single convolution weight
//! vector computed once from the window design matrix. The first and last
//! half-windows are handled the way scipy's `mode='interp'` does it: fit one
//! polynomial to the boundary window and evaluate it at the edge positions.
//!
//! Polynomials of degree <= `degree` pass through unchanged, boundaries
//! included.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::solve_least_squares;

/// Smooth `y` with a window of `window` samples and a degree-`degree` fit.
pub fn savgol_smooth(y: &[f64], window: usize, degree: usize) -> Result<Vec<f64>, AppError> {
    if window < 3 || window % 2 == 0 {
        return Err(AppError::invalid(
            "window",
            format!("smoothing window must be odd and >= 3, got {window}"),
        ));
    }
    if degree >= window {
        return Err(AppError::invalid(
            "degree",
            format!("polynomial degree {degree} must be smaller than window {window}"),
        ));
    }
    let n = y.len();
    if n < window {
        return Err(AppError::InsufficientData(format!(
            "smoothing window {window} exceeds sample count {n}"
        )));
    }

    let k = window / 2;
    let ncoef = degree + 1;

    // Convolution weights for the window center: with A the window design
    // matrix over offsets -k..k, the center estimate is (A·z)ᵀ y_window
    // where (AᵀA)·z = e₀.
    let a = DMatrix::from_fn(window, ncoef, |i, j| {
        (i as f64 - k as f64).powi(j as i32)
    });
    let ata = a.transpose() * &a;
    let mut e0 = DVector::zeros(ncoef);
    e0[0] = 1.0;
    let z = ata.lu().solve(&e0).ok_or_else(|| {
        AppError::NumericDegenerate("singular smoothing design matrix".into())
    })?;
    let weights = &a * z;

    let mut out = vec![0.0; n];
    for i in k..n - k {
        let mut acc = 0.0;
        for j in 0..window {
            acc += weights[j] * y[i - k + j];
        }
        out[i] = acc;
    }

    // Boundary windows: one polynomial per end, evaluated at the edge
    // positions it overlaps.
    let head = fit_polynomial(&y[..window], ncoef)?;
    for (i, slot) in out.iter_mut().take(k).enumerate() {
        *slot = eval_polynomial(&head, i as f64);
    }
    let tail = fit_polynomial(&y[n - window..], ncoef)?;
    for i in 0..k {
        let pos = (window - k + i) as f64;
        out[n - k + i] = eval_polynomial(&tail, pos);
    }

    Ok(out)
}

/// Least-squares polynomial coefficients over positions `0..len`.
fn fit_polynomial(y: &[f64], ncoef: usize) -> Result<DVector<f64>, AppError> {
    let design = DMatrix::from_fn(y.len(), ncoef, |i, j| (i as f64).powi(j as i32));
    let rhs = DVector::from_row_slice(y);
    solve_least_squares(&design, &rhs).ok_or_else(|| {
        AppError::NumericDegenerate("ill-conditioned boundary fit in smoothing".into())
    })
}

fn eval_polynomial(coef: &DVector<f64>, x: f64) -> f64 {
    let mut acc = 0.0;
    for j in (0..coef.len()).rev() {
        acc = acc * x + coef[j];
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::linspace;

    #[test]
    fn cubic_data_passes_through_unchanged() {
        let x = linspace(-1.0, 1.0, 41);
        let y: Vec<f64> = x.iter().map(|&v| v * v * v - 0.5 * v).collect();
        let s = savgol_smooth(&y, 11, 3).unwrap();
        for (a, b) in y.iter().zip(&s) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn smooths_toward_the_underlying_signal() {
        // Deterministic ripple on a line; the smoothed curve should sit
        // closer to the line than the noisy input does.
        let x = linspace(0.0, 10.0, 101);
        let noisy: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, &v)| 2.0 * v + if i % 2 == 0 { 0.3 } else { -0.3 })
            .collect();
        let s = savgol_smooth(&noisy, 11, 3).unwrap();
        let err_noisy: f64 = x
            .iter()
            .zip(&noisy)
            .skip(5)
            .take(90)
            .map(|(&v, y)| (y - 2.0 * v).abs())
            .sum();
        let err_smooth: f64 = x
            .iter()
            .zip(&s)
            .skip(5)
            .take(90)
            .map(|(&v, y)| (y - 2.0 * v).abs())
            .sum();
        assert!(err_smooth < err_noisy * 0.5);
    }

    #[test]
    fn window_longer_than_data_is_insufficient() {
        let err = savgol_smooth(&[1.0; 5], 11, 3).unwrap_err();
        assert!(matches!(err, AppError::InsufficientData(_)));
    }

    #[test]
    fn even_window_is_invalid() {
        let err = savgol_smooth(&[1.0; 20], 10, 3).unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter { .. }));
    }
}
