//! Zero-phase IIR filtering (forward–backward application).
//!
//! A causal IIR filter delays every component it passes; running it forward
//! and then backward over the sequence cancels the phase shift, so peaks in
//! the output stay axis-aligned with peaks in the input. Boundary stability
//! comes from two measures:
//!
//! - the sequence is extended at both ends with an odd reflection before
//!   filtering, and the extensions are sliced off afterwards
//! - each pass starts from the filter's steady-state internal state scaled by
//!   its first input sample, so a constant signal passes through exactly
//!
//! This is the standard filtfilt construction.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::filter::butterworth::FilterCoeffs;

/// Single-pass IIR filter, direct form II transposed, starting from state
/// `zi`. Returns the output sequence.
pub fn lfilter(coeffs: &FilterCoeffs, x: &[f64], zi: &[f64]) -> Vec<f64> {
    let b = &coeffs.b;
    let a = &coeffs.a;
    let order = a.len() - 1;
    debug_assert_eq!(zi.len(), order);

    let mut z = zi.to_vec();
    let mut y = Vec::with_capacity(x.len());
    for &xm in x {
        let ym = b[0] * xm + z[0];
        for i in 0..order - 1 {
            z[i] = b[i + 1] * xm + z[i + 1] - a[i + 1] * ym;
        }
        z[order - 1] = b[order] * xm - a[order] * ym;
        y.push(ym);
    }
    y
}

/// Steady-state internal state for a unit step input.
///
/// Solving `(I - Aᵀ)·zi = B` with `A` the companion matrix of the
/// denominator gives the state vector that makes `lfilter` start in steady
/// state; scaling it by the first input sample removes startup transients.
pub fn lfilter_zi(coeffs: &FilterCoeffs) -> Result<Vec<f64>, AppError> {
    let b = &coeffs.b;
    let a = &coeffs.a;
    let order = a.len() - 1;

    let mut m = DMatrix::<f64>::identity(order, order);
    for j in 0..order {
        m[(j, 0)] += a[j + 1];
    }
    for i in 1..order {
        m[(i - 1, i)] -= 1.0;
    }

    let rhs = DVector::from_fn(order, |j, _| b[j + 1] - a[j + 1] * b[0]);
    let zi = m.lu().solve(&rhs).ok_or_else(|| {
        AppError::NumericDegenerate("singular steady-state system for filter".into())
    })?;
    Ok(zi.iter().copied().collect())
}

/// Forward–backward (zero-phase) filtering with odd-reflection padding.
///
/// The padding length is `3 * (len(a) - 1)` taps per side; sequences not
/// longer than that cannot be stabilized and are `InsufficientData`.
pub fn filtfilt(coeffs: &FilterCoeffs, x: &[f64]) -> Result<Vec<f64>, AppError> {
    let ntaps = coeffs.a.len().max(coeffs.b.len());
    let padlen = 3 * (ntaps - 1);
    let n = x.len();
    if n <= padlen {
        return Err(AppError::InsufficientData(format!(
            "zero-phase filtering needs more than {padlen} samples, got {n}"
        )));
    }

    // Odd extension about both endpoints.
    let mut ext = Vec::with_capacity(n + 2 * padlen);
    for i in (1..=padlen).rev() {
        ext.push(2.0 * x[0] - x[i]);
    }
    ext.extend_from_slice(x);
    for i in 1..=padlen {
        ext.push(2.0 * x[n - 1] - x[n - 1 - i]);
    }

    let zi = lfilter_zi(coeffs)?;

    let scaled: Vec<f64> = zi.iter().map(|z| z * ext[0]).collect();
    let forward = lfilter(coeffs, &ext, &scaled);

    let mut reversed: Vec<f64> = forward.into_iter().rev().collect();
    let scaled: Vec<f64> = zi.iter().map(|z| z * reversed[0]).collect();
    let backward = lfilter(coeffs, &reversed, &scaled);

    reversed = backward.into_iter().rev().collect();
    Ok(reversed[padlen..padlen + n].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::butterworth::butter_lowpass;
    use crate::math::linspace;

    #[test]
    fn constant_signal_passes_through_exactly() {
        let coeffs = butter_lowpass(3, 0.05).unwrap();
        let x = vec![1.75; 200];
        let y = filtfilt(&coeffs, &x).unwrap();
        assert_eq!(y.len(), x.len());
        for v in y {
            assert!((v - 1.75).abs() < 1e-9);
        }
    }

    #[test]
    fn peak_location_is_preserved() {
        // A slow raised cosine: low-pass filtering must not move its peak.
        let n = 400;
        let x: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                (std::f64::consts::PI * t).sin()
            })
            .collect();
        let coeffs = butter_lowpass(3, 0.05).unwrap();
        let y = filtfilt(&coeffs, &x).unwrap();

        let argmax = |v: &[f64]| {
            v.iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap()
        };
        let shift = argmax(&x) as i64 - argmax(&y) as i64;
        assert!(shift.abs() <= 1, "peak moved by {shift} samples");
    }

    #[test]
    fn near_unity_cutoff_approximates_identity() {
        let x: Vec<f64> = linspace(0.0, 4.0 * std::f64::consts::PI, 500)
            .into_iter()
            .map(|t| t.sin())
            .collect();
        let coeffs = butter_lowpass(3, 0.99).unwrap();
        let y = filtfilt(&coeffs, &x).unwrap();
        let max_err = x
            .iter()
            .zip(&y)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max);
        assert!(max_err < 0.05, "no-op filter changed the signal by {max_err}");
    }

    #[test]
    fn short_sequences_are_insufficient() {
        let coeffs = butter_lowpass(4, 0.01).unwrap();
        let err = filtfilt(&coeffs, &[1.0; 12]).unwrap_err();
        assert!(matches!(err, AppError::InsufficientData(_)));
    }

    #[test]
    fn steady_state_holds_a_constant() {
        let coeffs = butter_lowpass(2, 0.1).unwrap();
        let zi = lfilter_zi(&coeffs).unwrap();
        let scaled: Vec<f64> = zi.iter().map(|z| z * 3.0).collect();
        let y = lfilter(&coeffs, &[3.0; 50], &scaled);
        for v in y {
            assert!((v - 3.0).abs() < 1e-10);
        }
    }
}

