//! Digital Butterworth low-pass design.
//!
//! Classic pole-placement design: analog Butterworth prototype poles on the
//! unit circle's left half, frequency-scaled to the prewarped cutoff, then
//! mapped into the z-plane with the bilinear transform. The cutoff is
//! normalized to the Nyquist frequency (0..1), matching the conventions the
//! measurement tooling around this pipeline uses.

use nalgebra::Complex;

use crate::error::AppError;

/// Transfer-function coefficients of a designed filter.
///
/// `a[0]` is always 1.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoeffs {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

impl FilterCoeffs {
    /// Gain at zero frequency; 1.0 for any well-formed low-pass.
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }
}

/// Design an order-`order` low-pass with `cutoff` normalized to Nyquist.
pub fn butter_lowpass(order: usize, cutoff: f64) -> Result<FilterCoeffs, AppError> {
    if order == 0 {
        return Err(AppError::invalid("order", "filter order must be >= 1"));
    }
    if !(cutoff.is_finite() && cutoff > 0.0 && cutoff < 1.0) {
        return Err(AppError::invalid(
            "cutoff",
            format!("normalized cutoff must lie in (0, 1), got {cutoff}"),
        ));
    }

    // Prewarp the digital cutoff onto the analog axis (sample rate 2 so
    // Nyquist is 1), then scale the prototype.
    let fs = 2.0;
    let warped = 2.0 * fs * (std::f64::consts::PI * cutoff / fs).tan();

    // Analog prototype poles: evenly spaced on the left half of the unit
    // circle, scaled by the warped cutoff. No finite zeros; gain warped^N.
    let n = order as i32;
    let mut poles = Vec::with_capacity(order);
    let mut m = -n + 1;
    while m < n {
        let theta = std::f64::consts::PI * m as f64 / (2.0 * n as f64);
        poles.push(-Complex::new(theta.cos(), theta.sin()) * warped);
        m += 2;
    }
    let gain = warped.powi(n);

    // Bilinear transform into the z-plane. Every analog zero at infinity
    // lands at z = -1.
    let fs2 = 2.0 * fs;
    let mut denom_prod = Complex::new(1.0, 0.0);
    let z_poles: Vec<Complex<f64>> = poles
        .iter()
        .map(|&p| {
            denom_prod *= Complex::new(fs2, 0.0) - p;
            (Complex::new(fs2, 0.0) + p) / (Complex::new(fs2, 0.0) - p)
        })
        .collect();
    let k_z = gain * (Complex::new(1.0, 0.0) / denom_prod).re;

    let z_zeros = vec![Complex::new(-1.0, 0.0); order];
    let b: Vec<f64> = poly_from_roots(&z_zeros)
        .into_iter()
        .map(|c| c.re * k_z)
        .collect();
    let a: Vec<f64> = poly_from_roots(&z_poles).into_iter().map(|c| c.re).collect();

    Ok(FilterCoeffs { b, a })
}

/// Expand `(x - r0)(x - r1)...` into descending-power coefficients.
fn poly_from_roots(roots: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let mut coeffs = vec![Complex::new(1.0, 0.0)];
    for &r in roots {
        coeffs.push(Complex::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let lower = coeffs[i - 1];
            coeffs[i] -= r * lower;
        }
    }
    coeffs
}
