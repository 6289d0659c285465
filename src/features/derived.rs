//! Pointwise derived quantities and the smoothed differential permeability.

use crate::domain::{Branch, Curve, DerivedBranch, MU_0, PermeabilityCurve, SmoothingConfig};
use crate::error::AppError;
use crate::math::{gradient, savgol_smooth};

/// Magnetization M = B/μ₀ − H and polarization J = B − μ₀·H along one branch.
pub fn derive_branch(branch: Branch, curve: &Curve) -> DerivedBranch {
    let magnetization = curve
        .h
        .iter()
        .zip(&curve.b)
        .map(|(&h, &b)| b / MU_0 - h)
        .collect();
    let polarization = curve
        .h
        .iter()
        .zip(&curve.b)
        .map(|(&h, &b)| b - MU_0 * h)
        .collect();
    DerivedBranch {
        branch,
        h: curve.h.clone(),
        magnetization,
        polarization,
    }
}

/// Relative differential permeability μᵣ = (dB/dH)/μ₀ along one branch.
///
/// Raw derivatives of measured data are dominated by noise, so the branch is
/// first subsampled by `stride` and both sequences are Savitzky–Golay
/// smoothed before the central-difference gradient is taken. The reported
/// abscissae are the subsampled (unsmoothed) samples.
pub fn permeability(
    branch: Branch,
    curve: &Curve,
    config: &SmoothingConfig,
) -> Result<PermeabilityCurve, AppError> {
    config.validate()?;

    let h: Vec<f64> = curve.h.iter().step_by(config.stride).copied().collect();
    let b: Vec<f64> = curve.b.iter().step_by(config.stride).copied().collect();
    if h.len() < config.window {
        return Err(AppError::InsufficientData(format!(
            "{} samples after stride-{} subsampling, smoothing window needs {}",
            h.len(),
            config.stride,
            config.window
        )));
    }

    let h_smooth = savgol_smooth(&h, config.window, config.degree)?;
    let b_smooth = savgol_smooth(&b, config.window, config.degree)?;
    let db_dh = gradient(&b_smooth, &h_smooth)?;
    let mu_r = db_dh.into_iter().map(|d| d / MU_0).collect();

    Ok(PermeabilityCurve { branch, h, b, mu_r })
}
