//! The conditioning + extraction workflow shared by all front-ends.
//!
//! Keeping this in one place avoids duplicating the core order of operations:
//! gap filling -> dual-stage filtering -> dedupe/resampling -> derived
//! quantities -> characteristic points -> loss area -> optional reshape.
//!
//! Every stage takes explicit inputs and configuration; nothing here reads
//! global state or the filesystem.

use crate::domain::{
    AnalysisConfig, AnalysisOutput, Branch, Curve, CurveKind, CurveSet, ReshapeMethod,
    ResampledSet,
};
use crate::error::AppError;

/// Execute the full pipeline on an already-parsed curve set.
pub fn run_analysis(set: &CurveSet, config: &AnalysisConfig) -> Result<AnalysisOutput, AppError> {
    config.validate()?;
    if set.kind != CurveKind::Bh {
        return Err(AppError::invalid(
            "kind",
            format!(
                "only B(H) characteristics are supported, got {}",
                set.kind.display_name()
            ),
        ));
    }

    // 1) Close measurement gaps so the filters see finite sequences.
    let filled = crate::gapfill::fill_curve_set(set)?;

    // 2) Zero-phase low-pass, optionally followed by the H-only second pass.
    let second = config.second_pass.then_some(&config.second_filter);
    let filtered = crate::filter::filter_set(&filled, &config.first_filter, second)?;

    // 3) Dedupe + dual-pass resampling onto an even H grid, pairing the
    //    conditioned H with the filtered B.
    let mut branches = Vec::with_capacity(3);
    for branch in Branch::ALL {
        let fb = filtered.branch(branch);
        let curve = Curve::new(fb.conditioned_h().to_vec(), fb.b_filtered.clone());
        branches.push(crate::resample::resample_branch(
            branch,
            &curve,
            &config.resample,
        )?);
    }
    let resampled = ResampledSet { branches };

    let initial = &resampled.branch(Branch::Initial).fine;
    let upper = &resampled.branch(Branch::Upper).fine;
    let lower = &resampled.branch(Branch::Lower).fine;

    // 4) Derived quantities: M/J on the loop branches, permeability on the
    //    initial magnetization curve.
    let derived = vec![
        crate::features::derive_branch(Branch::Upper, upper),
        crate::features::derive_branch(Branch::Lower, lower),
    ];
    let permeability =
        crate::features::permeability(Branch::Initial, initial, &config.smoothing)?;

    // 5) Characteristic points and loss area on the loop branches.
    let points = crate::features::extract(upper, lower)?;
    let loss = crate::features::compute_loss(upper, lower, &config.loss)?;

    // 6) Optional reshape, both methods side by side for comparison.
    let mut reshaped = Vec::new();
    if let Some(n) = config.reshape_points {
        for branch in Branch::ALL {
            let curve = &resampled.branch(branch).fine;
            for method in [ReshapeMethod::Cubic, ReshapeMethod::Quadratic] {
                reshaped.push(crate::resample::reshape_branch(branch, curve, n, method)?);
            }
        }
    }

    Ok(AnalysisOutput {
        kind: set.kind,
        filtered,
        resampled,
        derived,
        permeability,
        points,
        loss,
        reshaped,
    })
}
