//! Formatted terminal output for an analysis run.
//!
//! We keep formatting code in one place so:
//! - the pipeline stages stay clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{AnalysisConfig, AnalysisOutput, FilterQuality};
use crate::io::ingest::IngestedSet;

/// Format the full run summary (input stats + stage diagnostics + features).
pub fn format_run_summary(
    ingest: &IngestedSet,
    output: &AnalysisOutput,
    config: &AnalysisConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== bh - hysteresis curve conditioning ===\n");
    out.push_str(&format!("Input: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Kind: {} | rows={} | defaulted cells={}\n",
        output.kind.display_name(),
        ingest.rows_read,
        ingest.cells_defaulted
    ));
    out.push_str(&format!(
        "Filter: order={} cutoff={:.3}{}\n",
        config.first_filter.order,
        config.first_filter.cutoff,
        if config.second_pass {
            format!(
                " | second pass (H only): order={} cutoff={:.3}",
                config.second_filter.order, config.second_filter.cutoff
            )
        } else {
            String::new()
        }
    ));

    out.push_str("\nFilter quality:\n");
    for branch in &output.filtered.branches {
        out.push_str(&format!(
            "  {:<14} H: {}\n  {:<14} B: {}\n",
            branch.branch.display_name(),
            fmt_quality(&branch.quality_h),
            "",
            fmt_quality(&branch.quality_b)
        ));
    }

    out.push_str("\nResampling:\n");
    for branch in &output.resampled.branches {
        out.push_str(&format!(
            "  {:<14} {} -> {} points, H=[{:.2}, {:.2}]{}\n",
            branch.branch.display_name(),
            branch.coarse.len(),
            branch.fine.len(),
            branch.fine.h.first().copied().unwrap_or(f64::NAN),
            branch.fine.h.last().copied().unwrap_or(f64::NAN),
            if branch.extrapolated {
                " (extrapolated)"
            } else {
                ""
            }
        ));
    }

    out.push_str("\nCharacteristic points:\n");
    out.push_str(&format!(
        "- remanence Br (upper):  {}\n",
        fmt_point(output.points.upper_remanence, "T")
    ));
    out.push_str(&format!(
        "- remanence Br (lower):  {}\n",
        fmt_point(output.points.lower_remanence, "T")
    ));
    out.push_str(&format!(
        "- coercivity -Hc:        {}\n",
        fmt_point(output.points.negative_coercivity, "A/m")
    ));
    out.push_str(&format!(
        "- coercivity +Hc:        {}\n",
        fmt_point(output.points.positive_coercivity, "A/m")
    ));

    let peak_mu = output
        .permeability
        .mu_r
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    out.push_str(&format!(
        "\nPermeability (initial curve, {} samples): peak mu_r = {:.1}\n",
        output.permeability.mu_r.len(),
        peak_mu
    ));

    out.push_str("\nLoss:\n");
    match output.loss.intersections.as_slice() {
        [] => out.push_str("- branch intersections: none\n"),
        found => out.push_str(&format!(
            "- branch intersections: {} (first at H={:.4})\n",
            found.len(),
            found[0]
        )),
    }
    out.push_str(&format!(
        "- zero crossings: upper {} | lower {}\n",
        fmt_point(output.loss.upper_zero_crossing, "A/m"),
        fmt_point(output.loss.lower_zero_crossing, "A/m")
    ));
    out.push_str(&format!("- integration bound: H={:.4}\n", output.loss.upper_bound));
    out.push_str(&format!(
        "- areas: upper {} | lower {}\n",
        fmt_point(output.loss.area_upper, "Ws/m³"),
        fmt_point(output.loss.area_lower, "Ws/m³")
    ));
    out.push_str(&format!(
        "- total loss area: {}\n",
        fmt_point(output.loss.total_area, "Ws/m³")
    ));
    if let Some(scaling) = &output.loss.scaling {
        out.push_str(&format!(
            "- loss factor: {:.4} W/kg at {:.1} Hz ({:.4} W/kg at 50 Hz)\n",
            scaling.loss_factor, scaling.frequency, scaling.loss_factor_50hz
        ));
    }

    if !output.reshaped.is_empty() {
        out.push_str("\nReshape residuals:\n");
        for r in &output.reshaped {
            out.push_str(&format!(
                "  {:<14} {:<10} n={} max|dB|={:.3e} T\n",
                r.branch.display_name(),
                r.method.display_name(),
                r.curve.len(),
                r.max_residual
            ));
        }
    }

    out.push('\n');
    out
}

fn fmt_quality(q: &FilterQuality) -> String {
    format!(
        "MAE={:.3e} RMSE={:.3e} ({:.2}%) SNR={:.1}dB",
        q.mae, q.rmse, q.rmse_percent, q.snr_db
    )
}

fn fmt_point(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.4} {unit}"),
        None => "not found".to_string(),
    }
}
