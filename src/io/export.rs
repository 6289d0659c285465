//! Result exports: conditioned curves as CSV, features as JSON.
//!
//! The CSVs are meant for spreadsheets and plotting scripts, so every stage
//! keeps its own columns (original vs. filtered vs. refiltered) instead of
//! overwriting in place.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::domain::{AnalysisOutput, FilteredSet, ResampledSet};
use crate::error::AppError;

/// Write the filter stage's per-branch columns.
///
/// Layout per branch: `H_original`, `B_original`, `H_filtered`, `B_filtered`
/// and, when the second pass ran, `H_refiltered` — each suffixed with the
/// branch name.
pub fn write_conditioned_csv(path: &Path, set: &FilteredSet) -> Result<(), AppError> {
    let mut columns: Vec<(String, &[f64])> = Vec::new();
    for branch in &set.branches {
        let name = branch.branch.short_name();
        columns.push((format!("H_original_{name}"), &branch.h_original));
        columns.push((format!("B_original_{name}"), &branch.b_original));
        columns.push((format!("H_filtered_{name}"), &branch.h_filtered));
        columns.push((format!("B_filtered_{name}"), &branch.b_filtered));
        if let Some(refiltered) = &branch.h_refiltered {
            columns.push((format!("H_refiltered_{name}"), refiltered));
        }
    }
    write_columns(path, &columns)
}

/// Write the resampling stage's final curves, one (H, B) pair per branch.
pub fn write_resampled_csv(path: &Path, set: &ResampledSet) -> Result<(), AppError> {
    let mut columns: Vec<(String, &[f64])> = Vec::new();
    for branch in &set.branches {
        let name = branch.branch.short_name();
        columns.push((format!("H_fine_{name}"), &branch.fine.h));
        columns.push((format!("B_fine_{name}"), &branch.fine.b));
    }
    write_columns(path, &columns)
}

/// Write a curve set in the measurement import layout (six positional
/// columns), so generated loops can be fed straight back into `analyze`.
pub fn write_sample_csv(path: &Path, set: &crate::domain::CurveSet) -> Result<(), AppError> {
    let mut columns: Vec<(String, &[f64])> = Vec::new();
    for (branch, curve) in set.branches() {
        let name = branch.short_name();
        columns.push((format!("H_{name}"), &curve.h));
        columns.push((format!("B_{name}"), &curve.b));
    }
    write_columns(path, &columns)
}

/// Feature records only; curve data stays in the CSV exports.
#[derive(Serialize)]
struct FeatureDoc<'a> {
    kind: &'a crate::domain::CurveKind,
    derived: &'a [crate::domain::DerivedBranch],
    permeability: &'a crate::domain::PermeabilityCurve,
    points: &'a crate::domain::CharacteristicPoints,
    loss: &'a crate::domain::LossReport,
    reshaped: &'a [crate::domain::ReshapeResult],
}

/// Write the extracted features as pretty-printed JSON.
pub fn write_features_json(path: &Path, output: &AnalysisOutput) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::Io(format!("failed to create features JSON '{}': {e}", path.display()))
    })?;
    let doc = FeatureDoc {
        kind: &output.kind,
        derived: &output.derived,
        permeability: &output.permeability,
        points: &output.points,
        loss: &output.loss,
        reshaped: &output.reshaped,
    };
    serde_json::to_writer_pretty(BufWriter::new(file), &doc)
        .map_err(|e| AppError::Io(format!("failed to write features JSON: {e}")))?;
    Ok(())
}

/// Write named columns of possibly different lengths; short columns pad with
/// empty cells.
fn write_columns(path: &Path, columns: &[(String, &[f64])]) -> Result<(), AppError> {
    let mut file = BufWriter::new(File::create(path).map_err(|e| {
        AppError::Io(format!("failed to create export CSV '{}': {e}", path.display()))
    })?);

    let header: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
    writeln!(file, "{}", header.join(","))
        .map_err(|e| AppError::Io(format!("failed to write export CSV header: {e}")))?;

    let rows = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    for row in 0..rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|(_, values)| {
                values
                    .get(row)
                    .map(|v| format!("{v:.10}"))
                    .unwrap_or_default()
            })
            .collect();
        writeln!(file, "{}", cells.join(","))
            .map_err(|e| AppError::Io(format!("failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_pad_to_the_longest() {
        let mut path = std::env::temp_dir();
        path.push(format!("bh-export-{}.csv", std::process::id()));

        let long = vec![1.0, 2.0, 3.0];
        let short = vec![10.0];
        write_columns(
            &path,
            &[("a".to_string(), long.as_slice()), ("b".to_string(), short.as_slice())],
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "a,b");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1.0000000000,10.0000000000"));
        assert_eq!(lines[2], "2.0000000000,");
        assert_eq!(lines[3], "3.0000000000,");
    }
}
