//! CSV ingest: tabular measurement files into a `CurveSet`.
//!
//! The measurement export format is positional: the first six columns are
//! (H, B) pairs for the initial, upper and lower branch in that fixed order.
//! Header names vary between instruments, so the first row is skipped as a
//! header and cells are taken by position. A cell that is missing or fails to
//! parse becomes NaN; the gap-filling stage deals with those, which matches
//! how holes in the measurement are handled everywhere else.

use std::fs::File;
use std::path::Path;

use crate::domain::{Curve, CurveKind, CurveSet};
use crate::error::AppError;

/// Ingest output: the parsed set plus row/cell accounting for the report.
#[derive(Debug, Clone)]
pub struct IngestedSet {
    pub set: CurveSet,
    pub rows_read: usize,
    /// Cells that were missing or unparsable and defaulted to NaN.
    pub cells_defaulted: usize,
}

/// Load a six-column measurement CSV.
pub fn load_curve_set(path: &Path, kind: CurveKind) -> Result<IngestedSet, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::Io(format!("failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    // 3 branches × (H, B).
    let mut columns: [Vec<f64>; 6] = Default::default();
    let mut rows_read = 0usize;
    let mut cells_defaulted = 0usize;

    for result in reader.records() {
        let record =
            result.map_err(|e| AppError::Io(format!("CSV parse error in '{}': {e}", path.display())))?;
        rows_read += 1;

        for (col, values) in columns.iter_mut().enumerate() {
            let value = record
                .get(col)
                .and_then(|cell| parse_decimal(cell))
                .unwrap_or_else(|| {
                    cells_defaulted += 1;
                    f64::NAN
                });
            values.push(value);
        }
    }

    if rows_read == 0 {
        return Err(AppError::InsufficientData(format!(
            "'{}' contains no data rows",
            path.display()
        )));
    }

    let [h_init, b_init, h_up, b_up, h_low, b_low] = columns;
    Ok(IngestedSet {
        set: CurveSet {
            kind,
            initial: Curve::new(h_init, b_init),
            upper: Curve::new(h_up, b_up),
            lower: Curve::new(h_low, b_low),
        },
        rows_read,
        cells_defaulted,
    })
}

/// Parse a numeric cell, accepting a decimal comma.
///
/// The measurement software writes German-locale numbers; both `1.5` and
/// `1,5` must load.
fn parse_decimal(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>()
        .or_else(|_| cell.replace(',', ".").parse::<f64>())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(tag: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("bh-ingest-{}-{tag}.csv", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn positional_columns_map_to_branches() {
        let path = write_temp(
            "cols",
            "H_n,B_n,H_u,B_u,H_l,B_l\n\
             0.0,0.1,1.0,1.1,2.0,2.1\n\
             0.5,0.6,1.5,1.6,2.5,2.6\n",
        );
        let out = load_curve_set(&path, CurveKind::Bh).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(out.rows_read, 2);
        assert_eq!(out.cells_defaulted, 0);
        assert_eq!(out.set.initial.h, vec![0.0, 0.5]);
        assert_eq!(out.set.upper.b, vec![1.1, 1.6]);
        assert_eq!(out.set.lower.h, vec![2.0, 2.5]);
    }

    #[test]
    fn bad_and_missing_cells_become_nan() {
        let path = write_temp(
            "nan",
            "a,b,c,d,e,f\n\
             1.0,x,3.0,,5.0\n",
        );
        let out = load_curve_set(&path, CurveKind::Bh).unwrap();
        std::fs::remove_file(&path).ok();

        // "x", the empty cell and the absent sixth column all default.
        assert_eq!(out.cells_defaulted, 3);
        assert!(out.set.initial.b[0].is_nan());
        assert!(out.set.upper.b[0].is_nan());
        assert!(out.set.lower.b[0].is_nan());
        assert_eq!(out.set.upper.h[0], 3.0);
    }

    #[test]
    fn decimal_commas_parse() {
        assert_eq!(parse_decimal("1,5"), Some(1.5));
        assert_eq!(parse_decimal("-0,25"), Some(-0.25));
        assert_eq!(parse_decimal("2.75"), Some(2.75));
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn empty_file_is_insufficient() {
        let path = write_temp("empty", "h,b,h,b,h,b\n");
        let err = load_curve_set(&path, CurveKind::Bh).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AppError::InsufficientData(_)));
    }
}
