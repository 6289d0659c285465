//! Central-difference gradient over possibly uneven abscissae.
//!
//! Matches `np.gradient(y, x)`: second-order central differences in the
//! interior, one-sided first-order differences at the edges. Exact for
//! quadratics in the interior and for straight lines everywhere.

use crate::error::AppError;

/// dy/dx at every sample position.
pub fn gradient(y: &[f64], x: &[f64]) -> Result<Vec<f64>, AppError> {
    assert_eq!(y.len(), x.len(), "y and x must have equal length");
    let n = y.len();
    if n < 2 {
        return Err(AppError::InsufficientData(format!(
            "gradient needs at least 2 samples, got {n}"
        )));
    }

    let mut out = vec![0.0; n];

    let d0 = x[1] - x[0];
    let dn = x[n - 1] - x[n - 2];
    if d0 == 0.0 || dn == 0.0 {
        return Err(AppError::NumericDegenerate(
            "zero spacing at sequence edge in gradient".into(),
        ));
    }
    out[0] = (y[1] - y[0]) / d0;
    out[n - 1] = (y[n - 1] - y[n - 2]) / dn;

    for i in 1..n - 1 {
        let h1 = x[i] - x[i - 1];
        let h2 = x[i + 1] - x[i];
        let denom = h1 * h2 * (h1 + h2);
        if denom == 0.0 {
            return Err(AppError::NumericDegenerate(format!(
                "zero spacing around index {i} in gradient"
            )));
        }
        out[i] = (h1 * h1 * y[i + 1] + (h2 * h2 - h1 * h1) * y[i] - h2 * h2 * y[i - 1]) / denom;
    }

    Ok(out)
}
