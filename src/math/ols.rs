//! Least squares solver.
//!
//! Savitzky–Golay smoothing repeatedly solves small polynomial regression
//! problems: one for the central convolution coefficients and one per
//! boundary window.
//!
//! Implementation choices:
//! - We use SVD to solve the least-squares problem robustly for tall design
//!   matrices (nalgebra's `QR::solve` is intended for square systems and will
//!   panic for non-square matrices).
//! - Parameter dimension is tiny (degree + 1 columns), so SVD performance is
//!   a non-issue.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    // Vandermonde-style columns over wide smoothing windows can be nearly
    // collinear at higher degrees.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }
}
