//! Trapezoidal quadrature (np.trapz semantics).

/// Integrate `y` over `x` with the composite trapezoidal rule.
///
/// The sign follows the direction of `x`: integrating right-to-left negates
/// the result, exactly like `np.trapz`.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    assert_eq!(y.len(), x.len(), "y and x must have equal length");
    let mut acc = 0.0;
    for i in 1..x.len() {
        acc += 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::linspace;

    #[test]
    fn integrates_a_constant() {
        let x = linspace(0.0, 10.0, 11);
        let y = vec![2.0; 11];
        assert!((trapezoid(&y, &x) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn integrates_a_line_exactly() {
        let x = linspace(1.0, 3.0, 21);
        let y: Vec<f64> = x.iter().map(|&v| 2.0 * v).collect();
        // ∫ 2x dx over [1,3] = 8
        assert!((trapezoid(&y, &x) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_direction_negates() {
        let x = vec![3.0, 2.0, 1.0];
        let y = vec![6.0, 4.0, 2.0];
        assert!((trapezoid(&y, &x) + 8.0).abs() < 1e-12);
    }
}
