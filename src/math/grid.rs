//! Evenly spaced evaluation grids.

/// Generate `n` evenly spaced points between `start` and `end` (inclusive).
///
/// `n == 1` yields `[start]`, matching `np.linspace`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n as f64 - 1.0);
    let mut out = Vec::with_capacity(n);
    for i in 0..n - 1 {
        out.push(start + step * i as f64);
    }
    // Pin the endpoint so accumulated rounding never overshoots the range.
    out.push(end);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(-3.0, 7.0, 11);
        assert_eq!(v.len(), 11);
        assert_eq!(v[0], -3.0);
        assert_eq!(v[10], 7.0);
        assert!((v[1] - -2.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_is_evenly_spaced_and_increasing() {
        let v = linspace(0.0, 1.0, 101);
        let step = v[1] - v[0];
        for w in v.windows(2) {
            assert!(w[1] > w[0]);
            assert!((w[1] - w[0] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.5, 9.0, 1), vec![2.5]);
    }
}
