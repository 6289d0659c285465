//! Deterministic root finding: uniform grid scan for sign brackets, then
//! bisection inside each bracket.
//!
//! Why not a fancier solver?
//! - the scanned functions are cheap piecewise-linear interpolants
//! - a fixed grid keeps worst-case cost bounded and results reproducible
//! - any bracketing method converges to the same bracket-local root, which
//!   is all downstream consumers rely on

use crate::math::linspace;

/// Relative bisection tolerance (scaled by the bracket magnitude).
const BISECT_RTOL: f64 = 1e-12;
/// Hard iteration cap; 64 halvings exhaust f64 resolution anyway.
const BISECT_MAX_ITER: usize = 200;

/// Refine a root inside `[a, b]` where `f(a)` and `f(b)` have opposite signs.
pub fn bisect(f: impl Fn(f64) -> f64, mut a: f64, mut b: f64) -> f64 {
    let mut fa = f(a);
    for _ in 0..BISECT_MAX_ITER {
        let mid = 0.5 * (a + b);
        let fm = f(mid);
        if fm == 0.0 {
            return mid;
        }
        if fa * fm < 0.0 {
            b = mid;
        } else {
            a = mid;
            fa = fm;
        }
        let tol = BISECT_RTOL * a.abs().max(b.abs()).max(1.0);
        if (b - a).abs() <= tol {
            break;
        }
    }
    0.5 * (a + b)
}

/// All roots of `f` over `[lo, hi]` found by scanning `resolution` evenly
/// spaced points for strict sign changes and bisecting each bracket.
///
/// A grid node landing exactly on a root produces no bracket (the adjacent
/// products are zero, not negative), matching the strict `f(a)·f(b) < 0`
/// test of the reference behavior.
pub fn scan_roots(f: impl Fn(f64) -> f64, lo: f64, hi: f64, resolution: usize) -> Vec<f64> {
    let grid = linspace(lo, hi, resolution);
    let mut roots = Vec::new();
    for w in grid.windows(2) {
        if f(w[0]) * f(w[1]) < 0.0 {
            roots.push(bisect(&f, w[0], w[1]));
        }
    }
    roots
}

/// First root of `f` over `[lo, hi]`, if any bracket exists.
pub fn first_root(f: impl Fn(f64) -> f64, lo: f64, hi: f64, resolution: usize) -> Option<f64> {
    let grid = linspace(lo, hi, resolution);
    for w in grid.windows(2) {
        if f(w[0]) * f(w[1]) < 0.0 {
            return Some(bisect(&f, w[0], w[1]));
        }
    }
    None
}
