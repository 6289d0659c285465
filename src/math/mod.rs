//! Numeric building blocks: interpolants, smoothing, differentiation,
//! root finding, and quadrature.

pub mod gradient;
pub mod grid;
pub mod linear;
pub mod ols;
pub mod quadrature;
pub mod rootfind;
pub mod savgol;
pub mod spline;

pub use gradient::*;
pub use grid::*;
pub use linear::*;
pub use ols::*;
pub use quadrature::*;
pub use rootfind::*;
pub use savgol::*;
pub use spline::*;
