//! # Special Functions Module
//!
//! Numerically careful building blocks shared by the model kernels:
//!
//! - [`bessel`] - `J1`, the normalised ratios `2 J1(x)/x` and `3 j1(x)/x`, and `sin(x)/x`
//! - [`quadrature`] - Gauss-Legendre rules, including the shared 76-point rule
//!   used for orientation averaging

pub mod bessel;
pub mod quadrature;

pub use bessel::{bessel_j1, j1c, sinc, sph_j1c};
pub use quadrature::{GAUSS76, GaussRule, gauss_legendre};
