//! # Core Module
//!
//! Stateless building blocks for small-angle scattering calculations.
//!
//! - **Parameters** ([`params`]) - Parameter tables, bounds and bound value sets
//! - **Special Functions** ([`special`]) - Bessel ratios and Gauss-Legendre quadrature
//! - **Models** ([`models`]) - Built-in form factors, structure factors and the model registry
//! - **File I/O** ([`io`]) - q grids from disk and curve output
//!
//! Everything here is a pure function of its inputs. Evaluation state and
//! parallelism live in [`crate::engine`].

pub mod io;
pub mod models;
pub mod params;
pub mod special;
