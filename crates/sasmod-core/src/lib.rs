//! # sasmod Core Library
//!
//! Analytic small-angle scattering models: the Percus-Yevick hard-sphere
//! structure factor, particle form factors and the machinery to evaluate
//! them on a q grid.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers throughout.
//!
//! - **[`core`]: The Foundation.** Parameter tables, special functions and the
//!   model kernels themselves. Kernels are pure functions of `q` and a slice of
//!   parameter values and never fail.
//!
//! - **[`engine`]: The Evaluation Core.** Validated configuration, q grids and
//!   the `Calculator` that applies scale, background and volume normalisation,
//!   in parallel when the `parallel` feature is enabled.
//!
//! - **[`workflows`]: The Public API.** Complete procedures such as evaluating
//!   a curve or reporting a model's geometry, with progress reporting and
//!   structured logging.

pub mod core;
pub mod engine;
pub mod workflows;
