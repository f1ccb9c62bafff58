//! # Engine Module
//!
//! Direct evaluation of a model at fixed parameter values.
//!
//! ## Overview
//!
//! The engine turns a model definition, a bound parameter set and a q grid
//! into absolute intensities. There is no polydispersity integration and no
//! resolution smearing: every q value is an independent, pure evaluation, so
//! points are spread across the rayon thread pool when the `parallel` feature
//! is enabled.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Evaluation settings, q grids and the builder that validates them
//! - **Evaluation** ([`calculator`]) - Scale, background and volume normalisation around the model kernels
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping lower layers

pub mod calculator;
pub mod config;
pub mod error;
pub mod progress;
