//! # Workflows Module
//!
//! End-to-end entry points that tie the model registry, the parameter layer
//! and the evaluation engine together.
//!
//! - **Curve Evaluation** ([`evaluate`]) - Resolves a model, binds parameters from files and
//!   overrides, builds the q values and returns the evaluated [`Curve`](crate::core::io::curve::Curve)
//! - **Geometry** ([`geometry`]) - Form volume, effective radius and volume ratio at given parameters

pub mod evaluate;
pub mod geometry;
