//! # Core Models Module
//!
//! Built-in scattering models and the registry that makes them discoverable
//! by name.
//!
//! ## Overview
//!
//! Every model is declared the same way: a module-level `NAME`, a parameter
//! table built by `parameters()`, strongly typed kernel functions taking the
//! parameters as named arguments, and a `model_info()` constructor that wires
//! positional kernel wrappers into a [`info::ModelInfo`]. Kernels are pure and
//! never fail; NaN inputs yield NaN.
//!
//! ## Key Components
//!
//! - [`info`] - Model definition type and its evaluation helpers
//! - [`registry`] - Name to definition lookup, including legacy aliases
//! - [`hardsphere`] - Percus-Yevick hard-sphere structure factor
//! - [`core_shell_cylinder`] - Core-shell cylinder form factor with orientation
//! - [`core_shell_sphere`] - Core-shell sphere form factor
//! - [`vesicle`] - Unilamellar vesicle form factor
//! - [`guinier`] - Guinier law
//! - [`correlation_length`] - Porod plus Lorentzian empirical model
//! - [`be_polyelectrolyte`] - Borue-Erukhimovich polyelectrolyte RPA
//!
//! ## Usage
//!
//! ```ignore
//! use sasmod::core::models::registry::ModelRegistry;
//!
//! let registry = ModelRegistry::with_builtins()?;
//! let model = registry.resolve("HardsphereStructure")?;
//! let values = model.values_with([("volfraction", 0.3)])?;
//! let s = model.eval_iq(0.01, &values);
//! ```

pub mod be_polyelectrolyte;
pub mod core_shell_cylinder;
pub mod core_shell_sphere;
pub mod correlation_length;
pub mod guinier;
pub mod hardsphere;
pub mod info;
pub mod registry;
pub mod vesicle;
