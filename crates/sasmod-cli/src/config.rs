//! Evaluation configuration assembled from built-in defaults, an optional
//! TOML file, `-S/--set` assignments and command-line flags, in increasing
//! order of precedence.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
