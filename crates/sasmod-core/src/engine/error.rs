use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::curve::CurveIoError;
use crate::core::params::{ParamLoadError, ParameterError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown model: '{0}'")]
    UnknownModel(String),

    #[error("Invalid parameter value: {source}")]
    Parameter {
        #[from]
        source: ParameterError,
    },

    #[error("Failed to load parameter file: {source}")]
    ParamLoad {
        #[from]
        source: ParamLoadError,
    },

    #[error("Invalid evaluation configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Curve I/O failed: {source}")]
    CurveIo {
        #[from]
        source: CurveIoError,
    },
}
