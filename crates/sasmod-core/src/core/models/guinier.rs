//! Guinier approximation `I(q) = exp(-rg^2 q^2 / 3)`.

use super::info::{Category, ModelInfo};
use crate::core::params::{Bounds, ModelParameter, ParameterError, ParameterKind, ParameterTable};

pub const NAME: &str = "guinier";

#[inline]
pub fn iq(q: f64, rg: f64) -> f64 {
    (-rg * rg * q * q / 3.0).exp()
}

fn iq_kernel(q: f64, v: &[f64]) -> f64 {
    iq(q, v[0])
}

pub fn parameters() -> Result<ParameterTable, ParameterError> {
    ParameterTable::new(vec![ModelParameter::new(
        "rg",
        "Ang",
        60.0,
        Bounds::NON_NEGATIVE,
        ParameterKind::Plain,
        "Radius of Gyration",
    )])
}

pub fn model_info() -> Result<ModelInfo, ParameterError> {
    Ok(ModelInfo::new(
        NAME,
        "Guinier approximation for the low-q scattering of any particle.",
        "I(q) = scale exp(-rg^2 q^2 / 3.0), with rg the radius of gyration.",
        Category::ShapeIndependent,
        parameters()?,
        iq_kernel,
    ))
}
