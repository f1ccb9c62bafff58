//! Empirical sum of a low-q Porod power law and a high-q Lorentzian.
//!
//! `I(q) = porod_scale / q^n + lorentz_scale / (1 + (q xi)^m)`

use super::info::{Category, ModelInfo};
use crate::core::params::{Bounds, ModelParameter, ParameterError, ParameterKind, ParameterTable};

pub const NAME: &str = "correlation_length";

pub fn iq(
    q: f64,
    lorentz_scale: f64,
    porod_scale: f64,
    cor_length: f64,
    exponent_p: f64,
    exponent_l: f64,
) -> f64 {
    let porod = porod_scale / q.powf(exponent_p);
    let lorentz = lorentz_scale / (1.0 + (q * cor_length).powf(exponent_l));
    porod + lorentz
}

fn iq_kernel(q: f64, v: &[f64]) -> f64 {
    iq(q, v[0], v[1], v[2], v[3], v[4])
}

pub fn parameters() -> Result<ParameterTable, ParameterError> {
    ParameterTable::new(vec![
        ModelParameter::new(
            "lorentz_scale",
            "",
            10.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Plain,
            "Lorentzian Scaling Factor",
        ),
        ModelParameter::new(
            "porod_scale",
            "",
            1e-6,
            Bounds::NON_NEGATIVE,
            ParameterKind::Plain,
            "Porod Scaling Factor",
        ),
        ModelParameter::new(
            "cor_length",
            "Ang",
            50.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Plain,
            "Correlation length",
        ),
        ModelParameter::new(
            "exponent_p",
            "",
            3.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Plain,
            "Porod Exponent",
        ),
        ModelParameter::new(
            "exponent_l",
            "",
            2.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Plain,
            "Lorentzian Exponent",
        ),
    ])
}

pub fn model_info() -> Result<ModelInfo, ParameterError> {
    Ok(ModelInfo::new(
        NAME,
        "Empirical functional form for data with a low-q signal and a high-q signal.",
        "I(q) = porod_scale / q^exponent_p + lorentz_scale / (1 + (q cor_length)^exponent_l)",
        Category::ShapeIndependent,
        parameters()?,
        iq_kernel,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative_difference(a: f64, b: f64) -> f64 {
        (a - b).abs() / a.abs().max(b.abs())
    }

    #[test]
    fn matches_reference_values_at_defaults() {
        let info = model_info().unwrap();
        let values = info.parameters.defaults();
        for &(q, expected) in &[
            (0.001, 1009.975_062_344_1),
            (0.150_141, 0.174_645_746_88),
            (0.442_528, 0.020_395_675_16),
        ] {
            assert!(relative_difference(info.eval_iq(q, &values), expected) < 1e-9);
        }
    }

    #[test]
    fn porod_term_diverges_at_zero_q() {
        assert!(iq(0.0, 10.0, 1e-6, 50.0, 3.0, 2.0).is_infinite());
    }
}
