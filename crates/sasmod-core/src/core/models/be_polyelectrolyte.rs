//! Borue-Erukhimovich RPA scattering of a polyelectrolyte solution.
//!
//! ```text
//! I(q) = K (q^2 + k^2) / (4 pi Lb alpha^2)
//!        / (1 + r0^4 (q^2 + k^2) (q^2 - 12 h Ca / b^2))
//! k^2  = 4 pi Lb (2 Cs + alpha Ca)
//! r0^2 = b / (alpha sqrt(Ca) sqrt(48 pi Lb))
//! ```
//!
//! `Ca` is the polymer concentration converted from mol/L to monomers/Ang^3.
//!
//! References: V Y Borue, I Y Erukhimovich, *Macromolecules*, 21 (1988) 3240;
//! J F Joanny, L Leibler, *Journal de Physique*, 51 (1990) 545.

use super::info::{Category, ModelInfo};
use crate::core::params::{Bounds, ModelParameter, ParameterError, ParameterKind, ParameterTable};
use std::f64::consts::PI;

pub const NAME: &str = "be_polyelectrolyte";

/// mol/L to 1/Ang^3 (Avogadro's number times 1e-27).
const MOLAR_TO_NUMBER_DENSITY: f64 = 6.022136e-4;

#[allow(clippy::too_many_arguments)]
pub fn iq(
    q: f64,
    contrast_factor: f64,
    bjerrum_length: f64,
    virial_param: f64,
    monomer_length: f64,
    salt_concentration: f64,
    ionization_degree: f64,
    polymer_concentration: f64,
) -> f64 {
    let concentration = polymer_concentration * MOLAR_TO_NUMBER_DENSITY;
    let k_square =
        4.0 * PI * bjerrum_length * (2.0 * salt_concentration + ionization_degree * concentration);
    let r0_square = 1.0 / ionization_degree / concentration.sqrt()
        * (monomer_length / (48.0 * PI * bjerrum_length).sqrt());

    let q2 = q * q;
    let numerator = contrast_factor / (4.0 * PI * bjerrum_length * ionization_degree.powi(2))
        * (q2 + k_square);
    let denominator = 1.0
        + r0_square.powi(2)
            * (q2 + k_square)
            * (q2 - 12.0 * virial_param * concentration / monomer_length.powi(2));
    numerator / denominator
}

fn iq_kernel(q: f64, v: &[f64]) -> f64 {
    iq(q, v[0], v[1], v[2], v[3], v[4], v[5], v[6])
}

fn plain(name: &str, units: &str, default: f64, bounds: Bounds, description: &str) -> ModelParameter {
    ModelParameter::new(name, units, default, bounds, ParameterKind::Plain, description)
}

pub fn parameters() -> Result<ParameterTable, ParameterError> {
    ParameterTable::new(vec![
        plain("contrast_factor", "barns", 10.0, Bounds::UNBOUNDED, "Contrast factor of the polymer"),
        plain("bjerrum_length", "Ang", 7.1, Bounds::NON_NEGATIVE, "Bjerrum length"),
        plain("virial_param", "1/Ang^2", 12.0, Bounds::UNBOUNDED, "Virial parameter"),
        plain("monomer_length", "Ang", 10.0, Bounds::NON_NEGATIVE, "Monomer length"),
        plain(
            "salt_concentration",
            "mol/L",
            0.0,
            Bounds::UNBOUNDED,
            "Concentration of monovalent salt",
        ),
        plain("ionization_degree", "", 0.05, Bounds::NON_NEGATIVE, "Degree of ionization"),
        plain(
            "polymer_concentration",
            "mol/L",
            0.7,
            Bounds::NON_NEGATIVE,
            "Polymer molar concentration",
        ),
    ])
}

pub fn model_info() -> Result<ModelInfo, ParameterError> {
    Ok(ModelInfo::new(
        NAME,
        "Polyelectrolyte with the RPA expression derived by Borue and Erukhimovich",
        "Structure factor of a polyelectrolyte solution in the random phase approximation. \
         The inverse Debye length and r0 are derived from the Bjerrum length, the salt and \
         polymer concentrations and the degree of ionization.",
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
    fn matches_reference_value_at_defaults() {
        let info = model_info().unwrap();
        let values = info.parameters.defaults();
        let intensity = info.eval_iq(0.001, &values);
        assert!(relative_difference(intensity, 0.093_837_893_316_579_6) < 1e-9);
    }

    #[test]
    fn matches_reference_values_over_wide_parameter_range() {
        let info = model_info().unwrap();
        let strong_salt = info
            .values_with([
                ("bjerrum_length", 100.0),
                ("virial_param", 3.0),
                ("monomer_length", 1.0),
                ("salt_concentration", 10.0),
                ("ionization_degree", 2.0),
                ("polymer_concentration", 10.0),
            ])
            .unwrap();
        assert!(relative_difference(info.eval_iq(0.1, &strong_salt), -3.756_938_005_878_070_4) < 1e-8);
        assert!(relative_difference(info.eval_iq(5.0, &strong_salt), 0.029_142_148_952_84) < 1e-6);

        let high_q = info
            .values_with([
                ("contrast_factor", 100.0),
                ("bjerrum_length", 10.0),
                ("virial_param", 180.0),
                ("monomer_length", 1.0),
                ("salt_concentration", 0.1),
                ("ionization_degree", 0.5),
                ("polymer_concentration", 0.1),
            ])
            .unwrap();
        assert!(relative_difference(info.eval_iq(200.0, &high_q), 1.806_646_675_105_250_6e-6) < 1e-9);
    }

    #[test]
    fn oriented_evaluation_uses_the_magnitude() {
        let info = model_info().unwrap();
        let values = info.parameters.defaults();
        let q = (0.03f64 * 0.03 + 0.04 * 0.04).sqrt();
        assert_eq!(info.eval_iqxy(0.03, 0.04, &values), info.eval_iq(q, &values));
    }
}
