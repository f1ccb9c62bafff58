//! Percus-Yevick structure factor of a monodisperse hard-sphere fluid.
//!
//! The interparticle potential is `U(r) = inf` for `r < 2R` and `0` otherwise,
//! where `R` is the hard-sphere (effective) radius. For oriented data the
//! structure factor is evaluated at `q = sqrt(qx^2 + qy^2)`.
//!
//! Reference: J K Percus, J Yevick, *J. Phys. Rev.*, 110, (1958) 1.

use super::info::{Category, ModelInfo};
use crate::core::params::{Bounds, ModelParameter, ParameterError, ParameterKind, ParameterTable};

pub const NAME: &str = "hardsphere";

/// Radii below this are treated as point particles with no structure.
const RADIUS_TOLERANCE: f64 = 1e-12;
/// Below this scaled argument the zero-q compressibility limit agrees with the
/// series to about 1e-11 relative.
const ZERO_Q_LIMIT: f64 = 5e-6;
/// Switch between the Taylor series and the closed trigonometric form.
///
/// The closed form cancels catastrophically as X -> 0 while the series
/// truncation error grows with X; 0.2 balances the two.
const SERIES_LIMIT: f64 = 0.2;

/// Maximum random close packing fraction accepted for `volfraction`.
pub const MAX_VOLUME_FRACTION: f64 = 0.74;

/// Percus-Yevick closure coefficients that depend on the volume fraction only.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Closure {
    a: f64,
    b: f64,
    g: f64,
}

impl Closure {
    #[inline]
    fn new(volfraction: f64) -> Self {
        let inv = 1.0 / (1.0 - volfraction);
        let d = inv * inv;
        let a = (1.0 + 2.0 * volfraction) * d;
        let a = a * a;
        let b = (1.0 + 0.5 * volfraction) * d;
        let b = -6.0 * volfraction * b * b;
        let g = 0.5 * volfraction * a;
        Self { a, b, g }
    }
}

/// Structure factor `S(q)` for hard spheres of radius `effect_radius` at volume
/// fraction `volfraction`.
///
/// The evaluation is piecewise in `X = |2 q R|`: a zero-q limit, a fourth-order
/// series in `X^2` for small arguments and the closed trigonometric form
/// elsewhere. The series and closed form are normalised differently and must
/// stay separate; merging them reintroduces the cancellation the series avoids.
#[inline]
pub fn iq(q: f64, effect_radius: f64, volfraction: f64) -> f64 {
    if effect_radius.abs() < RADIUS_TOLERANCE {
        return 1.0;
    }

    let Closure { a, b, g } = Closure::new(volfraction);
    let x = (q * effect_radius * 2.0).abs();

    if x < ZERO_Q_LIMIT {
        return 1.0 / a;
    }

    let x2 = x * x;
    if x < SERIES_LIMIT {
        let ff = 8.0 * a
            + 6.0 * b
            + 4.0 * g
            + (-0.8 * a - b / 1.5 - 0.5 * g + (a / 35.0 + 0.0125 * b + 0.02 * g) * x2) * x2;
        return 1.0 / (1.0 + volfraction * ff);
    }

    let x4 = x2 * x2;
    let (s, c) = x.sin_cos();
    let ff = ((g * ((4.0 * x2 - 24.0) * x * s - (x4 - 12.0 * x2 + 24.0) * c + 24.0) / x2
        + b * (2.0 * x * s - (x2 - 2.0) * c - 2.0))
        / x
        + a * (s - x * c))
        / x;
    1.0 / (1.0 + 24.0 * volfraction * ff / x2)
}

#[inline]
pub fn iqxy(qx: f64, qy: f64, effect_radius: f64, volfraction: f64) -> f64 {
    iq((qx * qx + qy * qy).sqrt(), effect_radius, volfraction)
}

/// Zero-q limit `1/A` of the compressibility approximation.
pub fn zero_q_limit(volfraction: f64) -> f64 {
    1.0 / Closure::new(volfraction).a
}

fn iq_kernel(q: f64, values: &[f64]) -> f64 {
    iq(q, values[0], values[1])
}

fn iqxy_kernel(qx: f64, qy: f64, values: &[f64]) -> f64 {
    iqxy(qx, qy, values[0], values[1])
}

// No volume normalisation even though effect_radius is a volume parameter.
// Whether S(q) should be normalised by the sphere volume is an open question.
fn form_volume(_volume_values: &[f64]) -> f64 {
    1.0
}

pub fn parameters() -> Result<ParameterTable, ParameterError> {
    ParameterTable::new(vec![
        ModelParameter::new(
            "effect_radius",
            "Ang",
            50.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Volume,
            "effective radius of hard sphere",
        ),
        ModelParameter::new(
            "volfraction",
            "",
            0.2,
            Bounds::new(0.0, MAX_VOLUME_FRACTION),
            ParameterKind::Plain,
            "volume fraction of hard spheres",
        ),
    ])
}

pub fn model_info() -> Result<ModelInfo, ParameterError> {
    Ok(ModelInfo::new(
        NAME,
        "Hard sphere structure factor, with Percus-Yevick closure",
        "Interparticle S(Q) for random, non-interacting spheres. May be a reasonable \
         approximation for other shapes of particles that freely rotate, and for moderately \
         polydisperse systems. effect_radius is the hard sphere radius; volfraction is the \
         volume fraction occupied by the spheres.",
        Category::StructureFactor,
        parameters()?,
        iq_kernel,
    )
    .with_iqxy(iqxy_kernel)
    .with_form_volume(form_volume))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-5;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn relative_difference(a: f64, b: f64) -> f64 {
        (a - b).abs() / a.abs().max(b.abs())
    }

    #[test]
    fn reference_values_at_default_parameters() {
        assert!(f64_approx_equal(iq(0.001, 50.0, 0.2), 0.209128));
        assert!(f64_approx_equal(iq(0.1, 50.0, 0.2), 0.930587));
    }

    #[test]
    fn zero_radius_gives_unit_structure_factor() {
        for &q in &[0.0, 1e-4, 0.1, 10.0, -3.0] {
            assert_eq!(iq(q, 0.0, 0.3), 1.0);
            assert_eq!(iq(q, 1e-13, 0.3), 1.0);
            assert_eq!(iq(q, -1e-13, 0.3), 1.0);
        }
    }

    #[test]
    fn zero_q_returns_compressibility_limit() {
        for &eta in &[0.0f64, 0.1, 0.2, 0.4, 0.6, 0.73] {
            let one_over_a = {
                let d = (1.0 / (1.0 - eta)).powi(2);
                1.0 / ((1.0 + 2.0 * eta) * d).powi(2)
            };
            assert!((iq(0.0, 50.0, eta) - one_over_a).abs() < 1e-12);
            assert_eq!(iq(0.0, 50.0, eta), zero_q_limit(eta));
        }
    }

    #[test]
    fn series_approaches_zero_q_limit() {
        let at_limit = iq(0.0, 50.0, 0.2);
        let just_above = iq(ZERO_Q_LIMIT / 100.0 * 1.01, 50.0, 0.2);
        assert!(relative_difference(at_limit, just_above) < 1e-9);
    }

    #[test]
    fn branch_switch_at_series_limit_is_continuous() {
        // The residual jump is the truncation error of the fourth-order series.
        let radius = 50.0;
        let q_switch = SERIES_LIMIT / (2.0 * radius);
        for &eta in &[0.1, 0.2] {
            let below = iq(q_switch * (1.0 - 1e-9), radius, eta);
            let above = iq(q_switch * (1.0 + 1e-9), radius, eta);
            assert!(relative_difference(below, above) < 1e-5);
        }
    }

    #[test]
    fn negative_q_and_radius_use_the_magnitude() {
        let reference = iq(0.05, 50.0, 0.3);
        assert_eq!(iq(-0.05, 50.0, 0.3), reference);
        assert_eq!(iq(0.05, -50.0, 0.3), reference);
    }

    #[test]
    fn oriented_evaluation_equals_isotropic_evaluation() {
        for &(qx, qy) in &[(0.0f64, 0.0f64), (0.001, 0.002), (0.03, -0.04), (-0.2, 0.5)] {
            let q = (qx * qx + qy * qy).sqrt();
            assert_eq!(iqxy(qx, qy, 50.0, 0.2), iq(q, 50.0, 0.2));
        }
    }

    #[test]
    fn structure_factor_is_non_negative_over_four_decades() {
        for &eta in &[0.05, 0.2, 0.45, 0.7] {
            for k in 0..=600 {
                let q = 10f64.powf(-5.0 + k as f64 / 100.0);
                let s = iq(q, 50.0, eta);
                assert!(s >= 0.0, "S({q}) = {s} for volfraction {eta}");
            }
        }
    }

    #[test]
    fn structure_factor_tends_to_one_at_large_q() {
        assert!((iq(50.0, 50.0, 0.2) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn zero_volume_fraction_is_ideal_gas() {
        for &q in &[1e-7, 1e-3, 0.01, 0.5] {
            assert!((iq(q, 50.0, 0.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn nan_inputs_propagate() {
        assert!(iq(f64::NAN, 50.0, 0.2).is_nan());
        assert!(iq(0.01, 50.0, f64::NAN).is_nan());
    }

    #[test]
    fn model_info_declares_table_and_unit_form_volume() {
        let info = model_info().unwrap();
        assert_eq!(info.name, NAME);
        assert!(info.is_structure_factor());
        let names: Vec<_> = info.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["effect_radius", "volfraction"]);
        assert!(!info.parameters.has_orientation());

        let values = info.parameters.defaults();
        assert_eq!(info.eval_form_volume(&values), 1.0);
        assert_eq!(info.eval_effective_radius(&values), 0.0);
        assert_eq!(info.eval_volume_ratio(&values), 1.0);
        assert!(f64_approx_equal(info.eval_iq(0.001, &values), 0.209128));
    }

    #[test]
    fn volume_fraction_bounds_are_enforced_by_the_table() {
        let info = model_info().unwrap();
        assert!(info.values_with([("volfraction", 0.75)]).is_err());
        assert!(info.values_with([("volfraction", 0.74)]).is_ok());
    }
}
