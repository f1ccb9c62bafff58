//! Spherical particle with a core-shell scattering length density profile.

use super::info::{Category, ModelInfo};
use crate::core::params::{Bounds, ModelParameter, ParameterError, ParameterKind, ParameterTable};
use crate::core::special::sph_j1c;
use std::f64::consts::PI;

pub const NAME: &str = "core_shell_sphere";

const INTENSITY_SCALE: f64 = 1.0e-4;

#[inline]
pub(crate) fn sphere_volume(radius: f64) -> f64 {
    4.0 * PI / 3.0 * radius * radius * radius
}

/// Amplitude of a sphere of `core_radius` with contrast `core_contrast`
/// inside a concentric shell reaching `shell_radius` with `shell_contrast`.
#[inline]
pub(crate) fn core_shell_amplitude(
    q: f64,
    core_radius: f64,
    shell_radius: f64,
    core_contrast: f64,
    shell_contrast: f64,
) -> f64 {
    sphere_volume(core_radius) * core_contrast * sph_j1c(q * core_radius)
        + sphere_volume(shell_radius) * shell_contrast * sph_j1c(q * shell_radius)
}

pub fn iq(
    q: f64,
    radius: f64,
    thickness: f64,
    core_sld: f64,
    shell_sld: f64,
    solvent_sld: f64,
) -> f64 {
    let f = core_shell_amplitude(
        q,
        radius,
        radius + thickness,
        core_sld - shell_sld,
        shell_sld - solvent_sld,
    );
    INTENSITY_SCALE * f * f
}

#[inline]
pub fn form_volume(radius: f64, thickness: f64) -> f64 {
    sphere_volume(radius + thickness)
}

pub fn effective_radius(radius: f64, thickness: f64) -> f64 {
    radius + thickness
}

/// Returns `(whole, shell)` volumes.
pub fn volume_ratio(radius: f64, thickness: f64) -> (f64, f64) {
    let whole = sphere_volume(radius + thickness);
    (whole, whole - sphere_volume(radius))
}

fn iq_kernel(q: f64, v: &[f64]) -> f64 {
    iq(q, v[0], v[1], v[2], v[3], v[4])
}

fn form_volume_kernel(v: &[f64]) -> f64 {
    form_volume(v[0], v[1])
}

fn effective_radius_kernel(v: &[f64]) -> f64 {
    effective_radius(v[0], v[1])
}

fn volume_ratio_kernel(v: &[f64]) -> (f64, f64) {
    volume_ratio(v[0], v[1])
}

pub fn parameters() -> Result<ParameterTable, ParameterError> {
    ParameterTable::new(vec![
        ModelParameter::new(
            "radius",
            "Ang",
            60.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Volume,
            "Sphere core radius",
        ),
        ModelParameter::new(
            "thickness",
            "Ang",
            10.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Volume,
            "Sphere shell thickness",
        ),
        ModelParameter::new(
            "core_sld",
            "1e-6/Ang^2",
            1.0,
            Bounds::UNBOUNDED,
            ParameterKind::Sld,
            "Sphere core scattering length density",
        ),
        ModelParameter::new(
            "shell_sld",
            "1e-6/Ang^2",
            2.0,
            Bounds::UNBOUNDED,
            ParameterKind::Sld,
            "Sphere shell scattering length density",
        ),
        ModelParameter::new(
            "solvent_sld",
            "1e-6/Ang^2",
            3.0,
            Bounds::UNBOUNDED,
            ParameterKind::Sld,
            "Solvent scattering length density",
        ),
    ])
}

pub fn model_info() -> Result<ModelInfo, ParameterError> {
    Ok(ModelInfo::new(
        NAME,
        "Form factor for a monodisperse spherical particle with a core-shell structure.",
        "F^2(q) = 3/V_s [V_c (core_sld - shell_sld) j1c(q radius) + V_s (shell_sld - solvent_sld) \
         j1c(q r_s)], with V_s the volume of the whole sphere, V_c the core volume and \
         r_s = radius + thickness.",
        Category::Shape("sphere".to_string()),
        parameters()?,
        iq_kernel,
    )
    .with_form_volume(form_volume_kernel)
    .with_effective_radius(effective_radius_kernel)
    .with_volume_ratio(volume_ratio_kernel))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative_difference(a: f64, b: f64) -> f64 {
        (a - b).abs() / a.abs().max(b.abs())
    }

    #[test]
    fn geometry_matches_reference_values() {
        assert_eq!(effective_radius(20.0, 10.0), 30.0);
        let (whole, shell) = volume_ratio(20.0, 10.0);
        assert!((shell / whole - 0.703_703_704).abs() < 1e-9);
    }

    #[test]
    fn normalised_intensity_matches_reference_value() {
        let value = iq(0.4, 60.0, 10.0, 1.0, 2.0, 3.0) / form_volume(60.0, 10.0);
        assert!(relative_difference(value, 0.000_698_837_55) < 1e-6);
    }

    #[test]
    fn uniform_sphere_when_core_matches_shell() {
        let r = 70.0;
        let contrast = 2.0;
        let expected = INTENSITY_SCALE * (sphere_volume(r) * contrast).powi(2);
        assert!(relative_difference(iq(0.0, 50.0, 20.0, 3.0, 3.0, 1.0), expected) < 1e-12);
    }

    #[test]
    fn model_info_is_isotropic_with_geometry() {
        let info = model_info().unwrap();
        assert_eq!(info.category.to_string(), "shape:sphere");
        assert!(info.iqxy.is_none());
        let values = info.parameters.defaults();
        assert_eq!(info.eval_iqxy(0.3, 0.4, &values), info.eval_iq(0.5, &values));
        assert_eq!(info.eval_effective_radius(&values), 70.0);
    }
}
