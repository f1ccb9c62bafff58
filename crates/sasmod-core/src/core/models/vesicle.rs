//! Unilamellar vesicle: a hollow sphere whose core is filled with solvent.
//!
//! The form factor is normalised by the volume of the shell rather than the
//! whole particle, so `scale` is the shell volume fraction on absolute scale.

use super::core_shell_sphere::{core_shell_amplitude, sphere_volume};
use super::info::{Category, ModelInfo};
use crate::core::params::{Bounds, ModelParameter, ParameterError, ParameterKind, ParameterTable};

pub const NAME: &str = "vesicle";

const INTENSITY_SCALE: f64 = 1.0e-4;

pub fn iq(q: f64, sld: f64, solvent_sld: f64, radius: f64, thickness: f64) -> f64 {
    let f = core_shell_amplitude(
        q,
        radius,
        radius + thickness,
        solvent_sld - sld,
        sld - solvent_sld,
    );
    INTENSITY_SCALE * f * f
}

/// Shell volume.
#[inline]
pub fn form_volume(radius: f64, thickness: f64) -> f64 {
    sphere_volume(radius + thickness) - sphere_volume(radius)
}

pub fn effective_radius(radius: f64, thickness: f64) -> f64 {
    radius + thickness
}

pub fn volume_ratio(radius: f64, thickness: f64) -> (f64, f64) {
    let whole = sphere_volume(radius + thickness);
    (whole, whole - sphere_volume(radius))
}

fn iq_kernel(q: f64, v: &[f64]) -> f64 {
    iq(q, v[0], v[1], v[2], v[3])
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
            "sld",
            "1e-6/Ang^2",
            0.5,
            Bounds::UNBOUNDED,
            ParameterKind::Sld,
            "vesicle shell scattering length density",
        ),
        ModelParameter::new(
            "solvent_sld",
            "1e-6/Ang^2",
            6.36,
            Bounds::UNBOUNDED,
            ParameterKind::Sld,
            "solvent scattering length density",
        ),
        ModelParameter::new(
            "radius",
            "Ang",
            100.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Volume,
            "vesicle core radius",
        ),
        ModelParameter::new(
            "thickness",
            "Ang",
            30.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Volume,
            "vesicle shell thickness",
        ),
    ])
}

pub fn model_info() -> Result<ModelInfo, ParameterError> {
    Ok(ModelInfo::new(
        NAME,
        "Form factor for a unilamellar vesicle, normalised by the shell volume.",
        "Hollow sphere reparameterised for a vesicle. radius is the core radius, thickness the \
         shell thickness, sld the shell SLD and solvent_sld the SLD of the solvent, which also \
         fills the core.",
        Category::Shape("sphere".to_string()),
        parameters()?,
        iq_kernel,
    )
    .with_form_volume(form_volume_kernel)
    .with_effective_radius(effective_radius_kernel)
    .with_volume_ratio(volume_ratio_kernel))
}
