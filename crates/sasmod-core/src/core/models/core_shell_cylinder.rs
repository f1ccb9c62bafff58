//! Right circular cylinder with a core-shell scattering length density profile.
//!
//! The shell has uniform thickness on the curved surface and on both end caps,
//! so the outer radius is `radius + thickness` and the outer length is
//! `length + 2 thickness`. The 1D intensity averages the oriented form factor
//! over the angle between the cylinder axis and `q`; the 2D intensity uses the
//! axis given by `theta` and `phi` (degrees).
//!
//! Reference: S R Kline, *J Appl. Cryst.*, 39 (2006) 895.

use super::info::{Category, ModelInfo};
use crate::core::params::{Bounds, ModelParameter, ParameterError, ParameterKind, ParameterTable};
use crate::core::special::{GAUSS76, j1c, sinc};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

pub const NAME: &str = "core_shell_cylinder";

/// Converts (1e-6/Ang^2 * Ang^3)^2 / Ang^3 to 1/cm.
const INTENSITY_SCALE: f64 = 1.0e-4;

/// Volume of a cylinder of core radius `radius` and core length `length`
/// wrapped in a shell of `thickness`.
#[inline]
pub fn form_volume(radius: f64, thickness: f64, length: f64) -> f64 {
    PI * (radius + thickness).powi(2) * (length + 2.0 * thickness)
}

/// Effective radius for coupling to a structure factor, from the second virial
/// coefficient of the outer cylinder.
pub fn effective_radius(radius: f64, thickness: f64, length: f64) -> f64 {
    let r = radius + thickness;
    let l = length + 2.0 * thickness;
    let d = 0.75 * r * (2.0 * r * l + (l + r) * (l + PI * r));
    0.5 * d.cbrt()
}

/// Returns `(whole, shell)` volumes.
pub fn volume_ratio(radius: f64, thickness: f64, length: f64) -> (f64, f64) {
    let whole = form_volume(radius, thickness, length);
    let core = PI * radius * radius * length;
    (whole, whole - core)
}

/// Amplitudes of the core and shell cylinders for a given `q`.
struct Amplitudes {
    core_volume_contrast: f64,
    core_qr: f64,
    core_qh: f64,
    shell_volume_contrast: f64,
    shell_qr: f64,
    shell_qh: f64,
}

impl Amplitudes {
    fn new(q: f64, pars: &Parameters) -> Self {
        Self {
            core_volume_contrast: form_volume(pars.radius, 0.0, pars.length)
                * (pars.core_sld - pars.shell_sld),
            core_qr: q * pars.radius,
            core_qh: q * 0.5 * pars.length,
            shell_volume_contrast: form_volume(pars.radius, pars.thickness, pars.length)
                * (pars.shell_sld - pars.solvent_sld),
            shell_qr: q * (pars.radius + pars.thickness),
            shell_qh: q * (0.5 * pars.length + pars.thickness),
        }
    }

    /// Total amplitude at angle `alpha` (given by its sine and cosine) to the axis.
    #[inline]
    fn at(&self, sin_alpha: f64, cos_alpha: f64) -> f64 {
        cylinder_amplitude(
            self.core_volume_contrast,
            self.core_qr * sin_alpha,
            self.core_qh * cos_alpha,
        ) + cylinder_amplitude(
            self.shell_volume_contrast,
            self.shell_qr * sin_alpha,
            self.shell_qh * cos_alpha,
        )
    }
}

#[inline]
fn cylinder_amplitude(volume_contrast: f64, bessel_arg: f64, sinc_arg: f64) -> f64 {
    volume_contrast * sinc(sinc_arg) * j1c(bessel_arg)
}

/// Positional view of the parameter table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub core_sld: f64,
    pub shell_sld: f64,
    pub solvent_sld: f64,
    pub radius: f64,
    pub thickness: f64,
    pub length: f64,
    pub theta: f64,
    pub phi: f64,
}

impl Parameters {
    fn from_values(v: &[f64]) -> Self {
        Self {
            core_sld: v[0],
            shell_sld: v[1],
            solvent_sld: v[2],
            radius: v[3],
            thickness: v[4],
            length: v[5],
            theta: v[6],
            phi: v[7],
        }
    }
}

/// Orientation-averaged intensity (unnormalised by volume).
///
/// Integrates `F^2(q, alpha) sin(alpha)` over `alpha` in `[0, pi/2]` with the
/// 76-point Gauss-Legendre rule.
pub fn iq(q: f64, pars: &Parameters) -> f64 {
    let amplitudes = Amplitudes::new(q, pars);
    let total: f64 = GAUSS76
        .iter()
        .map(|(z, w)| {
            let alpha = 0.5 * (z * FRAC_PI_2 + FRAC_PI_2);
            let (sn, cn) = alpha.sin_cos();
            let fq = amplitudes.at(sn, cn);
            w * fq * fq * sn
        })
        .sum();
    INTENSITY_SCALE * total * FRAC_PI_4
}

/// Intensity of a cylinder whose axis points along `(theta, phi)` in degrees.
pub fn iqxy(qx: f64, qy: f64, pars: &Parameters) -> f64 {
    let q = (qx * qx + qy * qy).sqrt();
    if q == 0.0 {
        let fq = Amplitudes::new(0.0, pars).at(0.0, 1.0);
        return INTENSITY_SCALE * fq * fq;
    }

    let (sin_phi, cos_phi) = pars.phi.to_radians().sin_cos();
    let cos_alpha = (cos_phi * pars.theta.to_radians().cos() * (qx / q) + sin_phi * (qy / q))
        .clamp(-1.0, 1.0);
    let (sn, cn) = cos_alpha.acos().sin_cos();
    let fq = Amplitudes::new(q, pars).at(sn, cn);
    INTENSITY_SCALE * fq * fq
}

fn iq_kernel(q: f64, values: &[f64]) -> f64 {
    iq(q, &Parameters::from_values(values))
}

fn iqxy_kernel(qx: f64, qy: f64, values: &[f64]) -> f64 {
    iqxy(qx, qy, &Parameters::from_values(values))
}

fn form_volume_kernel(v: &[f64]) -> f64 {
    form_volume(v[0], v[1], v[2])
}

fn effective_radius_kernel(v: &[f64]) -> f64 {
    effective_radius(v[0], v[1], v[2])
}

fn volume_ratio_kernel(v: &[f64]) -> (f64, f64) {
    volume_ratio(v[0], v[1], v[2])
}

pub fn parameters() -> Result<ParameterTable, ParameterError> {
    ParameterTable::new(vec![
        ModelParameter::new(
            "core_sld",
            "1e-6/Ang^2",
            4.0,
            Bounds::UNBOUNDED,
            ParameterKind::Sld,
            "Cylinder core scattering length density",
        ),
        ModelParameter::new(
            "shell_sld",
            "1e-6/Ang^2",
            4.0,
            Bounds::UNBOUNDED,
            ParameterKind::Sld,
            "Cylinder shell scattering length density",
        ),
        ModelParameter::new(
            "solvent_sld",
            "1e-6/Ang^2",
            1.0,
            Bounds::UNBOUNDED,
            ParameterKind::Sld,
            "Solvent scattering length density",
        ),
        ModelParameter::new(
            "radius",
            "Ang",
            20.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Volume,
            "Cylinder core radius",
        ),
        ModelParameter::new(
            "thickness",
            "Ang",
            20.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Volume,
            "Cylinder shell thickness",
        ),
        ModelParameter::new(
            "length",
            "Ang",
            400.0,
            Bounds::NON_NEGATIVE,
            ParameterKind::Volume,
            "Cylinder length",
        ),
        ModelParameter::new(
            "theta",
            "degrees",
            60.0,
            Bounds::UNBOUNDED,
            ParameterKind::Orientation,
            "In plane angle",
        ),
        ModelParameter::new(
            "phi",
            "degrees",
            60.0,
            Bounds::UNBOUNDED,
            ParameterKind::Orientation,
            "Out of plane angle",
        ),
    ])
}

pub fn model_info() -> Result<ModelInfo, ParameterError> {
    Ok(ModelInfo::new(
        NAME,
        "Right circular cylinder with a core-shell scattering length density profile.",
        "P(q, alpha) = scale/Vs * f(q)^2 + background, where f(q) sums the core and shell \
         amplitudes (rho - rho_out) V sinc(q h cos(alpha)) 2 J1(q r sin(alpha)) / (q r sin(alpha)). \
         alpha is the angle between the cylinder axis and q, Vs the total volume, R+T the outer \
         radius and L+2T the total length of the outer shell.",
        Category::Shape("cylinder".to_string()),
        parameters()?,
        iq_kernel,
    )
    .with_iqxy(iqxy_kernel)
    .with_form_volume(form_volume_kernel)
    .with_effective_radius(effective_radius_kernel)
    .with_volume_ratio(volume_ratio_kernel))
}
