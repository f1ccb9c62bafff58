//! Bessel-type functions used by the particle form factors.
//!
//! `J1` uses the rational approximation for small arguments and the
//! asymptotic expansion for large ones (Numerical Recipes coefficients).

const FRAC_3PI_4: f64 = 2.356_194_490_192_345;
const TWO_OVER_PI: f64 = std::f64::consts::FRAC_2_PI;

const J1_SMALL_P: [f64; 6] = [
    72362614232.0,
    -7895059235.0,
    242396853.1,
    -2972611.439,
    15704.48260,
    -30.16036606,
];

const J1_SMALL_Q: [f64; 6] = [
    144725228442.0,
    2300535178.0,
    18583304.74,
    99447.43394,
    376.9991397,
    1.0,
];

const J1_ASYMP_P: [f64; 5] = [
    1.0,
    0.183105e-2,
    -0.3516396496e-4,
    0.2457520174e-5,
    -0.240337019e-6,
];

const J1_ASYMP_Q: [f64; 5] = [
    0.04687499995,
    -0.2002690873e-3,
    0.8449199096e-5,
    -0.88228987e-6,
    0.105787412e-6,
];

const J1_SMALL_LIMIT: f64 = 8.0;

// Below this the trigonometric form of 3 j1(x)/x loses digits to cancellation.
const SPH_J1C_CUTOFF: f64 = 0.18;

#[inline]
fn horner(coefficients: &[f64], y: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * y + c)
}

#[inline]
fn small_ratio(y: f64) -> f64 {
    horner(&J1_SMALL_P, y) / horner(&J1_SMALL_Q, y)
}

/// Bessel function of the first kind of order one, `J1(x)`.
#[inline]
pub fn bessel_j1(x: f64) -> f64 {
    let ax = x.abs();
    if ax < J1_SMALL_LIMIT {
        return x * small_ratio(x * x);
    }

    let z = J1_SMALL_LIMIT / ax;
    let y = z * z;
    let xx = ax - FRAC_3PI_4;
    let p0 = horner(&J1_ASYMP_P, y);
    let q0 = z * horner(&J1_ASYMP_Q, y);

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    sign * (TWO_OVER_PI / ax).sqrt() * (xx.cos() * p0 - xx.sin() * q0)
}

/// `2 J1(x) / x`, normalised to 1 at the origin.
///
/// For small arguments the rational form is evaluated without the division
/// by `x`, so the origin needs no special case.
#[inline]
pub fn j1c(x: f64) -> f64 {
    if x.abs() < J1_SMALL_LIMIT {
        2.0 * small_ratio(x * x)
    } else {
        2.0 * bessel_j1(x) / x
    }
}

/// Spherical Bessel ratio `3 j1(x) / x = 3 (sin x - x cos x) / x^3`.
#[inline]
pub fn sph_j1c(x: f64) -> f64 {
    let x2 = x * x;
    if x.abs() < SPH_J1C_CUTOFF {
        1.0 + x2
            * (-3.0 / 30.0
                + x2 * (3.0 / 840.0 + x2 * (-3.0 / 45360.0 + x2 * (3.0 / 3991680.0))))
    } else {
        let (sin_x, cos_x) = x.sin_cos();
        3.0 * (sin_x / x - cos_x) / x2
    }
}

#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 { 1.0 } else { x.sin() / x }
}
