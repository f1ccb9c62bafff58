use once_cell::sync::Lazy;
use std::f64::consts::PI;

const NEWTON_TOLERANCE: f64 = 3e-16;
const MAX_NEWTON_STEPS: usize = 100;

/// Gauss-Legendre quadrature rule on `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussRule {
    pub nodes: Vec<f64>,
    pub weights: Vec<f64>,
}

impl GaussRule {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.nodes.iter().copied().zip(self.weights.iter().copied())
    }

    /// Integrates `f` over `[lower, upper]`.
    pub fn integrate<F>(&self, lower: f64, upper: f64, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let half_width = 0.5 * (upper - lower);
        let mid = 0.5 * (upper + lower);
        half_width
            * self
                .iter()
                .map(|(z, w)| w * f(mid + half_width * z))
                .sum::<f64>()
    }
}

/// Builds the `n`-point rule by Newton iteration on the Legendre recurrence.
///
/// Nodes are returned in ascending order.
pub fn gauss_legendre(n: usize) -> GaussRule {
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];
    let half = n.div_ceil(2);
    let nf = n as f64;

    for i in 0..half {
        let mut z = (PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
        let mut derivative = 1.0;
        for _ in 0..MAX_NEWTON_STEPS {
            let (p_n, p_prev) = legendre_pair(n, z);
            derivative = nf * (z * p_n - p_prev) / (z * z - 1.0);
            let step = p_n / derivative;
            z -= step;
            if step.abs() <= NEWTON_TOLERANCE {
                break;
            }
        }
        let w = 2.0 / ((1.0 - z * z) * derivative * derivative);
        nodes[i] = -z;
        nodes[n - 1 - i] = z;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }

    GaussRule { nodes, weights }
}

// Returns (P_n(z), P_{n-1}(z)).
#[inline]
fn legendre_pair(n: usize, z: f64) -> (f64, f64) {
    let mut p1 = 1.0;
    let mut p2 = 0.0;
    for j in 1..=n {
        let jf = j as f64;
        let p3 = p2;
        p2 = p1;
        p1 = ((2.0 * jf - 1.0) * z * p2 - (jf - 1.0) * p3) / jf;
    }
    (p1, p2)
}

/// Shared 76-point rule used for orientation averaging.
pub static GAUSS76: Lazy<GaussRule> = Lazy::new(|| gauss_legendre(76));
