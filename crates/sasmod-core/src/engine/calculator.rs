use crate::core::models::info::ModelInfo;
use crate::core::params::ParameterSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Monodisperse evaluation of one model at fixed parameter values.
///
/// `intensity(q) = scale * Iq(q) / V + background`, where `V` is the model's
/// form volume. A zero form volume means there is no scattering material and
/// yields the background alone.
#[derive(Debug, Clone)]
pub struct Calculator<'a> {
    model: &'a ModelInfo,
    parameters: ParameterSet<'a>,
    scale: f64,
    background: f64,
    volume: f64,
}

impl<'a> Calculator<'a> {
    pub fn new(model: &'a ModelInfo, parameters: ParameterSet<'a>) -> Self {
        let volume = model.eval_form_volume(parameters.values());
        Self {
            model,
            parameters,
            scale: 1.0,
            background: 0.0,
            volume,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_background(mut self, background: f64) -> Self {
        self.background = background;
        self
    }

    pub fn model(&self) -> &'a ModelInfo {
        self.model
    }

    pub fn parameters(&self) -> &ParameterSet<'a> {
        &self.parameters
    }

    #[inline]
    fn normalise(&self, raw: f64) -> f64 {
        if self.volume == 0.0 {
            self.background
        } else {
            self.scale * raw / self.volume + self.background
        }
    }

    #[inline]
    pub fn intensity(&self, q: f64) -> f64 {
        self.normalise(self.model.eval_iq(q, self.parameters.values()))
    }

    #[inline]
    pub fn intensity_2d(&self, qx: f64, qy: f64) -> f64 {
        self.normalise(self.model.eval_iqxy(qx, qy, self.parameters.values()))
    }

    pub fn evaluate(&self, q: &[f64]) -> Vec<f64> {
        #[cfg(not(feature = "parallel"))]
        let iterator = q.iter();

        #[cfg(feature = "parallel")]
        let iterator = q.par_iter();

        iterator.map(|&q| self.intensity(q)).collect()
    }

    /// Oriented intensity along `qx` at fixed `qy`.
    pub fn evaluate_2d(&self, qx: &[f64], qy: f64) -> Vec<f64> {
        #[cfg(not(feature = "parallel"))]
        let iterator = qx.iter();

        #[cfg(feature = "parallel")]
        let iterator = qx.par_iter();

        iterator.map(|&qx| self.intensity_2d(qx, qy)).collect()
    }

    pub fn form_volume(&self) -> f64 {
        self.volume
    }

    pub fn effective_radius(&self) -> f64 {
        self.model.eval_effective_radius(self.parameters.values())
    }

    pub fn volume_ratio(&self) -> f64 {
        self.model.eval_volume_ratio(self.parameters.values())
    }
}
