use crate::core::params::{ParameterError, ParameterTable};
use std::fmt;
use std::str::FromStr;

/// Intensity kernel: `q` plus the parameter values in table order.
pub type IqFn = fn(q: f64, values: &[f64]) -> f64;
/// Oriented intensity kernel: `(qx, qy)` plus the parameter values in table order.
pub type IqxyFn = fn(qx: f64, qy: f64, values: &[f64]) -> f64;
/// Geometry helper receiving only the volume-class values, in table order.
pub type VolumeFn = fn(volume_values: &[f64]) -> f64;
/// Returns `(whole, part)` volumes from the volume-class values.
pub type VolumeRatioFn = fn(volume_values: &[f64]) -> (f64, f64);

/// Model family, as used to group models in listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    StructureFactor,
    ShapeIndependent,
    /// Particle shape family, e.g. `Shape("cylinder")`.
    Shape(String),
    Other(String),
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "structure-factor" => Category::StructureFactor,
            "shape-independent" => Category::ShapeIndependent,
            _ => match s.strip_prefix("shape:") {
                Some(family) => Category::Shape(family.to_string()),
                None => Category::Other(s.to_string()),
            },
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::StructureFactor => f.write_str("structure-factor"),
            Category::ShapeIndependent => f.write_str("shape-independent"),
            Category::Shape(family) => write!(f, "shape:{}", family),
            Category::Other(other) => f.write_str(other),
        }
    }
}

/// Complete definition of a scattering model.
///
/// Kernels are plain function pointers. The intensity kernels receive every
/// parameter value positionally in [`ParameterTable`] order; the geometry
/// helpers receive only the volume-class values. Missing optional functions
/// fall back to the conventional defaults: an isotropic oriented kernel, a
/// form volume of 1, an effective radius of 0 and a volume ratio of 1.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub parameters: ParameterTable,
    pub iq: IqFn,
    pub iqxy: Option<IqxyFn>,
    pub form_volume: Option<VolumeFn>,
    pub effective_radius: Option<VolumeFn>,
    pub volume_ratio: Option<VolumeRatioFn>,
}

impl ModelInfo {
    pub fn new(
        name: &str,
        title: &str,
        description: &str,
        category: Category,
        parameters: ParameterTable,
        iq: IqFn,
    ) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category,
            parameters,
            iq,
            iqxy: None,
            form_volume: None,
            effective_radius: None,
            volume_ratio: None,
        }
    }

    pub fn with_iqxy(mut self, iqxy: IqxyFn) -> Self {
        self.iqxy = Some(iqxy);
        self
    }

    pub fn with_form_volume(mut self, form_volume: VolumeFn) -> Self {
        self.form_volume = Some(form_volume);
        self
    }

    pub fn with_effective_radius(mut self, effective_radius: VolumeFn) -> Self {
        self.effective_radius = Some(effective_radius);
        self
    }

    pub fn with_volume_ratio(mut self, volume_ratio: VolumeRatioFn) -> Self {
        self.volume_ratio = Some(volume_ratio);
        self
    }

    pub fn is_structure_factor(&self) -> bool {
        self.category == Category::StructureFactor
    }

    /// Builds a value vector from the defaults with the given overrides,
    /// checking names and bounds.
    pub fn values_with<'a, I>(&self, overrides: I) -> Result<Vec<f64>, ParameterError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut set = self.parameters.bind();
        set.apply_overrides(overrides)?;
        Ok(set.values().to_vec())
    }

    #[inline]
    pub fn eval_iq(&self, q: f64, values: &[f64]) -> f64 {
        debug_assert_eq!(values.len(), self.parameters.len());
        (self.iq)(q, values)
    }

    #[inline]
    pub fn eval_iqxy(&self, qx: f64, qy: f64, values: &[f64]) -> f64 {
        debug_assert_eq!(values.len(), self.parameters.len());
        match self.iqxy {
            Some(iqxy) => iqxy(qx, qy, values),
            None => (self.iq)((qx * qx + qy * qy).sqrt(), values),
        }
    }

    pub fn eval_form_volume(&self, values: &[f64]) -> f64 {
        match self.form_volume {
            Some(form_volume) => form_volume(&self.parameters.volume_values(values)),
            None => 1.0,
        }
    }

    pub fn eval_effective_radius(&self, values: &[f64]) -> f64 {
        match self.effective_radius {
            Some(effective_radius) => effective_radius(&self.parameters.volume_values(values)),
            None => 0.0,
        }
    }

    /// Ratio of the part volume to the whole volume.
    pub fn eval_volume_ratio(&self, values: &[f64]) -> f64 {
        match self.volume_ratio {
            Some(volume_ratio) => {
                let (whole, part) = volume_ratio(&self.parameters.volume_values(values));
                if whole == 0.0 { 1.0 } else { part / whole }
            }
            None => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{Bounds, ModelParameter, ParameterKind};

    fn linear_iq(q: f64, values: &[f64]) -> f64 {
        values[0] * q + values[1]
    }

    fn box_volume(v: &[f64]) -> f64 {
        v[0] * v[1]
    }

    fn box_ratio(v: &[f64]) -> (f64, f64) {
        (v[0] * v[1], 0.5 * v[0] * v[1])
    }

    fn toy_model() -> ModelInfo {
        let table = ParameterTable::new(vec![
            ModelParameter::new("slope", "", 2.0, Bounds::UNBOUNDED, ParameterKind::Plain, ""),
            ModelParameter::new("width", "Ang", 3.0, Bounds::NON_NEGATIVE, ParameterKind::Volume, ""),
            ModelParameter::new("height", "Ang", 4.0, Bounds::NON_NEGATIVE, ParameterKind::Volume, ""),
        ])
        .unwrap();
        ModelInfo::new("toy", "Toy", "", "shape:box".parse().unwrap(), table, linear_iq)
    }

    #[test]
    fn category_round_trips_original_tags() {
        for tag in ["structure-factor", "shape-independent", "shape:cylinder"] {
            let category: Category = tag.parse().unwrap();
            assert_eq!(category.to_string(), tag);
        }
        assert_eq!(
            "shape:sphere".parse::<Category>().unwrap(),
            Category::Shape("sphere".to_string())
        );
    }

    #[test]
    fn isotropic_fallback_uses_q_magnitude() {
        let model = toy_model();
        let values = model.parameters.defaults();
        assert_eq!(model.eval_iqxy(3.0, 4.0, &values), model.eval_iq(5.0, &values));
    }

    #[test]
    fn geometry_defaults_apply_when_functions_are_absent() {
        let model = toy_model();
        let values = model.parameters.defaults();
        assert_eq!(model.eval_form_volume(&values), 1.0);
        assert_eq!(model.eval_effective_radius(&values), 0.0);
        assert_eq!(model.eval_volume_ratio(&values), 1.0);
    }

    #[test]
    fn geometry_functions_receive_volume_values_only() {
        let model = toy_model()
            .with_form_volume(box_volume)
            .with_volume_ratio(box_ratio);
        let values = model.values_with([("width", 5.0)]).unwrap();
        assert_eq!(model.eval_form_volume(&values), 20.0);
        assert_eq!(model.eval_volume_ratio(&values), 0.5);
    }

    #[test]
    fn zero_whole_volume_gives_unit_ratio() {
        let model = toy_model().with_volume_ratio(box_ratio);
        let values = model.values_with([("width", 0.0)]).unwrap();
        assert_eq!(model.eval_volume_ratio(&values), 1.0);
    }

    #[test]
    fn values_with_rejects_out_of_bounds_override() {
        let model = toy_model();
        assert!(model.values_with([("height", -1.0)]).is_err());
    }
}
