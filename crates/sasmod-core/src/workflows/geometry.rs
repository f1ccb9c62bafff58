use crate::core::models::registry::ModelRegistry;
use crate::engine::error::EngineError;
use tracing::{info, instrument};

/// Geometric quantities of a model at fixed parameter values.
///
/// `effective_radius` and `volume_ratio` are `None` when the model does not
/// define them; callers coupling to a structure factor then fall back to an
/// effective radius of 0 and a volume ratio of 1.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryReport {
    pub model: String,
    pub form_volume: f64,
    pub effective_radius: Option<f64>,
    pub volume_ratio: Option<f64>,
}

#[instrument(skip_all, name = "geometry_workflow", fields(model = model_name))]
pub fn run<'a, I>(
    registry: &ModelRegistry,
    model_name: &str,
    overrides: I,
) -> Result<GeometryReport, EngineError>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let model = registry
        .resolve(model_name)
        .map_err(|_| EngineError::UnknownModel(model_name.to_string()))?;
    let values = model.values_with(overrides)?;

    let report = GeometryReport {
        model: model.name.clone(),
        form_volume: model.eval_form_volume(&values),
        effective_radius: model
            .effective_radius
            .map(|_| model.eval_effective_radius(&values)),
        volume_ratio: model.volume_ratio.map(|_| model.eval_volume_ratio(&values)),
    };
    info!(
        "Geometry of '{}': V = {}, ER = {:?}, VR = {:?}",
        report.model, report.form_volume, report.effective_radius, report.volume_ratio
    );
    Ok(report)
}
