use crate::core::io::curve::{Curve, read_q_values};
use crate::core::models::registry::ModelRegistry;
use crate::core::params::load_parameter_file;
use crate::engine::calculator::Calculator;
use crate::engine::config::{ConfigError, EvaluationConfig, QSource};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument, warn};

/// Number of q values evaluated between progress increments.
const BLOCK_SIZE: usize = 256;

#[instrument(skip_all, name = "evaluate_workflow", fields(model = %config.model))]
pub fn run(
    registry: &ModelRegistry,
    config: &EvaluationConfig,
    reporter: &ProgressReporter,
) -> Result<Curve, EngineError> {
    let (calculator, q) = reporter.phase("Preparation", || prepare(registry, config))?;

    let model = calculator.model();
    if config.qy.is_some() && !model.parameters.has_orientation() {
        debug!(
            "Model '{}' is isotropic; oriented evaluation reduces to |q|.",
            model.name
        );
    }

    let intensity = reporter.phase("Evaluation", || {
        evaluate_blocks(&calculator, &q, config.qy, reporter)
    });

    let non_finite = intensity.iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        warn!(
            "{} of {} intensities are not finite; check the q range and parameter values.",
            non_finite,
            intensity.len()
        );
    }

    info!("Evaluated '{}' at {} q values.", model.name, q.len());
    Ok(Curve {
        model: model.name.clone(),
        q,
        intensity,
        qy: config.qy,
    })
}

fn prepare<'a>(
    registry: &'a ModelRegistry,
    config: &EvaluationConfig,
) -> Result<(Calculator<'a>, Vec<f64>), EngineError> {
    let model = registry
        .resolve(&config.model)
        .map_err(|_| EngineError::UnknownModel(config.model.clone()))?;
    if model.name != config.model {
        info!("Resolved legacy model name '{}' to '{}'.", config.model, model.name);
    }

    let mut parameters = model.parameters.bind();
    if let Some(path) = &config.parameter_file {
        let values = load_parameter_file(path)?;
        debug!("Loaded {} parameter value(s) from {:?}.", values.len(), path);
        parameters.apply_overrides(values.iter().map(|(name, value)| (name.as_str(), *value)))?;
    }
    parameters.apply_overrides(
        config
            .overrides
            .iter()
            .map(|(name, value)| (name.as_str(), *value)),
    )?;
    for (name, value) in parameters.iter() {
        debug!(parameter = name, value, "Bound parameter");
    }

    let q = match &config.q {
        QSource::Grid(grid) => grid.values(),
        QSource::Values(values) => values.clone(),
        QSource::File(path) => read_q_values(path)?,
    };
    if q.is_empty() {
        return Err(ConfigError::EmptyQValues.into());
    }

    let calculator = Calculator::new(model, parameters)
        .with_scale(config.scale)
        .with_background(config.background);
    Ok((calculator, q))
}

fn evaluate_blocks(
    calculator: &Calculator,
    q: &[f64],
    qy: Option<f64>,
    reporter: &ProgressReporter,
) -> Vec<f64> {
    reporter.report(Progress::EvaluationStart {
        points: q.len() as u64,
    });
    let mut intensity = Vec::with_capacity(q.len());
    for block in q.chunks(BLOCK_SIZE) {
        match qy {
            None => intensity.extend(calculator.evaluate(block)),
            Some(qy) => intensity.extend(calculator.evaluate_2d(block, qy)),
        }
        reporter.report(Progress::PointsEvaluated {
            count: block.len() as u64,
        });
    }
    reporter.report(Progress::EvaluationFinish);
    intensity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::ParameterError;
    use crate::engine::config::{EvaluationConfigBuilder, QGrid, QSpacing};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn registry() -> ModelRegistry {
        ModelRegistry::with_builtins().unwrap()
    }

    #[test]
    fn evaluates_hardsphere_on_explicit_q_values() {
        let config = EvaluationConfigBuilder::new()
            .model("hardsphere")
            .q_values(vec![0.001, 0.1])
            .build()
            .unwrap();
        let curve = run(&registry(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(curve.model, "hardsphere");
        assert_eq!(curve.q, vec![0.001, 0.1]);
        assert!((curve.intensity[0] - 0.209128).abs() < 1e-5);
        assert!((curve.intensity[1] - 0.930587).abs() < 1e-5);
    }

    #[test]
    fn legacy_name_and_overrides_are_honoured() {
        let config = EvaluationConfigBuilder::new()
            .model("GuinierModel")
            .parameter("rg", 31.5)
            .scale(2.0)
            .background(0.1)
            .q_values(vec![0.005])
            .build()
            .unwrap();
        let curve = run(&registry(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(curve.model, "guinier");
        let expected = 2.0 * 0.991_765_342_082_266_5 + 0.1;
        assert!((curve.intensity[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn explicit_overrides_win_over_parameter_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.toml");
        fs::write(&path, "effect_radius = 10.0\nvolfraction = 0.1\n").unwrap();
        let config = EvaluationConfigBuilder::new()
            .model("hardsphere")
            .parameter_file(path)
            .parameter("volfraction", 0.3)
            .q_values(vec![0.02])
            .build()
            .unwrap();
        let curve = run(&registry(), &config, &ProgressReporter::new()).unwrap();
        let expected = crate::core::models::hardsphere::iq(0.02, 10.0, 0.3);
        assert_eq!(curve.intensity[0], expected);
    }

    #[test]
    fn q_values_can_come_from_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("q.csv");
        fs::write(&path, "q\n0.01\n0.02\n0.03\n").unwrap();
        let config = EvaluationConfigBuilder::new()
            .model("guinier")
            .q_file(path)
            .build()
            .unwrap();
        let curve = run(&registry(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(curve.q, vec![0.01, 0.02, 0.03]);
        assert_eq!(curve.len(), 3);
    }

    #[test]
    fn oriented_evaluation_records_qy() {
        let config = EvaluationConfigBuilder::new()
            .model("core_shell_cylinder")
            .q_values(vec![0.01])
            .qy(0.02)
            .build()
            .unwrap();
        let curve = run(&registry(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(curve.qy, Some(0.02));
        assert!((curve.intensity[0] / 88.366_711_945_015_01 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unknown_model_is_reported() {
        let config = EvaluationConfigBuilder::new()
            .model("nonexistent")
            .q_values(vec![0.1])
            .build()
            .unwrap();
        let err = run(&registry(), &config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::UnknownModel(ref name) if name == "nonexistent"));
    }

    #[test]
    fn out_of_bounds_override_is_rejected() {
        let config = EvaluationConfigBuilder::new()
            .model("hardsphere")
            .parameter("volfraction", 0.9)
            .q_values(vec![0.1])
            .build()
            .unwrap();
        let err = run(&registry(), &config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Parameter {
                source: ParameterError::OutOfBounds { .. }
            }
        ));
    }

    #[test]
    fn empty_q_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "q\n").unwrap();
        let config = EvaluationConfigBuilder::new()
            .model("guinier")
            .q_file(path)
            .build()
            .unwrap();
        let err = run(&registry(), &config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config {
                source: ConfigError::EmptyQValues
            }
        ));
    }

    #[test]
    fn progress_reports_points_block_by_block() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let grid = QGrid::new(0.001, 0.5, 600, QSpacing::Log).unwrap();
        let config = EvaluationConfigBuilder::new()
            .model("hardsphere")
            .q_grid(grid)
            .build()
            .unwrap();
        let curve = run(&registry(), &config, &reporter).unwrap();
        drop(reporter);
        assert_eq!(curve.len(), 600);

        let events = events.into_inner().unwrap();
        assert!(events.contains(&Progress::EvaluationStart { points: 600 }));
        let blocks: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                Progress::PointsEvaluated { count } => Some(*count),
                _ => None,
            })
            .collect();
        assert_eq!(blocks, vec![256, 256, 88]);
        assert!(events.contains(&Progress::EvaluationFinish));
        assert_eq!(
            events.first(),
            Some(&Progress::PhaseStart {
                name: "Preparation"
            })
        );
        assert_eq!(events.last(), Some(&Progress::PhaseFinish));
    }
}
