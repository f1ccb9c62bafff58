use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::EvalArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use sasmod::engine::config::{self as core_config, QGrid, QSpacing};
use tracing::debug;

pub fn build_config(args: &EvalArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let scale = args.scale.or(file_config.scale).unwrap_or(defaults.scale);
    let background = args
        .background
        .or(file_config.background)
        .unwrap_or(defaults.background);
    let qy = args.qy.or(file_config.qy);

    let mut builder = core_config::EvaluationConfigBuilder::new()
        .model(args.model.as_str())
        .scale(scale)
        .background(background);

    let grid_flag_given = args.q_min.is_some()
        || args.q_max.is_some()
        || args.points.is_some()
        || args.spacing.linear
        || args.spacing.log;
    let q_file = args
        .q_file
        .clone()
        .or_else(|| file_config.q_file.take().filter(|_| !grid_flag_given));

    builder = match q_file {
        Some(path) => {
            debug!("Reading q values from {:?}", path);
            builder.q_file(path)
        }
        None => builder.q_grid(merge_q_grid(args, &file_config, &defaults)?),
    };

    if let Some(qy) = qy {
        builder = builder.qy(qy);
    }
    if let Some(path) = &args.params {
        builder = builder.parameter_file(path.clone());
    }
    if let Some(parameters) = file_config.parameters.take() {
        builder = builder.parameters(parameters);
    }

    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        output: args.output.clone(),
        core_config,
    })
}

fn merge_q_grid(
    args: &EvalArgs,
    file_config: &FileConfig,
    defaults: &DefaultsConfig,
) -> Result<QGrid> {
    let file_range = file_config.q_range.clone().unwrap_or_default();
    let spacing = match (args.spacing.linear, args.spacing.log) {
        (true, false) => QSpacing::Linear,
        (false, true) => QSpacing::Log,
        _ => file_range.spacing.unwrap_or(defaults.spacing),
    };
    QGrid::new(
        args.q_min.or(file_range.min).unwrap_or(defaults.q_min),
        args.q_max.or(file_range.max).unwrap_or(defaults.q_max),
        args.points.or(file_range.points).unwrap_or(defaults.points),
        spacing,
    )
    .map_err(|e| CliError::Config(e.to_string()))
}

/// Applies `-S KEY=VALUE` assignments on top of the file configuration.
///
/// Configuration keys use their file spelling (`scale`, `q-range.points`, ...);
/// any other key, or `parameters.NAME`, sets a model parameter.
fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let (key, value_str) =
            parser::split_assignment(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "scale" => config.scale = Some(parse_float(key, value_str)?),
            "background" => config.background = Some(parse_float(key, value_str)?),
            "qy" => config.qy = Some(parse_float(key, value_str)?),
            "q-range.min" => {
                config.q_range.get_or_insert_with(Default::default).min =
                    Some(parse_float(key, value_str)?);
            }
            "q-range.max" => {
                config.q_range.get_or_insert_with(Default::default).max =
                    Some(parse_float(key, value_str)?);
            }
            "q-range.points" => {
                config.q_range.get_or_insert_with(Default::default).points =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
            }
            "q-range.spacing" => {
                config.q_range.get_or_insert_with(Default::default).spacing =
                    Some(value_str.parse().map_err(|e: core_config::ConfigError| {
                        CliError::Config(e.to_string())
                    })?);
            }
            _ => {
                let name = key.strip_prefix("parameters.").unwrap_or(key);
                let value = parse_float(key, value_str)?;
                config
                    .parameters
                    .get_or_insert_with(Default::default)
                    .insert(name.to_string(), value);
            }
        }
    }
    Ok(config)
}

fn parse_float(key: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid float value for {}: {}", key, value)))
}
