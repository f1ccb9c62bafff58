use crate::cli::EvalArgs;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::utils::progress::EvalProgress;
use sasmod::core::io::curve::{self, Curve};
use sasmod::core::models::registry::ModelRegistry;
use sasmod::engine::progress::ProgressReporter;
use sasmod::workflows;
use std::io;
use tracing::{info, warn};

pub fn run(args: EvalArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(&args)?;

    let progress = if quiet {
        EvalProgress::hidden()
    } else {
        EvalProgress::stderr()
    };
    let reporter = ProgressReporter::with_callback(progress.callback());

    let curve = evaluate(&app_config, &reporter)?;
    write_curve(&curve, &app_config)?;

    if !quiet {
        match &app_config.output {
            Some(path) => eprintln!(
                "✓ {} point(s) of '{}' written to: {}",
                curve.len(),
                curve.model,
                path.display()
            ),
            None => eprintln!("✓ {} point(s) of '{}' evaluated.", curve.len(), curve.model),
        }
    }
    Ok(())
}

fn evaluate(app_config: &AppConfig, reporter: &ProgressReporter) -> Result<Curve> {
    let registry = ModelRegistry::with_builtins()?;
    info!("Invoking the core evaluation workflow...");
    let curve = workflows::evaluate::run(&registry, &app_config.core_config, reporter)?;
    if curve.is_empty() {
        warn!("Evaluation produced no points.");
    }
    Ok(curve)
}

fn write_curve(curve: &Curve, app_config: &AppConfig) -> Result<()> {
    match &app_config.output {
        Some(path) => {
            info!("Writing {} point(s) to {:?}", curve.len(), path);
            curve::write_csv_file(curve, path).map_err(|e| CliError::Output {
                path: path.clone(),
                source: e.into(),
            })
        }
        None => {
            let stdout = io::stdout();
            curve::write_csv(curve, stdout.lock())
                .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to write CSV to stdout: {}", e)))
        }
    }
}
