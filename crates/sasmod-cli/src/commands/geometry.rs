use crate::cli::GeometryArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use sasmod::core::models::registry::ModelRegistry;
use sasmod::core::params::load_parameter_file;
use sasmod::engine::error::EngineError;
use sasmod::workflows::{self, geometry::GeometryReport};
use std::io::{self, Write};

pub fn run(args: GeometryArgs) -> Result<()> {
    let values = collect_values(&args)?;
    let registry = ModelRegistry::with_builtins()?;
    let report = workflows::geometry::run(
        &registry,
        &args.model,
        values.iter().map(|(name, value)| (name.as_str(), *value)),
    )?;
    let stdout = io::stdout();
    render(&report, &mut stdout.lock())
}

/// Parameter file entries first, then `-S` assignments in command-line order.
fn collect_values(args: &GeometryArgs) -> Result<Vec<(String, f64)>> {
    let mut values = Vec::new();
    if let Some(path) = &args.params {
        let loaded = load_parameter_file(path).map_err(EngineError::from)?;
        values.extend(loaded);
    }
    for assignment in &args.set_values {
        let pair = parser::parse_parameter_assignment(assignment)
            .map_err(|e| CliError::Argument(e.to_string()))?;
        values.push(pair);
    }
    Ok(values)
}

fn render<W: Write>(report: &GeometryReport, out: &mut W) -> Result<()> {
    writeln!(out, "model:            {}", report.model)?;
    writeln!(out, "form volume:      {}", report.form_volume)?;
    match report.effective_radius {
        Some(radius) => writeln!(out, "effective radius: {}", radius)?,
        None => writeln!(out, "effective radius: not defined")?,
    }
    match report.volume_ratio {
        Some(ratio) => writeln!(out, "volume ratio:     {}", ratio)?,
        None => writeln!(out, "volume ratio:     not defined")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(model: &str, params: Option<std::path::PathBuf>, set_values: &[&str]) -> GeometryArgs {
        GeometryArgs {
            model: model.to_string(),
            params,
            set_values: set_values.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn set_values_follow_parameter_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shell.toml");
        fs::write(&path, "radius = 10.0\nthickness = 10.0\n").unwrap();

        let values = collect_values(&args("core_shell_sphere", Some(path), &["radius=20"])).unwrap();
        assert_eq!(
            values,
            vec![
                ("radius".to_string(), 10.0),
                ("thickness".to_string(), 10.0),
                ("radius".to_string(), 20.0),
            ]
        );
    }

    #[test]
    fn malformed_assignment_is_an_argument_error() {
        let result = collect_values(&args("vesicle", None, &["radius:20"]));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn missing_parameter_file_is_an_engine_error() {
        let result = collect_values(&args(
            "vesicle",
            Some("/nonexistent/params.toml".into()),
            &[],
        ));
        assert!(matches!(result, Err(CliError::Engine(EngineError::ParamLoad { .. }))));
    }

    #[test]
    fn report_marks_undefined_quantities() {
        let registry = ModelRegistry::with_builtins().unwrap();
        let report = workflows::geometry::run(&registry, "guinier", std::iter::empty::<(&str, f64)>()).unwrap();
        let mut buffer = Vec::new();
        render(&report, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("model:            guinier"));
        assert!(text.contains("effective radius: not defined"));
        assert!(text.contains("volume ratio:     not defined"));
    }

    #[test]
    fn vesicle_geometry_runs_end_to_end() {
        run(args("VesicleModel", None, &["thickness=30"])).unwrap();
    }
}
