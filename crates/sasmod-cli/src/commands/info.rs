use crate::cli::InfoArgs;
use crate::error::Result;
use sasmod::core::models::info::ModelInfo;
use sasmod::core::models::registry::ModelRegistry;
use std::io::{self, Write};

pub fn run(args: InfoArgs) -> Result<()> {
    let registry = ModelRegistry::with_builtins()?;
    let model = registry.resolve(&args.model)?;
    let stdout = io::stdout();
    render(model, &mut stdout.lock())
}

fn support(present: bool) -> &'static str {
    if present { "yes" } else { "no" }
}

fn render<W: Write>(model: &ModelInfo, out: &mut W) -> Result<()> {
    writeln!(out, "{} ({})", model.name, model.category)?;
    writeln!(out, "{}", model.title)?;
    writeln!(out)?;
    writeln!(out, "{}", model.description)?;
    writeln!(out)?;

    writeln!(
        out,
        "{:<16} {:<12} {:>12} {:<24} {:<12}",
        "parameter", "units", "default", "bounds", "kind"
    )?;
    for parameter in model.parameters.iter() {
        writeln!(
            out,
            "{:<16} {:<12} {:>12} {:<24} {:<12}",
            parameter.name,
            parameter.units,
            parameter.default,
            parameter.bounds.to_string(),
            parameter.kind.to_string()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "oriented kernel:  {}", support(model.iqxy.is_some()))?;
    writeln!(out, "form volume:      {}", support(model.form_volume.is_some()))?;
    writeln!(out, "effective radius: {}", support(model.effective_radius.is_some()))?;
    writeln!(out, "volume ratio:     {}", support(model.volume_ratio.is_some()))?;
    Ok(())
}
