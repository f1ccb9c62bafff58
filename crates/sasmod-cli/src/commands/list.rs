use crate::cli::ListArgs;
use crate::error::Result;
use sasmod::core::models::info::Category;
use sasmod::core::models::registry::ModelRegistry;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: ListArgs) -> Result<()> {
    let registry = ModelRegistry::with_builtins()?;
    let stdout = io::stdout();
    let shown = render(&registry, args.category.as_deref(), &mut stdout.lock())?;
    info!("Listed {} of {} registered model(s).", shown, registry.len());
    Ok(())
}

/// `shape` selects every shape family; anything else must match exactly.
fn matches_category(filter: &str, category: &Category) -> bool {
    let filter = filter.trim();
    if filter.eq_ignore_ascii_case("shape") {
        return matches!(category, Category::Shape(_));
    }
    filter.parse::<Category>().is_ok_and(|wanted| &wanted == category)
}

fn render<W: Write>(registry: &ModelRegistry, category: Option<&str>, out: &mut W) -> Result<usize> {
    let mut shown = 0;
    for model in registry.iter() {
        if let Some(filter) = category {
            if !matches_category(filter, &model.category) {
                continue;
            }
        }
        writeln!(out, "{:<22} {:<18} {}", model.name, model.category, model.title)?;
        shown += 1;
    }
    if shown == 0 {
        writeln!(out, "No models match the requested category.")?;
    }
    Ok(shown)
}
