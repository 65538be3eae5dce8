//! List command implementation
//!
//! Prints every component in the registry with its description. `add` with no
//! arguments prints the same listing.

use std::path::PathBuf;

use crate::cli::ListArgs;
use crate::commands::helpers;
use crate::error::Result;
use crate::registry::Registry;
use crate::ui::logger;

/// Run list command
pub fn run(registry: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let registry = helpers::load_registry(registry, args.validation.mode())?;
    print_catalog(&registry);
    Ok(())
}

/// Components first, then the utilities they pull in
pub fn print_catalog(registry: &Registry) {
    if registry.components.is_empty() {
        logger::info("The registry has no components.");
        return;
    }

    logger::title(&format!("Available components ({})", registry.components.len()));
    let width = registry
        .components
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0);
    for (key, component) in &registry.components {
        println!(
            "  {}  {}",
            logger::bold(&format!("{key:<width$}")),
            component.entry.description
        );
    }

    if !registry.utils.is_empty() {
        logger::blank();
        logger::dim(&format!(
            "Utilities installed as needed: {}",
            registry
                .utils
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
}
