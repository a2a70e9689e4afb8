use anyhow::{Context, Result};
use loadmap::kernel::config::load_configuration;
use loadmap::prelude::*;
use std::path::Path;

/// Defines the configured units with the built-in resolver and prints each placement.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or definition is refused.
pub fn define_units(units: &Path) -> Result<()> {
    let cf = load_configuration(units)?;
    let layer = UnitLayer::define(&cf, &mapping_function(&cf))
        .with_context(|| format!("Defining units from {}", units.display()))?;

    for unit in layer.iter() {
        let native = if unit.native_access() { "native" } else { "-" };
        println!("{}\t{}\t{native}", unit.name(), unit.domain());
    }

    tracing::info!(units = layer.len(), "Unit layer defined");
    Ok(())
}
