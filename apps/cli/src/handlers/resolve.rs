use anyhow::Result;
use loadmap::kernel::config::load_configuration;
use loadmap::prelude::*;
use std::path::Path;

/// Marker for configured units whose domain is implicit (boot).
const IMPLICIT: &str = "-";
const ABSENT: &str = "absent";

/// Resolves `names` (or every configured unit) and prints `name<TAB>domain` lines.
///
/// # Errors
/// Returns an error if the unit configuration cannot be loaded.
pub fn resolve_units(units: &Path, names: &[String]) -> Result<()> {
    let cf = load_configuration(units)?;
    let resolver = mapping_function(&cf);

    let requested: Vec<&str> = if names.is_empty() {
        cf.names().map(UnitName::as_str).collect()
    } else {
        names.iter().map(String::as_str).collect()
    };

    for name in requested {
        println!("{name}\t{}", describe(&cf, &resolver, name));
    }

    Ok(())
}

fn describe(cf: &Configuration, resolver: &BuiltinResolver, name: &str) -> String {
    match resolver.resolve(name) {
        Some(domain) => domain.tag().to_string(),
        None if cf.contains(name) => IMPLICIT.to_owned(),
        None => ABSENT.to_owned(),
    }
}
