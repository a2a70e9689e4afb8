use loadmap::prelude::*;

/// Prints each built-in set on one line, names sorted.
pub fn print_membership() {
    println!("boot: {}", joined(boot_units()));
    println!("platform: {}", joined(platform_units()));
    println!("native_access: {}", joined(native_access_units()));
}

fn joined(set: &UnitSet) -> String {
    let mut names: Vec<&str> = set.iter().map(UnitName::as_str).collect();
    names.sort_unstable();
    names.join(", ")
}
