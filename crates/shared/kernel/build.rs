use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::{env, fs};

const MANIFEST_ENV: &str = "LOADMAP_MEMBERSHIP";
const DEFAULT_MANIFEST: &str = "membership.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Manifest {
    boot: BTreeSet<String>,
    platform: BTreeSet<String>,
    native_access: BTreeSet<String>,
}

fn main() {
    println!("cargo:rerun-if-env-changed={MANIFEST_ENV}");

    let manifest_dir = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let path = env::var_os(MANIFEST_ENV)
        .map_or_else(|| manifest_dir.join(DEFAULT_MANIFEST), PathBuf::from);
    println!("cargo:rerun-if-changed={}", path.display());

    let manifest = if path.is_file() {
        let raw = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read membership manifest {}: {e}", path.display()));
        toml::from_str::<Manifest>(&raw)
            .unwrap_or_else(|e| panic!("invalid membership manifest {}: {e}", path.display()))
    } else {
        println!(
            "cargo:warning=membership manifest {} not found; every non-boot unit will resolve to the application domain",
            path.display()
        );
        Manifest::default()
    };

    for name in manifest.boot.iter().chain(&manifest.platform).chain(&manifest.native_access) {
        assert!(
            !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c.is_control()),
            "invalid unit name {name:?} in membership manifest {}",
            path.display()
        );
    }

    let overlap: Vec<&String> = manifest.boot.intersection(&manifest.platform).collect();
    assert!(
        overlap.is_empty(),
        "units listed as both boot and platform in {}: {overlap:?}",
        path.display()
    );

    let mut out = String::new();
    write_list(&mut out, "BOOT_UNITS", &manifest.boot);
    write_list(&mut out, "PLATFORM_UNITS", &manifest.platform);
    write_list(&mut out, "NATIVE_ACCESS_UNITS", &manifest.native_access);

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR"));
    fs::write(out_dir.join("membership.rs"), out).expect("write generated membership table");
}

fn write_list(out: &mut String, ident: &str, names: &BTreeSet<String>) {
    let _ = writeln!(out, "pub(crate) const {ident}: &[&str] = &[");
    for name in names {
        let _ = writeln!(out, "    {name:?},");
    }
    let _ = writeln!(out, "];");
}
