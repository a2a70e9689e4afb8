//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "loadmap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect how units map to the boot, platform and application domains")]
pub struct Cli {
    /// Settings file (TOML, JSON or YAML); `LOADMAP__*` variables override it
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Print the built-in boot, platform and native-access sets
    Membership {},
    /// Resolve unit names against a unit configuration
    Resolve {
        /// Unit configuration file (`[[units]]` entries with `name` and `requires`)
        #[arg(short, long, value_name = "FILE")]
        units: PathBuf,
        /// Names to resolve (every configured unit when omitted)
        names: Vec<String>,
    },
    /// Define every configured unit to its domain
    Define {
        #[arg(short, long, value_name = "FILE")]
        units: PathBuf,
    },
}
