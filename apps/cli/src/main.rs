#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod args;
pub mod handlers;

use crate::args::{AppCommands, Cli};
use crate::handlers::{define, membership, resolve};

use anyhow::Result;
use clap::Parser;
use loadmap::kernel::config::load_config;
use loadmap::prelude::LoadmapConfig;
use loadmap_logger::LoggerBuilder;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings: LoadmapConfig = load_config(cli.settings.as_deref())?;
    let _logger = LoggerBuilder::from_config(env!("CARGO_PKG_NAME"), &settings.logging)?.init()?;

    match cli.command {
        AppCommands::Membership {} => membership::print_membership(),
        AppCommands::Resolve { units, names } => resolve::resolve_units(&units, &names)?,
        AppCommands::Define { units } => define::define_units(&units)?,
    }

    Ok(())
}
