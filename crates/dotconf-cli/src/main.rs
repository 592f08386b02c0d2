//! Main entry point for the dotconf command line tool.

use anyhow::{Context, Result};
use clap::Parser;
use dotconf_cli::{run, Args, CliSettings};
use dotconf_common::init_logging;
use tracing::error;

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = CliSettings::resolve(&args).context("failed to resolve settings")?;
    init_logging(&settings.logging)?;

    match run(&args, &settings) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "command failed");
            Err(e.into())
        }
    }
}
