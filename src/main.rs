use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use warpkeys::cli::{self, CliArgs};
use warpkeys::config::AppConfig;

fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();
    warpkeys::tracing::init(args.verbose);

    let config = AppConfig::load();

    let mut stdout = std::io::stdout().lock();
    let clean = cli::run(args.command, &config, &mut stdout)?;

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
