use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use salary_cli::{app, cli::Cli, config::AppConfig, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(cli.overrides());
    logging::init_logging(&config.log_level, config.log_file.as_deref())?;
    debug!(?config, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::dispatch(config, &cli.command, &mut out)?;
    out.flush().context("cannot flush output")?;

    Ok(())
}
