//! Terminal light meter.

use anyhow::{Context, Result};
use log::info;
use luxview::{run, AppConfig, Cli, TerminalPlatform, TerminalSession};
use std::fs::OpenOptions;

fn init_logging(config: &AppConfig) -> Result<()> {
    let path = config.logging.file_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    // The terminal belongs to the meter screen, so logs go to the file.
    env_logger::Builder::new()
        .parse_filters(&config.logging.level)
        .parse_env("LUXVIEW_LOG")
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    config.apply_cli_overrides(&cli)?;
    init_logging(&config)?;

    info!("Starting luxview ({:?} mode)", config.sampling.mode);

    let status = {
        let _session = TerminalSession::enter(true).context("failed to set up terminal")?;
        let mut platform = TerminalPlatform::new(config.display.clone());
        run(&mut platform, &config, cli.param.as_deref())
    };

    info!("luxview exited with status {status}");
    std::process::exit(status);
}
