//! Command-line interface argument parsing.

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Luxview: ambient light meter for the terminal
#[derive(Parser, Debug)]
#[command(name = "luxview")]
#[command(author = "Luxview Contributors")]
#[command(version)]
#[command(about = "Samples a BH1750-class light sensor and shows the reading", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "luxview.toml")]
    pub config: PathBuf,

    /// Log level: off, error, warn, info, debug or trace (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<LevelFilter>,

    /// Log file (overrides config file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Sampling tick interval in milliseconds (overrides config file)
    #[arg(short, long)]
    pub tick_ms: Option<u64>,

    /// Conversion settle delay in milliseconds (overrides config file)
    #[arg(short, long)]
    pub settle_ms: Option<u64>,

    /// Opaque launch parameter, passed through untouched
    pub param: Option<String>,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(Cli::try_parse_from(["luxview", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::parse_from(["luxview"]);
        assert_eq!(cli.config, PathBuf::from("luxview.toml"));
        assert_eq!(cli.log_level, None);
        assert_eq!(cli.tick_ms, None);
        assert_eq!(cli.param, None);
    }

    #[test]
    fn test_overrides_and_param() {
        let cli = Cli::parse_from([
            "luxview",
            "--config",
            "/etc/luxview.toml",
            "--log-level",
            "trace",
            "--settle-ms",
            "180",
            "desk",
        ]);
        assert_eq!(cli.config, PathBuf::from("/etc/luxview.toml"));
        assert_eq!(cli.log_level, Some(LevelFilter::Trace));
        assert_eq!(cli.settle_ms, Some(180));
        assert_eq!(cli.param.as_deref(), Some("desk"));
    }
}
