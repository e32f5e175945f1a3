//! ipmap - IP range map builder
//!
//! # Usage
//!
//! ```bash
//! # Build every enabled map (default)
//! ipmap
//! ipmap --config ipmap.toml build --outdir /etc/haproxy/maps
//!
//! # Merge and reduce existing map files to stdout
//! ipmap reduce maps/ip_to_aws maps/ip_to_gcp > ip_to_cloud
//! ```

mod cmd;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ipmap_config::{Config, LogConfig, LogFormat, LogOutput};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Config file used when `--config` is not given
const DEFAULT_CONFIG: &str = "ipmap.toml";

/// ipmap - IP range map builder
#[derive(Parser, Debug)]
#[command(name = "ipmap")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: ipmap.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the maps defined in the configuration
    Build(cmd::build::BuildArgs),

    /// Merge map files and print the reduced result to stdout
    Reduce(cmd::reduce::ReduceArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Reduce(args)) => {
            // Config is optional here; it only contributes logging settings
            let config = match cli.config.as_deref() {
                Some(path) => Some(load_config(path)?),
                None => None,
            };
            let log = config.map(|c| c.log).unwrap_or_default();
            init_logging(&resolve_log_level(cli.log_level.as_deref(), Some(&log)), &log)?;
            cmd::reduce::run(args).await
        }
        command => {
            let args = match command {
                Some(Command::Build(args)) => args,
                _ => cmd::build::BuildArgs::default(),
            };
            let path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
            let config = load_config(&path)?;
            init_logging(
                &resolve_log_level(cli.log_level.as_deref(), Some(&config.log)),
                &config.log,
            )?;
            cmd::build::run(args, config).await
        }
    }
}

fn load_config(path: &Path) -> Result<Config> {
    Config::from_file(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level(cli_level: Option<&str>, config: Option<&LogConfig>) -> String {
    // CLI flag takes precedence
    if let Some(level) = cli_level {
        return level.to_string();
    }

    if let Some(log) = config {
        return log.level.as_str().to_string();
    }

    // Default
    "info".to_string()
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str, log: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let (writer, ansi) = match &log.output {
        LogOutput::Stdout => (BoxMakeWriter::new(io::stdout), true),
        LogOutput::Stderr => (BoxMakeWriter::new(io::stderr), true),
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {path}"))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_ansi(ansi)
        .with_writer(writer);

    match log.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(layer.json())
            .with(filter)
            .init(),
        LogFormat::Console => tracing_subscriber::registry()
            .with(layer)
            .with(filter)
            .init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipmap_config::LogLevel;

    #[test]
    fn test_cli_flag_wins() {
        let log = LogConfig {
            level: LogLevel::Warn,
            ..LogConfig::default()
        };
        assert_eq!(resolve_log_level(Some("trace"), Some(&log)), "trace");
    }

    #[test]
    fn test_config_level_used() {
        let log = LogConfig {
            level: LogLevel::Debug,
            ..LogConfig::default()
        };
        assert_eq!(resolve_log_level(None, Some(&log)), "debug");
    }

    #[test]
    fn test_default_level() {
        assert_eq!(resolve_log_level(None, None), "info");
    }

    #[test]
    fn test_cli_parses_reduce() {
        let cli = Cli::try_parse_from(["ipmap", "-l", "debug", "reduce", "--no-reduce", "a.map", "b.map"])
            .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Some(Command::Reduce(_))));
    }

    #[test]
    fn test_cli_defaults_to_build() {
        let cli = Cli::try_parse_from(["ipmap", "--config", "maps.toml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("maps.toml")));
    }
}
