//! Command-line interface components.

use crate::config::{Config, MalformedPolicy};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "transit_geojson")]
#[command(about = "Normalize raw transit stations and track segments into per-line GeoJSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// TOML configuration file (defaults to the user config dir if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Raw stations feature collection
    #[arg(long, value_name = "PATH")]
    pub stations: Option<PathBuf>,

    /// Raw track segments feature collection
    #[arg(long, value_name = "PATH")]
    pub lines: Option<PathBuf>,

    /// Output path for normalized stations
    #[arg(long, value_name = "PATH")]
    pub stations_output: Option<PathBuf>,

    /// Output path for per-line connections
    #[arg(long, value_name = "PATH")]
    pub connections_output: Option<PathBuf>,

    /// Skip and count malformed features instead of aborting the pass
    #[arg(long)]
    pub skip_malformed: bool,

    /// Pretty-print output JSON
    #[arg(long)]
    pub pretty: bool,

    /// Run both passes and report, without writing output files
    #[arg(long)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Load configuration using layered approach (defaults -> file -> args)
    pub fn load_configuration(&self) -> Result<Config> {
        let config_file = match &self.config {
            Some(path) => Some(path.clone()),
            None => Config::default_config_path()
                .ok()
                .filter(|path| path.exists()),
        };

        match &config_file {
            Some(path) => info!("Using config file: {}", path.display()),
            None => info!("No config file found, using built-in defaults"),
        }

        let mut config = Config::load(config_file.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;

        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.stations {
            config.paths.stations_input = path.clone();
        }
        if let Some(path) = &self.lines {
            config.paths.lines_input = path.clone();
        }
        if let Some(path) = &self.stations_output {
            config.paths.stations_output = path.clone();
        }
        if let Some(path) = &self.connections_output {
            config.paths.connections_output = path.clone();
        }
        if self.skip_malformed {
            config.processing.on_malformed = MalformedPolicy::Skip;
        }
        if self.pretty {
            config.processing.pretty = true;
        }
        if self.dry_run {
            config.processing.dry_run = true;
        }
    }
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("transit_geojson={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}
