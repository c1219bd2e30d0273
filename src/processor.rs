//! Batch processing engine.
//!
//! Orchestrates a complete run: load both raw collections, run the
//! station pass and the connection pass, and write each output
//! collection once its pass has finished. Both inputs are read before
//! anything is written, so an unavailable input never leaves a
//! half-finished set of outputs behind.

use crate::config::Config;
use crate::error::Result;
use crate::geojson::{read_feature_collection, write_feature_collection};
use crate::models::{Crs, FeatureCollection};
use crate::normalize::LineNameNormalizer;
use crate::transform::{
    FeatureTransformer, LineConnectionTransformer, PassStats, StationTransformer,
};

use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Statistics for a full run
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub stations: PassStats,
    pub connections: PassStats,
    /// Output files written, with their sizes in bytes
    pub outputs: Vec<(PathBuf, u64)>,
    pub dry_run: bool,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    pub fn total_output_size(&self) -> u64 {
        self.outputs.iter().map(|(_, size)| size).sum()
    }
}

/// Runs the station and connection passes for one configuration
pub struct TransitProcessor {
    config: Config,
    normalizer: LineNameNormalizer,
}

impl TransitProcessor {
    /// Create a processor, validating the configuration and building the
    /// line catalog up front
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let normalizer = config.normalizer()?;
        Ok(Self { config, normalizer })
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let paths = &self.config.paths;
        let processing = &self.config.processing;

        info!(
            "Processing with {} known lines (malformed features: {:?})",
            self.config.lines.len(),
            processing.on_malformed
        );

        let raw_stations = read_feature_collection(&paths.stations_input)?;
        let raw_lines = read_feature_collection(&paths.lines_input)?;

        let mut stats = ProcessingStats {
            dry_run: processing.dry_run,
            ..Default::default()
        };

        // Stations pass
        let outcome = StationTransformer::new(&self.normalizer)
            .transform_collection(&raw_stations, processing.on_malformed)?;
        stats.stations = outcome.stats;
        let stations = FeatureCollection::new(outcome.records).with_crs(Crs::crs84());
        if !processing.dry_run {
            let bytes =
                write_feature_collection(&paths.stations_output, &stations, processing.pretty)?;
            stats.outputs.push((paths.stations_output.clone(), bytes));
        }

        // Connections pass
        let outcome = LineConnectionTransformer::new(&self.normalizer)
            .transform_collection(&raw_lines, processing.on_malformed)?;
        stats.connections = outcome.stats;
        let connections = FeatureCollection::new(outcome.records);
        if !processing.dry_run {
            let bytes = write_feature_collection(
                &paths.connections_output,
                &connections,
                processing.pretty,
            )?;
            stats.outputs.push((paths.connections_output.clone(), bytes));
        }

        stats.processing_time_ms = start_time.elapsed().as_millis();
        Ok(stats)
    }

    /// Print a human-readable summary of a finished run
    pub fn report(&self, stats: &ProcessingStats) {
        println!("\n{}", "Processing Summary".bright_green().bold());
        print_pass("Stations:", &stats.stations, "stations");
        print_pass("Connections:", &stats.connections, "connections");

        if stats.dry_run {
            println!(
                "  {}",
                "Dry run - no output files written".bright_yellow()
            );
        } else {
            for (path, bytes) in &stats.outputs {
                println!(
                    "  {} {} ({} bytes)",
                    "Wrote".bright_cyan(),
                    path.display(),
                    bytes.to_string().bright_white()
                );
            }
        }

        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
    }
}

fn print_pass(label: &str, pass: &PassStats, noun: &str) {
    println!(
        "  {} {} features -> {} {}",
        label.bright_cyan(),
        pass.features_read.to_string().bright_white(),
        pass.records_emitted.to_string().bright_white().bold(),
        noun
    );
    if pass.features_dropped > 0 {
        println!(
            "    {} {} without a known line",
            "Dropped".bright_black(),
            pass.features_dropped
        );
    }
    if pass.malformed_skipped > 0 {
        println!(
            "    {} {} malformed features",
            "Skipped".bright_red(),
            pass.malformed_skipped.to_string().bright_red().bold()
        );
    }
}

#[cfg(test)]
mod tests;
