use anyhow::Context;
use clap::Parser;
use std::process;
use transit_geojson::TransitProcessor;
use transit_geojson::cli::{Args, setup_logging};

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args
        .load_configuration()
        .context("Failed to load configuration")?;
    let processor = TransitProcessor::new(config)?;

    let stats = processor.process().context("Processing failed")?;

    if !args.quiet {
        processor.report(&stats);
    }
    Ok(())
}
