mod config;
mod logging;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use config::{Args, OutputFormat, RunConfig};
use polynuc_repeats::repeats::{CsvSink, JsonLinesSink, ParquetSink, TsvSink, scan_path};
use polynuc_repeats::{RepeatSink, ScanSummary, UnitLength};

fn main() {
	if let Err(err) = run() {
		eprintln!("Error: {err:#}");
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let args = Args::parse();
	logging::init_logger(args.quiet);
	let config = args.into_run_config()?;

	match config.scan.unit {
		UnitLength::Homopolymer => {
			info!("Finding homopolymers >={}bp", config.scan.min_length)
		}
		UnitLength::Periodic(period) => info!(
			"Finding polynuc repeats >={}bp with unit size {}bp",
			config.scan.min_length,
			period.len()
		),
	}

	let summary = match config.format {
		OutputFormat::Tsv => {
			let sink = TsvSink::new(open_output(&config)?, &config.scan)?;
			scan_into(&config, sink)?
		}
		OutputFormat::Csv => scan_into(&config, CsvSink::new(open_output(&config)?)?)?,
		OutputFormat::Jsonl => scan_into(&config, JsonLinesSink::new(open_output(&config)?))?,
		OutputFormat::Parquet => {
			let path = config
				.output
				.as_ref()
				.context("--format parquet requires --output")?;
			let file =
				File::create(path).with_context(|| format!("failed to create {path:?}"))?;
			scan_into(&config, ParquetSink::new(file)?)?
		}
	};

	info!(
		"Detected {} repeats across {} chromosomes ({} bases)",
		summary.repeats, summary.chromosomes, summary.symbols
	);
	Ok(())
}

fn open_output(config: &RunConfig) -> Result<Box<dyn Write>> {
	let writer: Box<dyn Write> = match &config.output {
		Some(path) => Box::new(
			File::create(path).with_context(|| format!("failed to create {path:?}"))?,
		),
		None => Box::new(io::stdout().lock()),
	};
	Ok(Box::new(BufWriter::with_capacity(1 << 20, writer)))
}

fn scan_into<S: RepeatSink>(config: &RunConfig, mut sink: S) -> Result<ScanSummary> {
	let summary = scan_path(&config.input, config.mode, &config.scan, &mut sink)
		.with_context(|| format!("failed to process {:?}", config.input))?;
	sink.finish()?;
	Ok(summary)
}
