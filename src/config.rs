use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use polynuc_repeats::{InputMode, ScanConfig};

/// Find homopolymers and short tandem repeats in FASTA sequences.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
	/// Repeat unit length: 1 for homopolymers, 2-4 for tandem repeats
	pub repeat_length: usize,

	/// Minimum total length of a reported repeat (must exceed the unit length)
	pub total_length: usize,

	/// FASTA input, plain or gzip. `-` reads standard input
	pub input: PathBuf,

	/// Input mode: stream|mmap
	#[arg(long, default_value = "stream", value_parser = parse_mode)]
	pub mode: InputMode,

	/// Output format
	#[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
	pub format: OutputFormat,

	/// Output path (default stdout; required for parquet)
	#[arg(short, long)]
	pub output: Option<PathBuf>,

	/// Upper-case every base before scanning (treats `n` as ambiguous)
	#[arg(long, default_value_t = false)]
	pub fold_case: bool,

	/// Only log warnings and errors
	#[arg(short, long, default_value_t = false)]
	pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	Tsv,
	Csv,
	Jsonl,
	Parquet,
}

#[derive(Debug)]
pub struct RunConfig {
	pub scan: ScanConfig,
	pub input: PathBuf,
	pub mode: InputMode,
	pub format: OutputFormat,
	pub output: Option<PathBuf>,
}

impl Args {
	/// Validates everything up front so no input is opened on a bad config.
	pub fn into_run_config(self) -> Result<RunConfig> {
		let scan =
			ScanConfig::new(self.repeat_length, self.total_length)?.with_fold_case(self.fold_case);

		if self.format == OutputFormat::Parquet && self.output.is_none() {
			bail!("--format parquet requires --output");
		}

		Ok(RunConfig {
			scan,
			input: self.input,
			mode: self.mode,
			format: self.format,
			output: self.output,
		})
	}
}

fn parse_mode(value: &str) -> Result<InputMode, String> {
	match value {
		"mmap" => Ok(InputMode::Mmap),
		"stream" => Ok(InputMode::Stream),
		_ => Err("mode must be either 'mmap' or 'stream'".to_string()),
	}
}
