pub mod stream;

mod data;
mod error;
mod export;
mod loaders;
mod mmap;
mod scanner;
mod subpattern;
mod window;
#[cfg(test)]
mod tests;

pub use data::{AMBIGUOUS, Repeat, RepeatRecord, ScanConfig, UnitLength};
pub use error::{ConfigError, ExportError, ScanError};
pub use export::{CsvSink, JsonLinesSink, ParquetSink, RepeatSink, TsvSink, write_header};
pub use loaders::{InputMode, scan_path};
pub use mmap::{scan_bytes, scan_mmap};
pub use scanner::{ChromSummary, HomopolymerScanner, PeriodicScanner, Scanner, SymbolScanner};
pub use stream::{ScanSummary, scan_reader, scan_stream};
pub use subpattern::Period;
pub use window::{CircularWindow, MAX_UNIT};

pub(crate) use loaders::{is_gzip, parse_chrom_name};
pub(crate) use stream::FastaFeed;
