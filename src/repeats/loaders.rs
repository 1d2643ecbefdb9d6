use std::path::Path;

use log::debug;

use super::{RepeatSink, ScanConfig, ScanError, ScanSummary, scan_mmap, scan_stream};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    Mmap,
    #[default]
    Stream,
}

/// Scans every chromosome in `path` with the configured scanner.
pub fn scan_path<S>(
    path: &Path,
    mode: InputMode,
    config: &ScanConfig,
    sink: &mut S,
) -> Result<ScanSummary, ScanError>
where
    S: RepeatSink + ?Sized,
{
    match mode {
        InputMode::Mmap if path == Path::new("-") => {
            debug!("standard input cannot be memory-mapped, streaming instead");
            scan_stream(path, config, sink)
        }
        InputMode::Mmap => scan_mmap(path, config, sink),
        InputMode::Stream => scan_stream(path, config, sink),
    }
}

pub(crate) fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// First whitespace-delimited token of a header line (without the `>`).
pub(crate) fn parse_chrom_name(header: &[u8], index: usize) -> String {
    String::from_utf8_lossy(header)
        .split_whitespace()
        .next()
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("chromosome_{index}"))
}
