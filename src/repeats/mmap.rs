use std::fs::File;
use std::path::Path;

use log::debug;
use memchr::memchr;
use memmap2::MmapOptions;

use super::stream::{gzip_reader, scan_file};
use super::{FastaFeed, RepeatSink, ScanConfig, ScanError, ScanSummary, is_gzip, scan_reader};

/// Memory-maps `path` and scans it. Gzip files are decoded from the mapping.
///
/// Pipes, FIFOs and other non-regular files cannot be mapped and are streamed.
pub fn scan_mmap<S>(
    path: &Path,
    config: &ScanConfig,
    sink: &mut S,
) -> Result<ScanSummary, ScanError>
where
    S: RepeatSink + ?Sized,
{
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    if !metadata.is_file() {
        debug!("{path:?} is not a regular file, streaming instead");
        return scan_file(file, config, sink);
    }
    if metadata.len() == 0 {
        return scan_bytes(&[], config, sink);
    }
    let mmap = unsafe { MmapOptions::new().map(&file)? };
    let data = &mmap[..];

    if is_gzip(data) {
        debug!("decoding gzip input");
        return scan_reader(gzip_reader(data), config, sink);
    }
    scan_bytes(data, config, sink)
}

/// Scans in-memory FASTA text.
pub fn scan_bytes<S>(
    data: &[u8],
    config: &ScanConfig,
    sink: &mut S,
) -> Result<ScanSummary, ScanError>
where
    S: RepeatSink + ?Sized,
{
    let mut feed = FastaFeed::new(config, sink);
    let mut cursor = 0usize;

    while cursor < data.len() {
        let rest = &data[cursor..];
        let line_len = memchr(b'\n', rest).map_or(rest.len(), |i| i + 1);
        let line = &rest[..line_len];
        if let Some((b'>', header)) = line.split_first() {
            feed.header(header)?;
        } else {
            feed.sequence(line)?;
        }
        cursor += line_len;
    }

    feed.finish()
}
