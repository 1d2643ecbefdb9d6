use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::{debug, info, warn};

use super::{
    ChromSummary, RepeatSink, ScanConfig, ScanError, Scanner, SymbolScanner, is_gzip,
    parse_chrom_name,
};

const READ_BUFFER: usize = 1 << 20;

/// Totals over every chromosome in one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub chromosomes: usize,
    pub symbols: u64,
    pub repeats: u64,
}

impl ScanSummary {
    fn record(&mut self, chrom: &ChromSummary) {
        self.chromosomes += 1;
        self.symbols += chrom.symbols as u64;
        self.repeats += chrom.repeats;
    }
}

/// Splits FASTA lines into chromosomes and feeds their symbols to a fresh
/// scanner per chromosome. Shared by the stream and mmap readers.
pub(crate) struct FastaFeed<'a, S: RepeatSink + ?Sized> {
    config: &'a ScanConfig,
    sink: &'a mut S,
    current: Option<Scanner>,
    chrom_index: usize,
    preamble: usize,
    summary: ScanSummary,
}

impl<'a, S: RepeatSink + ?Sized> FastaFeed<'a, S> {
    pub(crate) fn new(config: &'a ScanConfig, sink: &'a mut S) -> Self {
        Self {
            config,
            sink,
            current: None,
            chrom_index: 0,
            preamble: 0,
            summary: ScanSummary::default(),
        }
    }

    /// `line` may carry a trailing newline but not the leading `>`.
    pub(crate) fn header(&mut self, line: &[u8]) -> Result<(), ScanError> {
        self.close()?;
        self.chrom_index += 1;
        let name = parse_chrom_name(line, self.chrom_index);
        info!("Parsing chromosome {name}");
        self.current = Some(Scanner::new(name, self.config));
        Ok(())
    }

    pub(crate) fn sequence(&mut self, line: &[u8]) -> Result<(), ScanError> {
        let Some(scanner) = self.current.as_mut() else {
            self.preamble += line.iter().filter(|&&b| !is_newline(b)).count();
            return Ok(());
        };
        let fold_case = self.config.fold_case;
        for &byte in line {
            if is_newline(byte) {
                continue;
            }
            let symbol = if fold_case {
                byte.to_ascii_uppercase()
            } else {
                byte
            };
            scanner.push(symbol, &mut *self.sink)?;
        }
        Ok(())
    }

    pub(crate) fn finish(mut self) -> Result<ScanSummary, ScanError> {
        self.close()?;
        if self.preamble > 0 {
            warn!(
                "skipped {} symbols before the first FASTA header",
                self.preamble
            );
        }
        Ok(self.summary)
    }

    fn close(&mut self) -> Result<(), ScanError> {
        if let Some(scanner) = self.current.take() {
            let chrom = scanner.finish(&mut *self.sink)?;
            debug!(
                "{}: {} symbols, {} repeats",
                chrom.name, chrom.symbols, chrom.repeats
            );
            self.summary.record(&chrom);
        }
        Ok(())
    }
}

#[inline(always)]
fn is_newline(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Scans FASTA text from any buffered reader, one line at a time.
///
/// Does not call `sink.finish()`; the caller owns the sink.
pub fn scan_reader<R, S>(
    mut reader: R,
    config: &ScanConfig,
    sink: &mut S,
) -> Result<ScanSummary, ScanError>
where
    R: BufRead,
    S: RepeatSink + ?Sized,
{
    let mut feed = FastaFeed::new(config, sink);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        match line.split_first() {
            Some((b'>', header)) => feed.header(header)?,
            _ => feed.sequence(&line)?,
        }
    }
    feed.finish()
}

/// Streams a FASTA file (plain or gzip), or standard input when `path` is `-`.
pub fn scan_stream<S>(
    path: &Path,
    config: &ScanConfig,
    sink: &mut S,
) -> Result<ScanSummary, ScanError>
where
    S: RepeatSink + ?Sized,
{
    if path == Path::new("-") {
        let stdin = io::stdin();
        return scan_maybe_gzip(stdin.lock(), config, sink);
    }
    scan_file(File::open(path)?, config, sink)
}

pub(crate) fn scan_file<S>(
    file: File,
    config: &ScanConfig,
    sink: &mut S,
) -> Result<ScanSummary, ScanError>
where
    S: RepeatSink + ?Sized,
{
    scan_maybe_gzip(BufReader::with_capacity(READ_BUFFER, file), config, sink)
}

/// Sniffs the gzip magic, then scans plain or decoded text.
///
/// A pipe may hand back one byte per read, so the prefix is read in full
/// before deciding and then chained back in front of the rest.
pub(crate) fn scan_maybe_gzip<R, S>(
    mut reader: R,
    config: &ScanConfig,
    sink: &mut S,
) -> Result<ScanSummary, ScanError>
where
    R: BufRead,
    S: RepeatSink + ?Sized,
{
    let mut magic = [0u8; 2];
    let filled = read_prefix(&mut reader, &mut magic)?;
    let prefix = &magic[..filled];
    let chained = prefix.chain(reader);
    if is_gzip(prefix) {
        debug!("decoding gzip input");
        return scan_reader(gzip_reader(chained), config, sink);
    }
    scan_reader(chained, config, sink)
}

fn read_prefix<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

pub(crate) fn gzip_reader<R: Read>(inner: R) -> impl BufRead {
    BufReader::with_capacity(READ_BUFFER, MultiGzDecoder::new(inner))
}
