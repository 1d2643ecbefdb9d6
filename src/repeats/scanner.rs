use std::cmp::Ordering;

use crate::repeats::data::{AMBIGUOUS, RepeatRecord, ScanConfig, UnitLength};
use crate::repeats::error::ExportError;
use crate::repeats::export::RepeatSink;
use crate::repeats::subpattern::Period;
use crate::repeats::window::{CircularWindow, MAX_UNIT};

/// Counts for one finished chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromSummary {
    pub name: String,
    pub symbols: usize,
    pub repeats: u64,
}

/// Consumes one chromosome a symbol at a time, emitting repeats at run boundaries.
///
/// Callers must filter newlines before `push`. `finish` is the boundary
/// sentinel: it flushes the last candidate and ends the chromosome.
pub trait SymbolScanner: Sized {
    fn push<S: RepeatSink + ?Sized>(
        &mut self,
        symbol: u8,
        sink: &mut S,
    ) -> Result<(), ExportError>;

    fn finish<S: RepeatSink + ?Sized>(self, sink: &mut S) -> Result<ChromSummary, ExportError>;
}

/// Scanner for one chromosome, chosen once from the configured unit length.
#[derive(Debug, Clone)]
pub enum Scanner {
    Homopolymer(HomopolymerScanner),
    Periodic(PeriodicScanner),
}

impl Scanner {
    pub fn new(chrom: impl Into<String>, config: &ScanConfig) -> Self {
        let chrom = chrom.into();
        match config.unit {
            UnitLength::Homopolymer => {
                Scanner::Homopolymer(HomopolymerScanner::new(chrom, config.min_length))
            }
            UnitLength::Periodic(period) => {
                Scanner::Periodic(PeriodicScanner::new(chrom, period, config.min_length))
            }
        }
    }
}

impl SymbolScanner for Scanner {
    #[inline]
    fn push<S: RepeatSink + ?Sized>(
        &mut self,
        symbol: u8,
        sink: &mut S,
    ) -> Result<(), ExportError> {
        match self {
            Scanner::Homopolymer(scanner) => scanner.push(symbol, sink),
            Scanner::Periodic(scanner) => scanner.push(symbol, sink),
        }
    }

    fn finish<S: RepeatSink + ?Sized>(self, sink: &mut S) -> Result<ChromSummary, ExportError> {
        match self {
            Scanner::Homopolymer(scanner) => scanner.finish(sink),
            Scanner::Periodic(scanner) => scanner.finish(sink),
        }
    }
}

/// Runs of a single repeated symbol. Only the previous symbol is kept.
#[derive(Debug, Clone)]
pub struct HomopolymerScanner {
    chrom: String,
    min_length: usize,
    last: u8,
    run: usize,
    position: usize,
    emitted: u64,
}

impl HomopolymerScanner {
    pub fn new(chrom: String, min_length: usize) -> Self {
        Self {
            chrom,
            min_length,
            last: AMBIGUOUS,
            run: 1,
            position: 0,
            emitted: 0,
        }
    }

    fn flush<S: RepeatSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ExportError> {
        if self.run >= self.min_length && self.last != AMBIGUOUS {
            let unit = [self.last];
            sink.emit(&RepeatRecord {
                chrom: &self.chrom,
                start: self.position - self.run,
                end: self.position,
                unit: &unit,
            })?;
            self.emitted += 1;
        }
        Ok(())
    }
}

impl SymbolScanner for HomopolymerScanner {
    #[inline]
    fn push<S: RepeatSink + ?Sized>(
        &mut self,
        symbol: u8,
        sink: &mut S,
    ) -> Result<(), ExportError> {
        if symbol == self.last {
            self.run += 1;
        } else {
            self.flush(sink)?;
            self.last = symbol;
            self.run = 1;
        }
        self.position += 1;
        Ok(())
    }

    fn finish<S: RepeatSink + ?Sized>(
        mut self,
        sink: &mut S,
    ) -> Result<ChromSummary, ExportError> {
        self.flush(sink)?;
        Ok(ChromSummary {
            name: self.chrom,
            symbols: self.position,
            repeats: self.emitted,
        })
    }
}

/// Tandem repeats of a 2-, 3- or 4-symbol unit.
///
/// `run` is the length of the candidate ending at the last symbol. While it
/// is below `r - 1` the window is still filling; above it every symbol is
/// compared against the one `r` positions back; exactly at `r - 1` the window
/// has just completed and is re-seeded. A degenerate seed starts at `r - 1`,
/// so it needs one more confirming symbol before it can extend.
#[derive(Debug, Clone)]
pub struct PeriodicScanner {
    chrom: String,
    min_length: usize,
    period: Period,
    window: CircularWindow,
    run: usize,
    position: usize,
    emitted: u64,
}

impl PeriodicScanner {
    pub fn new(chrom: String, period: Period, min_length: usize) -> Self {
        Self {
            chrom,
            min_length,
            period,
            window: CircularWindow::new(period),
            run: 0,
            position: 0,
            emitted: 0,
        }
    }

    fn seed(&mut self, symbol: u8) -> usize {
        self.window.write(self.position, symbol);
        let r = self.period.len();
        if self.period.is_degenerate(self.window.slots()) {
            r - 1
        } else {
            r
        }
    }

    fn flush<S: RepeatSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), ExportError> {
        if self.run >= self.min_length {
            let start = self.position - self.run;
            let mut buf = [0u8; MAX_UNIT];
            let unit = self.window.rotated_into(start, &mut buf);
            sink.emit(&RepeatRecord {
                chrom: &self.chrom,
                start,
                end: self.position,
                unit,
            })?;
            self.emitted += 1;
        }
        Ok(())
    }
}

impl SymbolScanner for PeriodicScanner {
    #[inline]
    fn push<S: RepeatSink + ?Sized>(
        &mut self,
        symbol: u8,
        sink: &mut S,
    ) -> Result<(), ExportError> {
        if symbol == AMBIGUOUS {
            self.flush(sink)?;
            self.run = 0;
        } else {
            let q = self.period.len() - 1;
            match self.run.cmp(&q) {
                Ordering::Less => {
                    self.window.write(self.position, symbol);
                    self.run += 1;
                }
                Ordering::Greater => {
                    if self.window.read(self.position) == symbol {
                        self.run += 1;
                    } else {
                        self.flush(sink)?;
                        self.run = self.seed(symbol);
                    }
                }
                Ordering::Equal => self.run = self.seed(symbol),
            }
        }
        self.position += 1;
        Ok(())
    }

    fn finish<S: RepeatSink + ?Sized>(
        mut self,
        sink: &mut S,
    ) -> Result<ChromSummary, ExportError> {
        self.flush(sink)?;
        Ok(ChromSummary {
            name: self.chrom,
            symbols: self.position,
            repeats: self.emitted,
        })
    }
}
