use crate::repeats::{Repeat, ScanConfig, Scanner, SymbolScanner, TsvSink, scan_bytes};

pub(super) fn config(repeat_length: usize, total_length: usize) -> ScanConfig {
    ScanConfig::new(repeat_length, total_length).expect("valid scan config")
}

/// Runs one scanner over `sequence` as chromosome `chr`.
pub(super) fn scan_sequence(sequence: &str, repeat_length: usize, total_length: usize) -> Vec<Repeat> {
    let mut found = Vec::new();
    let mut scanner = Scanner::new("chr", &config(repeat_length, total_length));
    for byte in sequence.bytes() {
        scanner.push(byte, &mut found).unwrap();
    }
    scanner.finish(&mut found).unwrap();
    found
}

pub(super) fn spans(repeats: &[Repeat]) -> Vec<(usize, usize, &str)> {
    repeats
        .iter()
        .map(|r| (r.start, r.end, r.unit.as_str()))
        .collect()
}

pub(super) fn render_tsv(fasta: &str, config: &ScanConfig) -> String {
    let mut sink = TsvSink::new(Vec::new(), config).unwrap();
    scan_bytes(fasta.as_bytes(), config, &mut sink).unwrap();
    String::from_utf8(sink.into_inner()).unwrap()
}
