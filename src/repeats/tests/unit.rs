use std::fs;

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::repeats::{
    CsvSink, ExportError, JsonLinesSink, ParquetSink, Repeat, RepeatRecord, RepeatSink, Scanner,
    SymbolScanner, scan_bytes,
};

use super::helpers::{config, render_tsv, scan_sequence, spans};

#[test]
fn homopolymer_run_to_end_of_chromosome() {
    let found = scan_sequence("AAAAA", 1, 3);
    assert_eq!(found, vec![Repeat::new("chr", 0, 5, "A")]);
}

#[test]
fn homopolymer_stops_at_ambiguous_base() {
    let found = scan_sequence("AAAAN", 1, 3);
    assert_eq!(spans(&found), vec![(0, 4, "A")]);
}

#[test]
fn homopolymer_below_threshold_is_dropped() {
    assert!(scan_sequence("AAAA", 1, 5).is_empty());
}

#[test]
fn homopolymer_reports_consecutive_runs() {
    let found = scan_sequence("AAAACCCGT", 1, 3);
    assert_eq!(spans(&found), vec![(0, 4, "A"), (4, 7, "C")]);
}

#[test]
fn ambiguous_runs_are_never_reported() {
    assert!(scan_sequence("NNNNNNNN", 1, 2).is_empty());
    assert!(scan_sequence("NNNNNNNN", 2, 3).is_empty());
    assert!(scan_sequence("NANANANANA", 2, 3).is_empty());
}

#[test]
fn dinucleotide_repeat() {
    let found = scan_sequence("ATATATAT", 2, 4);
    assert_eq!(found, vec![Repeat::new("chr", 0, 8, "AT")]);
}

#[test]
fn dinucleotide_scan_ignores_homopolymer() {
    assert!(scan_sequence("AAAAAAAA", 2, 4).is_empty());
}

#[test]
fn dinucleotide_at_exact_threshold() {
    assert_eq!(spans(&scan_sequence("ATAT", 2, 4)), vec![(0, 4, "AT")]);
    assert!(scan_sequence("ATA", 2, 4).is_empty());
}

#[test]
fn unit_is_phase_aligned_with_run_start() {
    assert_eq!(spans(&scan_sequence("GATATATC", 2, 4)), vec![(1, 7, "AT")]);
    assert_eq!(spans(&scan_sequence("TATATAT", 2, 4)), vec![(0, 7, "TA")]);
}

#[test]
fn degenerate_seed_needs_one_confirming_symbol() {
    // "AA" seeds at r - 1, so the run can only start once T arrives.
    assert_eq!(spans(&scan_sequence("AATATA", 2, 4)), vec![(1, 6, "AT")]);
}

#[test]
fn mismatch_flushes_and_reseeds() {
    assert_eq!(spans(&scan_sequence("ATATAAC", 2, 4)), vec![(0, 5, "AT")]);
}

#[test]
fn adjacent_dinucleotide_runs() {
    let found = scan_sequence("ATATATGCGCGC", 2, 4);
    assert_eq!(spans(&found), vec![(0, 6, "AT"), (6, 12, "GC")]);
}

#[test]
fn ambiguous_base_splits_periodic_run() {
    let found = scan_sequence("ATATNATAT", 2, 4);
    assert_eq!(spans(&found), vec![(0, 4, "AT"), (5, 9, "AT")]);
}

#[test]
fn trinucleotide_repeat() {
    assert_eq!(spans(&scan_sequence("CAGCAGCAG", 3, 6)), vec![(0, 9, "CAG")]);
    assert!(scan_sequence("AAAAAA", 3, 4).is_empty());
}

#[test]
fn tetranucleotide_rejects_dinucleotide_runs() {
    assert!(scan_sequence("ATATATATAT", 4, 5).is_empty());
    assert!(scan_sequence("CCCCCCCCCC", 4, 5).is_empty());
    assert_eq!(
        spans(&scan_sequence("AATTAATTAATT", 4, 8)),
        vec![(0, 12, "AATT")]
    );
}

#[test]
fn finish_reports_chromosome_counts() {
    let mut found: Vec<Repeat> = Vec::new();
    let mut scanner = Scanner::new("chr9", &config(1, 3));
    for byte in b"AAAAACCC" {
        scanner.push(*byte, &mut found).unwrap();
    }
    let summary = scanner.finish(&mut found).unwrap();
    assert_eq!(summary.name, "chr9");
    assert_eq!(summary.symbols, 8);
    assert_eq!(summary.repeats, 2);
    assert_eq!(found.len(), 2);
}

#[test]
fn tsv_output_layout() {
    let rendered = render_tsv(">chr\nAAAAA\n", &config(1, 3));
    assert_eq!(
        rendered,
        "#repeat_length: 1\n#total_length: 3\nchr\t0\t5\tunit=A\n"
    );
}

#[test]
fn tsv_header_written_without_repeats() {
    let rendered = render_tsv(">chr\nACGT\n", &config(2, 6));
    assert_eq!(rendered, "#repeat_length: 2\n#total_length: 6\n");
}

#[test]
fn csv_output_round_trips_through_serde() {
    let cfg = config(2, 4);
    let mut sink = CsvSink::new(Vec::new()).unwrap();
    scan_bytes(b">chrA\nGATATATC\n", &cfg, &mut sink).unwrap();
    sink.finish().unwrap();
    let bytes = sink.into_inner().unwrap();
    assert!(bytes.starts_with(b"chrom,start,end,length,unit\n"));
    let rows: Vec<Repeat> = csv::Reader::from_reader(bytes.as_slice())
        .deserialize()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows, vec![Repeat::new("chrA", 1, 7, "AT")]);
}

#[test]
fn json_lines_output() {
    let cfg = config(3, 6);
    let mut sink = JsonLinesSink::new(Vec::new());
    scan_bytes(b">c1\nCAGCAGCAG\n>c2\nTTTTTT\n>c3\nCTGCTGA\n", &cfg, &mut sink).unwrap();
    let text = String::from_utf8(sink.into_inner()).unwrap();
    let rows: Vec<Repeat> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        rows,
        vec![
            Repeat::new("c1", 0, 9, "CAG"),
            Repeat::new("c3", 0, 6, "CTG"),
        ]
    );
}

#[test]
fn parquet_writer_emits_all_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repeats.parquet");
    let cfg = config(1, 3);
    let file = fs::File::create(&path).unwrap();
    let mut sink = ParquetSink::new(file).unwrap();
    scan_bytes(b">chr1\nAAAAGGGTTTT\n>chr2\nCCCC\n", &cfg, &mut sink).unwrap();
    sink.finish().unwrap();

    let reader = ParquetRecordBatchReaderBuilder::try_new(fs::File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let rows: usize = reader.map(|batch| batch.unwrap().num_rows()).sum();
    assert_eq!(rows, 4);
}

#[test]
fn parquet_rejects_records_after_finish() {
    let dir = tempfile::tempdir().unwrap();
    let file = fs::File::create(dir.path().join("closed.parquet")).unwrap();
    let mut sink = ParquetSink::new(file).unwrap();
    sink.finish().unwrap();
    sink.finish().unwrap();
    let record = RepeatRecord {
        chrom: "chr1",
        start: 0,
        end: 4,
        unit: b"A",
    };
    assert!(matches!(sink.emit(&record), Err(ExportError::Finished)));
}
