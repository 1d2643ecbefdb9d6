pub mod repeats;

pub use repeats::{
    AMBIGUOUS, ConfigError, ExportError, InputMode, Period, Repeat, RepeatRecord, RepeatSink,
    ScanConfig, ScanError, ScanSummary, UnitLength,
};
