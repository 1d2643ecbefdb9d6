use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::repeats::error::ConfigError;
use crate::repeats::subpattern::Period;

/// Undetermined base. Always breaks a run and is never part of a reported unit.
pub const AMBIGUOUS: u8 = b'N';

/// Length of the repeated unit, fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitLength {
    Homopolymer,
    Periodic(Period),
}

impl UnitLength {
    pub fn get(self) -> usize {
        match self {
            UnitLength::Homopolymer => 1,
            UnitLength::Periodic(period) => period.len(),
        }
    }
}

impl TryFrom<usize> for UnitLength {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(UnitLength::Homopolymer),
            2..=4 => Period::try_from(value).map(UnitLength::Periodic),
            other => Err(ConfigError::RepeatLength(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub unit: UnitLength,
    pub min_length: usize,
    pub fold_case: bool,
}

impl ScanConfig {
    /// Validates `repeat_length` ∈ [1,4] and `total_length > repeat_length`.
    pub fn new(repeat_length: usize, total_length: usize) -> Result<Self, ConfigError> {
        let unit = UnitLength::try_from(repeat_length)?;
        if total_length <= repeat_length {
            return Err(ConfigError::TotalLength {
                repeat: repeat_length,
                total: total_length,
            });
        }
        Ok(Self {
            unit,
            min_length: total_length,
            fold_case: false,
        })
    }

    pub fn with_fold_case(mut self, fold_case: bool) -> Self {
        self.fold_case = fold_case;
        self
    }

    pub fn repeat_length(&self) -> usize {
        self.unit.get()
    }
}

/// A detected repeat, borrowed from the scanner that produced it.
///
/// `unit` is phase-aligned with `start`: for the run `GATATATC` the record
/// covers `ATATAT` and the unit is `AT`, not `TA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatRecord<'a> {
    pub chrom: &'a str,
    pub start: usize,
    pub end: usize,
    pub unit: &'a [u8],
}

impl<'a> RepeatRecord<'a> {
    pub fn length(&self) -> usize {
        self.end - self.start
    }

    pub fn unit_str(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.unit)
    }

    pub fn to_repeat(&self) -> Repeat {
        Repeat {
            chrom: self.chrom.to_string(),
            start: self.start,
            end: self.end,
            length: self.length(),
            unit: self.unit_str().into_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Repeat {
    pub chrom: String,
    pub start: usize,
    pub end: usize,
    pub length: usize,
    pub unit: String,
}

impl Repeat {
    pub fn new(chrom: &str, start: usize, end: usize, unit: &str) -> Self {
        Self {
            chrom: chrom.to_string(),
            start,
            end,
            length: end - start,
            unit: unit.to_string(),
        }
    }
}

impl From<RepeatRecord<'_>> for Repeat {
    fn from(record: RepeatRecord<'_>) -> Self {
        record.to_repeat()
    }
}
