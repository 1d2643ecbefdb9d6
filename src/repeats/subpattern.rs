use crate::repeats::error::ConfigError;

/// Unit length of a periodic repeat, paired with its subpattern filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Two,
    Three,
    Four,
}

impl Period {
    #[allow(clippy::len_without_is_empty)]
    pub fn len(self) -> usize {
        match self {
            Period::Two => 2,
            Period::Three => 3,
            Period::Four => 4,
        }
    }

    /// Whether a full window is really a shorter-period repeat.
    ///
    /// 2- and 3-mers are degenerate when they are homopolymers; 4-mers when
    /// they are two copies of one 2-mer, which also covers 4-mer homopolymers.
    /// Each rule is rotation invariant, so the window may be passed in slot
    /// order rather than phase order. A window of the wrong length is never
    /// degenerate.
    #[inline]
    pub fn is_degenerate(self, window: &[u8]) -> bool {
        match (self, window) {
            (Period::Two, [a, b]) => a == b,
            (Period::Three, [a, b, c]) => a == b && b == c,
            (Period::Four, [a, b, c, d]) => a == c && b == d,
            _ => false,
        }
    }
}

impl TryFrom<usize> for Period {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Period::Two),
            3 => Ok(Period::Three),
            4 => Ok(Period::Four),
            other => Err(ConfigError::UnsupportedPeriod(other)),
        }
    }
}
