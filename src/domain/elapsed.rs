//! Elapsed recording time value object

use std::fmt;

/// Whole seconds elapsed in the current recording.
/// Displayed as `minutes:seconds` with seconds zero-padded (65 -> "1:05").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Elapsed {
    seconds: u64,
}

impl Elapsed {
    /// Zero elapsed time
    pub const fn zero() -> Self {
        Self { seconds: 0 }
    }

    /// Create from a number of whole seconds
    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Get elapsed whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Advance by one second (one timer tick)
    pub fn advance(&mut self) {
        self.seconds += 1;
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}
