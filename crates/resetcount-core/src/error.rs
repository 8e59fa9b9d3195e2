//! Error types for resetcount-core
//!
//! The error type is `no_std` compatible and `Copy`, so it can be returned
//! from the scanner without allocation.

use core::fmt;

/// Failure to extract a reset count from an EEPROM dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Dump is smaller than the EEPROM area holding the counter
    DumpTooShort {
        /// Number of bytes actually received
        len: usize,
    },
    /// First written slot holds a value above the plausibility threshold
    Uninitialized {
        /// Slot index (0-based) where the value was found
        slot: usize,
        /// The decoded value
        value: u32,
    },
    /// Every slot holds the erased pattern
    NotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DumpTooShort { len } => write!(f, "Unexpected EEPROM size ({})", len),
            Self::Uninitialized { value, .. } => {
                write!(f, "Found probably uninitialized value {:#010x}", value)
            }
            Self::NotFound => write!(f, "No reset count found (EEPROM was probably erased)"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_display_too_short() {
        let err = Error::DumpTooShort { len: 17 };
        assert_eq!(err.to_string(), "Unexpected EEPROM size (17)");
    }

    #[test]
    fn test_display_uninitialized_pads_to_eight_digits() {
        let err = Error::Uninitialized {
            slot: 0,
            value: 200_000,
        };
        assert_eq!(
            err.to_string(),
            "Found probably uninitialized value 0x00030d40"
        );
    }

    #[test]
    fn test_display_not_found() {
        assert_eq!(
            Error::NotFound.to_string(),
            "No reset count found (EEPROM was probably erased)"
        );
    }
}
