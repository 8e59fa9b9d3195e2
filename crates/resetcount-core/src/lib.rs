//! resetcount-core - Reset counter decoding for ATmega328P EEPROM images
//!
//! The firmware keeps a single `u32` reset counter in the first 1024 bytes of
//! EEPROM, rotating it through 256 dword slots for wear levelling. Every slot
//! except the current one holds the erased pattern `0xFFFFFFFF`.
//!
//! This crate knows nothing about how the image is obtained; it only validates
//! and scans raw dumps. It is `no_std` compatible.
//!
//! # Features
//!
//! - `std` - Implement `std::error::Error` for [`Error`]
//!
//! # Example
//!
//! ```
//! use resetcount_core::eeprom::{self, EEPROM_SIZE};
//!
//! let mut dump = [0xFFu8; EEPROM_SIZE];
//! dump[8..12].copy_from_slice(&42u32.to_le_bytes());
//!
//! let slot = eeprom::find_reset_count(&dump).unwrap();
//! assert_eq!(slot.value, 42);
//! assert_eq!(slot.offset(), 8);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod eeprom;
pub mod error;

pub use eeprom::{find_reset_count, Slot};
pub use error::{Error, Result};
