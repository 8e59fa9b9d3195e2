//! EEPROM image layout and reset counter scanning
//!
//! The counter area is the first [`EEPROM_SIZE`] bytes of EEPROM, split into
//! [`SLOT_COUNT`] little-endian `u32` slots. The firmware moves the counter to
//! the next slot on every update, erasing the previous one to [`ERASED`] first,
//! and wraps from the last slot back to slot 0.

use crate::error::{Error, Result};

/// Size of the counter area in bytes
pub const EEPROM_SIZE: usize = 1024;

/// Size of a single counter slot in bytes
pub const SLOT_SIZE: usize = 4;

/// Number of counter slots in the counter area
pub const SLOT_COUNT: usize = EEPROM_SIZE / SLOT_SIZE;

/// Value of an erased (never written) slot
pub const ERASED: u32 = u32::MAX;

/// Largest value accepted as a genuine reset count
///
/// Anything larger is assumed to be leftover data from before the counter
/// area was initialized.
pub const MAX_PLAUSIBLE_COUNT: u32 = 100_000;

/// A decoded counter slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Slot index (0..SLOT_COUNT)
    pub index: usize,
    /// Raw little-endian value stored in the slot
    pub value: u32,
}

impl Slot {
    /// Byte offset of this slot within the EEPROM
    pub fn offset(&self) -> usize {
        self.index * SLOT_SIZE
    }

    /// Whether the slot holds the erased pattern
    pub fn is_erased(&self) -> bool {
        self.value == ERASED
    }

    /// Whether the slot holds a value small enough to be a real count
    pub fn is_plausible(&self) -> bool {
        self.value <= MAX_PLAUSIBLE_COUNT
    }
}

/// Check that a dump covers the whole counter area
pub fn validate_dump(dump: &[u8]) -> Result<&[u8; EEPROM_SIZE]> {
    dump.get(..EEPROM_SIZE)
        .and_then(|area| area.try_into().ok())
        .ok_or(Error::DumpTooShort { len: dump.len() })
}

/// Iterate over the decoded slots of a validated counter area, in ascending
/// offset order
pub fn slots(area: &[u8; EEPROM_SIZE]) -> impl Iterator<Item = Slot> + '_ {
    area.chunks_exact(SLOT_SIZE)
        .enumerate()
        .map(|(index, bytes)| Slot {
            index,
            value: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        })
}

/// Find the current reset count in a raw EEPROM dump
///
/// Erased slots are skipped. The first written slot decides the outcome: a
/// plausible value is returned, anything above [`MAX_PLAUSIBLE_COUNT`] is an
/// error and later slots are not examined. Bytes past [`EEPROM_SIZE`] are
/// ignored.
pub fn find_reset_count(dump: &[u8]) -> Result<Slot> {
    let area = validate_dump(dump)?;

    for slot in slots(area) {
        if slot.is_erased() {
            continue;
        }

        if !slot.is_plausible() {
            log::debug!(
                "Slot {} (offset 0x{:03X}) holds implausible value 0x{:08X}",
                slot.index,
                slot.offset(),
                slot.value
            );
            return Err(Error::Uninitialized {
                slot: slot.index,
                value: slot.value,
            });
        }

        log::debug!(
            "Reset count found in slot {} (offset 0x{:03X})",
            slot.index,
            slot.offset()
        );
        return Ok(slot);
    }

    Err(Error::NotFound)
}
