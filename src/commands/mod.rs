//! CLI command implementations
//!
//! The read command works against any [`EepromSource`](crate::avrdude::EepromSource),
//! so the prompt and retry flow does not depend on avrdude being installed.

pub mod read;
