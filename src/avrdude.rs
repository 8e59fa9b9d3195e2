//! avrdude invocation
//!
//! The EEPROM is read by running avrdude in terminal-less mode with the
//! memory operation `eeprom:r:-:r`, which writes the raw EEPROM contents to
//! standard output. Nothing else about the programmer hardware is modelled;
//! the programmer id is passed to avrdude verbatim.

use std::io::ErrorKind;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Flashing tool invoked when none is given on the command line
pub const DEFAULT_TOOL: &str = "avrdude";

/// Programmer id used when none is given on the command line
pub const DEFAULT_PROGRAMMER: &str = "avrispmkii";

/// avrdude part id of the main microcontroller
pub const PART: &str = "atmega328p";

/// Port the programmer is attached to
pub const PORT: &str = "usb";

/// Memory operation: read EEPROM, raw format, to stdout
const EEPROM_READ: &str = "eeprom:r:-:r";

/// Commonly used avrdude programmer ids, for help text only
const COMMON_PROGRAMMERS: &[(&str, &str)] = &[
    ("avrispmkii", "Atmel AVR ISP mkII"),
    ("usbasp", "USBasp"),
    ("usbtiny", "USBtinyISP / Sparkfun Pocket AVR Programmer"),
    ("atmelice_isp", "Atmel-ICE in ISP mode"),
    ("dragon_isp", "AVR Dragon in ISP mode"),
];

/// Generate a short list of common programmer ids for CLI help
pub fn programmer_names_short() -> String {
    let names: Vec<&str> = COMMON_PROGRAMMERS.iter().map(|(name, _)| *name).collect();
    names.join(", ")
}

/// Generate help text describing the common programmer ids
pub fn programmer_help() -> String {
    let mut help = String::from("Common programmers:\n");
    for (name, description) in COMMON_PROGRAMMERS {
        help.push_str(&format!("  {:12} - {}\n", name, description));
    }
    help.push_str("Any other id known to avrdude (see `avrdude -c ?`) is accepted as is.");
    help
}

/// How much of the tool's diagnostic output reaches the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostics {
    /// stderr is discarded
    Quiet,
    /// stderr is passed through to the terminal
    Visible,
}

/// Something that can produce a raw EEPROM dump
pub trait EepromSource {
    /// Programmer id shown to the user when asking them to connect it
    fn programmer(&self) -> &str;

    /// Read the whole EEPROM
    ///
    /// A tool that runs but fails must be reported as
    /// [`Error::ProgrammerFailed`] so the caller can offer a retry.
    fn read_eeprom(&mut self, diagnostics: Diagnostics) -> Result<Vec<u8>>;
}

/// avrdude-based EEPROM reader
#[derive(Debug, Clone)]
pub struct Avrdude {
    tool: String,
    programmer: String,
}

impl Avrdude {
    /// Create a reader running `tool` with the given programmer id
    pub fn new(tool: impl Into<String>, programmer: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            programmer: programmer.into(),
        }
    }

    /// Path or name of the flashing tool
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Arguments passed to the tool
    pub fn args(&self) -> [&str; 9] {
        [
            "-qq",
            "-p",
            PART,
            "-c",
            &self.programmer,
            "-P",
            PORT,
            "-U",
            EEPROM_READ,
        ]
    }

    fn command(&self, diagnostics: Diagnostics) -> Command {
        let mut cmd = Command::new(self.tool());
        cmd.args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped());
        match diagnostics {
            Diagnostics::Quiet => cmd.stderr(Stdio::null()),
            Diagnostics::Visible => cmd.stderr(Stdio::inherit()),
        };
        cmd
    }
}

impl Default for Avrdude {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL, DEFAULT_PROGRAMMER)
    }
}

impl EepromSource for Avrdude {
    fn programmer(&self) -> &str {
        &self.programmer
    }

    fn read_eeprom(&mut self, diagnostics: Diagnostics) -> Result<Vec<u8>> {
        log::debug!("Running {} {}", self.tool, self.args().join(" "));

        let output = self
            .command(diagnostics)
            .output()
            .map_err(|source| Error::Spawn {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.status.success() {
            log::debug!("{} exited with {}", self.tool, output.status);
            return Err(Error::ProgrammerFailed {
                tool: self.tool.clone(),
                programmer: self.programmer.clone(),
                code: output.status.code(),
            });
        }

        log::debug!("{} returned {} bytes", self.tool, output.stdout.len());
        Ok(output.stdout)
    }
}

/// Whether a spawn error means the tool is simply not installed
pub fn is_not_found(err: &Error) -> bool {
    matches!(err, Error::Spawn { source, .. } if source.kind() == ErrorKind::NotFound)
}
