//! Error types for the resetcount binary

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a run with a non-zero exit status
#[derive(Debug, Error)]
pub enum Error {
    /// The flashing tool could not be started at all
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The flashing tool ran but exited unsuccessfully
    #[error("{tool} failed with programmer {programmer:?} ({})", exit_code_text(.code))]
    ProgrammerFailed {
        tool: String,
        programmer: String,
        code: Option<i32>,
    },

    /// Standard input closed while waiting for the user
    #[error("Aborted: no confirmation received")]
    Aborted,

    /// Reading a saved dump failed
    #[error("Failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Saving the dump failed
    #[error("Failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The dump does not contain a usable reset count
    #[error(transparent)]
    Dump(#[from] resetcount_core::Error),

    /// Console I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether the error has already been explained to the user
    ///
    /// A programmer failure after the retry leaves avrdude's own diagnostics
    /// on the terminal, so nothing more is printed.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::ProgrammerFailed { .. })
    }
}

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result type for resetcount operations
pub type Result<T> = std::result::Result<T, Error>;
