//! CLI argument parsing

use crate::avrdude::{self, DEFAULT_PROGRAMMER, DEFAULT_TOOL};
use clap::Parser;
use std::path::PathBuf;

/// Generate dynamic help text for the programmer argument
fn programmer_help() -> String {
    format!(
        "avrdude programmer id, passed through verbatim [common: {}]",
        avrdude::programmer_names_short()
    )
}

#[derive(Parser, Debug)]
#[command(name = "resetcount")]
#[command(author, version, about = "Read the reset count from the ATmega328P EEPROM", long_about = None)]
#[command(after_help = avrdude::programmer_help())]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Programmer to use
    #[arg(short = 'c', long, default_value = DEFAULT_PROGRAMMER, help = programmer_help())]
    pub programmer: String,

    /// Path to the avrdude executable
    #[arg(long, default_value = DEFAULT_TOOL)]
    pub avrdude: String,

    /// Scan a saved raw EEPROM dump instead of reading the chip
    #[arg(short, long, conflicts_with = "output")]
    pub input: Option<PathBuf>,

    /// Save the raw EEPROM dump to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Log level requested with -v, if any
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        match self.verbose {
            0 => None,
            1 => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }
}
