//! resetcount - Read the reset counter from an ATmega328P EEPROM
//!
//! The EEPROM is read through avrdude. If the programmer does not answer on
//! the first, silent attempt, the user is asked to connect it and a second
//! attempt is made with avrdude's diagnostics visible.
//!
//! The counter itself is decoded by `resetcount-core`.

mod avrdude;
mod cli;
mod commands;
mod error;

use std::io;
use std::process;

use avrdude::Avrdude;
use clap::Parser;
use cli::Cli;
use error::Result;

fn main() {
    let cli = Cli::parse();

    // -v/-vv take precedence over RUST_LOG
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level() {
        logger.filter_level(level);
    }
    logger.init();

    if let Err(e) = run(&cli) {
        if !e.is_silent() {
            eprintln!("{}", e);
        }
        if avrdude::is_not_found(&e) {
            eprintln!("Is avrdude installed? Use --avrdude to point to it.");
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(path) = &cli.input {
        commands::read::run_scan_file(path, &mut out)?;
        return Ok(());
    }

    let mut programmer = Avrdude::new(cli.avrdude.as_str(), cli.programmer.as_str());
    let stdin = io::stdin();
    let mut input = stdin.lock();

    commands::read::run_read(
        &mut programmer,
        &mut input,
        &mut out,
        cli.output.as_deref(),
    )?;
    Ok(())
}
