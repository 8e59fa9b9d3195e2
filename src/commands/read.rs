//! Read command implementation

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use resetcount_core::eeprom;

use crate::avrdude::{Diagnostics, EepromSource};
use crate::error::{Error, Result};

/// Read the EEPROM, asking the user to connect the programmer if the first
/// attempt fails
///
/// The first attempt runs quietly. If it fails, instructions are written to
/// `out` and one line is read from `input` before a second attempt is made
/// with the tool's diagnostics visible. The second failure is returned as is.
pub fn acquire_dump<S, R, W>(source: &mut S, input: &mut R, out: &mut W) -> Result<Vec<u8>>
where
    S: EepromSource + ?Sized,
    R: BufRead,
    W: Write,
{
    match source.read_eeprom(Diagnostics::Quiet) {
        Err(Error::ProgrammerFailed { .. }) => {
            log::debug!("Quiet read failed, asking for the programmer");
        }
        result => return result,
    }

    wait_for_programmer(source.programmer(), input, out)?;
    source.read_eeprom(Diagnostics::Visible)
}

/// Print connection instructions and block until the user presses Enter
pub fn wait_for_programmer<R: BufRead, W: Write>(
    programmer: &str,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(
        out,
        "Connect the {:?} programmer to the computer and to the main microcontroller ICSP port.",
        programmer
    )?;
    write!(out, "Press Enter to continue. ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::Aborted);
    }
    Ok(())
}

/// Scan a dump and print the reset count
pub fn report<W: Write>(dump: &[u8], out: &mut W) -> Result<u32> {
    log::debug!("Scanning {} byte dump", dump.len());
    let slot = eeprom::find_reset_count(dump)?;
    writeln!(out, "{} resets", slot.value)?;
    Ok(slot.value)
}

/// Run the read command against a live programmer
pub fn run_read<S, R, W>(
    source: &mut S,
    input: &mut R,
    out: &mut W,
    save: Option<&Path>,
) -> Result<u32>
where
    S: EepromSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let dump = acquire_dump(source, input, out)?;

    if let Some(path) = save {
        fs::write(path, &dump).map_err(|source| Error::WriteOutput {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Wrote {} bytes to {}", dump.len(), path.display());
    }

    report(&dump, out)
}

/// Run the read command against a previously saved dump
pub fn run_scan_file<W: Write>(path: &Path, out: &mut W) -> Result<u32> {
    let dump = fs::read(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded {} bytes from {}", dump.len(), path.display());

    report(&dump, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resetcount_core::eeprom::EEPROM_SIZE;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// In-memory source returning canned results in order
    struct ScriptedSource {
        results: VecDeque<Result<Vec<u8>>>,
        calls: Vec<Diagnostics>,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<Vec<u8>>>) -> Self {
            Self {
                results: results.into(),
                calls: Vec::new(),
            }
        }
    }

    impl EepromSource for ScriptedSource {
        fn programmer(&self) -> &str {
            "usbasp"
        }

        fn read_eeprom(&mut self, diagnostics: Diagnostics) -> Result<Vec<u8>> {
            self.calls.push(diagnostics);
            self.results.pop_front().expect("unexpected extra read")
        }
    }

    fn failed() -> Result<Vec<u8>> {
        Err(Error::ProgrammerFailed {
            tool: "avrdude".into(),
            programmer: "usbasp".into(),
            code: Some(1),
        })
    }

    fn dump_with(offset: usize, value: u32) -> Vec<u8> {
        let mut dump = vec![0xFF; EEPROM_SIZE];
        dump[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        dump
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("resetcount-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_first_attempt_success_skips_prompt() {
        let mut source = ScriptedSource::new(vec![Ok(dump_with(8, 42))]);
        // Reading stdin would fail the test via Aborted
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        let count = run_read(&mut source, &mut input, &mut out, None).unwrap();

        assert_eq!(count, 42);
        assert_eq!(String::from_utf8(out).unwrap(), "42 resets\n");
        assert_eq!(source.calls, [Diagnostics::Quiet]);
    }

    #[test]
    fn test_retry_after_prompt() {
        let mut source = ScriptedSource::new(vec![failed(), Ok(dump_with(0, 7))]);
        let mut input = Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();

        let count = run_read(&mut source, &mut input, &mut out, None).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(count, 7);
        assert!(text.starts_with("Connect the \"usbasp\" programmer"));
        assert!(text.contains("Press Enter to continue. "));
        assert!(text.ends_with("7 resets\n"));
        assert_eq!(source.calls, [Diagnostics::Quiet, Diagnostics::Visible]);
    }

    #[test]
    fn test_second_failure_is_returned() {
        let mut source = ScriptedSource::new(vec![failed(), failed()]);
        let mut input = Cursor::new(b"ok\n".to_vec());
        let mut out = Vec::new();

        let err = run_read(&mut source, &mut input, &mut out, None).unwrap_err();

        assert!(err.is_silent());
        assert!(!String::from_utf8(out).unwrap().contains("resets"));
        assert_eq!(source.calls.len(), 2);
    }

    #[test]
    fn test_eof_at_prompt_aborts() {
        let mut source = ScriptedSource::new(vec![failed()]);
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        let err = acquire_dump(&mut source, &mut input, &mut out).unwrap_err();

        assert!(matches!(err, Error::Aborted));
        assert_eq!(source.calls, [Diagnostics::Quiet]);
    }

    #[test]
    fn test_spawn_failure_is_not_retried() {
        let spawn = Err(Error::Spawn {
            tool: "avrdude".into(),
            source: std::io::ErrorKind::NotFound.into(),
        });
        let mut source = ScriptedSource::new(vec![spawn]);
        let mut input = Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();

        let err = acquire_dump(&mut source, &mut input, &mut out).unwrap_err();

        assert!(matches!(err, Error::Spawn { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_report_implausible_value() {
        let mut out = Vec::new();
        let err = report(&dump_with(0, 200_000), &mut out).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Found probably uninitialized value 0x00030d40"
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_report_short_dump() {
        let mut out = Vec::new();
        let err = report(&[0u8; 100], &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected EEPROM size (100)");
    }

    #[test]
    fn test_report_erased() {
        let mut out = Vec::new();
        let err = report(&[0xFF; EEPROM_SIZE], &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::Dump(resetcount_core::Error::NotFound)
        ));
    }

    #[test]
    fn test_dump_saved_before_scan() {
        let path = temp_path("saved.bin");
        let dump = dump_with(0, 500_000);
        let mut source = ScriptedSource::new(vec![Ok(dump.clone())]);
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        let result = run_read(&mut source, &mut input, &mut out, Some(path.as_path()));

        assert!(result.is_err());
        assert_eq!(fs::read(&path).unwrap(), dump);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_scan_saved_file() {
        let path = temp_path("scan.bin");
        fs::write(&path, dump_with(12, 1234)).unwrap();
        let mut out = Vec::new();

        let count = run_scan_file(&path, &mut out).unwrap();

        assert_eq!(count, 1234);
        assert_eq!(String::from_utf8(out).unwrap(), "1234 resets\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_scan_missing_file() {
        let path = temp_path("missing.bin");
        let mut out = Vec::new();

        let err = run_scan_file(&path, &mut out).unwrap_err();
        assert!(matches!(err, Error::ReadInput { .. }));
    }
}
