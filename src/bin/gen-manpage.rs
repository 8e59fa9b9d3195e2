//! Writes the resetcount(1) man page
//!
//! Usage: gen-manpage [FILE]   (default: man/resetcount.1)

use clap::CommandFactory;
use std::fs;
use std::path::{Path, PathBuf};

#[path = "../avrdude.rs"]
#[allow(dead_code)]
mod avrdude;
#[path = "../cli.rs"]
mod cli;
#[path = "../error.rs"]
#[allow(dead_code)]
mod error;

/// Render the man page for `cmd` into `path`, creating parent directories
fn write_man_page(cmd: clap::Command, path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let mut page = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut page)?;
    fs::write(path, page)
}

fn main() -> std::io::Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("man/resetcount.1"));

    write_man_page(cli::Cli::command(), &path)?;
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_man_page_documents_programmer_option() {
        let path = std::env::temp_dir()
            .join(format!("resetcount-man-{}", std::process::id()))
            .join("resetcount.1");

        write_man_page(cli::Cli::command(), &path).unwrap();
        let page = fs::read_to_string(&path).unwrap();

        assert!(page.contains("resetcount"));
        assert!(page.contains("programmer"));
        assert!(page.contains("avrispmkii"));
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
