//! JSON line I/O for the `session` command
//!
//! - Input: one JSON request per stdin line
//! - Output: one JSON response per stdout line
//! - UTF-8 only

use std::io::{self, BufRead, Write};

use serde::Serialize;

use super::errors::{CliError, CliResult};

/// Non-empty stdin lines, in order
pub fn read_lines() -> impl Iterator<Item = CliResult<String>> {
    io::stdin()
        .lock()
        .lines()
        .map(|line| line.map_err(CliError::from))
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
}

/// Write a raw JSON line to stdout
pub fn write_line(json_str: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", json_str)?;
    stdout.flush()?;
    Ok(())
}

/// Write a serializable value as one line
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
