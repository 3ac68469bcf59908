//! Line-oriented command lists

use procpool_errors::SourceError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Read one command per line
///
/// Leading and trailing whitespace is trimmed; blank lines and lines
/// starting with `#` are skipped. `origin` names the input in errors.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid UTF-8.
pub fn read_command_lines<R: BufRead>(reader: R, origin: &str) -> Result<Vec<String>, SourceError> {
    let mut commands = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| SourceError::ReadFailed {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        commands.push(line.to_string());
    }
    Ok(commands)
}

/// Read commands from a file, or from stdin when `path` is `-`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_command_file(path: &Path) -> Result<Vec<String>, SourceError> {
    if path == Path::new("-") {
        let stdin = io::stdin();
        return read_command_lines(stdin.lock(), "stdin");
    }

    let origin = path.display().to_string();
    let file = File::open(path).map_err(|e| SourceError::ReadFailed {
        origin: origin.clone(),
        message: e.to_string(),
    })?;
    read_command_lines(BufReader::new(file), &origin)
}
