use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read the command input: a file, or stdin when no file (or `-`) is given.
pub fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) if path != Path::new("-") => {
            tracing::debug!(path = %path.display(), "Reading input file");
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            tracing::debug!("Reading input from stdin");
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}
