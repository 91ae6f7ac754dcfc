pub mod inspect;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read a whole input, from `path` or from stdin when `path` is None or "-"
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read standard input")?;
            Ok(input)
        }
    }
}
