use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub fn lower(s: &str) -> String {
    s.to_lowercase()
}

pub fn split(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

/// Strips ASCII punctuation, leaving letters, digits and whitespace.
pub fn remove_punctuation(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Reads `file_path` into trimmed lines, dropping blank ones.
pub fn lines_from_file(file_path: impl AsRef<Path>) -> Result<Vec<String>> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).map_err(|source| Error::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
