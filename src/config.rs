use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::spellcheck::{Distance, Metric, parse_limit};

pub const DEFAULT_WORDS_PATH: &str = "data/words.txt";
pub const DEFAULT_PARAGRAPHS_PATH: &str = "data/sample_paragraphs.txt";
pub const DEFAULT_LIMIT: i64 = 2;

/// Settings read from a JSON file. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub words_path: PathBuf,
    pub paragraphs_path: PathBuf,
    /// Kept signed so a bad value is reported instead of failing to parse.
    pub limit: i64,
    pub metric: Metric,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            words_path: PathBuf::from(DEFAULT_WORDS_PATH),
            paragraphs_path: PathBuf::from(DEFAULT_PARAGRAPHS_PATH),
            limit: DEFAULT_LIMIT,
            metric: Metric::default(),
        }
    }
}

impl Config {
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let content = fs::read_to_string(file_path).map_err(|source| Error::Io {
            path: file_path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::Config {
            path: file_path.to_path_buf(),
            source,
        })
    }

    pub fn limit(&self) -> Result<Distance> {
        parse_limit(self.limit)
    }
}
