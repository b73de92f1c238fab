use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A limit that came from an untyped source (config file, CLI) was negative.
    InvalidLimit(i64),
    InvalidElapsed(f64),
    TopicNotLowercase(String),
    /// A player's timing list does not line up with the word list.
    MismatchedTimes {
        player: usize,
        expected: usize,
        found: usize,
    },
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLimit(limit) => {
                write!(f, "invalid limit {}: limit must be non-negative", limit)
            }
            Error::InvalidElapsed(elapsed) => {
                write!(f, "elapsed time must be positive, got {}", elapsed)
            }
            Error::TopicNotLowercase(word) => {
                write!(f, "topic words should be lowercase, got '{}'", word)
            }
            Error::MismatchedTimes {
                player,
                expected,
                found,
            } => write!(
                f,
                "player {} has {} times but there are {} words",
                player, found, expected
            ),
            Error::Io { path, source } => {
                write!(f, "unable to read {}: {}", path.display(), source)
            }
            Error::Config { path, source } => {
                write!(f, "invalid config file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Config { source, .. } => Some(source),
            _ => None,
        }
    }
}
