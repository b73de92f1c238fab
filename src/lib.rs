//! Typing test scoring and a limit-bounded autocorrect engine.

pub mod config;
pub mod error;
pub mod multiplayer;
pub mod spellcheck;
pub mod text;
pub mod typing;

pub use config::Config;
pub use error::{Error, Result};
pub use multiplayer::{Match, ProgressReport, fastest_words, report_progress, time_per_word};
pub use spellcheck::{
    Autocorrector, DiffFunction, Distance, Metric, SearchStats, autocorrect, edit_distance,
    edit_distance_with_stats, par_autocorrect, parse_limit, substitution_distance,
};
pub use typing::{about, accuracy, choose, wpm};
