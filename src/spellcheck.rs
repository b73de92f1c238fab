use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::text::lines_from_file;

/// Cost of turning one word into another. Any value above the caller's limit
/// is reported as exactly `limit + 1`.
pub type Distance = usize;

/// Validates a limit coming from an untyped source such as a config file.
pub fn parse_limit(raw: i64) -> Result<Distance> {
    Distance::try_from(raw).map_err(|_| Error::InvalidLimit(raw))
}

// Remaining budget inside a search. It may drop to -1, which prunes the branch.
fn budget_of(limit: Distance) -> isize {
    limit.min(isize::MAX as usize - 1) as isize
}

fn distance_of(cost: isize) -> Distance {
    debug_assert!(cost >= 0);
    cost as Distance
}

/// A pluggable metric between two words, bounded by `limit`.
///
/// Implementations must return 0 for identical words and must never report a
/// value larger than `limit + 1`. Any `Fn(&str, &str, usize) -> usize` closure
/// is a `DiffFunction`.
pub trait DiffFunction {
    fn diff(&self, start: &str, goal: &str, limit: Distance) -> Distance;
}

impl<F> DiffFunction for F
where
    F: Fn(&str, &str, Distance) -> Distance,
{
    fn diff(&self, start: &str, goal: &str, limit: Distance) -> Distance {
        self(start, goal, limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Differing aligned positions plus the length difference.
    Substitution,
    /// Unit-cost insert, remove and substitute.
    #[default]
    Edit,
}

impl DiffFunction for Metric {
    fn diff(&self, start: &str, goal: &str, limit: Distance) -> Distance {
        match self {
            Metric::Substitution => substitution_distance(start, goal, limit),
            Metric::Edit => edit_distance(start, goal, limit),
        }
    }
}

/// Counts the positions where `start` and `goal` differ when aligned from the
/// front, then charges their length difference once.
pub fn substitution_distance(start: &str, goal: &str, limit: Distance) -> Distance {
    let mismatches = start
        .chars()
        .zip(goal.chars())
        .filter(|(a, b)| a != b)
        .count();
    let gap = start.chars().count().abs_diff(goal.chars().count());
    (mismatches + gap).min(limit.saturating_add(1))
}

/// Effort spent by one bounded edit-distance search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of recursive calls made.
    pub calls: usize,
    /// Largest number of edits charged along any explored path.
    pub deepest_edits: usize,
}

/// Minimum number of single-character inserts, removes and substitutions
/// turning `start` into `goal`, or `limit + 1` if that exceeds `limit`.
pub fn edit_distance(start: &str, goal: &str, limit: Distance) -> Distance {
    edit_distance_with_stats(start, goal, limit).0
}

/// Same as [`edit_distance`], also reporting how much of the search space was
/// visited. Every edit consumes one unit of budget and branches are cut as
/// soon as the budget runs out, so work grows with `limit` rather than with
/// the word lengths.
pub fn edit_distance_with_stats(
    start: &str,
    goal: &str,
    limit: Distance,
) -> (Distance, SearchStats) {
    let start: Vec<char> = start.chars().collect();
    let goal: Vec<char> = goal.chars().collect();
    let mut search = EditSearch::default();
    let cost = search.run(&start, &goal, budget_of(limit), 0);
    trace!(
        "edit search visited {} calls, deepest path charged {} edits",
        search.stats.calls, search.stats.deepest_edits
    );
    (distance_of(cost), search.stats)
}

#[derive(Default)]
struct EditSearch {
    stats: SearchStats,
}

impl EditSearch {
    fn run(&mut self, start: &[char], goal: &[char], budget: isize, edits: usize) -> isize {
        self.stats.calls += 1;
        self.stats.deepest_edits = self.stats.deepest_edits.max(edits);

        // matching characters are free, so only edits add stack frames
        let common = start.iter().zip(goal).take_while(|(a, b)| a == b).count();
        let (start, goal) = (&start[common..], &goal[common..]);

        if start.is_empty() || goal.is_empty() {
            let rest = start.len().max(goal.len()) as isize;
            return rest.min(budget + 1);
        }
        if budget < 0 {
            return budget + 1;
        }

        let insert = self.run(start, &goal[1..], budget - 1, edits + 1);
        let remove = self.run(&start[1..], goal, budget - 1, edits + 1);
        let substitute = self.run(&start[1..], &goal[1..], budget - 1, edits + 1);
        1 + insert.min(remove).min(substitute)
    }
}

/// Returns the word in `vocabulary` closest to `typed` under `diff`, or
/// `typed` itself when it is already in `vocabulary` or nothing is within
/// `limit`. Ties go to the earliest candidate.
pub fn autocorrect<'a, S, D>(
    typed: &'a str,
    vocabulary: &'a [S],
    diff: &D,
    limit: Distance,
) -> &'a str
where
    S: AsRef<str>,
    D: DiffFunction + ?Sized,
{
    if vocabulary.iter().any(|word| word.as_ref() == typed) {
        return typed;
    }
    let distances = vocabulary
        .iter()
        .map(|candidate| diff.diff(typed, candidate.as_ref(), limit));
    select_closest(typed, vocabulary, distances, limit)
}

/// [`autocorrect`] with candidates scored on the rayon pool.
pub fn par_autocorrect<'a, S, D>(
    typed: &'a str,
    vocabulary: &'a [S],
    diff: &D,
    limit: Distance,
) -> &'a str
where
    S: AsRef<str> + Sync,
    D: DiffFunction + Sync + ?Sized,
{
    if vocabulary.iter().any(|word| word.as_ref() == typed) {
        return typed;
    }
    // collect keeps vocabulary order, which the tie-break relies on
    let distances: Vec<Distance> = vocabulary
        .par_iter()
        .map(|candidate| diff.diff(typed, candidate.as_ref(), limit))
        .collect();
    select_closest(typed, vocabulary, distances, limit)
}

fn select_closest<'a, S, I>(
    typed: &'a str,
    vocabulary: &'a [S],
    distances: I,
    limit: Distance,
) -> &'a str
where
    S: AsRef<str>,
    I: IntoIterator<Item = Distance>,
{
    let mut best: Option<(usize, Distance)> = None;
    for (index, distance) in distances.into_iter().enumerate() {
        trace!("'{}' -> '{}': {}", typed, vocabulary[index].as_ref(), distance);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    match best {
        Some((index, distance)) if distance <= limit => {
            let corrected = vocabulary[index].as_ref();
            debug!("Corrected '{}' to '{}' (distance {})", typed, corrected, distance);
            corrected
        }
        _ => {
            debug!("No correction within {} for '{}'", limit, typed);
            typed
        }
    }
}

/// A vocabulary together with the metric and limit used to correct against it.
#[derive(Debug, Clone)]
pub struct Autocorrector {
    vocabulary: Vec<String>,
    metric: Metric,
    limit: Distance,
}

impl Autocorrector {
    pub fn new(vocabulary: Vec<String>, metric: Metric, limit: Distance) -> Self {
        Autocorrector {
            vocabulary,
            metric,
            limit,
        }
    }

    /// Loads one word per line. Blank lines are skipped and case is kept.
    pub fn from_word_list_file(
        file_path: impl AsRef<Path>,
        metric: Metric,
        limit: Distance,
    ) -> Result<Self> {
        let vocabulary = lines_from_file(file_path)?;
        debug!("Loaded {} vocabulary words", vocabulary.len());
        Ok(Self::new(vocabulary, metric, limit))
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn limit(&self) -> Distance {
        self.limit
    }

    pub fn add_word_to_vocabulary(&mut self, word: &str) {
        if !self.vocabulary.iter().any(|known| known == word) {
            self.vocabulary.push(word.to_string());
        }
    }

    pub fn correct<'a>(&'a self, word: &'a str) -> &'a str {
        autocorrect(word, &self.vocabulary, &self.metric, self.limit)
    }

    /// Corrects every word in parallel. Output order matches `words`.
    pub fn correct_words(&self, words: &[String]) -> Vec<String> {
        words
            .par_iter()
            .map(|word| self.correct(word).to_string())
            .collect()
    }
}
