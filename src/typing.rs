//! Scoring a typed line against a reference paragraph.

use crate::error::{Error, Result};
use crate::text::{lower, remove_punctuation, split};

/// Returns the `k`th paragraph (from zero) for which `select` holds.
pub fn choose<'a, S, F>(paragraphs: &'a [S], select: F, k: usize) -> Option<&'a str>
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    paragraphs
        .iter()
        .map(|paragraph| paragraph.as_ref())
        .filter(|paragraph| select(paragraph))
        .nth(k)
}

/// Builds a selector that accepts paragraphs mentioning any word of `topic`,
/// ignoring case and punctuation in the paragraph.
pub fn about<S>(topic: &[S]) -> Result<impl Fn(&str) -> bool + use<S>>
where
    S: AsRef<str>,
{
    let topic: Vec<String> = topic.iter().map(|word| word.as_ref().to_string()).collect();
    if let Some(word) = topic.iter().find(|word| lower(word) != **word) {
        return Err(Error::TopicNotLowercase(word.clone()));
    }

    Ok(move |paragraph: &str| {
        let cleaned = remove_punctuation(&lower(paragraph));
        split(&cleaned)
            .iter()
            .any(|word| topic.iter().any(|wanted| wanted == word))
    })
}

/// Percentage of typed words that match the reference word in the same
/// position. Typed words past the end of the reference count as wrong.
pub fn accuracy(typed: &str, reference: &str) -> f64 {
    let typed_words = split(typed);
    let reference_words = split(reference);

    if typed_words.is_empty() {
        return if reference_words.is_empty() { 100.0 } else { 0.0 };
    }

    let correct = typed_words
        .iter()
        .zip(&reference_words)
        .filter(|(typed, reference)| typed == reference)
        .count();
    correct as f64 / typed_words.len() as f64 * 100.0
}

/// Words per minute, taking five characters as one word.
pub fn wpm(typed: &str, elapsed_secs: f64) -> Result<f64> {
    if !(elapsed_secs > 0.0) {
        return Err(Error::InvalidElapsed(elapsed_secs));
    }
    let chars = typed.chars().count() as f64;
    Ok((chars / 5.0) * (60.0 / elapsed_secs))
}
