//! Progress reports and per-word timing for typing races.
//!
//! Nothing here talks to a server: uploads go through a caller-supplied
//! callback.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub id: u64,
    pub progress: f64,
}

/// Computes how far into `prompt` the player has typed correctly, hands the
/// report to `upload` once, and returns the progress.
///
/// Progress stops at the first mistyped word. An empty prompt counts as done.
pub fn report_progress<S, P, F>(sofar: &[S], prompt: &[P], user_id: u64, upload: F) -> f64
where
    S: AsRef<str>,
    P: AsRef<str>,
    F: FnOnce(&ProgressReport),
{
    let progress = if prompt.is_empty() {
        1.0
    } else {
        let correct = sofar
            .iter()
            .zip(prompt)
            .take_while(|&(typed, expected)| typed.as_ref() == expected.as_ref())
            .count();
        correct as f64 / prompt.len() as f64
    };

    let report = ProgressReport {
        id: user_id,
        progress,
    };
    debug!("Uploading progress {} for player {}", progress, user_id);
    upload(&report);
    progress
}

/// Words of a race and how long each player took on each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatch")]
pub struct Match {
    words: Vec<String>,
    /// `times[player][word]`
    times: Vec<Vec<f64>>,
}

// Deserialized form, checked by `Match::new` before use.
#[derive(Deserialize)]
struct RawMatch {
    words: Vec<String>,
    times: Vec<Vec<f64>>,
}

impl TryFrom<RawMatch> for Match {
    type Error = Error;

    fn try_from(raw: RawMatch) -> Result<Self> {
        Match::new(raw.words, raw.times)
    }
}

impl Match {
    pub fn new(words: Vec<String>, times: Vec<Vec<f64>>) -> Result<Self> {
        for (player, player_times) in times.iter().enumerate() {
            if player_times.len() != words.len() {
                return Err(Error::MismatchedTimes {
                    player,
                    expected: words.len(),
                    found: player_times.len(),
                });
            }
        }
        Ok(Match { words, times })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn times(&self) -> &[Vec<f64>] {
        &self.times
    }

    pub fn player_count(&self) -> usize {
        self.times.len()
    }

    pub fn word_at(&self, word_index: usize) -> Option<&str> {
        self.words.get(word_index).map(String::as_str)
    }

    pub fn time(&self, player: usize, word_index: usize) -> Option<f64> {
        self.times.get(player)?.get(word_index).copied()
    }
}

/// Turns each player's timestamps (start, then the end of every word) into
/// per-word durations.
pub fn time_per_word<S>(words: &[S], timestamps_per_player: &[Vec<f64>]) -> Result<Match>
where
    S: AsRef<str>,
{
    let times = timestamps_per_player
        .iter()
        .map(|stamps| stamps.windows(2).map(|pair| pair[1] - pair[0]).collect())
        .collect();
    let words = words.iter().map(|word| word.as_ref().to_string()).collect();
    Match::new(words, times)
}

/// For each player, the words they typed faster than everyone else. A tie goes
/// to the player with the lower index.
pub fn fastest_words(race: &Match) -> Vec<Vec<String>> {
    let mut fastest = vec![Vec::new(); race.player_count()];
    for (word_index, word) in race.words.iter().enumerate() {
        let winner = (0..race.player_count())
            .filter_map(|player| race.time(player, word_index).map(|time| (player, time)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((player, _)) = winner {
            fastest[player].push(word.clone());
        }
    }
    fastest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_progress() {
        let prompt = ["how", "are", "you", "doing", "today"];
        let mut uploads = Vec::new();

        let progress = report_progress(&["how", "are", "you"], &prompt, 2, |report| {
            uploads.push(report.clone())
        });
        assert_eq!(progress, 0.6);

        let progress = report_progress(&["how", "aree"], &prompt, 3, |report| {
            uploads.push(report.clone())
        });
        assert_eq!(progress, 0.2);

        assert_eq!(
            uploads,
            vec![
                ProgressReport { id: 2, progress: 0.6 },
                ProgressReport { id: 3, progress: 0.2 },
            ]
        );
    }

    #[test]
    fn test_report_progress_stops_at_first_mistake() {
        let prompt = ["a", "b", "c", "d"];
        let progress = report_progress(&["a", "x", "c", "d"], &prompt, 1, |_| {});
        assert_eq!(progress, 0.25);
    }

    #[test]
    fn test_report_progress_edges() {
        let empty: [&str; 0] = [];
        assert_eq!(report_progress(&empty, &["hi"], 1, |_| {}), 0.0);
        assert_eq!(report_progress(&["hi"], &empty, 1, |_| {}), 1.0);
        // typing past the end of the prompt does not exceed full progress
        assert_eq!(report_progress(&["hi", "there"], &["hi"], 1, |_| {}), 1.0);
    }

    #[test]
    fn test_progress_report_json() {
        let report = ProgressReport { id: 7, progress: 0.5 };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"id":7,"progress":0.5}"#
        );
    }

    #[test]
    fn test_time_per_word() {
        let p = vec![
            vec![75.0, 81.0, 84.0, 90.0, 92.0],
            vec![19.0, 29.0, 35.0, 36.0, 38.0],
        ];
        let race = time_per_word(&["collar", "plush", "blush", "repute"], &p).unwrap();
        assert_eq!(race.words(), ["collar", "plush", "blush", "repute"]);
        assert_eq!(
            race.times(),
            [vec![6.0, 3.0, 6.0, 2.0], vec![10.0, 6.0, 1.0, 2.0]]
        );
    }

    #[test]
    fn test_time_per_word_single_and_many_players() {
        let one = time_per_word(&["a"], &[vec![0.0, 4.5]]).unwrap();
        assert_eq!(one.times(), [vec![4.5]]);

        let stamps = vec![vec![0.0, 1.0, 2.0]; 4];
        let four = time_per_word(&["a", "b"], &stamps).unwrap();
        assert_eq!(four.player_count(), 4);
    }

    #[test]
    fn test_time_per_word_mismatch() {
        let err = time_per_word(&["a", "b"], &[vec![0.0, 1.0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::MismatchedTimes { player: 0, expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_match_accessors() {
        let race = Match::new(
            vec!["Hello".to_string(), "world".to_string()],
            vec![vec![5.0, 1.0], vec![4.0, 2.0]],
        )
        .unwrap();
        assert_eq!(race.word_at(1), Some("world"));
        assert_eq!(race.word_at(2), None);
        assert_eq!(race.time(1, 0), Some(4.0));
        assert_eq!(race.time(2, 0), None);
    }

    #[test]
    fn test_fastest_words() {
        let p0 = vec![5.0, 1.0, 3.0];
        let p1 = vec![4.0, 1.0, 6.0];
        let words = vec!["Just".to_string(), "have".to_string(), "fun".to_string()];
        let race = Match::new(words, vec![p0.clone(), p1.clone()]).unwrap();

        assert_eq!(
            fastest_words(&race),
            vec![vec!["have", "fun"], vec!["Just"]]
        );
        assert_eq!(race.times(), [p0, p1]);
    }

    #[test]
    fn test_match_json_is_validated() {
        let race: Match =
            serde_json::from_str(r#"{"words":["a","b"],"times":[[1.0,2.0],[3.0,0.5]]}"#).unwrap();
        assert_eq!(fastest_words(&race), vec![vec!["a"], vec!["b"]]);

        let err = serde_json::from_str::<Match>(r#"{"words":["a","b"],"times":[[1.0],[2.0,3.0]]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("player 0 has 1 times but there are 2 words"));
    }

    #[test]
    fn test_fastest_words_no_players() {
        let race = Match::new(vec!["lonely".to_string()], Vec::new()).unwrap();
        assert!(fastest_words(&race).is_empty());
    }
}
