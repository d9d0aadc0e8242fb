// File: src/core/scorer.rs
//! Structural validation and quality scoring of generated identifiers.

use crate::core::types::ScoredName;

const COMMON_WORDS: &[&str] = &[
    "get", "set", "is", "has", "can", "should", "will", "user", "data", "info", "config",
    "handle", "process",
];

const MAX_RUN: usize = 4;

pub struct CandidateScorer {
    max_length: usize,
}

impl CandidateScorer {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Style-independent checks on the final string: length, alphabet,
    /// leading digit, and the unreadability guards (4+ identical characters
    /// in a row, 4+ consonants in a row).
    pub fn is_structurally_valid(&self, name: &str) -> bool {
        let length = name.chars().count();
        if length == 0 || length > self.max_length {
            return false;
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return false;
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return false;
        }
        !has_identical_run(name) && !has_consonant_run(name)
    }

    /// Scores a name the style check already accepted. `None` means the
    /// candidate is rejected.
    pub fn evaluate(&self, name: &str, passes_style: bool, word_count: usize) -> Option<u8> {
        if passes_style && self.is_structurally_valid(name) {
            Some(self.score(name, word_count))
        } else {
            None
        }
    }

    /// Base 100 with length, vowel-ratio, word-count and common-word
    /// adjustments, clamped to [0, 100].
    pub fn score(&self, name: &str, word_count: usize) -> u8 {
        let mut score: i64 = 100;
        let length = name.chars().count();

        if (5..=15).contains(&length) {
            score += 10;
        } else if length > 20 {
            score -= 20;
        }

        if has_good_vowel_ratio(name, length) {
            score += 15;
        }

        if word_count > 1 {
            score += 5 * word_count as i64;
        }

        let lower = name.to_lowercase();
        if COMMON_WORDS.iter().any(|w| lower.contains(w)) {
            score += 5;
        }

        score.clamp(0, 100) as u8
    }

    /// Sorts by descending score. Equal scores keep their generation order.
    pub fn rank(&self, mut names: Vec<ScoredName>) -> Vec<ScoredName> {
        names.sort_by(|a, b| b.score.cmp(&a.score));
        names
    }
}

impl Default for CandidateScorer {
    fn default() -> Self {
        Self::new(50)
    }
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn has_consonant_run(name: &str) -> bool {
    let mut run = 0;
    for c in name.chars() {
        run = if is_consonant(c) { run + 1 } else { 0 };
        if run >= MAX_RUN {
            return true;
        }
    }
    false
}

fn has_identical_run(name: &str) -> bool {
    let mut run = 0;
    let mut prev = None;
    for c in name.chars() {
        run = if prev == Some(c) { run + 1 } else { 1 };
        if run >= MAX_RUN {
            return true;
        }
        prev = Some(c);
    }
    false
}

fn has_good_vowel_ratio(name: &str, length: usize) -> bool {
    if length == 0 {
        return false;
    }
    let vowels = name
        .chars()
        .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        .count();
    let ratio = vowels as f64 / length as f64;
    (0.2..=0.6).contains(&ratio)
}
