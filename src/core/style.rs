// File: src/core/style.rs
//! The casing style registry.
//!
//! Each [`NamingStyle`] knows how to join a word sequence, how to check the
//! joined result, and how to attach a variable-type prefix or suffix.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::NamingError;

static CAMEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").unwrap());
static PASCAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());
static SNAKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*[a-z0-9]$").unwrap());
static LEADING_SNAKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_[a-z0-9_]*[a-z0-9]$").unwrap());
static CONSTANT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*[A-Z0-9]$").unwrap());
static KEBAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]*[a-z0-9]$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingStyle {
    #[serde(rename = "camelCase")]
    Camel,
    #[serde(rename = "PascalCase")]
    Pascal,
    #[serde(rename = "snake_case")]
    Snake,
    #[serde(rename = "_snake_case")]
    LeadingSnake,
    #[serde(rename = "CONSTANT_CASE")]
    Constant,
    #[serde(rename = "kebab-case")]
    Kebab,
}

impl NamingStyle {
    /// Registry order. The category grid lists styles in this order.
    pub const ALL: [NamingStyle; 6] = [
        NamingStyle::Camel,
        NamingStyle::Pascal,
        NamingStyle::Snake,
        NamingStyle::LeadingSnake,
        NamingStyle::Constant,
        NamingStyle::Kebab,
    ];

    pub fn id(self) -> &'static str {
        match self {
            NamingStyle::Camel => "camelCase",
            NamingStyle::Pascal => "PascalCase",
            NamingStyle::Snake => "snake_case",
            NamingStyle::LeadingSnake => "_snake_case",
            NamingStyle::Constant => "CONSTANT_CASE",
            NamingStyle::Kebab => "kebab-case",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NamingStyle::Camel => "lower camel",
            NamingStyle::Pascal => "upper camel",
            NamingStyle::Snake => "underscore",
            NamingStyle::LeadingSnake => "leading underscore",
            NamingStyle::Constant => "constant",
            NamingStyle::Kebab => "hyphen",
        }
    }

    pub fn example(self) -> &'static str {
        match self {
            NamingStyle::Camel => "userName",
            NamingStyle::Pascal => "UserName",
            NamingStyle::Snake => "user_name",
            NamingStyle::LeadingSnake => "_user_name",
            NamingStyle::Constant => "USER_NAME",
            NamingStyle::Kebab => "user-name",
        }
    }

    /// Joins `words` in this style. An empty slice yields an empty string
    /// (or a lone `_` for the leading-underscore style).
    pub fn transform<S: AsRef<str>>(self, words: &[S]) -> String {
        match self {
            NamingStyle::Camel => {
                let mut iter = words.iter();
                let mut result = match iter.next() {
                    Some(first) => first.as_ref().to_lowercase(),
                    None => return String::new(),
                };
                for word in iter {
                    result.push_str(&capitalize(word.as_ref()));
                }
                result
            }
            NamingStyle::Pascal => words.iter().map(|w| capitalize(w.as_ref())).collect(),
            NamingStyle::Snake => join_mapped(words, "_", str::to_lowercase),
            NamingStyle::LeadingSnake => format!("_{}", join_mapped(words, "_", str::to_lowercase)),
            NamingStyle::Constant => join_mapped(words, "_", str::to_uppercase),
            NamingStyle::Kebab => join_mapped(words, "-", str::to_lowercase),
        }
    }

    /// Structural check of an undecorated transform result.
    pub fn validate(self, name: &str) -> bool {
        let pattern: &Regex = match self {
            NamingStyle::Camel => &CAMEL,
            NamingStyle::Pascal => &PASCAL,
            NamingStyle::Snake => &SNAKE,
            NamingStyle::LeadingSnake => &LEADING_SNAKE,
            NamingStyle::Constant => &CONSTANT,
            NamingStyle::Kebab => &KEBAB,
        };
        pattern.is_match(name)
    }

    /// Attaches a variable-type prefix and suffix to an already transformed
    /// base name.
    ///
    /// camel and both snake styles take the prefix verbatim. PascalCase
    /// capitalizes only the first character of the prefix (`m_` becomes `M_`).
    /// CONSTANT_CASE and kebab-case fold the decorations into their own
    /// separator and letter case.
    pub fn decorate(self, base: &str, prefix: &str, suffix: &str) -> String {
        let mut result = String::with_capacity(prefix.len() + base.len() + suffix.len() + 2);
        match self {
            NamingStyle::Camel | NamingStyle::Snake | NamingStyle::LeadingSnake => {
                result.push_str(prefix);
                result.push_str(base);
                result.push_str(suffix);
            }
            NamingStyle::Pascal => {
                result.push_str(&upper_first(prefix));
                result.push_str(base);
                result.push_str(suffix);
            }
            NamingStyle::Constant => {
                push_separated(&mut result, &prefix.to_uppercase(), '_', true);
                result.push_str(base);
                push_separated(&mut result, &suffix.to_uppercase(), '_', false);
            }
            NamingStyle::Kebab => {
                push_separated(&mut result, &prefix.to_lowercase().replace('_', "-"), '-', true);
                result.push_str(base);
                push_separated(&mut result, &suffix.to_lowercase(), '-', false);
            }
        }
        result
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for NamingStyle {
    type Err = NamingError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        NamingStyle::ALL
            .into_iter()
            .find(|style| style.id() == id)
            .ok_or_else(|| NamingError::unknown_style(id))
    }
}

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn join_mapped<S: AsRef<str>>(words: &[S], sep: &str, map: fn(&str) -> String) -> String {
    words.iter().map(|w| map(w.as_ref())).collect::<Vec<_>>().join(sep)
}

// Prefixes get the separator appended, suffixes prepended, unless the
// decoration already carries it.
fn push_separated(out: &mut String, part: &str, sep: char, is_prefix: bool) {
    if part.is_empty() {
        return;
    }
    if is_prefix {
        out.push_str(part);
        if !part.ends_with(sep) {
            out.push(sep);
        }
    } else {
        if !part.starts_with(sep) {
            out.push(sep);
        }
        out.push_str(part);
    }
}
