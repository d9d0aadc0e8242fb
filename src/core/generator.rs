// File: src/core/generator.rs
//! Turns words into decorated identifiers: single (style, type) pairs, the
//! full category grid, and the short recommendation list.

use std::collections::HashSet;

use tracing::debug;

use crate::core::scorer::CandidateScorer;
use crate::core::style::NamingStyle;
use crate::core::taxonomy::VariableType;
use crate::core::tokenizer::{clean_text, tokenize};
use crate::core::types::{CategoryGrid, NamingOption, ScoredName, TranslationCandidate};
use crate::errors::{NamingError, Result};

/// Styles offered for the n-th distinct translation in the recommendation
/// list. Everything after the second translation gets snake_case only.
const LEADING_STYLES: &[NamingStyle] = &[NamingStyle::Camel, NamingStyle::Pascal];
const TRAILING_STYLES: &[NamingStyle] = &[NamingStyle::Snake];

/// Upper bound on the recommendation list, whatever the configured limit.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Translations by descending confidence. The sort is stable, so equal
/// confidences keep the collaborator's order; NaN has a fixed place under
/// `total_cmp`.
pub fn by_confidence(translations: &[TranslationCandidate]) -> Vec<&TranslationCandidate> {
    let mut ranked: Vec<&TranslationCandidate> = translations.iter().collect();
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    ranked
}

pub struct CandidateGenerator {
    scorer: CandidateScorer,
}

impl CandidateGenerator {
    pub fn new(scorer: CandidateScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &CandidateScorer {
        &self.scorer
    }

    /// Cleans and tokenizes a phrase, rejecting blank input.
    pub fn words(&self, text: &str) -> Result<Vec<String>> {
        let words = tokenize(&clean_text(text));
        if words.is_empty() {
            return Err(NamingError::EmptyInput);
        }
        Ok(words)
    }

    /// The decorated identifier for one (style, type) pair.
    pub fn naming(&self, words: &[String], style: NamingStyle, var_type: VariableType) -> String {
        let base = style.transform(words);
        let desc = var_type.descriptor();
        let decorated = style.decorate(&base, desc.prefix, desc.suffix);
        if var_type.forces_constant_shape() {
            constant_shape(&decorated)
        } else {
            decorated
        }
    }

    /// Builds and scores the option for one (style, type) pair.
    pub fn build_option(
        &self,
        id: String,
        words: &[String],
        style: NamingStyle,
        var_type: VariableType,
    ) -> NamingOption {
        let result = self.naming(words, style, var_type);
        // Constant-shaped results are re-derived from scratch and skip the
        // style's own pattern.
        let passes_style =
            var_type.forces_constant_shape() || style.validate(&style.transform(words));
        let score = self.scorer.evaluate(&result, passes_style, words.len());
        let desc = var_type.descriptor();

        NamingOption {
            id,
            style,
            var_type,
            label: format!("{} - {}", desc.name, style.display_name()),
            description: format!("{} ({})", desc.description, result),
            result,
            score,
        }
    }

    /// One option for an explicit (style, type) pair.
    pub fn specific(&self, text: &str, style: NamingStyle, var_type: VariableType) -> Result<NamingOption> {
        let words = self.words(text)?;
        let id = format!("{}_{}", var_type.id(), style.id());
        Ok(self.build_option(id, &words, style, var_type))
    }

    /// Every style for every type, grouped by category. Invalid results stay
    /// in the grid with `score: None`, so the grid always holds
    /// `styles × types` entries.
    pub fn generate_all_options(&self, text: &str) -> Result<CategoryGrid> {
        let words = self.words(text)?;
        let mut grid = CategoryGrid::default();
        for var_type in VariableType::ALL {
            for style in NamingStyle::ALL {
                let id = format!("{}_{}", var_type.id(), style.id());
                grid.push(self.build_option(id, &words, style, var_type));
            }
        }
        Ok(grid)
    }

    /// The short list shown before any drill-down.
    ///
    /// Takes the first `pool` distinct translations by confidence, offers
    /// camelCase and PascalCase for the first two and snake_case for the rest,
    /// all decorated with `var_type`. Invalid and case-insensitively duplicate
    /// results are skipped. At most [`MAX_RECOMMENDATIONS`] options come back.
    /// Returns the options and the number of candidates that were attempted.
    pub fn recommend(
        &self,
        translations: &[TranslationCandidate],
        var_type: VariableType,
        pool: usize,
        limit: usize,
    ) -> (Vec<NamingOption>, usize) {
        let limit = limit.min(MAX_RECOMMENDATIONS);
        let mut seen_texts = HashSet::new();
        let distinct: Vec<Vec<String>> = by_confidence(translations)
            .into_iter()
            .filter_map(|t| {
                let cleaned = clean_text(&t.text);
                let words = tokenize(&cleaned);
                (!words.is_empty() && seen_texts.insert(cleaned.to_lowercase())).then_some(words)
            })
            .take(pool)
            .collect();

        let mut options = Vec::new();
        let mut seen_results = HashSet::new();
        let mut attempted = 0;

        'outer: for (index, words) in distinct.iter().enumerate() {
            let styles = if index < 2 { LEADING_STYLES } else { TRAILING_STYLES };
            for &style in styles {
                if options.len() >= limit {
                    break 'outer;
                }
                attempted += 1;
                let option = self.build_option(format!("smart_{}", options.len()), words, style, var_type);
                if !option.is_valid() {
                    debug!("Dropping invalid recommendation '{}'", option.result);
                    continue;
                }
                if !seen_results.insert(option.result.to_lowercase()) {
                    continue;
                }
                options.push(NamingOption {
                    description: format!("{} - {}", style.display_name(), var_type.descriptor().description),
                    ..option
                });
            }
        }

        (options, attempted)
    }

    /// Plain style transforms of `text`, filtered by structural validity and
    /// ranked by score.
    pub fn rank_styles(&self, text: &str, styles: &[NamingStyle]) -> Result<Vec<ScoredName>> {
        let words = self.words(text)?;
        let scored: Vec<ScoredName> = styles
            .iter()
            .filter_map(|&style| {
                let name = style.transform(&words);
                self.scorer
                    .evaluate(&name, style.validate(&name), words.len())
                    .map(|score| ScoredName { name, style, score })
            })
            .collect();

        if scored.is_empty() {
            return Err(NamingError::AllInvalid {
                input: text.to_string(),
                attempted: styles.len(),
            });
        }
        Ok(self.scorer.rank(scored))
    }
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new(CandidateScorer::default())
    }
}

/// Uppercases and then replaces whatever is still lowercase with `_`.
/// For ASCII input the second step never fires.
// TODO: confirm whether word boundaries inside camel/Pascal bases should
// become underscores here (TOTALITEMS vs TOTAL_ITEMS).
fn constant_shape(name: &str) -> String {
    name.to_uppercase()
        .chars()
        .map(|c| if c.is_lowercase() { '_' } else { c })
        .collect()
}
