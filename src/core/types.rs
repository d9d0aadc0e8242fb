// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::style::NamingStyle;
use crate::core::taxonomy::{Category, VariableType};

/// One phrase suggestion from the translation collaborator.
/// The order of a candidate list is the collaborator's own ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationCandidate {
    pub text: String,
    /// Clamped to [0, 1].
    pub confidence: f64,
    /// Which service or strategy produced the text.
    pub origin: String,
}

impl TranslationCandidate {
    pub fn new(text: impl Into<String>, confidence: f64, origin: impl Into<String>) -> Self {
        let confidence = if confidence.is_nan() { 0.0 } else { confidence.clamp(0.0, 1.0) };
        Self {
            text: text.into(),
            confidence,
            origin: origin.into(),
        }
    }
}

/// A fully decorated identifier together with the (style, type) pair that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingOption {
    pub id: String,
    pub style: NamingStyle,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    pub result: String,
    /// Short "type - style" label for menus.
    pub label: String,
    pub description: String,
    /// Quality score in [0, 100]; `None` when the result failed structural
    /// validation.
    pub score: Option<u8>,
}

impl NamingOption {
    pub fn is_valid(&self) -> bool {
        self.score.is_some()
    }
}

/// A plain style transform ranked by the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredName {
    pub name: String,
    pub style: NamingStyle,
    pub score: u8,
}

/// Every (style, type) combination, grouped by the type's category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGrid {
    pub categories: BTreeMap<Category, Vec<NamingOption>>,
}

impl CategoryGrid {
    pub fn push(&mut self, option: NamingOption) {
        self.categories
            .entry(option.var_type.category())
            .or_default()
            .push(option);
    }

    /// Categories that have at least one option, in catalog order.
    pub fn category_names(&self) -> Vec<Category> {
        self.categories.keys().copied().collect()
    }

    pub fn options(&self, category: Category) -> &[NamingOption] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamingOption> {
        self.categories.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What a completed session hands back to the caller for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub option: NamingOption,
}
