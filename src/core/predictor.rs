// File: src/core/predictor.rs
//! Heuristic ranking of variable types for a phrase.
//!
//! Rules are applied in a fixed order and each later rule prepends its
//! types, so the last rule to fire wins the top spot:
//!
//! 1. keyword substrings of the phrase (appended in table order)
//! 2. file-extension hints from the context
//! 3. long phrases lean towards plain variables
//! 4. literal prefixes/suffixes of the untouched phrase (`get…`, `…Count`)
//!
//! When nothing fires the prediction is `normal` alone.

use tracing::debug;

use crate::core::context::{ContextHint, SourceFamily};
use crate::core::taxonomy::VariableType;
use crate::core::tokenizer::{clean_text, tokenize};

struct SemanticRule {
    patterns: &'static [&'static str],
    types: &'static [VariableType],
}

const SEMANTIC_RULES: &[SemanticRule] = &[
    SemanticRule {
        patterns: &["count", "num", "total", "size", "length"],
        types: &[VariableType::Count, VariableType::Int],
    },
    SemanticRule {
        patterns: &["name", "title", "text", "content", "message"],
        types: &[VariableType::String],
    },
    SemanticRule {
        patterns: &["is", "has", "can", "should", "will", "enable", "visible"],
        types: &[VariableType::Bool],
    },
    SemanticRule {
        patterns: &["list", "array", "items", "collection"],
        types: &[VariableType::Array],
    },
    SemanticRule {
        patterns: &["ptr", "pointer", "ref", "reference"],
        types: &[VariableType::Pointer],
    },
    SemanticRule {
        patterns: &["handle", "handler", "fd", "descriptor"],
        types: &[VariableType::Handle],
    },
    SemanticRule {
        patterns: &["index", "idx", "position", "pos"],
        types: &[VariableType::Int],
    },
    SemanticRule {
        patterns: &["const", "constant", "max", "min", "default"],
        types: &[VariableType::Const],
    },
];

pub struct TypePredictor {
    limit: usize,
}

impl TypePredictor {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Returns up to `limit` distinct types, most likely first. Never empty
    /// while `limit > 0`.
    pub fn predict(&self, text: &str, context: Option<&ContextHint>) -> Vec<VariableType> {
        let cleaned = clean_text(text);
        let lower = cleaned.to_lowercase();
        let mut predictions: Vec<VariableType> = Vec::new();

        for rule in SEMANTIC_RULES {
            if rule.patterns.iter().any(|p| lower.contains(p)) {
                predictions.extend_from_slice(rule.types);
            }
        }

        if let Some(hint) = context {
            if hint.is_c_family() {
                prepend(&mut predictions, &[VariableType::Member, VariableType::Pointer, VariableType::Static]);
            }
            match hint.family() {
                SourceFamily::Script => prepend(&mut predictions, &[VariableType::Normal, VariableType::Const]),
                SourceFamily::Python => prepend(&mut predictions, &[VariableType::Normal]),
                SourceFamily::Java => prepend(&mut predictions, &[VariableType::Member, VariableType::Static]),
                _ => {}
            }
            if hint.is_header() {
                prepend(&mut predictions, &[VariableType::Const, VariableType::Global]);
            }
        }

        if tokenize(&cleaned).len() > 2 {
            prepend(&mut predictions, &[VariableType::Normal]);
        }

        let literal = text.trim();
        if literal.starts_with("get") || literal.starts_with("set") {
            prepend(&mut predictions, &[VariableType::Function]);
        }
        if literal.ends_with("Count") || literal.ends_with("Size") {
            prepend(&mut predictions, &[VariableType::Count, VariableType::Int]);
        }
        if literal.ends_with("Flag") || literal.ends_with("State") {
            prepend(&mut predictions, &[VariableType::Bool]);
        }

        if predictions.is_empty() {
            predictions.push(VariableType::Normal);
        }

        let mut ranked: Vec<VariableType> = Vec::with_capacity(self.limit);
        for ty in predictions {
            if ranked.len() == self.limit {
                break;
            }
            if !ranked.contains(&ty) {
                ranked.push(ty);
            }
        }

        debug!("Predicted types for '{}': {:?}", text, ranked);
        ranked
    }

    /// The single most likely type.
    pub fn primary(&self, text: &str, context: Option<&ContextHint>) -> VariableType {
        self.predict(text, context)
            .first()
            .copied()
            .unwrap_or(VariableType::Normal)
    }
}

impl Default for TypePredictor {
    fn default() -> Self {
        Self::new(5)
    }
}

fn prepend(predictions: &mut Vec<VariableType>, types: &[VariableType]) {
    predictions.splice(0..0, types.iter().copied());
}
