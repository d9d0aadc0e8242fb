// File: src/core/engine.rs
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::core::context::ContextHint;
use crate::core::generator::{by_confidence, CandidateGenerator};
use crate::core::predictor::TypePredictor;
use crate::core::scorer::CandidateScorer;
use crate::core::style::NamingStyle;
use crate::core::taxonomy::VariableType;
use crate::core::tokenizer::clean_text;
use crate::core::types::{CategoryGrid, NamingOption, ScoredName, TranslationCandidate};
use crate::errors::{NamingError, Result};
use crate::navigator::NavigationSession;
use crate::rules::{ShortcutRule, ShortcutRules, SlotId};
use crate::translation::Translator;

/// The naming engine is a pure function of its configuration: it holds no
/// session or storage state, so one instance can serve any number of
/// sessions.
pub struct NamingEngine {
    config: EngineConfig,
    predictor: TypePredictor,
    generator: CandidateGenerator,
}

impl NamingEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            predictor: TypePredictor::new(config.prediction_limit),
            generator: CandidateGenerator::new(CandidateScorer::new(config.max_name_length)),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn generator(&self) -> &CandidateGenerator {
        &self.generator
    }

    /// Likely variable types for `text`, most likely first. `context` is the
    /// name of the file being edited, if any.
    pub fn predict_types(&self, text: &str, context: Option<&str>) -> Vec<VariableType> {
        let hint = context.map(ContextHint::from_file_name);
        self.predictor.predict(text, hint.as_ref())
    }

    /// Opens a selection session for `phrase` from already translated
    /// candidates.
    ///
    /// Recommendations are decorated with the type predicted for the best
    /// translation. The grid is built from that same translation.
    pub fn generate_candidates(
        &self,
        phrase: &str,
        translations: Vec<TranslationCandidate>,
        context: Option<&str>,
    ) -> Result<NavigationSession> {
        if phrase.trim().is_empty() {
            return Err(NamingError::EmptyInput);
        }

        let usable: Vec<TranslationCandidate> = translations
            .into_iter()
            .filter(|t| !clean_text(&t.text).is_empty())
            .collect();
        // same order the recommendations are built in
        let top = by_confidence(&usable)
            .first()
            .copied()
            .ok_or_else(|| NamingError::NoCandidates {
                input: phrase.to_string(),
            })?;

        let var_type = self.predict_types(&top.text, context)
            .first()
            .copied()
            .unwrap_or(VariableType::Normal);
        debug!("Recommending '{}' variables for '{}'", var_type, phrase);

        let (recommendations, attempted) = self.generator.recommend(
            &usable,
            var_type,
            self.config.translation_pool,
            self.config.recommendation_limit,
        );
        if recommendations.is_empty() {
            return Err(NamingError::AllInvalid {
                input: phrase.to_string(),
                attempted,
            });
        }

        let grid = self.generator.generate_all_options(&top.text)?;
        info!(
            "Session for '{}': {} recommendations, {} grid options",
            phrase,
            recommendations.len(),
            grid.len()
        );
        Ok(NavigationSession::new(phrase, usable, recommendations, grid))
    }

    /// Asks `translator` for candidates, then opens a session.
    pub fn start_session(
        &self,
        phrase: &str,
        context: Option<&str>,
        translator: &mut dyn Translator,
    ) -> Result<NavigationSession> {
        if phrase.trim().is_empty() {
            return Err(NamingError::EmptyInput);
        }
        let translations = translator.translate(phrase)?;
        self.generate_candidates(phrase, translations, context)
    }

    pub fn generate_all_options(&self, phrase: &str) -> Result<CategoryGrid> {
        self.generator.generate_all_options(phrase)
    }

    /// One option for a (style, type) pair named by id. Unknown ids fail
    /// before anything is generated.
    pub fn generate_specific(&self, phrase: &str, style_id: &str, type_id: &str) -> Result<NamingOption> {
        let style: NamingStyle = style_id.parse()?;
        let var_type: VariableType = type_id.parse()?;
        self.generator.specific(phrase, style, var_type)
    }

    pub fn rank_names(&self, phrase: &str, styles: &[NamingStyle]) -> Result<Vec<ScoredName>> {
        self.generator.rank_styles(phrase, styles)
    }

    /// Rewrites `text` in the style named `style_id`, without decoration.
    pub fn convert(&self, text: &str, style_id: &str) -> Result<String> {
        let style: NamingStyle = style_id.parse()?;
        let words = self.generator.words(text)?;
        Ok(style.transform(&words))
    }

    pub fn apply_rule(&self, rule: &ShortcutRule, text: &str) -> Result<String> {
        rule.apply(&self.generator, text)
    }

    /// Applies whatever rule is bound to `slot`.
    pub fn apply_slot(&self, rules: &ShortcutRules, slot: SlotId, text: &str) -> Result<String> {
        let rule = rules.get(slot).ok_or(NamingError::EmptySlot(slot.get()))?;
        self.apply_rule(rule, text)
    }
}

impl Default for NamingEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            predictor: TypePredictor::default(),
            generator: CandidateGenerator::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LookupKind;
    use crate::translation::IdentityTranslator;

    fn candidate(text: &str, confidence: f64) -> TranslationCandidate {
        TranslationCandidate::new(text, confidence, "test")
    }

    #[test]
    fn test_blank_phrase() {
        let engine = NamingEngine::default();
        let err = engine
            .generate_candidates("  ", vec![candidate("user", 1.0)], None)
            .unwrap_err();
        assert!(matches!(err, NamingError::EmptyInput));
    }

    #[test]
    fn test_no_usable_translations() {
        let engine = NamingEngine::default();
        let err = engine
            .generate_candidates("用户", vec![candidate("，。", 0.9)], None)
            .unwrap_err();
        assert!(matches!(err, NamingError::NoCandidates { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_all_recommendations_invalid() {
        let engine = NamingEngine::default();
        // "ngths" is an unreadable consonant run in every style
        let err = engine
            .generate_candidates("x", vec![candidate("strengths", 1.0)], None)
            .unwrap_err();
        assert!(matches!(err, NamingError::AllInvalid { attempted: 2, .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_grid_and_recommendations_share_top_translation() {
        let engine = NamingEngine::default();
        let odd = TranslationCandidate {
            text: "close gate".into(),
            confidence: f64::NAN,
            origin: "test".into(),
        };
        let session = engine
            .generate_candidates("门", vec![candidate("open door", 0.9), odd], None)
            .unwrap();

        let grid_camel = session
            .grid()
            .iter()
            .find(|o| o.id == "normal_camelCase")
            .map(|o| o.result.clone())
            .unwrap();
        assert_eq!(session.recommendations()[0].result, grid_camel);
    }

    #[test]
    fn test_session_uses_top_translation() {
        let engine = NamingEngine::default();
        let session = engine
            .generate_candidates(
                "用户数量",
                vec![candidate("user number", 0.8), candidate("userCount", 0.95)],
                Some("file.h"),
            )
            .unwrap();

        // "userCount" wins on confidence, so the predicted type is count
        let first = &session.recommendations()[0];
        assert_eq!(first.var_type, VariableType::Count);
        assert_eq!(first.result, "userCountCount");
        assert_eq!(session.grid().len(), NamingStyle::ALL.len() * VariableType::ALL.len());
        assert_eq!(session.original_input(), "用户数量");
    }

    #[test]
    fn test_start_session_with_identity() {
        let engine = NamingEngine::default();
        let session = engine
            .start_session("open door", None, &mut IdentityTranslator)
            .unwrap();
        let results: Vec<&str> = session
            .recommendations()
            .iter()
            .map(|o| o.result.as_str())
            .collect();
        // PascalCase folds into camelCase under case-insensitive dedup
        assert_eq!(results, vec!["openDoor"]);

        let err = engine
            .start_session("用户", None, &mut IdentityTranslator)
            .unwrap_err();
        assert!(matches!(err, NamingError::NoCandidates { .. }));
    }

    #[test]
    fn test_generate_specific_lookup() {
        let engine = NamingEngine::default();
        let option = engine
            .generate_specific("user name", "snake_case", "member")
            .unwrap();
        assert_eq!(option.result, "m_user_name");

        match engine.generate_specific("user name", "Train-Case", "member") {
            Err(NamingError::UnknownStyleOrType { kind, id }) => {
                assert_eq!(kind, LookupKind::Style);
                assert_eq!(id, "Train-Case");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(engine.generate_specific("user name", "camelCase", "matrix").is_err());
    }

    #[test]
    fn test_convert() {
        let engine = NamingEngine::default();
        assert_eq!(engine.convert("getHTTPResponse", "snake_case").unwrap(), "get_httpresponse");
        assert_eq!(engine.convert("max-retry count", "CONSTANT_CASE").unwrap(), "MAX_RETRY_COUNT");
        assert_eq!(engine.convert("café order", "snake_case").unwrap(), "café_order");
        assert!(matches!(engine.convert("", "camelCase"), Err(NamingError::EmptyInput)));
    }

    #[test]
    fn test_apply_slot() {
        let engine = NamingEngine::default();
        let rules = ShortcutRules::quick_styles();
        let slot = SlotId::new(4).unwrap();
        assert_eq!(engine.apply_slot(&rules, slot, "cache size").unwrap(), "_cache_size");

        let empty = ShortcutRules::default();
        assert!(matches!(
            engine.apply_slot(&empty, slot, "cache size"),
            Err(NamingError::EmptySlot(4))
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            recommendation_limit: 0,
            ..Default::default()
        };
        assert!(matches!(NamingEngine::new(config), Err(NamingError::Config { .. })));
    }
}
