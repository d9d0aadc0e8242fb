// File: src/config.rs
//! Engine configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::generator::MAX_RECOMMENDATIONS;
use crate::core::taxonomy::VariableType;
use crate::errors::{NamingError, Result};

const APP_DIR: &str = "namecraft";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of entries in the initial recommendation list
    pub recommendation_limit: usize,
    /// How many distinct translations feed the recommendation list
    pub translation_pool: usize,
    /// Maximum number of predicted variable types
    pub prediction_limit: usize,
    /// Longest identifier accepted by the validator
    pub max_name_length: usize,
    /// Entries kept by the translation cache
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recommendation_limit: 5,
            translation_pool: 3,
            prediction_limit: 5,
            max_name_length: 50,
            cache_capacity: 128,
        }
    }
}

impl EngineConfig {
    /// Loads a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| NamingError::io(format!("cannot read config {}", path.display()), e))?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_positive(self.recommendation_limit, "recommendation_limit")?;
        validate_positive(self.translation_pool, "translation_pool")?;
        validate_positive(self.prediction_limit, "prediction_limit")?;
        validate_positive(self.max_name_length, "max_name_length")?;
        validate_positive(self.cache_capacity, "cache_capacity")?;

        if self.recommendation_limit > MAX_RECOMMENDATIONS {
            return Err(NamingError::config(
                format!("recommendation_limit must not exceed {}", MAX_RECOMMENDATIONS),
                "recommendation_limit",
            ));
        }
        if self.prediction_limit > VariableType::ALL.len() {
            return Err(NamingError::config(
                format!("prediction_limit must not exceed {}", VariableType::ALL.len()),
                "prediction_limit",
            ));
        }
        Ok(())
    }

    /// `<local data dir>/namecraft`, where rules and cache snapshots live.
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join(APP_DIR))
    }

    pub fn default_rules_path() -> Option<PathBuf> {
        Self::data_dir().map(|dir| dir.join("shortcut_rules.json"))
    }

    pub fn default_cache_path() -> Option<PathBuf> {
        Self::data_dir().map(|dir| dir.join("translation_cache.bin"))
    }
}

fn validate_positive(value: usize, field: &str) -> Result<()> {
    if value == 0 {
        return Err(NamingError::config(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recommendation_limit, 5);
        assert_eq!(config.max_name_length, 50);
    }

    #[test]
    fn test_rejects_zero_limit() {
        let config = EngineConfig {
            translation_pool: 0,
            ..Default::default()
        };
        match config.validate() {
            Err(NamingError::Config { field, .. }) => assert_eq!(field.as_deref(), Some("translation_pool")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_oversized_prediction_limit() {
        let config = EngineConfig {
            prediction_limit: 25,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_recommendation_limit_above_five() {
        let config = EngineConfig {
            recommendation_limit: 10,
            translation_pool: 8,
            ..Default::default()
        };
        match config.validate() {
            Err(NamingError::Config { field, .. }) => {
                assert_eq!(field.as_deref(), Some("recommendation_limit"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "recommendation_limit": 3 }"#).unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.recommendation_limit, 3);
        assert_eq!(config.translation_pool, 3);
        assert_eq!(config.cache_capacity, 128);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = EngineConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, NamingError::Io { .. }));
    }
}
