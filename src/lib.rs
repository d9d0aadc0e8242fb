// src/lib.rs

pub mod config;
pub mod core;
pub mod errors;
pub mod navigator;
pub mod persistence;
pub mod rules;
pub mod translation;

pub use crate::config::EngineConfig;
pub use crate::core::engine::NamingEngine;
pub use crate::core::style::NamingStyle;
pub use crate::core::taxonomy::{Category, VariableType};
pub use crate::core::types::{CategoryGrid, NamingOption, ScoredName, Selection, TranslationCandidate};
pub use crate::errors::{NamingError, Result};
pub use crate::navigator::{NavigationSession, Screen};
pub use crate::rules::{RuleStore, ShortcutRule, ShortcutRules, SlotId};
