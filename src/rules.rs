// File: src/rules.rs
//! Shortcut rules: a chosen (style, type) pair bound to one of five slots so
//! it can be reapplied to new text without going through the funnel.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::generator::CandidateGenerator;
use crate::core::style::NamingStyle;
use crate::core::taxonomy::VariableType;
use crate::core::types::{NamingOption, Selection};
use crate::errors::{NamingError, Result};

pub const SLOT_COUNT: u8 = 5;

/// A shortcut slot number, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotId(u8);

impl SlotId {
    pub fn new(slot: u8) -> Result<Self> {
        if (1..=SLOT_COUNT).contains(&slot) {
            Ok(Self(slot))
        } else {
            Err(NamingError::InvalidSlot(slot))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = SlotId> {
        (1..=SLOT_COUNT).map(SlotId)
    }
}

impl TryFrom<u8> for SlotId {
    type Error = NamingError;

    fn try_from(slot: u8) -> Result<Self> {
        SlotId::new(slot)
    }
}

impl From<SlotId> for u8 {
    fn from(slot: SlotId) -> u8 {
        slot.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutRule {
    pub slot: SlotId,
    pub name: String,
    pub style: NamingStyle,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    pub description: String,
}

impl ShortcutRule {
    pub fn new(slot: SlotId, style: NamingStyle, var_type: VariableType) -> Self {
        let desc = var_type.descriptor();
        Self {
            slot,
            name: format!("{} - {}", desc.name, style.display_name()),
            style,
            var_type,
            description: format!("{} ({})", desc.description, style.example()),
        }
    }

    /// Captures the (style, type) pair behind a selected option.
    pub fn from_option(slot: SlotId, option: &NamingOption) -> Self {
        Self {
            slot,
            name: option.label.clone(),
            style: option.style,
            var_type: option.var_type,
            description: option.description.clone(),
        }
    }

    /// Renders `text` with this rule's style and type.
    pub fn apply(&self, generator: &CandidateGenerator, text: &str) -> Result<String> {
        let words = generator.words(text)?;
        Ok(generator.naming(&words, self.style, self.var_type))
    }
}

/// The slot → rule mapping. Slots without a rule are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortcutRules {
    rules: BTreeMap<SlotId, ShortcutRule>,
}

impl ShortcutRules {
    /// Slots 1-5 bound to camelCase, PascalCase, snake_case, _snake_case and
    /// CONSTANT_CASE plain variables.
    pub fn quick_styles() -> Self {
        let styles = [
            NamingStyle::Camel,
            NamingStyle::Pascal,
            NamingStyle::Snake,
            NamingStyle::LeadingSnake,
            NamingStyle::Constant,
        ];
        let mut rules = Self::default();
        for (slot, style) in SlotId::all().zip(styles) {
            rules.assign(ShortcutRule::new(slot, style, VariableType::Normal));
        }
        rules
    }

    pub fn get(&self, slot: SlotId) -> Option<&ShortcutRule> {
        self.rules.get(&slot)
    }

    /// Stores `rule` in its slot, replacing whatever was there.
    pub fn assign(&mut self, rule: ShortcutRule) -> Option<ShortcutRule> {
        self.rules.insert(rule.slot, rule)
    }

    /// Copies every bound slot of `other` over this set.
    pub fn overlay(&mut self, other: &ShortcutRules) {
        for rule in other.rules.values() {
            self.assign(rule.clone());
        }
    }

    pub fn clear(&mut self, slot: SlotId) -> Option<ShortcutRule> {
        self.rules.remove(&slot)
    }

    /// All five slots in order, bound or not.
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, Option<&ShortcutRule>)> + '_ {
        SlotId::all().map(move |slot| (slot, self.rules.get(&slot)))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Where shortcut rules live between sessions.
pub trait RuleStore {
    fn read(&self) -> Result<ShortcutRules>;
    fn write(&mut self, rule: ShortcutRule) -> Result<()>;
}

/// A store that forgets everything on drop.
#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    rules: ShortcutRules,
}

impl MemoryRuleStore {
    pub fn new(rules: ShortcutRules) -> Self {
        Self { rules }
    }
}

impl RuleStore for MemoryRuleStore {
    fn read(&self) -> Result<ShortcutRules> {
        Ok(self.rules.clone())
    }

    fn write(&mut self, rule: ShortcutRule) -> Result<()> {
        self.rules.assign(rule);
        Ok(())
    }
}

/// Turns a completed selection into a rule and writes it to `slot`.
pub fn persist_selection(
    store: &mut dyn RuleStore,
    slot: SlotId,
    selection: &Selection,
) -> Result<ShortcutRule> {
    let rule = ShortcutRule::from_option(slot, &selection.option);
    store.write(rule.clone())?;
    info!("Bound slot {} to {} / {}", slot, rule.style, rule.var_type);
    Ok(rule)
}
