// File: src/persistence.rs
//! On-disk state: shortcut rules as JSON and the translation cache as a
//! bincode snapshot. Every write goes through a temp file in the target
//! directory and is renamed into place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::errors::{NamingError, Result};
use crate::rules::{RuleStore, ShortcutRule, ShortcutRules};
use crate::translation::{CacheSnapshot, TranslationCache};

/// Writes `path` atomically: readers see either the old file or the new one.
fn write_atomic<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)
        .map_err(|e| NamingError::io(format!("cannot create {}", parent_dir.display()), e))?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        fill(&mut writer)?;
        writer.flush()?;
    }
    temp_file
        .persist(path)
        .map_err(|e| NamingError::io(format!("cannot replace {}", path.display()), e.error))?;
    Ok(())
}

/// Shortcut rules kept in a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonRuleStore {
    path: PathBuf,
}

impl JsonRuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, rules: &ShortcutRules) -> Result<()> {
        write_atomic(&self.path, |writer| {
            serde_json::to_writer_pretty(writer, rules)?;
            Ok(())
        })?;
        debug!("Saved {} shortcut rules to {}", rules.len(), self.path.display());
        Ok(())
    }
}

impl RuleStore for JsonRuleStore {
    /// A missing file is an empty rule set.
    fn read(&self) -> Result<ShortcutRules> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ShortcutRules::default()),
            Err(e) => {
                return Err(NamingError::io(
                    format!("cannot open {}", self.path.display()),
                    e,
                ))
            }
        };
        let rules = serde_json::from_reader(BufReader::new(file))?;
        Ok(rules)
    }

    fn write(&mut self, rule: ShortcutRule) -> Result<()> {
        let mut rules = self.read()?;
        rules.assign(rule);
        self.save(&rules)
    }
}

pub fn save_cache(cache: &TranslationCache, path: &Path) -> Result<()> {
    write_atomic(path, |writer| {
        bincode::serialize_into(writer, &cache.snapshot())?;
        Ok(())
    })?;
    debug!("Saved {} cached translations to {}", cache.len(), path.display());
    Ok(())
}

pub fn load_cache(path: &Path) -> Result<TranslationCache> {
    let file = File::open(path)
        .map_err(|e| NamingError::io(format!("cannot open {}", path.display()), e))?;
    let snapshot: CacheSnapshot = bincode::deserialize_from(BufReader::new(file))?;
    Ok(TranslationCache::from_snapshot(snapshot))
}

/// Loads the snapshot at `path`, or starts empty if it is missing or
/// unreadable. The capacity always follows `capacity`.
pub fn load_cache_or_new(path: &Path, capacity: usize) -> TranslationCache {
    match load_cache(path) {
        Ok(mut cache) => {
            cache.set_capacity(capacity);
            info!("Loaded {} cached translations", cache.len());
            cache
        }
        Err(NamingError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            TranslationCache::new(capacity)
        }
        Err(e) => {
            warn!("Discarding translation cache at {}: {}", path.display(), e);
            TranslationCache::new(capacity)
        }
    }
}
