// File: src/errors.rs
//! Error types for the naming engine.
//!
//! Every fallible operation in the crate returns [`Result`]. Two kinds,
//! [`NamingError::NoCandidates`] and [`NamingError::AllInvalid`], are warnings
//! the caller is expected to recover from by re-prompting or falling back to
//! manual input.

use std::io;

use thiserror::Error;

/// Main result type for naming operations.
pub type Result<T> = std::result::Result<T, NamingError>;

/// Which registry an unknown id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Style,
    Type,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKind::Style => f.write_str("style"),
            LookupKind::Type => f.write_str("variable type"),
        }
    }
}

#[derive(Error, Debug)]
pub enum NamingError {
    /// The phrase was empty or whitespace only.
    #[error("input is empty")]
    EmptyInput,

    /// The translation collaborator produced nothing usable.
    #[error("no naming suggestions available for '{input}'")]
    NoCandidates { input: String },

    /// Every generated candidate failed structural validation.
    #[error("all {attempted} candidates for '{input}' failed validation")]
    AllInvalid { input: String, attempted: usize },

    /// A style or type id that is not in the registry.
    #[error("unknown {kind} id '{id}'")]
    UnknownStyleOrType { kind: LookupKind, id: String },

    /// Shortcut slots are numbered 1 through 5.
    #[error("shortcut slot {0} is out of range (expected 1-5)")]
    InvalidSlot(u8),

    #[error("shortcut slot {0} has no rule")]
    EmptySlot(u8),

    /// The navigator received an event the current screen cannot handle.
    #[error("cannot handle '{event}' on screen '{screen}'")]
    InvalidTransition { screen: String, event: String },

    /// Grid entries that failed validation are shown but cannot be picked.
    #[error("'{name}' failed validation and cannot be selected")]
    InvalidOption { name: String },

    /// The session already reached a selection or was cancelled.
    #[error("navigation session is closed")]
    SessionClosed,

    #[error("configuration error: {message}")]
    Config {
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl NamingError {
    pub fn unknown_style(id: impl Into<String>) -> Self {
        Self::UnknownStyleOrType {
            kind: LookupKind::Style,
            id: id.into(),
        }
    }

    pub fn unknown_type(id: impl Into<String>) -> Self {
        Self::UnknownStyleOrType {
            kind: LookupKind::Type,
            id: id.into(),
        }
    }

    pub fn config(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub fn serialization<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Warnings the caller can recover from by asking again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NamingError::NoCandidates { .. } | NamingError::AllInvalid { .. }
        )
    }
}

impl From<io::Error> for NamingError {
    fn from(err: io::Error) -> Self {
        Self::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for NamingError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON", err)
    }
}

impl From<bincode::Error> for NamingError {
    fn from(err: bincode::Error) -> Self {
        Self::serialization("binary snapshot", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(NamingError::NoCandidates { input: "x".into() }.is_retryable());
        assert!(NamingError::AllInvalid {
            input: "x".into(),
            attempted: 3
        }
        .is_retryable());
        assert!(!NamingError::EmptyInput.is_retryable());
        assert!(!NamingError::unknown_style("Train-Case").is_retryable());
    }

    #[test]
    fn test_unknown_id_message() {
        let err = NamingError::unknown_type("quaternion");
        assert_eq!(err.to_string(), "unknown variable type id 'quaternion'");
    }
}
