//! Error types for registration, dispatch and graph export.

use std::io;
use thiserror::Error;

/// Errors raised while building the command tree.
///
/// These indicate defects in command declarations and are never shown to the
/// caller of a command.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The path string contained no tokens.
    #[error("command path is zero-length")]
    EmptyPath,

    /// A leaf is already bound at this path.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),

    /// The parameter list has a shape the coercer cannot fill.
    #[error("command '{path}' has unsupported parameters: {reason}")]
    UnsupportedParameter { path: String, reason: String },

    /// A filter name was not known to the owning command set.
    #[error("command '{path}' references unknown filter '{filter}'")]
    UnknownFilter { path: String, filter: String },
}

impl RegistrationError {
    pub(crate) fn unsupported(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedParameter {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that escape [`Router::dispatch`](crate::Router::dispatch).
///
/// User mistakes never end up here; they are reported through the caller's
/// message sink instead.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A leaf was registered with a signature that cannot be coerced.
    #[error("command '{path}' has unsupported parameters: {reason}")]
    UnsupportedParameter { path: String, reason: String },
}

/// A parameter list that breaks the slot-ordering rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ShapeError(pub String);

/// A single token that could not be converted to its slot's kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ConversionError {
    /// Human-readable reason, e.g. `invalid digit found in string`.
    pub reason: String,
}

impl ConversionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors from writing the tree topology.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors from loading a [`RouterConfig`](crate::RouterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}
