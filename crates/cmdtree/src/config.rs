//! Router configuration and user-facing message templates.
//!
//! Every message the router sends to a caller comes from [`Messages`], so an
//! embedding application can reword or translate them. Templates use
//! `{name}` placeholders.
//!
//! Configuration can be built in code or loaded from YAML/JSON:
//!
//! ```rust
//! use cmdtree::RouterConfig;
//!
//! let config = RouterConfig::from_yaml_str(r#"
//! command_prefix: "!"
//! messages:
//!   permission_denied: "Nope."
//! "#).unwrap();
//!
//! assert_eq!(config.command_prefix, "!");
//! assert_eq!(config.messages.permission_denied, "Nope.");
//! assert!(config.validate_signatures);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for a [`Router`](crate::Router).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Prepended to command paths in messages (default `/`).
    pub command_prefix: String,

    /// Reject malformed signatures at registration (default `true`).
    ///
    /// When `false`, a malformed signature is accepted and the defect surfaces
    /// as [`DispatchError::UnsupportedParameter`](crate::DispatchError) the
    /// first time the command runs.
    pub validate_signatures: bool,

    pub messages: Messages,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            command_prefix: "/".to_string(),
            validate_signatures: true,
            messages: Messages::default(),
        }
    }
}

impl RouterConfig {
    /// Parses a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Parses a JSON document. Missing keys take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Templates for every message sent to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Placeholder: `{command}`.
    pub invalid_command: String,
    /// Placeholder: `{token}`.
    pub possible_replacements: String,
    /// Placeholder: `{command}`.
    pub incomplete_command: String,
    pub possible_completions: String,
    pub permission_denied: String,
    /// Placeholder: `{caller}` (e.g. "the console").
    pub unsupported_caller: String,
    /// Placeholder: `{filter}`.
    pub filtered: String,
    /// Placeholders: `{token}`, `{kind}`, `{reason}`.
    pub conversion_failed: String,
    /// Placeholder: `{command}`.
    pub handler_failed: String,
    /// Placeholder: `{command}`.
    pub handler_busy: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_command: "Invalid command: \"{command}\"".to_string(),
            possible_replacements: "Possible replacements for \"{token}\":".to_string(),
            incomplete_command: "Incomplete command: \"{command}\"".to_string(),
            possible_completions: "Possible completions:".to_string(),
            permission_denied: "You don't have permission to run this command.".to_string(),
            unsupported_caller: "This command can't be run by {caller}.".to_string(),
            filtered: "You can't run this command right now.".to_string(),
            conversion_failed: "Error converting \"{token}\" to {kind}: {reason}".to_string(),
            handler_failed: "An internal error occurred while running \"{command}\".".to_string(),
            handler_busy: "\"{command}\" is already running.".to_string(),
        }
    }
}

/// Substitutes `{key}` placeholders in `template`.
pub(crate) fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{}}}", key), value)
    })
}
