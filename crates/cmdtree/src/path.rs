//! Command path tokens.
//!
//! A command path like `"warp set"` is split on spaces into the tokens the
//! prefix tree is keyed by.

use std::fmt;

use crate::error::RegistrationError;

/// The tokens of a registered command path. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSpec {
    tokens: Vec<String>,
}

impl PathSpec {
    /// Splits `path` on spaces. Runs of spaces never produce empty tokens.
    ///
    /// Fails with [`RegistrationError::EmptyPath`] if no token remains.
    pub fn parse(path: &str) -> Result<Self, RegistrationError> {
        let tokens = string_to_path(path);
        if tokens.is_empty() {
            return Err(RegistrationError::EmptyPath);
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The first token, which is the command name the host dispatches on.
    pub fn name(&self) -> &str {
        &self.tokens[0]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&path_to_string(&self.tokens))
    }
}

/// Joins path tokens with single spaces.
///
/// For example, `["warp", "set"]` becomes `"warp set"`.
pub fn path_to_string<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a space-separated path into tokens, skipping empty pieces.
///
/// For example, `"warp  set"` becomes `["warp", "set"]`.
pub fn string_to_path(s: &str) -> Vec<String> {
    s.split(' ')
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
