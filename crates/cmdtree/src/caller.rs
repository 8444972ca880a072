//! The invoking side of a dispatch.
//!
//! The host environment implements [`Caller`] for whatever issues commands
//! (players, a server console, scripted senders). The router only needs the
//! caller's kind, a permission check and somewhere to send messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// The category of an invoking actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerKind {
    Player,
    Console,
    /// Anything else (scripted or proxied callers). Never rejected by the
    /// player/console flags.
    Other,
}

impl CallerKind {
    /// Phrase used in "can't be run as ..." messages.
    pub fn describe(&self) -> &'static str {
        match self {
            CallerKind::Player => "a player",
            CallerKind::Console => "the console",
            CallerKind::Other => "this caller",
        }
    }
}

impl fmt::Display for CallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallerKind::Player => write!(f, "player"),
            CallerKind::Console => write!(f, "console"),
            CallerKind::Other => write!(f, "other"),
        }
    }
}

/// An actor that can run commands.
///
/// `send_message` takes `&self`; implementations that buffer messages use
/// interior mutability.
pub trait Caller {
    /// Display name, used in diagnostics.
    fn name(&self) -> &str;

    fn kind(&self) -> CallerKind;

    /// Returns true if the caller holds `node`.
    fn has_permission(&self, node: &str) -> bool;

    fn send_message(&self, message: &str);
}

/// A named predicate over the caller, checked before invocation.
pub type Filter = Rc<dyn Fn(&dyn Caller) -> bool>;

/// Wraps a closure as a [`Filter`].
pub fn filter_fn<F>(f: F) -> Filter
where
    F: Fn(&dyn Caller) -> bool + 'static,
{
    Rc::new(f)
}
