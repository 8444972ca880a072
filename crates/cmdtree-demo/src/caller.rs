//! The caller behind the demo console.

use std::cell::RefCell;
use std::collections::HashSet;
use std::io::Write;

use cmdtree::{Caller, CallerKind};
use tracing::warn;

/// A caller that writes every message as one line to `out`.
pub struct TerminalCaller<W: Write> {
    name: String,
    kind: CallerKind,
    permissions: HashSet<String>,
    out: RefCell<W>,
}

impl<W: Write> TerminalCaller<W> {
    pub fn new(name: &str, kind: CallerKind, out: W) -> Self {
        Self {
            name: name.to_string(),
            kind,
            permissions: HashSet::new(),
            out: RefCell::new(out),
        }
    }

    pub fn grant<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Caller for TerminalCaller<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CallerKind {
        self.kind
    }

    /// The console holds every permission.
    fn has_permission(&self, node: &str) -> bool {
        self.kind == CallerKind::Console || self.permissions.contains(node)
    }

    fn send_message(&self, message: &str) {
        if let Err(err) = writeln!(self.out.borrow_mut(), "{}", message) {
            warn!(%err, "failed to write message");
        }
    }
}
