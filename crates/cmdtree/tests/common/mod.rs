//! Shared test doubles.
#![allow(dead_code)]

use cmdtree::{Caller, CallerKind, ConversionError, Diagnostics, ParamKind};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// A caller that records every message it is sent.
pub struct RecordingCaller {
    pub kind: CallerKind,
    /// `None` grants every permission.
    pub permissions: Option<HashSet<String>>,
    pub messages: RefCell<Vec<String>>,
}

impl RecordingCaller {
    pub fn new(kind: CallerKind) -> Self {
        Self {
            kind,
            permissions: None,
            messages: RefCell::new(Vec::new()),
        }
    }

    pub fn other() -> Self {
        Self::new(CallerKind::Other)
    }

    pub fn player() -> Self {
        Self::new(CallerKind::Player)
    }

    pub fn console() -> Self {
        Self::new(CallerKind::Console)
    }

    pub fn with_permissions(mut self, nodes: &[&str]) -> Self {
        self.permissions = Some(nodes.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn take(&self) -> Vec<String> {
        self.messages.borrow_mut().drain(..).collect()
    }
}

impl Caller for RecordingCaller {
    fn name(&self) -> &str {
        "mock caller"
    }

    fn kind(&self) -> CallerKind {
        self.kind
    }

    fn has_permission(&self, node: &str) -> bool {
        match &self.permissions {
            Some(granted) => granted.contains(node),
            None => true,
        }
    }

    fn send_message(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// Diagnostics events, as plain strings.
#[derive(Clone, Default)]
pub struct RecordingDiagnostics {
    pub events: Rc<RefCell<Vec<String>>>,
}

impl RecordingDiagnostics {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn push(&self, event: String) {
        self.events.borrow_mut().push(event);
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn command_registered(&self, path: &str) {
        self.push(format!("registered {}", path));
    }

    fn dispatch_rejected(&self, command: &str, reason: &str) {
        self.push(format!("rejected {}: {}", command, reason));
    }

    fn conversion_failed(
        &self,
        path: &str,
        token: &str,
        kind: &ParamKind,
        _error: &ConversionError,
    ) {
        self.push(format!("conversion {} {} {}", path, token, kind));
    }

    fn unsupported_parameter(&self, path: &str, reason: &str) {
        self.push(format!("unsupported {}: {}", path, reason));
    }

    fn handler_failed(&self, path: &str, error: &anyhow::Error) {
        self.push(format!("failed {}: {}", path, error));
    }
}
