//! Diagnostics sink for events the caller never sees in full.
//!
//! The router reports registration, rejected dispatches, conversion failures
//! and handler errors here. [`TracingDiagnostics`] (the default) forwards
//! them to `tracing`; [`NullDiagnostics`] drops them.

use tracing::{debug, error, warn};

use crate::error::ConversionError;
use crate::param::ParamKind;

/// Receives router events. Every method has a no-op default except
/// [`handler_failed`](Diagnostics::handler_failed).
pub trait Diagnostics {
    fn command_registered(&self, _path: &str) {}

    /// A dispatch was answered with a message instead of an invocation.
    fn dispatch_rejected(&self, _command: &str, _reason: &str) {}

    fn conversion_failed(
        &self,
        _path: &str,
        _token: &str,
        _kind: &ParamKind,
        _error: &ConversionError,
    ) {
    }

    /// A leaf's signature could not be coerced at dispatch time.
    fn unsupported_parameter(&self, _path: &str, _reason: &str) {}

    /// A handler returned an error.
    fn handler_failed(&self, path: &str, error: &anyhow::Error);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn command_registered(&self, path: &str) {
        debug!(command = path, "registered command");
    }

    fn dispatch_rejected(&self, command: &str, reason: &str) {
        debug!(command, reason, "dispatch rejected");
    }

    fn conversion_failed(
        &self,
        path: &str,
        token: &str,
        kind: &ParamKind,
        error: &ConversionError,
    ) {
        warn!(command = path, token, kind = %kind, %error, "argument conversion failed");
    }

    fn unsupported_parameter(&self, path: &str, reason: &str) {
        error!(command = path, reason, "command has unsupported parameters");
    }

    fn handler_failed(&self, path: &str, error: &anyhow::Error) {
        error!(command = path, error = ?error, "command handler failed");
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn handler_failed(&self, _path: &str, _error: &anyhow::Error) {}
}
