//! Command declarations and the leaves they become.
//!
//! A [`CommandSpec`] is what an application writes: path, parameters,
//! metadata and handler. Registration turns it into an immutable
//! [`CommandLeaf`] bound to one node of the tree.
//!
//! ```rust
//! use cmdtree::{CommandSpec, Invocation, ParamKind};
//!
//! let spec = CommandSpec::new("warp set", |inv: &Invocation<'_>| {
//!     let name = inv.args().str(0).unwrap_or_default();
//!     inv.reply(&format!("Warp {} set.", name));
//! })
//! .param(ParamKind::PlayerCaller, "player")
//! .param(ParamKind::String, "name")
//! .permission("warps.set");
//!
//! assert_eq!(spec.path(), "warp set");
//! assert_eq!(spec.meta().permission, "warps.set");
//! ```

use std::cell::RefCell;
use std::fmt;

use crate::caller::{Caller, CallerKind, Filter};
use crate::coerce::{coerce_token, CoerceError};
use crate::config::{fill, Messages};
use crate::diagnostics::Diagnostics;
use crate::error::DispatchError;
use crate::handler::{FnHandler, Handler, IntoHandlerResult, Invocation};
use crate::param::{Args, Param, ParamKind, Signature, Value};
use crate::path::PathSpec;

/// Metadata attached to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMeta {
    /// Minimum number of argument tokens. `None` means the signature's
    /// [`default_required_args`](Signature::default_required_args).
    pub required_args: Option<usize>,
    /// Permission node checked against the caller. Empty means no check.
    pub permission: String,
    pub accepts_player: bool,
    pub accepts_console: bool,
    /// Replaces the generated usage line when too few arguments are given.
    pub help: Option<String>,
    /// Replaces the default permission-denied message.
    pub permission_message: Option<String>,
    /// Names of filters resolved from the owning command set.
    pub filters: Vec<String>,
}

impl Default for CommandMeta {
    fn default() -> Self {
        Self {
            required_args: None,
            permission: String::new(),
            accepts_player: true,
            accepts_console: false,
            help: None,
            permission_message: None,
            filters: Vec::new(),
        }
    }
}

/// A command declaration, ready to be registered.
pub struct CommandSpec {
    path: String,
    signature: Signature,
    meta: CommandMeta,
    handler: Box<dyn Handler>,
}

impl CommandSpec {
    /// Declares a command backed by a closure.
    ///
    /// The closure can return `()` or `Result<(), E>` with
    /// `E: Into<anyhow::Error>`.
    pub fn new<F, R>(path: &str, handler: F) -> Self
    where
        F: FnMut(&Invocation<'_>) -> R + 'static,
        R: IntoHandlerResult + 'static,
    {
        Self::with_handler(path, FnHandler::new(handler))
    }

    /// Declares a command backed by a [`Handler`] implementation.
    pub fn with_handler<H>(path: &str, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        Self {
            path: path.to_string(),
            signature: Signature::new(),
            meta: CommandMeta::default(),
            handler: Box::new(handler),
        }
    }

    /// Appends slots with generated names (see [`Signature::from_kinds`]).
    pub fn params<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = ParamKind>,
    {
        for param in Signature::from_kinds(kinds).params() {
            self.signature.push(param.clone());
        }
        self
    }

    /// Appends a named slot.
    pub fn param(mut self, kind: ParamKind, name: &str) -> Self {
        self.signature.push(Param::new(kind, name));
        self
    }

    /// Replaces the whole signature.
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    pub fn required_args(mut self, n: usize) -> Self {
        self.meta.required_args = Some(n);
        self
    }

    pub fn permission(mut self, node: &str) -> Self {
        self.meta.permission = node.to_string();
        self
    }

    /// Whether players may run the command (default `true`).
    pub fn player(mut self, allowed: bool) -> Self {
        self.meta.accepts_player = allowed;
        self
    }

    /// Whether the console may run the command (default `false`).
    pub fn console(mut self, allowed: bool) -> Self {
        self.meta.accepts_console = allowed;
        self
    }

    pub fn help(mut self, message: &str) -> Self {
        self.meta.help = Some(message.to_string());
        self
    }

    pub fn permission_message(mut self, message: &str) -> Self {
        self.meta.permission_message = Some(message.to_string());
        self
    }

    /// Adds a named filter, looked up through
    /// [`CommandSet::filter`](crate::CommandSet::filter) at registration.
    pub fn filter(mut self, name: &str) -> Self {
        self.meta.filters.push(name.to_string());
        self
    }

    pub fn with_meta(mut self, meta: CommandMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    pub(crate) fn into_parts(self) -> (String, Signature, CommandMeta, Box<dyn Handler>) {
        (self.path, self.signature, self.meta, self.handler)
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("path", &self.path)
            .field("signature", &self.signature)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Why a caller may not run a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The caller's kind is not accepted by the metadata or the caller slot.
    UnsupportedCaller(CallerKind),
    PermissionDenied,
    /// The named filter returned false.
    Filtered(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnsupportedCaller(kind) => write!(f, "unsupported caller kind: {}", kind),
            Rejection::PermissionDenied => write!(f, "permission denied"),
            Rejection::Filtered(name) => write!(f, "rejected by filter '{}'", name),
        }
    }
}

/// An invocable command bound to one tree node.
pub struct CommandLeaf {
    path: PathSpec,
    path_string: String,
    signature: Signature,
    required_args: usize,
    meta: CommandMeta,
    filters: Vec<(String, Filter)>,
    handler: RefCell<Box<dyn Handler>>,
}

impl CommandLeaf {
    pub(crate) fn new(
        path: PathSpec,
        signature: Signature,
        meta: CommandMeta,
        filters: Vec<(String, Filter)>,
        handler: Box<dyn Handler>,
    ) -> Self {
        let required_args = meta
            .required_args
            .unwrap_or_else(|| signature.default_required_args());
        Self {
            path_string: path.to_string(),
            path,
            signature,
            required_args,
            meta,
            filters,
            handler: RefCell::new(handler),
        }
    }

    pub fn path(&self) -> &PathSpec {
        &self.path
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    pub fn required_args(&self) -> usize {
        self.required_args
    }

    /// The message sent when too few arguments were supplied.
    pub fn help_message(&self, prefix: &str) -> String {
        match &self.meta.help {
            Some(help) => help.clone(),
            None => self.signature.usage(prefix, &self.path_string),
        }
    }

    /// Checks caller kind, caller-slot subtype, permission and filters, in
    /// that order.
    pub fn check_caller(&self, caller: &dyn Caller) -> Result<(), Rejection> {
        let kind = caller.kind();
        let kind_allowed = match kind {
            CallerKind::Player => self.meta.accepts_player,
            CallerKind::Console => self.meta.accepts_console,
            CallerKind::Other => true,
        };
        let slot_allowed = match self.signature.caller_slot() {
            Some(ParamKind::PlayerCaller) => kind == CallerKind::Player,
            Some(ParamKind::ConsoleCaller) => kind == CallerKind::Console,
            _ => true,
        };
        if !kind_allowed || !slot_allowed {
            return Err(Rejection::UnsupportedCaller(kind));
        }

        if !self.meta.permission.is_empty() && !caller.has_permission(&self.meta.permission) {
            return Err(Rejection::PermissionDenied);
        }

        if let Some((name, _)) = self.filters.iter().find(|(_, filter)| !filter(caller)) {
            return Err(Rejection::Filtered(name.clone()));
        }

        Ok(())
    }

    /// Coerces `args` into this leaf's value slots.
    ///
    /// Each scalar slot takes one token. A token that fails conversion is
    /// reported to the caller and leaves its slot unbound; the remaining
    /// slots are still filled. Slots past the last token stay unbound, except
    /// `RestOfArgs`, which is always bound (possibly empty).
    pub fn bind<S: AsRef<str>>(
        &self,
        caller: &dyn Caller,
        args: &[S],
        messages: &Messages,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Args, DispatchError> {
        let params = self.signature.value_params();
        let mut values = Vec::with_capacity(params.len());
        let mut pos = 0;

        for param in params {
            if param.kind == ParamKind::RestOfArgs {
                let rest = args[pos..].iter().map(|a| a.as_ref().to_string()).collect();
                values.push(Some(Value::Rest(rest)));
                pos = args.len();
                continue;
            }

            let Some(token) = args.get(pos) else {
                values.push(None);
                continue;
            };
            pos += 1;
            let token: &str = token.as_ref();

            match coerce_token(&param.kind, token) {
                Ok(value) => values.push(Some(value)),
                Err(CoerceError::Conversion(err)) => {
                    caller.send_message(&fill(
                        &messages.conversion_failed,
                        &[
                            ("token", token),
                            ("kind", param.kind.type_name()),
                            ("reason", err.reason.as_str()),
                        ],
                    ));
                    diagnostics.conversion_failed(&self.path_string, token, &param.kind, &err);
                    values.push(None);
                }
                Err(CoerceError::Structural(err)) => {
                    diagnostics.unsupported_parameter(&self.path_string, &err.0);
                    return Err(self.unsupported(err.0));
                }
            }
        }

        Ok(Args::new(values))
    }

    /// Validates the signature, coerces `args` and runs the handler.
    ///
    /// Handler errors are reported, not returned. Only a malformed signature
    /// produces an `Err`.
    pub(crate) fn execute<S: AsRef<str>>(
        &self,
        caller: &dyn Caller,
        args: &[S],
        messages: &Messages,
        diagnostics: &dyn Diagnostics,
    ) -> Result<(), DispatchError> {
        if let Err(err) = self.signature.validate() {
            diagnostics.unsupported_parameter(&self.path_string, &err.0);
            return Err(self.unsupported(err.0));
        }

        let Ok(mut handler) = self.handler.try_borrow_mut() else {
            caller.send_message(&fill(
                &messages.handler_busy,
                &[("command", self.path_string.as_str())],
            ));
            diagnostics.dispatch_rejected(&self.path_string, "handler already running");
            return Ok(());
        };

        let bound = self.bind(caller, args, messages, diagnostics)?;

        let inv = Invocation::new(caller, self.path.tokens(), bound);
        if let Err(err) = handler.handle(&inv) {
            diagnostics.handler_failed(&self.path_string, &err);
            caller.send_message(&fill(
                &messages.handler_failed,
                &[("command", self.path_string.as_str())],
            ));
        }
        Ok(())
    }

    fn unsupported(&self, reason: String) -> DispatchError {
        DispatchError::UnsupportedParameter {
            path: self.path_string.clone(),
            reason,
        }
    }
}

impl fmt::Debug for CommandLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandLeaf")
            .field("path", &self.path_string)
            .field("signature", &self.signature)
            .field("required_args", &self.required_args)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}
