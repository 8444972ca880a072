//! Command handler types.
//!
//! A handler is the business logic bound to a leaf. It receives an
//! [`Invocation`] carrying the caller and the coerced [`Args`], and returns a
//! [`HandlerResult`].
//!
//! # Design Rationale
//!
//! Handlers never see raw string tokens. Routing, argument counting,
//! permission checks and coercion all happen before the handler is called,
//! so a handler only has to deal with values it declared.
//!
//! Handlers take `&mut self`, so closures can capture and mutate state
//! directly. The router is single-threaded and stores each handler behind a
//! `RefCell`.
//!
//! # Core Types
//!
//! - [`Invocation`]: what a handler receives
//! - [`HandlerResult`]: the result type for handlers (`Result<(), anyhow::Error>`)
//! - [`Handler`]: trait for command handlers
//! - [`FnHandler`]: adapter for `FnMut` closures

use crate::caller::Caller;
use crate::param::Args;

/// The result type for command handlers.
///
/// Enables use of the `?` operator for error propagation. An error is logged
/// through the router's diagnostics and the caller gets a generic message.
pub type HandlerResult = Result<(), anyhow::Error>;

/// Trait for types that can be converted into a [`HandlerResult`].
///
/// This lets closures return `()` for infallible commands, or any
/// `Result<(), E>` where `E` converts into [`anyhow::Error`].
///
/// # Example
///
/// ```rust
/// use cmdtree::{HandlerResult, IntoHandlerResult};
///
/// let result: HandlerResult = ().into_handler_result();
/// assert!(result.is_ok());
///
/// let failed: Result<(), std::io::Error> =
///     Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
/// assert!(failed.into_handler_result().is_err());
/// ```
pub trait IntoHandlerResult {
    /// Convert this type into a [`HandlerResult`].
    fn into_handler_result(self) -> HandlerResult;
}

impl IntoHandlerResult for () {
    fn into_handler_result(self) -> HandlerResult {
        Ok(())
    }
}

impl<E> IntoHandlerResult for Result<(), E>
where
    E: Into<anyhow::Error>,
{
    fn into_handler_result(self) -> HandlerResult {
        self.map_err(Into::into)
    }
}

/// Everything a handler receives for one dispatch.
pub struct Invocation<'a> {
    caller: &'a dyn Caller,
    path: &'a [String],
    args: Args,
}

impl<'a> Invocation<'a> {
    pub fn new(caller: &'a dyn Caller, path: &'a [String], args: Args) -> Self {
        Self { caller, path, args }
    }

    /// The caller that issued the command.
    pub fn caller(&self) -> &'a dyn Caller {
        self.caller
    }

    /// The matched command path, e.g. `["warp", "set"]`.
    pub fn path(&self) -> &'a [String] {
        self.path
    }

    /// The coerced arguments.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Sends a message back to the caller.
    pub fn reply(&self, message: &str) {
        self.caller.send_message(message);
    }
}

impl std::fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("caller", &self.caller.name())
            .field("path", &self.path)
            .field("args", &self.args)
            .finish()
    }
}

/// Trait for command handlers.
///
/// # Example
///
/// ```rust
/// use cmdtree::{Handler, HandlerResult, Invocation};
///
/// struct Counter { count: u32 }
///
/// impl Handler for Counter {
///     fn handle(&mut self, inv: &Invocation<'_>) -> HandlerResult {
///         self.count += 1;
///         inv.reply(&format!("called {} times", self.count));
///         Ok(())
///     }
/// }
/// ```
pub trait Handler {
    /// Execute the handler.
    fn handle(&mut self, inv: &Invocation<'_>) -> HandlerResult;
}

/// A wrapper that implements Handler for FnMut closures.
///
/// The closure can return `()` or any `Result<(), E>` with
/// `E: Into<anyhow::Error>`.
pub struct FnHandler<F, R = HandlerResult> {
    f: F,
    _phantom: std::marker::PhantomData<fn() -> R>,
}

impl<F, R> FnHandler<F, R>
where
    F: FnMut(&Invocation<'_>) -> R,
    R: IntoHandlerResult,
{
    /// Creates a new FnHandler wrapping the given FnMut closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<F, R> Handler for FnHandler<F, R>
where
    F: FnMut(&Invocation<'_>) -> R,
    R: IntoHandlerResult,
{
    fn handle(&mut self, inv: &Invocation<'_>) -> HandlerResult {
        (self.f)(inv).into_handler_result()
    }
}
