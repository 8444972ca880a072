//! Prefix-tree command routing with typed argument coercion.
//!
//! `cmdtree` turns flat, whitespace-split command lines such as
//! `/warp set home` into calls of typed handlers. Commands are registered by
//! path into a prefix tree, one node per token; dispatch follows the longest
//! matching prefix and treats the remaining tokens as arguments.
//!
//! # Features
//!
//! - **Longest-prefix routing**: `warp`, `warp set` and `warp set home` can
//!   coexist; unmatched tokens become arguments
//! - **Typed coercion**: parameters are declared as [`ParamKind`]s and
//!   converted best-effort, one message per bad token
//! - **Caller checks**: caller kind, permission node and named filters
//! - **Completion**: children of the deepest matched node, prefix-filtered
//! - **Topology export**: the tree as Graphviz DOT
//!
//! # Errors
//!
//! Mistakes by whoever typed the command are answered with messages to the
//! [`Caller`] and never surface as Rust errors. Defects in command
//! declarations are [`RegistrationError`]s (or a [`DispatchError`] when
//! signature validation is deferred).
//!
//! # Example
//!
//! ```rust
//! use cmdtree::{Caller, CallerKind, CommandSpec, Invocation, ParamKind, Router};
//! use std::cell::RefCell;
//!
//! #[derive(Default)]
//! struct Console(RefCell<Vec<String>>);
//!
//! impl Caller for Console {
//!     fn name(&self) -> &str { "console" }
//!     fn kind(&self) -> CallerKind { CallerKind::Console }
//!     fn has_permission(&self, _node: &str) -> bool { true }
//!     fn send_message(&self, message: &str) {
//!         self.0.borrow_mut().push(message.to_string());
//!     }
//! }
//!
//! let mut router = Router::new();
//! router
//!     .register_command(
//!         CommandSpec::new("give", |inv: &Invocation<'_>| {
//!             let item = inv.args().str(0).unwrap_or("nothing");
//!             let count = inv.args().int(1).unwrap_or(1);
//!             inv.reply(&format!("Gave {} x{}", item, count));
//!         })
//!         .params([ParamKind::String, ParamKind::Int])
//!         .required_args(1)
//!         .console(true),
//!     )
//!     .unwrap();
//!
//! let console = Console::default();
//! router.dispatch(&console, "give", &["apple", "3"]).unwrap();
//! router.dispatch(&console, "give", &["apple", "lots"]).unwrap();
//!
//! let messages = console.0.borrow();
//! assert_eq!(messages[0], "Gave apple x3");
//! assert!(messages[1].starts_with("Error converting \"lots\" to Int"));
//! assert_eq!(messages[2], "Gave apple x1");
//! ```

mod caller;
mod coerce;
mod config;
mod diagnostics;
mod error;
mod graph;
mod handler;
mod leaf;
mod param;
mod path;
mod router;
mod tree;

pub use caller::{filter_fn, Caller, CallerKind, Filter};
pub use coerce::{coerce_token, parse_bool, parse_char, CoerceError};
pub use config::{Messages, RouterConfig};
pub use diagnostics::{Diagnostics, NullDiagnostics, TracingDiagnostics};
pub use error::{
    ConfigError, ConversionError, DispatchError, GraphError, RegistrationError, ShapeError,
};
pub use graph::{node_key, DotWriter};
pub use handler::{FnHandler, Handler, HandlerResult, IntoHandlerResult, Invocation};
pub use leaf::{CommandLeaf, CommandMeta, CommandSpec, Rejection};
pub use param::{Args, Param, ParamKind, Signature, Value};
pub use path::{path_to_string, string_to_path, PathSpec};
pub use router::{command_names, CommandSet, Router, RouterBuilder};
pub use tree::{CommandNode, CommandTree, NodeId, Traversal, ROOT_TOKEN};
