//! Registration, dispatch and completion.
//!
//! [`Router`] owns the command tree and everything needed to answer a
//! dispatch: configuration (message templates, command prefix) and a
//! [`Diagnostics`] sink.
//!
//! ```rust
//! use cmdtree::{Caller, CallerKind, CommandSpec, Invocation, ParamKind, Router};
//! use std::cell::RefCell;
//!
//! struct Player(RefCell<Vec<String>>);
//!
//! impl Caller for Player {
//!     fn name(&self) -> &str { "steve" }
//!     fn kind(&self) -> CallerKind { CallerKind::Player }
//!     fn has_permission(&self, _node: &str) -> bool { true }
//!     fn send_message(&self, message: &str) {
//!         self.0.borrow_mut().push(message.to_string());
//!     }
//! }
//!
//! let mut router = Router::new();
//! router
//!     .register_command(
//!         CommandSpec::new("say hi", |inv: &Invocation<'_>| {
//!             inv.reply(&format!("Hi, {}!", inv.caller().name()));
//!         })
//!         .params([ParamKind::Caller]),
//!     )
//!     .unwrap();
//!
//! let player = Player(RefCell::new(Vec::new()));
//! assert!(router.dispatch(&player, "say", &["hi"]).unwrap());
//! assert_eq!(player.0.borrow().as_slice(), ["Hi, steve!"]);
//! ```

use crate::caller::{Caller, Filter};
use crate::config::{fill, RouterConfig};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::{DispatchError, RegistrationError};
use crate::graph::DotWriter;
use crate::leaf::{CommandLeaf, CommandSpec, Rejection};
use crate::path::{path_to_string, PathSpec};
use crate::tree::{CommandNode, CommandTree, NodeId};

/// A group of commands registered together.
///
/// Commands name their filters as strings; the set resolves those names to
/// predicates when it is registered.
pub trait CommandSet {
    fn commands(&self) -> Vec<CommandSpec>;

    /// Resolves a filter name used by one of this set's commands.
    fn filter(&self, _name: &str) -> Option<Filter> {
        None
    }
}

/// Builder for [`Router`].
#[derive(Default)]
pub struct RouterBuilder {
    config: Option<RouterConfig>,
    diagnostics: Option<Box<dyn Diagnostics>>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the default [`TracingDiagnostics`] sink.
    pub fn diagnostics<D: Diagnostics + 'static>(mut self, diagnostics: D) -> Self {
        self.diagnostics = Some(Box::new(diagnostics));
        self
    }

    pub fn build(self) -> Router {
        Router {
            tree: CommandTree::new(),
            config: self.config.unwrap_or_default(),
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| Box::new(TracingDiagnostics)),
        }
    }
}

/// Routes command invocations through the tree to their handlers.
pub struct Router {
    tree: CommandTree,
    config: RouterConfig,
    diagnostics: Box<dyn Diagnostics>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// A router with default configuration and tracing diagnostics.
    pub fn new() -> Self {
        RouterBuilder::new().build()
    }

    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// Paths of all registered commands, in registration order.
    pub fn leaves(&self) -> &[String] {
        self.tree.leaves()
    }

    /// Looks up the leaf registered at exactly `path`.
    pub fn leaf(&self, path: &str) -> Option<&CommandLeaf> {
        let parsed = PathSpec::parse(path).ok()?;
        let tokens = parsed.tokens();
        let t = self.tree.traverse(&tokens[0], &tokens[1..])?;
        if t.consumed + 1 != tokens.len() {
            return None;
        }
        t.node.leaf()
    }

    /// Registers every command of `set`.
    ///
    /// Stops at the first failing command; commands registered before it
    /// stay registered.
    pub fn register<S>(&mut self, set: &S) -> Result<(), RegistrationError>
    where
        S: CommandSet + ?Sized,
    {
        for spec in set.commands() {
            self.register_spec(spec, |name| set.filter(name))?;
        }
        Ok(())
    }

    /// Registers several standalone commands.
    pub fn register_all<I>(&mut self, specs: I) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = CommandSpec>,
    {
        for spec in specs {
            self.register_command(spec)?;
        }
        Ok(())
    }

    /// Registers one command that belongs to no set. Filters cannot be
    /// resolved, so a spec naming any filter fails with
    /// [`RegistrationError::UnknownFilter`].
    pub fn register_command(&mut self, spec: CommandSpec) -> Result<NodeId, RegistrationError> {
        self.register_spec(spec, |_| None)
    }

    fn register_spec<F>(
        &mut self,
        spec: CommandSpec,
        resolve: F,
    ) -> Result<NodeId, RegistrationError>
    where
        F: Fn(&str) -> Option<Filter>,
    {
        let (path, signature, meta, handler) = spec.into_parts();
        let path = PathSpec::parse(&path)?;

        if self.config.validate_signatures {
            signature
                .validate()
                .map_err(|err| RegistrationError::unsupported(path.to_string(), err.0))?;
        }

        let filters = meta
            .filters
            .iter()
            .map(|name| {
                resolve(name)
                    .map(|filter| (name.clone(), filter))
                    .ok_or_else(|| RegistrationError::UnknownFilter {
                        path: path.to_string(),
                        filter: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let display = path.to_string();
        let id = self
            .tree
            .insert(CommandLeaf::new(path, signature, meta, filters, handler))?;
        self.diagnostics.command_registered(&display);
        Ok(id)
    }

    /// Routes one invocation.
    ///
    /// `name` is the command name the host dispatched on and `args` the
    /// whitespace-split tokens after it. Every user mistake is answered with
    /// messages to `caller` and yields `Ok(true)`. Only a command whose
    /// signature cannot be coerced produces an `Err`.
    pub fn dispatch<S: AsRef<str>>(
        &self,
        caller: &dyn Caller,
        name: &str,
        args: &[S],
    ) -> Result<bool, DispatchError> {
        let messages = &self.config.messages;
        let prefix = &self.config.command_prefix;

        let Some(t) = self.tree.traverse(name, args) else {
            self.send_invalid_command(caller, name);
            return Ok(true);
        };

        let Some(leaf) = t.node.leaf() else {
            let command = format!("{}{}", prefix, path_to_string(&t.path));
            caller.send_message(&fill(
                &messages.incomplete_command,
                &[("command", command.as_str())],
            ));
            caller.send_message(&messages.possible_completions);
            for token in t.node.child_tokens() {
                caller.send_message(token);
            }
            self.diagnostics.dispatch_rejected(&command, "incomplete command");
            return Ok(true);
        };

        let rest = t.rest(args);
        let path = path_to_string(&t.path);

        if rest.len() < leaf.required_args() {
            caller.send_message(&leaf.help_message(prefix));
            self.diagnostics.dispatch_rejected(&path, "missing required arguments");
            return Ok(true);
        }

        if let Err(rejection) = leaf.check_caller(caller) {
            caller.send_message(&self.rejection_message(leaf, &rejection));
            self.diagnostics
                .dispatch_rejected(&path, &rejection.to_string());
            return Ok(true);
        }

        leaf.execute(caller, rest, messages, self.diagnostics.as_ref())?;
        Ok(true)
    }

    /// Completion candidates for the token being typed.
    ///
    /// With no unconsumed token every child of the matched node is offered;
    /// with exactly one, the children starting with it. Anything else yields
    /// nothing. Results are sorted.
    pub fn complete<S: AsRef<str>>(&self, name: &str, args: &[S]) -> Vec<String> {
        let Some(t) = self.tree.traverse(name, args) else {
            return Vec::new();
        };

        match t.rest(args) {
            [] => t.node.child_tokens().into_iter().map(String::from).collect(),
            [partial] => {
                let partial: &str = partial.as_ref();
                t.node
                    .child_tokens()
                    .into_iter()
                    .filter(|token| token.starts_with(partial))
                    .map(String::from)
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Writes the whole tree, root included, to `writer`.
    pub fn write_graph<W: std::io::Write>(
        &self,
        writer: &mut DotWriter<W>,
    ) -> Result<(), crate::error::GraphError> {
        writer.write_tree(&self.tree)
    }

    fn send_invalid_command(&self, caller: &dyn Caller, name: &str) {
        let messages = &self.config.messages;
        let command = format!("{}{}", self.config.command_prefix, name);
        caller.send_message(&fill(
            &messages.invalid_command,
            &[("command", command.as_str())],
        ));
        caller.send_message(&fill(&messages.possible_replacements, &[("token", name)]));
        for token in self.tree.root().child_tokens() {
            caller.send_message(token);
        }
        self.diagnostics.dispatch_rejected(&command, "invalid command");
    }

    fn rejection_message(&self, leaf: &CommandLeaf, rejection: &Rejection) -> String {
        let messages = &self.config.messages;
        match rejection {
            Rejection::UnsupportedCaller(kind) => {
                fill(&messages.unsupported_caller, &[("caller", kind.describe())])
            }
            Rejection::PermissionDenied => leaf
                .meta()
                .permission_message
                .clone()
                .unwrap_or_else(|| messages.permission_denied.clone()),
            Rejection::Filtered(name) => fill(&messages.filtered, &[("filter", name.as_str())]),
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("leaves", &self.tree.leaves())
            .finish_non_exhaustive()
    }
}

/// Root-level nodes, for hosts that need to announce command names.
pub fn command_names(router: &Router) -> Vec<&str> {
    router
        .tree()
        .root()
        .sorted_children()
        .into_iter()
        .map(CommandNode::token)
        .collect()
}
