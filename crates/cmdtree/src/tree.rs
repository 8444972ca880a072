//! The prefix tree commands are registered into.
//!
//! Each node is keyed by one path token. A node may carry a leaf and may have
//! children at the same time, so `warp` and `warp set` can both be commands.
//! The root is a sentinel whose token is `/`.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use crate::error::RegistrationError;
use crate::leaf::CommandLeaf;

/// Token of the root sentinel.
pub const ROOT_TOKEN: &str = "/";

/// Identifier of a node, unique within one tree.
///
/// Ids are handed out in creation order, starting at 0 for the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One node of the tree.
#[derive(Debug)]
pub struct CommandNode {
    id: NodeId,
    token: String,
    children: HashMap<String, CommandNode>,
    leaf: Option<CommandLeaf>,
}

impl CommandNode {
    fn new(id: NodeId, token: &str) -> Self {
        Self {
            id,
            token: token.to_string(),
            children: HashMap::new(),
            leaf: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn child(&self, token: &str) -> Option<&CommandNode> {
        self.children.get(token)
    }

    /// Children sorted by token.
    pub fn sorted_children(&self) -> Vec<&CommandNode> {
        let mut children: Vec<_> = self.children.values().collect();
        children.sort_by(|a, b| a.token.cmp(&b.token));
        children
    }

    /// Child tokens, sorted.
    pub fn child_tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<_> = self.children.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn leaf(&self) -> Option<&CommandLeaf> {
        self.leaf.as_ref()
    }
}

/// Where a token sequence ends up in the tree.
#[derive(Debug)]
pub struct Traversal<'t> {
    /// The deepest node matched.
    pub node: &'t CommandNode,
    /// Tokens from the command name to `node`, inclusive.
    pub path: Vec<&'t str>,
    /// Number of argument tokens consumed while descending.
    pub consumed: usize,
}

impl Traversal<'_> {
    /// The remaining argument tokens.
    pub fn rest<'a, S>(&self, args: &'a [S]) -> &'a [S] {
        &args[self.consumed..]
    }
}

/// The command prefix tree.
#[derive(Debug)]
pub struct CommandTree {
    root: CommandNode,
    next_id: usize,
    leaves: Vec<String>,
}

impl Default for CommandTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTree {
    pub fn new() -> Self {
        Self {
            root: CommandNode::new(NodeId(0), ROOT_TOKEN),
            next_id: 1,
            leaves: Vec::new(),
        }
    }

    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    /// Binds `leaf` at its path, creating intermediate nodes as needed.
    ///
    /// Fails with [`RegistrationError::DuplicateCommand`] if a leaf is already
    /// bound there; the tree is left unchanged apart from any intermediate
    /// nodes created on the way.
    pub fn insert(&mut self, leaf: CommandLeaf) -> Result<NodeId, RegistrationError> {
        let Self {
            root,
            next_id,
            leaves,
        } = self;

        let mut node = root;
        for token in leaf.path().tokens() {
            node = match node.children.entry(token.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let id = NodeId(*next_id);
                    *next_id += 1;
                    entry.insert(CommandNode::new(id, token))
                }
            };
        }

        if node.leaf.is_some() {
            return Err(RegistrationError::DuplicateCommand(leaf.path().to_string()));
        }
        leaves.push(leaf.path().to_string());
        node.leaf = Some(leaf);
        Ok(node.id)
    }

    /// Descends from the command `name` through as many `args` as match
    /// child tokens, stopping at the first token that does not.
    ///
    /// Returns `None` if `name` is not a registered command name.
    pub fn traverse<S: AsRef<str>>(&self, name: &str, args: &[S]) -> Option<Traversal<'_>> {
        let mut node = self.root.child(name)?;
        let mut path = vec![node.token.as_str()];
        let mut consumed = 0;

        for arg in args {
            match node.child(arg.as_ref()) {
                Some(child) => {
                    node = child;
                    path.push(child.token.as_str());
                    consumed += 1;
                }
                None => break,
            }
        }

        Some(Traversal {
            node,
            path,
            consumed,
        })
    }

    /// Paths of all registered leaves, in registration order.
    pub fn leaves(&self) -> &[String] {
        &self.leaves
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.next_id
    }
}
