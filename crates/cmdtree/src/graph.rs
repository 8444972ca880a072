//! DOT export of the command tree.
//!
//! ```rust
//! use cmdtree::{CommandSpec, DotWriter, Invocation, Router};
//!
//! let mut router = Router::new();
//! router.register_command(CommandSpec::new("say hi", |_: &Invocation<'_>| {})).unwrap();
//!
//! let mut dot = DotWriter::new(Vec::new(), true).unwrap();
//! router.write_graph(&mut dot).unwrap();
//! let text = String::from_utf8(dot.finish().unwrap()).unwrap();
//!
//! assert!(text.starts_with("digraph {\n"));
//! assert!(text.contains("\"say#1\" -> \"hi#2\""));
//! assert!(text.ends_with("}\n"));
//! ```

use std::io::Write;

use crate::error::GraphError;
use crate::tree::{CommandNode, CommandTree};

/// Writes DOT statements to any [`Write`] sink.
///
/// The header is written on creation; the closing brace on
/// [`finish`](DotWriter::finish).
#[derive(Debug)]
pub struct DotWriter<W: Write> {
    out: W,
    directed: bool,
}

impl<W: Write> DotWriter<W> {
    pub fn new(mut out: W, directed: bool) -> Result<Self, GraphError> {
        writeln!(out, "{}", if directed { "digraph {" } else { "graph {" })?;
        Ok(Self { out, directed })
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn print_label(&mut self, node: &str, label: &str) -> Result<(), GraphError> {
        writeln!(
            self.out,
            "\"{}\" [label=\"{}\"]",
            escape(node),
            escape(label)
        )?;
        Ok(())
    }

    pub fn print_edge(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        let op = if self.directed { "->" } else { "--" };
        writeln!(self.out, "\"{}\" {} \"{}\"", escape(from), op, escape(to))?;
        Ok(())
    }

    /// Emits every node of `tree` depth-first: a label line for the node,
    /// then for each child an edge followed by the child's subtree.
    ///
    /// Children are visited in token order.
    pub fn write_tree(&mut self, tree: &CommandTree) -> Result<(), GraphError> {
        self.write_node(tree.root())
    }

    fn write_node(&mut self, node: &CommandNode) -> Result<(), GraphError> {
        let key = node_key(node);
        self.print_label(&key, node.token())?;
        for child in node.sorted_children() {
            self.print_edge(&key, &node_key(child))?;
            self.write_node(child)?;
        }
        Ok(())
    }

    /// Writes the closing brace, flushes and returns the sink.
    pub fn finish(mut self) -> Result<W, GraphError> {
        writeln!(self.out, "}}")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Unique DOT identifier of a node: its token, `#`, then its id.
///
/// The id is all digits after the last `#`, so two nodes never share a key.
pub fn node_key(node: &CommandNode) -> String {
    format!("{}#{}", node.token(), node.id())
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
