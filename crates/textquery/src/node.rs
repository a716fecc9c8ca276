//! Query trees.
//!
//! A parsed query is a strict tree of [`Node`]s. Leaves carry operand parts; operator nodes
//! carry the keyword and their operands in source order. Repeated use of one keyword inside a
//! group produces a single node with one child per operand rather than a nested chain.

use std::{fmt, mem};

use serde::{Deserialize, Serialize};

use crate::{config::ParserConfig, part::Part};

/// A vertex of a parsed query tree.
///
/// Dropping, comparing and rendering walk the tree with an explicit stack, so arbitrarily deep
/// trees do not exhaust the call stack.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Operand or operator data.
    pub key: Part,
    /// Operands of an operator node, in source order. Empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl Node {
    /// Creates a leaf node.
    pub fn leaf(key: Part) -> Self {
        Self {
            key,
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children.
    pub fn new(key: Part, children: Vec<Self>) -> Self {
        Self { key, children }
    }

    /// Creates an operator node.
    pub fn operator(keyword: impl Into<String>, children: Vec<Self>) -> Self {
        Self::new(Part::operator(keyword), children)
    }

    /// Returns the node's part.
    pub fn key(&self) -> &Part {
        &self.key
    }

    /// Returns the node's children.
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the operand text or operator keyword.
    pub fn value(&self) -> &str {
        &self.key.value
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if the node is keyed by an operator.
    pub fn is_operator(&self) -> bool {
        self.key.is_operator()
    }

    /// Number of nodes in the tree, including this one.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }

    /// Number of levels in the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Iterates over the leaves in source order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            pending: vec![self],
        }
    }

    /// Renders the tree as a query string using the default syntax.
    ///
    /// Parsing the result yields a tree equal to this one.
    pub fn to_query_string(&self) -> String {
        self.render(&ParserConfig::default())
    }

    /// Renders the tree as a query string using the syntax characters of `config`.
    pub fn render(&self, config: &ParserConfig) -> String {
        let mut out = String::new();
        let mut pending = vec![Render::Node(self)];
        while let Some(step) = pending.pop() {
            match step {
                Render::Node(node) if node.is_leaf() => out.push_str(&node.key.render(config)),
                Render::Node(node) => {
                    for (i, child) in node.children.iter().enumerate().rev() {
                        if child.is_leaf() {
                            pending.push(Render::Node(child));
                        } else {
                            pending.push(Render::Char(config.close_parenthesis()));
                            pending.push(Render::Node(child));
                            pending.push(Render::Char(config.open_parenthesis()));
                        }
                        if i > 0 {
                            pending.push(Render::Separator(&node.key.value));
                        }
                    }
                }
                Render::Separator(keyword) => {
                    out.push(' ');
                    out.push_str(keyword);
                    out.push(' ');
                }
                Render::Char(ch) => out.push(ch),
            }
        }
        out
    }

    /// Renders the tree one node per line, children indented two spaces below their operator.
    ///
    /// Operands are written with the field syntax of `config`.
    pub fn render_tree(&self, config: &ParserConfig) -> String {
        let mut out = String::new();
        let mut pending = vec![(self, 0)];
        while let Some((node, indent)) = pending.pop() {
            for _ in 0..indent {
                out.push_str("  ");
            }
            out.push_str(&node.key.render(config));
            out.push('\n');
            pending.extend(node.children.iter().rev().map(|child| (child, indent + 1)));
        }
        out
    }
}

/// One pending step of [`Node::render`].
enum Render<'a> {
    /// A subtree still to be written.
    Node(&'a Node),
    /// An operator keyword between two operands.
    Separator(&'a str),
    /// A group marker.
    Char(char),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_tree(&ParserConfig::default()))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.key != right.key || left.children.len() != right.children.len() {
                return false;
            }
            pending.extend(left.children.iter().zip(&right.children));
        }
        true
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order iterator over the leaves of a tree.
pub struct Leaves<'a> {
    /// Nodes still to visit, next on top.
    pending: Vec<&'a Node>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.pending.pop() {
            if node.is_leaf() {
                return Some(node);
            }
            self.pending.extend(node.children.iter().rev());
        }
        None
    }
}
