//! Tree vertex and its construction from a single project line.

use std::fmt;

use generational_arena::Index;

use crate::domain::tokenizer::tokenize;

/// Non-owning handle to a node stored in a [`ProjectTree`](crate::domain::ProjectTree).
pub type NodeId = Index;

/// Type tag and values parsed from one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeData {
    /// Type tag, empty for lines that only carry values
    pub node_type: String,
    /// Remaining tokens in line order
    pub values: Vec<String>,
}

impl NodeData {
    /// Parse a raw (untrimmed) line.
    ///
    /// A line whose first token parses as a float is untyped: every token is
    /// a value. Otherwise the first token is the type tag.
    ///
    /// Type tags that happen to parse as a float (`1E3`, `inf`, `NaN`) are
    /// classified as untyped too. The format has no other marker to tell
    /// them apart.
    pub fn from_line(line: &str) -> Self {
        let mut tokens = tokenize(line.trim());

        match tokens.first() {
            None => Self::default(),
            Some(first) if is_number(first) => Self {
                node_type: String::new(),
                values: tokens,
            },
            Some(_) => {
                let node_type = tokens.remove(0);
                Self {
                    node_type,
                    values: tokens,
                }
            }
        }
    }

    /// First value, or `""` when there are none.
    pub fn value(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or("")
    }

    pub fn is_typed(&self) -> bool {
        !self.node_type.is_empty()
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_typed(), self.values.is_empty()) {
            (true, true) => write!(f, "{}", self.node_type),
            (true, false) => write!(f, "{} {}", self.node_type, self.values.join(" ")),
            (false, _) => write!(f, "{}", self.values.join(" ")),
        }
    }
}

fn is_number(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}

/// Tree node in the arena-based project structure.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parsed line content
    pub data: NodeData,
    /// Index of the enclosing node, None for the document root
    pub parent: Option<NodeId>,
    /// Indices of child nodes in document order
    pub children: Vec<NodeId>,
}
