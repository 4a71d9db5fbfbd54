//! Read-only queries over a [`ProjectTree`].
//!
//! Lookups never fail: absence is `None` or an empty `Vec`. A node without a
//! `NAME` child never matches a name filter.

use std::fmt;

use crate::domain::arena::ProjectTree;
use crate::domain::node::{Node, NodeData, NodeId};

/// Type tag of the child node that carries an element's display name.
pub const NAME_TYPE: &str = "NAME";

/// Borrowed handle on one node of a tree.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a ProjectTree,
    idx: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(tree: &'a ProjectTree, idx: NodeId) -> Self {
        Self { tree, idx }
    }

    pub fn id(&self) -> NodeId {
        self.idx
    }

    fn node(&self) -> &'a Node {
        // A NodeRef is only created for indices present in the arena, and
        // nodes are never removed.
        self.tree
            .get_node(self.idx)
            .expect("NodeRef points into its tree")
    }

    pub fn data(&self) -> &'a NodeData {
        &self.node().data
    }

    pub fn node_type(&self) -> &'a str {
        &self.data().node_type
    }

    pub fn values(&self) -> &'a [String] {
        &self.data().values
    }

    /// First value, or `""` when the node has none.
    pub fn value(&self) -> &'a str {
        self.data().value()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.and_then(|idx| self.tree.node_ref(idx))
    }

    /// Direct children in document order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .filter_map(move |&idx| tree.node_ref(idx))
    }

    /// All nodes below this one, pre-order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.descendants(self.idx)
            .map(move |(idx, _)| NodeRef::new(tree, idx))
    }

    pub fn first_child_of_type(&self, node_type: &str) -> Option<NodeRef<'a>> {
        self.children().find(|c| c.node_type() == node_type)
    }

    pub fn last_child_of_type(&self, node_type: &str) -> Option<NodeRef<'a>> {
        self.children()
            .filter(|c| c.node_type() == node_type)
            .last()
    }

    /// Children of `node_type`, in document order.
    ///
    /// With `recursive`, every descendant is visited pre-order and matches
    /// are collected at any depth, including below other matches.
    pub fn all_children_of_type(&self, node_type: &str, recursive: bool) -> Vec<NodeRef<'a>> {
        if recursive {
            self.descendants()
                .filter(|n| n.node_type() == node_type)
                .collect()
        } else {
            self.children()
                .filter(|c| c.node_type() == node_type)
                .collect()
        }
    }

    /// Like [`all_children_of_type`](Self::all_children_of_type), keeping only
    /// nodes whose `NAME` child has `name` as its first value.
    pub fn children_of_type_and_name(
        &self,
        node_type: &str,
        name: &str,
        recursive: bool,
    ) -> Vec<NodeRef<'a>> {
        self.all_children_of_type(node_type, recursive)
            .into_iter()
            .filter(|n| n.has_name(name))
            .collect()
    }

    /// First node of `node_type` anywhere below this one named `name`.
    pub fn find_by_type_and_name(&self, node_type: &str, name: &str) -> Option<NodeRef<'a>> {
        self.descendants()
            .find(|n| n.node_type() == node_type && n.has_name(name))
    }

    /// First value of the `NAME` child, if there is one.
    pub fn name(&self) -> Option<&'a str> {
        self.first_child_of_type(NAME_TYPE).map(|n| n.value())
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    /// Follow `first_child_of_type` for each segment in turn.
    ///
    /// An empty path returns this node.
    pub fn path<S: AsRef<str>>(&self, segments: &[S]) -> Option<NodeRef<'a>> {
        segments
            .iter()
            .try_fold(*self, |node, segment| node.first_child_of_type(segment.as_ref()))
    }

    /// Number of ancestors above this node.
    pub fn level(&self) -> usize {
        self.tree.level(self.idx)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("idx", &self.idx)
            .field("data", self.data())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data())
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.idx == other.idx
    }
}

impl Eq for NodeRef<'_> {}
