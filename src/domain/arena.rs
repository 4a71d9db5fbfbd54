use generational_arena::Arena;
use tracing::instrument;

use crate::domain::node::{Node, NodeData, NodeId};
use crate::domain::query::NodeRef;

/// Arena-based project tree.
///
/// The arena owns every node. Children are held as indices in document
/// order and the parent link is an index, so there are no ownership cycles.
/// The tree is only mutated while it is being built.
#[derive(Debug, Clone)]
pub struct ProjectTree {
    /// Arena storage for all tree nodes
    arena: Arena<Node>,
    /// Index of the root node, None for empty trees
    root: Option<NodeId>,
}

impl Default for ProjectTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a node and append it to its parent's children.
    ///
    /// The first parentless node becomes the root.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let node = Node {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else if self.root.is_none() {
            self.root = Some(node_idx);
        }

        node_idx
    }

    /// Point the root at another node, used when input ends inside a block.
    pub(crate) fn set_root(&mut self, idx: NodeId) {
        if self.arena.contains(idx) {
            self.root = Some(idx);
        }
    }

    pub fn get_node(&self, idx: NodeId) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Borrowed query handle on the root node.
    pub fn root_ref(&self) -> Option<NodeRef<'_>> {
        self.root.and_then(|idx| self.node_ref(idx))
    }

    /// Borrowed query handle on any node.
    pub fn node_ref(&self, idx: NodeId) -> Option<NodeRef<'_>> {
        self.arena.contains(idx).then(|| NodeRef::new(self, idx))
    }

    /// Total number of nodes, including nodes unreachable from `root`.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal of everything below `idx`, excluding `idx` itself.
    pub fn descendants(&self, idx: NodeId) -> PreOrderIterator<'_> {
        let mut iter = PreOrderIterator::new(self, idx);
        iter.next();
        iter
    }

    /// Number of levels below and including the root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        // Iterative so deeply nested projects cannot overflow the stack
        let Some(root) = self.root else {
            return 0;
        };
        let mut max_depth = 0;
        let mut stack = vec![(root, 1usize)];
        while let Some((idx, level)) = stack.pop() {
            max_depth = max_depth.max(level);
            if let Some(node) = self.get_node(idx) {
                stack.extend(node.children.iter().map(|&child| (child, level + 1)));
            }
        }
        max_depth
    }

    /// Number of ancestors between `idx` and the top of its tree.
    pub fn level(&self, idx: NodeId) -> usize {
        let mut level = 0;
        let mut current = self.get_node(idx).and_then(|n| n.parent);
        while let Some(parent) = current {
            level += 1;
            current = self.get_node(parent).and_then(|n| n.parent);
        }
        level
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a ProjectTree,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a ProjectTree, start: NodeId) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}
