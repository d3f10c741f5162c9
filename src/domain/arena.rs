use std::fmt;

use generational_arena::Index;
use tracing::instrument;

use crate::domain::tree::AvlTree;

/// Tree node stored in the arena.
///
/// Children are arena indices; a node is owned by exactly one parent slot
/// (or the tree's root slot).
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Option<Index>,
    pub(crate) right: Option<Index>,
    /// Height of the subtree rooted here, leaf = 1
    pub(crate) height: usize,
    /// `height(right) - height(left)`
    pub(crate) balance_factor: i32,
}

impl<T> Node<T> {
    pub(crate) fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 1,
            balance_factor: 0,
        }
    }
}

/// Read-only view of a node inside an [`AvlTree`].
///
/// Handed out to external consumers (printers, tests) that only need the
/// shape of the tree. It cannot be used to mutate the structure.
pub struct NodeRef<'a, T> {
    tree: &'a AvlTree<T>,
    node: &'a Node<T>,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a AvlTree<T>, idx: Index) -> Option<Self> {
        tree.arena().get(idx).map(|node| Self { tree, node })
    }

    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.node.left.and_then(|idx| NodeRef::new(self.tree, idx))
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.node.right.and_then(|idx| NodeRef::new(self.tree, idx))
    }

    pub fn height(&self) -> usize {
        self.node.height
    }

    pub fn balance_factor(&self) -> i32 {
        self.node.balance_factor
    }

    pub fn is_leaf(&self) -> bool {
        self.node.left.is_none() && self.node.right.is_none()
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for NodeRef<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", &self.node.value)
            .field("height", &self.node.height)
            .field("balance_factor", &self.node.balance_factor)
            .finish()
    }
}

/// In-order (ascending) iterator over the values of a tree.
pub struct InOrderIter<'a, T> {
    tree: &'a AvlTree<T>,
    stack: Vec<Index>,
}

impl<'a, T> InOrderIter<'a, T> {
    #[instrument(level = "trace", skip(tree))]
    pub(crate) fn new(tree: &'a AvlTree<T>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(tree.root_index());
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<Index>) {
        while let Some(idx) = current {
            self.stack.push(idx);
            current = self.tree.arena().get(idx).and_then(|node| node.left);
        }
    }
}

impl<'a, T> Iterator for InOrderIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.tree.arena().get(idx)?;
        self.push_left_spine(node.right);
        Some(&node.value)
    }
}

/// Pre-order iterator over nodes, root first, left before right.
pub struct PreOrderIter<'a, T> {
    tree: &'a AvlTree<T>,
    stack: Vec<Index>,
}

impl<'a, T> PreOrderIter<'a, T> {
    pub(crate) fn new(tree: &'a AvlTree<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root_index() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = NodeRef::new(self.tree, idx)?;
        // Right pushed first so that left is visited first
        if let Some(right) = node.node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.node.left {
            self.stack.push(left);
        }
        Some(node)
    }
}
