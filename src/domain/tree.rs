//! Arena-backed AVL tree: search, insertion and deletion.
//!
//! Rotations and height bookkeeping live in `rebalance.rs`, invariant
//! checking in `validate.rs`.

use std::cmp::Ordering;
use std::fmt::Debug;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::arena::{InOrderIter, Node, NodeRef, PreOrderIter};
use crate::domain::error::{Side, TreeError, TreeResult};
use crate::domain::rebalance::RotationStats;

/// Self-balancing ordered set of totally ordered scalar keys.
///
/// Duplicates are rejected. Keys without a total order against themselves
/// (e.g. `f64::NAN`) are refused on insert.
#[derive(Debug, Clone)]
pub struct AvlTree<T> {
    /// Arena storage for all tree nodes
    arena: Arena<Node<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
    pub(crate) stats: RotationStats,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlTree<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            stats: RotationStats::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.and_then(|idx| NodeRef::new(self, idx))
    }

    /// Height of the whole tree, 0 when empty.
    pub fn depth(&self) -> usize {
        self.root().map(|root| root.height()).unwrap_or(0)
    }

    /// Values in ascending order.
    pub fn iter(&self) -> InOrderIter<'_, T> {
        InOrderIter::new(self)
    }

    /// Nodes in pre-order, root first.
    pub fn nodes(&self) -> PreOrderIter<'_, T> {
        PreOrderIter::new(self)
    }

    pub fn stats(&self) -> RotationStats {
        self.stats
    }

    /// Drops every node. Rotation statistics are kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub(crate) fn arena(&self) -> &Arena<Node<T>> {
        &self.arena
    }

    pub(crate) fn root_index(&self) -> Option<Index> {
        self.root
    }
}

impl<T: Debug> AvlTree<T> {
    pub(crate) fn node(&self, idx: Index) -> TreeResult<&Node<T>> {
        self.arena
            .get(idx)
            .ok_or_else(|| TreeError::DanglingIndex(format!("{:?}", idx)))
    }

    pub(crate) fn node_mut(&mut self, idx: Index) -> TreeResult<&mut Node<T>> {
        self.arena
            .get_mut(idx)
            .ok_or_else(|| TreeError::DanglingIndex(format!("{:?}", idx)))
    }

    pub(crate) fn describe(&self, idx: Index) -> String {
        self.arena
            .get(idx)
            .map(|node| format!("{:?}", node.value))
            .unwrap_or_else(|| format!("{:?}", idx))
    }

    /// Releases a node that has already been unlinked from its parent.
    fn release(&mut self, idx: Index) -> TreeResult<Node<T>> {
        self.arena
            .remove(idx)
            .ok_or_else(|| TreeError::DanglingIndex(format!("{:?}", idx)))
    }

    /// Points whichever child slot of `parent` holds `old` at `new`.
    pub(crate) fn replace_child(
        &mut self,
        parent: Index,
        old: Index,
        new: Index,
    ) -> TreeResult<()> {
        let value = self.describe(old);
        let parent_value = self.describe(parent);
        let node = self.node_mut(parent)?;
        if node.left == Some(old) {
            node.left = Some(new);
        } else if node.right == Some(old) {
            node.right = Some(new);
        } else {
            return Err(TreeError::Detached {
                value,
                parent: parent_value,
            });
        }
        Ok(())
    }
}

impl<T: PartialOrd + Clone + Debug> AvlTree<T> {
    /// Binary-search descent from the root.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, value: &T) -> Option<NodeRef<'_, T>> {
        let idx = self.find_index(value)?;
        NodeRef::new(self, idx)
    }

    /// Cached height of the node holding `value`.
    #[instrument(level = "trace", skip(self))]
    pub fn height(&self, value: &T) -> Option<usize> {
        self.find(value).map(|node| node.height())
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find_index(value).is_some()
    }

    fn find_index(&self, value: &T) -> Option<Index> {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = self.arena.get(idx)?;
            current = match value.partial_cmp(&node.value)? {
                Ordering::Equal => return Some(idx),
                Ordering::Greater => node.right,
                Ordering::Less => node.left,
            };
        }
        None
    }

    /// Inserts every value in order and returns the resulting root.
    ///
    /// Duplicates within `values` are skipped like any other duplicate insert.
    #[instrument(level = "debug", skip(self, values))]
    pub fn build<I>(&mut self, values: I) -> TreeResult<Option<NodeRef<'_, T>>>
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.insert(value)?;
        }
        Ok(self.root())
    }

    /// Inserts `value`, returning `false` if it was already present.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, value: T) -> TreeResult<bool> {
        if value.partial_cmp(&value).is_none() {
            return Err(TreeError::Incomparable(format!("{:?}", value)));
        }

        let Some(root) = self.root else {
            self.root = Some(self.arena.insert(Node::leaf(value)));
            return Ok(true);
        };

        // Descend to the insertion point, recording the path root-first.
        let mut path = Vec::new();
        let mut current = Some(root);
        let mut side = Side::Left;
        while let Some(idx) = current {
            path.push(idx);
            let node = self.node(idx)?;
            current = match compare(&value, &node.value)? {
                Ordering::Equal => {
                    trace!("{:?} already present, not inserting", value);
                    return Ok(false);
                }
                Ordering::Greater => {
                    side = Side::Right;
                    node.right
                }
                Ordering::Less => {
                    side = Side::Left;
                    node.left
                }
            };
        }

        let leaf = self.arena.insert(Node::leaf(value));
        let parent = *path
            .last()
            .ok_or_else(|| TreeError::DanglingIndex("empty insertion path".to_string()))?;
        let parent_node = self.node_mut(parent)?;
        match side {
            Side::Right => parent_node.right = Some(leaf),
            Side::Left => parent_node.left = Some(leaf),
        }

        self.retrace(&path)?;
        Ok(true)
    }

    /// Walks `path` bottom-up, refreshing heights and rebalancing each node.
    fn retrace(&mut self, path: &[Index]) -> TreeResult<()> {
        for (depth, &idx) in path.iter().enumerate().rev() {
            self.update_height_and_balance(idx)?;
            let subtree_root = self.rebalance(idx)?;
            if subtree_root == idx {
                continue;
            }
            match depth.checked_sub(1) {
                None => self.root = Some(subtree_root),
                Some(parent_depth) => {
                    self.replace_child(path[parent_depth], idx, subtree_root)?
                }
            }
        }
        Ok(())
    }

    /// Removes `value`, returning `false` if it was not present.
    #[instrument(level = "trace", skip(self))]
    pub fn delete(&mut self, value: &T) -> TreeResult<bool> {
        let (root, removed) = self.delete_from(self.root, value)?;
        self.root = root;
        if !removed {
            trace!("{:?} not present, nothing deleted", value);
        }
        Ok(removed)
    }

    /// Deletes `value` from the subtree at `subtree` and returns the
    /// (possibly new) subtree root for the caller to reattach.
    fn delete_from(
        &mut self,
        subtree: Option<Index>,
        value: &T,
    ) -> TreeResult<(Option<Index>, bool)> {
        let Some(idx) = subtree else {
            return Ok((None, false));
        };

        let (left, right, ordering) = {
            let node = self.node(idx)?;
            (node.left, node.right, compare(value, &node.value)?)
        };

        let (survivor, removed) = match ordering {
            Ordering::Less => {
                let (new_left, removed) = self.delete_from(left, value)?;
                self.node_mut(idx)?.left = new_left;
                (Some(idx), removed)
            }
            Ordering::Greater => {
                let (new_right, removed) = self.delete_from(right, value)?;
                self.node_mut(idx)?.right = new_right;
                (Some(idx), removed)
            }
            Ordering::Equal => match (left, right) {
                (None, None) => {
                    self.release(idx)?;
                    (None, true)
                }
                (Some(child), None) | (None, Some(child)) => {
                    self.release(idx)?;
                    (Some(child), true)
                }
                (Some(_), Some(right)) => {
                    // The node stays in place and takes over its successor's value.
                    let successor = self.successor(idx)?;
                    let successor_value = self.node(successor)?.value.clone();
                    let (new_right, _) = self.delete_from(Some(right), &successor_value)?;
                    let node = self.node_mut(idx)?;
                    node.value = successor_value;
                    node.right = new_right;
                    (Some(idx), true)
                }
            },
        };

        match survivor {
            Some(root) => {
                self.update_height_and_balance(root)?;
                Ok((Some(self.rebalance(root)?), removed))
            }
            None => Ok((None, removed)),
        }
    }

    /// Leftmost node of the right subtree of `idx`.
    ///
    /// Calling this on a node without a right child is a caller bug.
    pub(crate) fn successor(&self, idx: Index) -> TreeResult<Index> {
        let mut current = self
            .node(idx)?
            .right
            .ok_or_else(|| TreeError::NoSuccessor(self.describe(idx)))?;
        while let Some(left) = self.node(current)?.left {
            current = left;
        }
        Ok(current)
    }
}

fn compare<T: PartialOrd + Debug>(a: &T, b: &T) -> TreeResult<Ordering> {
    a.partial_cmp(b)
        .ok_or_else(|| TreeError::Incomparable(format!("{:?} vs {:?}", a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing;

    #[test]
    fn given_empty_tree_when_insert_then_single_leaf_root() {
        testing::init_test_setup();
        let mut tree = AvlTree::new();
        assert!(tree.insert(10).unwrap());

        let root = tree.root().unwrap();
        assert_eq!(*root.value(), 10);
        assert_eq!(root.height(), 1);
        assert_eq!(root.balance_factor(), 0);
        assert!(root.is_leaf());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn given_node_without_right_child_when_successor_then_fails() {
        let mut tree = AvlTree::new();
        tree.build([2, 1]).unwrap();
        let root = tree.root_index().unwrap();

        let err = tree.successor(root).unwrap_err();
        assert_eq!(err, TreeError::NoSuccessor("2".to_string()));
    }

    #[test]
    fn given_two_child_node_when_successor_then_leftmost_of_right_subtree() {
        let mut tree = AvlTree::new();
        tree.build([5, 3, 8, 7, 1, 9, 6]).unwrap();
        let root = tree.root_index().unwrap();
        assert_eq!(tree.describe(root), "5");

        let successor = tree.successor(root).unwrap();
        assert_eq!(tree.node(successor).unwrap().value, 6);
    }

    #[test]
    fn given_foreign_child_when_replace_child_then_detached_error() {
        let mut tree = AvlTree::new();
        tree.build([2, 1, 3]).unwrap();
        let root = tree.root_index().unwrap();
        let left = tree.node(root).unwrap().left.unwrap();
        let right = tree.node(root).unwrap().right.unwrap();

        let err = tree.replace_child(left, right, root).unwrap_err();
        assert!(matches!(err, TreeError::Detached { .. }));
    }

    #[test]
    fn given_nan_when_insert_then_incomparable_and_tree_unchanged() {
        let mut tree = AvlTree::new();
        tree.build([1.0, 2.0]).unwrap();

        let err = tree.insert(f64::NAN).unwrap_err();
        assert!(matches!(err, TreeError::Incomparable(_)));
        assert_eq!(tree.len(), 2);
        assert!(tree.find(&f64::NAN).is_none());
    }

    #[test]
    fn given_leaf_when_delete_then_arena_slot_released() {
        let mut tree = AvlTree::new();
        tree.build([2, 1, 3]).unwrap();

        assert!(tree.delete(&3).unwrap());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.arena().len(), 2);
        assert!(tree.root().unwrap().right().is_none());
    }
}
