//! Height bookkeeping and the rotations that restore the AVL invariant.

use std::fmt::Debug;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::error::{Side, TreeError, TreeResult};
use crate::domain::tree::AvlTree;

/// Number of single rotations performed over the lifetime of a tree.
///
/// A double rotation counts once in each direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationStats {
    pub left: usize,
    pub right: usize,
}

impl RotationStats {
    pub fn total(&self) -> usize {
        self.left + self.right
    }
}

impl<T: Debug> AvlTree<T> {
    fn height_of(&self, idx: Option<Index>) -> TreeResult<usize> {
        match idx {
            Some(idx) => Ok(self.node(idx)?.height),
            None => Ok(0),
        }
    }

    /// Recomputes `height` and `balance_factor` of `idx` from its children,
    /// whose cached values must already be correct.
    pub(crate) fn update_height_and_balance(&mut self, idx: Index) -> TreeResult<()> {
        let (left, right) = {
            let node = self.node(idx)?;
            (node.left, node.right)
        };
        let left_height = self.height_of(left)?;
        let right_height = self.height_of(right)?;

        let node = self.node_mut(idx)?;
        node.height = 1 + left_height.max(right_height);
        node.balance_factor = right_height as i32 - left_height as i32;
        Ok(())
    }

    /// Promotes the right child of `idx`; returns the new subtree root.
    fn rotate_left(&mut self, idx: Index) -> TreeResult<Index> {
        let new_root = self.node(idx)?.right.ok_or_else(|| TreeError::MissingChild {
            value: self.describe(idx),
            side: Side::Right,
        })?;
        debug!("rotating left at {}", self.describe(idx));

        let inner = self.node(new_root)?.left;
        self.node_mut(idx)?.right = inner;
        self.node_mut(new_root)?.left = Some(idx);

        // Old root first: the new root's height depends on it.
        self.update_height_and_balance(idx)?;
        self.update_height_and_balance(new_root)?;
        self.stats.left += 1;
        Ok(new_root)
    }

    /// Promotes the left child of `idx`; returns the new subtree root.
    fn rotate_right(&mut self, idx: Index) -> TreeResult<Index> {
        let new_root = self.node(idx)?.left.ok_or_else(|| TreeError::MissingChild {
            value: self.describe(idx),
            side: Side::Left,
        })?;
        debug!("rotating right at {}", self.describe(idx));

        let inner = self.node(new_root)?.right;
        self.node_mut(idx)?.left = inner;
        self.node_mut(new_root)?.right = Some(idx);

        self.update_height_and_balance(idx)?;
        self.update_height_and_balance(new_root)?;
        self.stats.right += 1;
        Ok(new_root)
    }

    /// Restores the AVL invariant at `idx` and returns the subtree root,
    /// which the caller must reattach if it differs from `idx`.
    ///
    /// Children of `idx` must already be balanced and its own height and
    /// balance factor freshly computed.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn rebalance(&mut self, idx: Index) -> TreeResult<Index> {
        let node = self.node(idx)?;
        let balance_factor = node.balance_factor;
        let (left, right) = (node.left, node.right);

        if (-1..=1).contains(&balance_factor) {
            return Ok(idx);
        }
        debug!(
            "rebalancing subtree at {} (balance factor {})",
            self.describe(idx),
            balance_factor
        );

        if balance_factor >= 2 {
            let right = right.ok_or_else(|| TreeError::MissingChild {
                value: self.describe(idx),
                side: Side::Right,
            })?;
            if self.node(right)?.balance_factor < 0 {
                // Right-Left: straighten the zig-zag first
                let straightened = self.rotate_right(right)?;
                self.node_mut(idx)?.right = Some(straightened);
            }
            self.rotate_left(idx)
        } else {
            let left = left.ok_or_else(|| TreeError::MissingChild {
                value: self.describe(idx),
                side: Side::Left,
            })?;
            if self.node(left)?.balance_factor > 0 {
                // Left-Right
                let straightened = self.rotate_left(left)?;
                self.node_mut(idx)?.left = Some(straightened);
            }
            self.rotate_right(idx)
        }
    }
}
