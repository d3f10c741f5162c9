use std::fmt::Debug;

use generational_arena::Index;
use itertools::Itertools;
use tracing::instrument;

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::tree::AvlTree;

impl<T: PartialOrd + Debug> AvlTree<T> {
    /// Verifies cached heights, balance factors and key order for every node.
    ///
    /// Reports the first violation found.
    #[instrument(level = "debug", skip(self))]
    pub fn check_invariants(&self) -> TreeResult<()> {
        self.checked_height(self.root_index())?;

        if let Some((prev, next)) = self
            .iter()
            .tuple_windows::<(_, _)>()
            .find(|(a, b)| a >= b)
        {
            return Err(TreeError::OrderViolation {
                prev: format!("{:?}", prev),
                next: format!("{:?}", next),
            });
        }
        Ok(())
    }

    fn checked_height(&self, idx: Option<Index>) -> TreeResult<usize> {
        let Some(idx) = idx else {
            return Ok(0);
        };
        let node = self.node(idx)?;
        let left = self.checked_height(node.left)?;
        let right = self.checked_height(node.right)?;

        let actual = 1 + left.max(right);
        if node.height != actual {
            return Err(TreeError::HeightMismatch {
                value: format!("{:?}", node.value),
                cached: node.height,
                actual,
            });
        }
        let balance_factor = right as i32 - left as i32;
        if node.balance_factor != balance_factor || !(-1..=1).contains(&balance_factor) {
            return Err(TreeError::Unbalanced {
                value: format!("{:?}", node.value),
                balance_factor,
            });
        }
        Ok(actual)
    }
}
