//! Self-balancing AVL tree.
//!
//! Nodes live in a generational arena owned by the tree; every insert and
//! delete restores the AVL invariant before returning.
//!
//! ```
//! use avltree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! tree.build([50, 40, 35]).unwrap();
//! let root = tree.root().unwrap();
//! assert_eq!(*root.value(), 40);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![35, 40, 50]);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{AvlTree, NodeRef, RotationStats, TreeError, TreeResult};
pub use tree_traits::{RenderOptions, TreeRender};
