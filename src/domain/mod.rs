//! Domain layer: the AVL tree and its node storage
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod rebalance;
pub mod tree;
pub mod validate;

pub use arena::{InOrderIter, NodeRef, PreOrderIter};
pub use error::{Side, TreeError, TreeResult};
pub use rebalance::RotationStats;
pub use tree::AvlTree;
