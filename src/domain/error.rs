//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised by tree operations.
///
/// Absent keys and duplicate inserts are not errors; they are reported
/// through the `bool` returned by `insert`/`delete`. Everything here means
/// the operation was aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("key has no total order: {0}")]
    Incomparable(String),

    #[error("dangling node index: {0}")]
    DanglingIndex(String),

    #[error("cannot rotate {side}: node {value} has no {side} child")]
    MissingChild { value: String, side: Side },

    #[error("node {value} is not a child of its recorded parent {parent}")]
    Detached { value: String, parent: String },

    #[error("node {0} has no right subtree, no in-order successor")]
    NoSuccessor(String),

    #[error("cached height of {value} is {cached}, actual {actual}")]
    HeightMismatch {
        value: String,
        cached: usize,
        actual: usize,
    },

    #[error("node {value} is out of balance: balance factor {balance_factor}")]
    Unbalanced { value: String, balance_factor: i32 },

    #[error("in-order sequence broken: {prev} is not less than {next}")]
    OrderViolation { prev: String, next: String },
}

/// Child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
