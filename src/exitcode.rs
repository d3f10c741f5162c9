//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (e.g. a key without a total order)
pub const DATAERR: i32 = 65;

/// Internal software error (tree invariant fault)
pub const SOFTWARE: i32 = 70;

/// Configuration error
pub const CONFIG: i32 = 78;
