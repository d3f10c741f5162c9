//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::RenderStyle;

/// Build, inspect and print AVL trees of numeric keys
#[derive(Parser, Debug)]
#[command(name = "avltree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (overrides the global config)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output layout (overrides the configured style)
    #[arg(long, global = true, value_enum)]
    pub style: Option<RenderStyle>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tree from keys and print it
    Show {
        /// Keys, inserted in order
        #[arg(value_parser = parse_key, allow_negative_numbers = true)]
        keys: Vec<f64>,
    },

    /// Build a tree and look up one key
    Find {
        /// Key to look up
        #[arg(short, long, value_parser = parse_key, allow_negative_numbers = true)]
        key: f64,
        /// Keys, inserted in order
        #[arg(value_parser = parse_key, allow_negative_numbers = true)]
        keys: Vec<f64>,
    },

    /// Build a tree, delete keys, print the result
    Delete {
        /// Key to delete (repeatable, applied in order)
        #[arg(short, long = "key", value_parser = parse_key, allow_negative_numbers = true, required = true)]
        keys_to_delete: Vec<f64>,
        /// Keys, inserted in order
        #[arg(value_parser = parse_key, allow_negative_numbers = true)]
        keys: Vec<f64>,
    },

    /// Build a tree and verify the AVL invariants
    Check {
        /// Keys, inserted in order
        #[arg(value_parser = parse_key, allow_negative_numbers = true)]
        keys: Vec<f64>,
    },

    /// Build the sample tree, print it, delete 8, print again
    Demo,

    /// Print the effective settings as TOML
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Parse a key, rejecting NaN which has no place in an ordered tree.
pub fn parse_key(s: &str) -> Result<f64, String> {
    let key: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("'{}' is not a number: {}", s, e))?;
    if key.is_nan() {
        return Err(format!("'{}' is not orderable", s));
    }
    Ok(key)
}
