//! Read-only renderings of a tree's shape.
//!
//! Consumers only touch `NodeRef` (value, left, right), never the arena.

use std::fmt::{Display, Write};

use termtree::Tree;
use tracing::instrument;

use crate::domain::{AvlTree, NodeRef};

/// Placeholder for a missing child next to an existing sibling.
pub const MISSING_CHILD: &str = "·";

/// Controls node labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_height: bool,
    pub show_balance: bool,
    /// Rendered in place of an empty tree
    pub empty_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_height: false,
            show_balance: false,
            empty_label: "(empty)".to_string(),
        }
    }
}

impl RenderOptions {
    fn label<T: Display>(&self, node: &NodeRef<'_, T>) -> String {
        match (self.show_height, self.show_balance) {
            (false, false) => node.value().to_string(),
            (true, false) => format!("{} (h={})", node.value(), node.height()),
            (false, true) => format!("{} (bf={})", node.value(), node.balance_factor()),
            (true, true) => format!(
                "{} (h={}, bf={})",
                node.value(),
                node.height(),
                node.balance_factor()
            ),
        }
    }
}

pub trait TreeRender {
    /// Top-down tree, left child listed before right.
    fn to_tree_string(&self, options: &RenderOptions) -> Tree<String>;

    /// Sideways layout: right subtree above its parent, left subtree below.
    fn pretty_print(&self, options: &RenderOptions) -> String;
}

impl<T: Display> TreeRender for AvlTree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, options: &RenderOptions) -> Tree<String> {
        fn build_tree<T: Display>(node: NodeRef<'_, T>, options: &RenderOptions) -> Tree<String> {
            let mut tree = Tree::new(options.label(&node));
            match (node.left(), node.right()) {
                (None, None) => {}
                (left, right) => {
                    for child in [left, right] {
                        tree.push(match child {
                            Some(child) => build_tree(child, options),
                            None => Tree::new(MISSING_CHILD.to_string()),
                        });
                    }
                }
            }
            tree
        }

        match self.root() {
            Some(root) => build_tree(root, options),
            None => Tree::new(options.empty_label.clone()),
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn pretty_print(&self, options: &RenderOptions) -> String {
        fn print_node<T: Display>(
            node: NodeRef<'_, T>,
            prefix: &str,
            is_left: bool,
            options: &RenderOptions,
            out: &mut String,
        ) {
            if let Some(right) = node.right() {
                let child_prefix = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
                print_node(right, &child_prefix, false, options, out);
            }
            let connector = if is_left { "└── " } else { "┌── " };
            // Writing into a String cannot fail
            let _ = writeln!(out, "{}{}{}", prefix, connector, options.label(&node));
            if let Some(left) = node.left() {
                let child_prefix = format!("{}{}", prefix, if is_left { "    " } else { "│   " });
                print_node(left, &child_prefix, true, options, out);
            }
        }

        let mut out = String::new();
        match self.root() {
            Some(root) => print_node(root, "", true, options, &mut out),
            None => out.push_str(&options.empty_label),
        }
        out.trim_end().to_string()
    }
}
