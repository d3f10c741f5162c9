//! Command dispatch for the avltree binary

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, info, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{RenderStyle, Settings};
use crate::domain::AvlTree;
use crate::tree_traits::TreeRender;

/// Keys of the sample tree built by `demo`.
pub const DEMO_KEYS: [f64; 8] = [5.0, 3.0, 8.0, 7.0, 1.0, 9.5, 6.0, 4.0];

/// Key removed from the sample tree by `demo`.
pub const DEMO_DELETE: f64 = 8.0;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    if let Commands::Completion { shell } = command {
        print_completions(*shell);
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(style) = cli.style {
        settings.render = style;
    }
    debug!("settings: {:?}", settings);

    match command {
        Commands::Show { keys } => _show(keys, &settings),
        Commands::Find { key, keys } => _find(*key, keys),
        Commands::Delete {
            keys_to_delete,
            keys,
        } => _delete(keys_to_delete, keys, &settings),
        Commands::Check { keys } => _check(keys),
        Commands::Demo => _demo(&settings),
        Commands::Config => _config(&settings),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Render a tree in the configured layout.
pub fn render(tree: &AvlTree<f64>, settings: &Settings) -> String {
    let options = settings.render_options();
    match settings.render {
        RenderStyle::Tree => tree.to_tree_string(&options).to_string().trim_end().to_string(),
        RenderStyle::Sideways => tree.pretty_print(&options),
    }
}

fn build(keys: &[f64]) -> CliResult<AvlTree<f64>> {
    let mut tree = AvlTree::new();
    tree.build(keys.iter().copied())?;
    info!("built tree with {} nodes from {} keys", tree.len(), keys.len());
    Ok(tree)
}

#[instrument(skip(settings))]
fn _show(keys: &[f64], settings: &Settings) -> CliResult<()> {
    let tree = build(keys)?;
    output::info(&render(&tree, settings));
    Ok(())
}

#[instrument]
fn _find(key: f64, keys: &[f64]) -> CliResult<()> {
    let tree = build(keys)?;
    match tree.find(&key) {
        Some(node) => {
            output::success(&format!("found {}", node.value()));
            output::action("height", &node.height());
            output::action("balance factor", &node.balance_factor());
        }
        None => output::failure(&format!("{} not found", key)),
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _delete(keys_to_delete: &[f64], keys: &[f64], settings: &Settings) -> CliResult<()> {
    let mut tree = build(keys)?;
    for key in keys_to_delete {
        if !tree.delete(key)? {
            output::failure(&format!("{} not present", key));
        }
    }
    output::info(&render(&tree, settings));
    Ok(())
}

#[instrument]
fn _check(keys: &[f64]) -> CliResult<()> {
    let tree = build(keys)?;
    tree.check_invariants()?;
    let stats = tree.stats();
    output::success("AVL invariants hold");
    output::action("nodes", &tree.len());
    output::action("depth", &tree.depth());
    output::action(
        "rotations",
        &format!("{} left, {} right", stats.left, stats.right),
    );
    Ok(())
}

#[instrument(skip(settings))]
fn _demo(settings: &Settings) -> CliResult<()> {
    let mut tree = build(&DEMO_KEYS)?;
    output::header("Built tree");
    output::info(&render(&tree, settings));

    tree.delete(&DEMO_DELETE)?;
    output::header(&format!("After deleting {}", DEMO_DELETE));
    output::info(&render(&tree, settings));
    Ok(())
}

fn _config(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
