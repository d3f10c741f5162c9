//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/avltree/avltree.toml`
//! 3. Explicit config: `--config <path>` (must exist)
//! 4. Environment variables: `AVLTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::cli::error::{CliError, CliResult};
use crate::tree_traits::RenderOptions;

/// Layout used when printing a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Top-down tree with box-drawing branches
    Tree,
    /// Sideways layout, right subtree on top
    Sideways,
}

/// Unified configuration for avltree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub render: RenderStyle,
    /// Append cached height to node labels
    pub show_height: bool,
    /// Append balance factor to node labels
    pub show_balance: bool,
    /// Printed in place of an empty tree
    pub empty_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            render: RenderStyle::Tree,
            show_height: options.show_height,
            show_balance: options.show_balance,
            empty_label: options.empty_label,
        }
    }
}

/// Get the XDG config directory for avltree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "avltree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("avltree.toml"))
}

/// Expand `~` and `$VAR` in a user supplied path.
pub fn expand_path(path: &Path) -> CliResult<PathBuf> {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| CliError::Config {
            message: format!("expand {}: {}", raw, e),
        })
}

fn config_err(e: config::ConfigError) -> CliError {
    CliError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Like [`Settings::load`] but with the global config location supplied
    /// by the caller.
    ///
    /// A missing global file is ignored, a missing explicit file is an error.
    #[instrument(level = "debug")]
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> CliResult<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("render", "tree")
            .map_err(config_err)?
            .set_default("show_height", defaults.show_height)
            .map_err(config_err)?
            .set_default("show_balance", defaults.show_balance)
            .map_err(config_err)?
            .set_default("empty_label", defaults.empty_label.clone())
            .map_err(config_err)?;

        if let Some(global_path) = global {
            debug!("global config: {}", global_path.display());
            builder = builder.add_source(File::from(global_path).required(false));
        }

        if let Some(path) = explicit {
            let path = expand_path(path)?;
            if !path.exists() {
                return Err(CliError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("AVLTREE").try_parsing(true));

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_height: self.show_height,
            show_balance: self.show_balance,
            empty_label: self.empty_label.clone(),
        }
    }

    /// Serialize the effective settings.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
