//! Integration tests for Settings loading with layered precedence.
//!
//! Global and explicit config files live in temp directories, so no real
//! user configuration is involved.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use avltree::cli::CliError;
use avltree::config::{expand_path, RenderStyle, Settings};

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_no_config_files_when_load_then_defaults() {
    let settings = Settings::load_from(None, None).expect("load settings");

    assert_eq!(settings.render, RenderStyle::Tree);
    assert!(!settings.show_height);
    assert!(!settings.show_balance);
}

#[test]
fn given_missing_global_file_when_load_then_ignored() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("avltree.toml");

    let settings = Settings::load_from(Some(&global), None).expect("load settings");
    assert_eq!(settings.render, RenderStyle::Tree);
}

#[test]
fn given_global_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let global = write_config(
        &dir,
        "avltree.toml",
        r#"
render = "sideways"
show_height = true
"#,
    );

    let settings = Settings::load_from(Some(&global), None).expect("load settings");

    assert_eq!(settings.render, RenderStyle::Sideways);
    assert!(settings.show_height);
    assert!(!settings.show_balance);
}

#[test]
fn given_explicit_config_when_load_then_wins_over_global() {
    let dir = TempDir::new().unwrap();
    let global = write_config(
        &dir,
        "avltree.toml",
        r#"
render = "sideways"
show_height = true
"#,
    );
    let explicit = write_config(
        &dir,
        "local.toml",
        r#"
render = "tree"
show_balance = true
"#,
    );

    let settings = Settings::load_from(Some(&global), Some(&explicit)).expect("load settings");

    // explicit file wins where it speaks, global survives elsewhere
    assert_eq!(settings.render, RenderStyle::Tree);
    assert!(settings.show_height);
    assert!(settings.show_balance);
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("does-not-exist.toml");

    let err = Settings::load_from(None, Some(&explicit)).unwrap_err();

    assert!(matches!(err, CliError::Config { .. }));
    assert!(err.to_string().contains("does-not-exist.toml"));
    assert_eq!(err.exit_code(), 78);
}

#[test]
fn given_unknown_render_style_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let explicit = write_config(&dir, "bad.toml", "render = \"diagonal\"\n");

    let err = Settings::load_from(None, Some(&explicit)).unwrap_err();
    assert!(matches!(err, CliError::Config { .. }));
}

#[test]
fn given_env_var_in_config_path_when_load_then_expanded() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "expanded.toml", "show_balance = true\n");
    std::env::set_var("AVLTREE_TEST_CONFIG_DIR", dir.path());

    let path = PathBuf::from("$AVLTREE_TEST_CONFIG_DIR/expanded.toml");
    assert_eq!(expand_path(&path).unwrap(), dir.path().join("expanded.toml"));

    let settings = Settings::load_from(None, Some(&path)).expect("load settings");
    assert!(settings.show_balance);
}

#[test]
fn given_env_override_when_load_then_replaces_file_value() {
    let dir = TempDir::new().unwrap();
    let explicit = write_config(&dir, "local.toml", "empty_label = \"from file\"\n");
    std::env::set_var("AVLTREE_EMPTY_LABEL", "from env");

    let settings = Settings::load_from(None, Some(&explicit)).expect("load settings");
    std::env::remove_var("AVLTREE_EMPTY_LABEL");

    assert_eq!(settings.empty_label, "from env");
}

#[test]
fn given_loaded_settings_when_to_toml_then_parses_back() {
    let settings = Settings {
        render: RenderStyle::Sideways,
        show_height: true,
        show_balance: false,
        empty_label: "-".to_string(),
    };

    let text = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&text).unwrap();
    assert_eq!(parsed, settings);
}
