use rover::config::ContentMode;
use rover::tooling::cli::{CliContext, Commands};
use std::fs;
use tempfile::TempDir;

use crate::integration::support::{with_xdg_env, write_files};

#[test]
fn nav_json_contract_has_required_fields() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let root = temp_dir.path().join("site");
        write_files(&root, &[("templates/intro.html", "<html></html>")]);

        let cli = CliContext::new(root, None, None).unwrap();
        let output = cli
            .execute(&Commands::Nav {
                format: "json".to_string(),
            })
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed.get("navigation").and_then(|v| v.as_array()).is_some());
        assert!(parsed.get("last_updated").and_then(|v| v.as_f64()).is_some());
    });
}

#[test]
fn workspace_and_explicit_config_layer() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let root = temp_dir.path().join("site");
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join("rover.toml"),
            "[server]\nport = 9000\n\n[content]\nroots = [\"lessons\"]\n",
        )
        .unwrap();
        let explicit = temp_dir.path().join("override.toml");
        fs::write(&explicit, "[server]\nport = 9100\n").unwrap();
        write_files(&root, &[("lessons/one.html", "x")]);

        let cli = CliContext::new(root, Some(explicit), None).unwrap();
        assert_eq!(cli.config().server.port, 9100);

        let output = cli
            .execute(&Commands::Stats {
                format: "json".to_string(),
            })
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["totalResources"], 1);
    });
}

#[test]
fn global_config_is_lowest_precedence() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let global_dir = temp_dir.path().join("xdg").join("rover");
        fs::create_dir_all(&global_dir).unwrap();
        fs::write(
            global_dir.join("config.toml"),
            "[server]\nport = 7000\nhost = \"127.0.0.1\"\n",
        )
        .unwrap();
        let root = temp_dir.path().join("site");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("rover.toml"), "[server]\nport = 7100\n").unwrap();

        let cli = CliContext::new(root, None, Some(ContentMode::React)).unwrap();
        assert_eq!(cli.config().server.port, 7100);
        assert_eq!(cli.config().server.host, "127.0.0.1");
        assert_eq!(cli.config().content.mode, ContentMode::React);
    });
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let result = CliContext::new(
            temp_dir.path().to_path_buf(),
            Some(temp_dir.path().join("absent.toml")),
            None,
        );
        assert!(result.is_err());
    });
}
