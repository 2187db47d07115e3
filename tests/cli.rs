//! End-to-end tests for the `cardpad` binary.
//!
//! Robot mode output is parsed as JSON; human mode is only spot-checked
//! since its formatting is free to change.

mod common;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use cardpad::profile::{ProfileStore, State};

use common::xbox_profile;

/// The binary pointed at a temporary data directory.
fn cardpad(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cardpad").expect("binary builds");
    cmd.env("CARDPAD_DIR", dir.path());
    cmd.env_remove("CARDPAD_FORMAT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Parse a command's stdout as one JSON document.
fn json_stdout(cmd: &mut Command) -> Result<Value> {
    let output = cmd.output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    Ok(serde_json::from_slice(&output.stdout)?)
}

/// Seed the store under `dir` with the shared Xbox fixture profile.
fn seed_profile(dir: &TempDir, name: &str) -> Result<()> {
    let store = ProfileStore::new(dir.path().join("profiles"));
    store.save(&xbox_profile(name)?)?;
    Ok(())
}

// ===== Registry =====

#[test]
fn test_controllers_robot_lists_registry() -> Result<()> {
    let dir = TempDir::new()?;
    let value = json_stdout(cardpad(&dir).args(["--robot", "controllers"]))?;
    assert_eq!(value["count"], 12);
    let names: Vec<&str> =
        value["controllers"].as_array().unwrap().iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"Xbox One"));
    assert!(names.contains(&"Wii Remote"));
    Ok(())
}

#[test]
fn test_describe_robot_reports_layout() -> Result<()> {
    let dir = TempDir::new()?;
    let value = json_stdout(cardpad(&dir).args(["--robot", "describe", "Xbox One"]))?;
    assert_eq!(value["name"], "Xbox One");
    assert_eq!(value["buttons"].as_array().unwrap().len(), 17);
    assert_eq!(value["buttons"][0], "A");
    assert_eq!(value["has_stick"], true);
    Ok(())
}

#[test]
fn test_describe_unknown_controller_fails() -> Result<()> {
    let dir = TempDir::new()?;
    cardpad(&dir)
        .args(["--robot", "describe", "Power Glove"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown controller"));
    Ok(())
}

// ===== Profile lifecycle =====

#[test]
fn test_init_creates_standard_profiles() -> Result<()> {
    let dir = TempDir::new()?;
    cardpad(&dir).arg("init").assert().success();

    let value = json_stdout(cardpad(&dir).args(["--robot", "profiles"]))?;
    assert_eq!(value["count"], 3);
    let names = value["profiles"].to_string();
    assert!(names.contains("Standard Gamepad (16 Buttons 4 Axes)"));
    Ok(())
}

#[test]
fn test_create_rename_delete_cycle() -> Result<()> {
    let dir = TempDir::new()?;
    seed_profile(&dir, "Base")?;

    cardpad(&dir).args(["create", "Base", "Work"]).assert().success();
    cardpad(&dir).args(["rename", "Work", "Play"]).assert().success();
    cardpad(&dir).args(["delete", "Base"]).assert().success();

    let value = json_stdout(cardpad(&dir).args(["--robot", "profiles"]))?;
    assert_eq!(value["profiles"], serde_json::json!(["Play"]));
    Ok(())
}

#[test]
fn test_delete_missing_profile_fails_recoverably() -> Result<()> {
    let dir = TempDir::new()?;
    let output = cardpad(&dir).args(["--robot", "delete", "ghost"]).output()?;
    assert!(!output.status.success());
    let error: Value = serde_json::from_slice(&output.stderr)?;
    assert_eq!(error["error"], true);
    assert_eq!(error["recoverable"], true);
    assert!(error["message"].as_str().unwrap().contains("ghost"));
    Ok(())
}

// ===== Binding resolution through the binary =====

#[test]
fn test_resolve_reports_inheritance() -> Result<()> {
    let dir = TempDir::new()?;
    seed_profile(&dir, "Pad")?;

    // Button 4 is bound only in the "all" layer
    let value = json_stdout(cardpad(&dir).args(["--robot", "resolve", "Pad", "question", "4"]))?;
    assert_eq!(value["action"], "Undo");
    assert_eq!(value["inherited"], true);
    assert_eq!(value["button_name"], "Left Shoulder");

    // Button 1 is bound in "review" and inherits into question
    let value = json_stdout(cardpad(&dir).args(["--robot", "resolve", "Pad", "question", "1"]))?;
    assert_eq!(value["action"], "Again");
    assert_eq!(value["inherited"], true);

    // In "review" itself that binding is explicit
    let value = json_stdout(cardpad(&dir).args(["--robot", "resolve", "Pad", "review", "1"]))?;
    assert_eq!(value["inherited"], false);
    Ok(())
}

#[test]
fn test_bind_unbind_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    seed_profile(&dir, "Pad")?;

    cardpad(&dir).args(["bind", "Pad", "review", "3", "Easy"]).assert().success();
    let value = json_stdout(cardpad(&dir).args(["--robot", "resolve", "Pad", "review", "3"]))?;
    assert_eq!(value["action"], "Easy");
    assert_eq!(value["inherited"], false);

    cardpad(&dir).args(["unbind", "Pad", "review", "3"]).assert().success();
    let value = json_stdout(cardpad(&dir).args(["--robot", "resolve", "Pad", "review", "3"]))?;
    assert_eq!(value["action"], "");
    Ok(())
}

#[test]
fn test_bind_with_modifier_layer() -> Result<()> {
    let dir = TempDir::new()?;
    seed_profile(&dir, "Pad")?;

    cardpad(&dir)
        .args(["bind", "Pad", "all", "2", "Statistics", "--modifier", "1"])
        .assert()
        .success();

    let value = json_stdout(
        cardpad(&dir).args(["--robot", "resolve", "Pad", "overview", "2", "--modifier", "1"]),
    )?;
    assert_eq!(value["action"], "Statistics");
    assert_eq!(value["modifier"], 1);

    // Layer 0 is untouched
    let value = json_stdout(cardpad(&dir).args(["--robot", "resolve", "Pad", "overview", "2"]))?;
    assert_eq!(value["action"], "");
    Ok(())
}

#[test]
fn test_binding_a_modifier_button_fails() -> Result<()> {
    let dir = TempDir::new()?;
    seed_profile(&dir, "Pad")?;

    cardpad(&dir)
        .args(["bind", "Pad", "all", "16", "Sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("modifier"));
    Ok(())
}

#[test]
fn test_unknown_state_fails_with_hint() -> Result<()> {
    let dir = TempDir::new()?;
    seed_profile(&dir, "Pad")?;

    let output = cardpad(&dir).args(["--robot", "resolve", "Pad", "studying", "0"]).output()?;
    assert!(!output.status.success());
    let error: Value = serde_json::from_slice(&output.stderr)?;
    assert!(error["suggestion"].as_str().unwrap().contains("deckBrowser"));
    Ok(())
}

// ===== Show and actions =====

#[test]
fn test_show_marks_inherited_rows() -> Result<()> {
    let dir = TempDir::new()?;
    seed_profile(&dir, "Pad")?;

    let value = json_stdout(cardpad(&dir).args(["--robot", "show", "Pad", "--state", "question"]))?;
    assert_eq!(value["name"], "Pad");
    assert_eq!(value["mods"], serde_json::json!([16]));
    let states = value["states"].as_array().unwrap();
    assert_eq!(states.len(), 1);
    let rows = states[0]["rows"].as_array().unwrap();
    // Modifier button 16 never appears as a row
    assert!(rows.iter().all(|row| row["button"] != 16));
    let row_for = |button: u64| rows.iter().find(|row| row["button"] == button).unwrap();
    assert_eq!(row_for(4)["action"], "Undo");
    assert_eq!(row_for(4)["inherited"], true);
    assert_eq!(row_for(1)["action"], "Again");
    Ok(())
}

#[test]
fn test_actions_catalog_per_state() -> Result<()> {
    let dir = TempDir::new()?;
    let value = json_stdout(cardpad(&dir).args(["--robot", "actions", "review"]))?;
    let actions = value["actions"].to_string();
    assert!(actions.contains("Again"));
    assert!(actions.contains("Sync"));

    let value = json_stdout(cardpad(&dir).args(["--robot", "actions", "dialog"]))?;
    let actions = value["actions"].to_string();
    assert!(actions.contains("Escape"));
    assert!(!actions.contains("Again"));
    Ok(())
}

// ===== Assignment =====

#[test]
fn test_assign_requires_known_controller_and_profile() -> Result<()> {
    let dir = TempDir::new()?;
    seed_profile(&dir, "Pad")?;

    cardpad(&dir).args(["assign", "Xbox One", "Pad"]).assert().success();
    cardpad(&dir).args(["assign", "Power Glove", "Pad"]).assert().failure();
    cardpad(&dir).args(["assign", "Xbox One", "ghost"]).assert().failure();
    Ok(())
}

// ===== Meta =====

#[test]
fn test_version_robot() -> Result<()> {
    let dir = TempDir::new()?;
    let value = json_stdout(cardpad(&dir).args(["--robot", "version"]))?;
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[test]
fn test_no_command_prints_quick_start() -> Result<()> {
    let dir = TempDir::new()?;
    let value = json_stdout(cardpad(&dir).arg("--robot"))?;
    assert_eq!(value["tool"], "cardpad");

    cardpad(&dir).assert().success().stdout(predicate::str::contains("QUICK START"));
    Ok(())
}

#[test]
fn test_completions_generate() -> Result<()> {
    let dir = TempDir::new()?;
    cardpad(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cardpad"));
    Ok(())
}

// ===== Settings =====

#[test]
fn test_config_shows_defaults_and_path() -> Result<()> {
    let dir = TempDir::new()?;
    let value = json_stdout(cardpad(&dir).args(["--robot", "config"]))?;
    assert_eq!(value["settings"]["cursor_speed"], 5);
    assert_eq!(value["settings"]["enable_overlays"], true);

    cardpad(&dir)
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.toml"));
    Ok(())
}

#[test]
fn test_bindings_survive_the_binary_boundary() -> Result<()> {
    // An edit made through the CLI is visible to a fresh library load
    let dir = TempDir::new()?;
    seed_profile(&dir, "Pad")?;
    cardpad(&dir).args(["bind", "Pad", "answer", "2", "Hard"]).assert().success();

    let store = ProfileStore::new(dir.path().join("profiles"));
    let profile = store.load("Pad")?;
    assert_eq!(profile.binding(State::Answer, 0, 2), "Hard");
    Ok(())
}
