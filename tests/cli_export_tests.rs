//! End-to-end tests for `splitbind export`.

use splitbind::models::Half;
use std::fs;

mod fixtures;
use fixtures::*;

const DEFAULT_PRIMARY_LITERAL: &str = "uint8_t input_map[] = {
KC_ESCAPE, KC_1, KC_2, KC_3, KC_4, KC_5,
KC_GRAVE, KC_Q, KC_W, KC_E, KC_R, KC_T,
KC_TAB, KC_A, KC_S, KC_D, KC_F, KC_G,
KC_LSHIFT, KC_Z, KC_X, KC_C, KC_V, KC_B,
KC_NO, KC_NO, KC_TAB, KC_BSLASH, KC_DELETE, KC_LSHIFT,
KC_SPACE, KC_LCTRL, KC_ENTER, KC_LALT, KC_NO, KC_NO,
};
";

#[test]
fn test_export_primary_defaults_to_stdout() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let output = isolated_command(&["export", "--half", "primary"], &config_dir)
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Export should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, format!("// Primary half\n{DEFAULT_PRIMARY_LITERAL}"));
}

#[test]
fn test_export_both_halves_in_order() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let output = isolated_command(&["export"], &config_dir)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let primary = stdout.find("// Primary half").expect("primary section");
    let secondary = stdout.find("// Secondary half").expect("secondary section");
    assert!(primary < secondary);
    // Blank secondary slots keep their position as bare commas
    assert!(stdout.contains("\n, , KC_RBRACKET, KC_LBRACKET, KC_BSPACE, KC_SPACE,\n"));
    assert_eq!(stdout.matches("uint8_t input_map[] = {").count(), 2);
}

#[test]
fn test_export_reflects_edited_bindings() {
    let store = store_with(&[(Half::Primary, 0, "KC_CAPSLOCK")]);
    let (bindings_path, _bindings_temp) = create_temp_bindings_file(&store);
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(
        &[
            "export",
            "--half",
            "primary",
            "--bindings",
            bindings_path.to_str().unwrap(),
        ],
        &config_dir,
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let body = stdout.lines().nth(2).unwrap();
    assert!(body.starts_with("KC_CAPSLOCK,"), "first row was: {body}");
}

#[test]
fn test_export_to_file_with_custom_name() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let out_path = config_dir.path().join("out").join("keymap.h");

    let output = isolated_command(
        &[
            "export",
            "--half",
            "secondary",
            "--array-name",
            "right_map",
            "--output",
            out_path.to_str().unwrap(),
        ],
        &config_dir,
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let content = fs::read_to_string(&out_path).expect("Failed to read export file");
    assert!(content.starts_with("// Secondary half\nuint8_t right_map[] = {\nKC_MINUS, KC_0,"));
    assert!(content.ends_with("KC_PGDOWN, KC_RCTRL, KC_RGUI, KC_RALT, , ,\n};\n"));
}

#[test]
fn test_export_uses_configured_array_name() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let set = isolated_command(&["config", "set", "export.array_name", "keys"], &config_dir)
        .output()
        .expect("Failed to execute command");
    assert_eq!(set.status.code(), Some(0));

    let output = isolated_command(&["export", "--half", "primary"], &config_dir)
        .output()
        .expect("Failed to execute command");
    assert!(String::from_utf8_lossy(&output.stdout).contains("uint8_t keys[] = {"));
}

#[test]
fn test_export_rejects_bad_array_name() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let output = isolated_command(&["export", "--array-name", "not valid"], &config_dir)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("C identifier"));
}

#[test]
fn test_export_rejects_short_bindings_file() {
    let (path, _temp) = create_raw_bindings_file(r#"{"primary": ["KC_A"], "secondary": []}"#);
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(
        &["export", "--bindings", path.to_str().unwrap()],
        &config_dir,
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("expected exactly 36"));
}

#[test]
fn test_export_with_unsaved_configured_bindings_file() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let bindings_path = config_dir.path().join("new.json");
    let set = isolated_command(
        &[
            "config",
            "set",
            "paths.bindings_file",
            bindings_path.to_str().unwrap(),
        ],
        &config_dir,
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(set.status.code(), Some(0));

    let output = isolated_command(&["export", "--half", "primary"], &config_dir)
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Export should fall back to defaults. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("// Primary half\n{DEFAULT_PRIMARY_LITERAL}")
    );
    assert!(!bindings_path.exists());
}

#[test]
fn test_export_missing_explicit_bindings_file_fails() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let missing = config_dir.path().join("missing.json");
    let output = isolated_command(
        &["export", "--bindings", missing.to_str().unwrap()],
        &config_dir,
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read bindings file"));
}
