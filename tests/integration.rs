use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_refdoc")));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn fixture_json(name: &str) -> Value {
    serde_json::from_str(&std::fs::read_to_string(fixture_path(name)).unwrap()).unwrap()
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_mode_produces_entries() {
    let input = std::fs::read_to_string(fixture_path("project.json")).unwrap();

    let assert = cmd()
        .args(["-r", "plain", "--cwd", "/work"])
        .write_stdin(input)
        .assert()
        .success();

    assert_eq!(stdout_json(&assert), fixture_json("project.expected.json"));
}

#[test]
fn stdin_mode_markdown_renders_html() {
    let input = std::fs::read_to_string(fixture_path("project.json")).unwrap();

    let assert = cmd().args(["--cwd", "/work"]).write_stdin(input).assert().success();

    let output = stdout_json(&assert);
    assert_eq!(output[1]["name"], "Circle");
    let docs = output[1]["documentation"].as_str().unwrap();
    assert!(docs.starts_with("<p>A circle.</p>"), "got: {}", docs);
}

#[test]
fn stdin_mode_compact_is_single_line() {
    let input = std::fs::read_to_string(fixture_path("project.json")).unwrap();

    let assert = cmd()
        .args(["--compact", "-r", "plain"])
        .write_stdin(input)
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output.lines().count(), 1);
    assert!(output.ends_with('\n'));
}

#[test]
fn stdin_mode_empty_project() {
    cmd()
        .write_stdin(r#"{"id": 0, "name": "empty", "kind": 0, "flags": {}}"#)
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn stdin_mode_rejects_invalid_json() {
    cmd()
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse reflection graph"));
}

// -- visibility --

#[test]
fn non_exported_members_hidden_by_default() {
    let input = std::fs::read_to_string(fixture_path("project.json")).unwrap();

    cmd()
        .args(["-r", "plain"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"secret\"").not())
        .stdout(predicate::str::contains("\"unit\"").not());
}

#[test]
fn include_non_exported_flag() {
    let input = std::fs::read_to_string(fixture_path("project.json")).unwrap();

    let assert = cmd()
        .args(["-r", "plain", "--include-non-exported"])
        .write_stdin(input)
        .assert()
        .success();

    let output = stdout_json(&assert);
    let props: Vec<_> = output[0]["properties"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(props, ["label", "secret"]);
    let params = output[0]["methods"][0]["signatures"][0]["parameters"]
        .as_array()
        .unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[1]["name"], "unit");
    assert_eq!(params[1]["type"], "\"cm\" | \"in\"");
    assert!(params[1]["flags"].get("isExported").is_none());
}

#[test]
fn include_non_exported_from_options_file() {
    let input = std::fs::read_to_string(fixture_path("project.json")).unwrap();

    cmd()
        .args(["-r", "plain", "--options", fixture_path("typedoc.json").as_str()])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"secret\""));
}

#[test]
fn missing_options_file_fails() {
    cmd()
        .args(["--options", "/nonexistent/typedoc.json"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read options file"));
}

// -- file mode --

#[test]
fn file_mode_creates_output() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-r", "plain", "--cwd", "/work"])
        .arg(fixture_path("project.json"))
        .assert()
        .success();

    let output = std::fs::read_to_string(dir.path().join("project.docs.json")).unwrap();
    let output: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(output, fixture_json("project.expected.json"));
}

#[test]
fn file_mode_scans_directories() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    std::fs::copy(fixture_path("project.json"), input_dir.path().join("a.json")).unwrap();
    std::fs::write(input_dir.path().join("b.json"), r#"{"name": "b", "kind": 0}"#).unwrap();
    std::fs::write(input_dir.path().join("notes.txt"), "ignored").unwrap();

    cmd()
        .args(["-o", output_dir.path().to_str().unwrap()])
        .arg(input_dir.path())
        .assert()
        .success();

    assert!(output_dir.path().join("a.docs.json").exists());
    assert!(output_dir.path().join("b.docs.json").exists());
    assert!(!output_dir.path().join("notes.docs.json").exists());
}

#[test]
fn file_mode_skips_broken_input() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let broken = input_dir.path().join("broken.json");
    std::fs::write(&broken, "{ nope").unwrap();

    cmd()
        .args(["-o", output_dir.path().to_str().unwrap()])
        .arg(&broken)
        .arg(fixture_path("project.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping"));

    assert!(!output_dir.path().join("broken.docs.json").exists());
    assert!(output_dir.path().join("project.docs.json").exists());
}

#[test]
fn file_mode_requires_output() {
    cmd()
        .arg(fixture_path("project.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn unknown_renderer_fails() {
    cmd()
        .args(["-r", "rst"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown renderer: rst"));
}

#[test]
fn debug_log_names_renderer() {
    cmd()
        .env("RUST_LOG", "debug")
        .args(["-r", "text"])
        .write_stdin("{}")
        .assert()
        .success()
        .stderr(predicate::str::contains("visitor configured"))
        .stderr(predicate::str::contains("\"plain\""));
}
