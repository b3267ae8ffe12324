//! Failures surface as a message, suggestions and a category exit code.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PINS: &str = r#"[
    {"group": "org.apache.maven.plugins", "artifact": "maven-compiler-plugin", "version": "3.14.0"},
    {"group": "org.apache.maven.plugins", "artifact": "maven-source-plugin", "version": "3.3.1"},
    {"group": "org.jetbrains.kotlin", "artifact": "kotlin-maven-plugin", "version": "2.2.0"},
    {"group": "com.seanshubin.code.structure", "artifact": "code-structure-maven", "version": "1.1.2"}
  ]"#;

fn pomgen(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomgen").unwrap();
    cmd.current_dir(dir.path())
        .env("POMGEN__REPOSITORY__URL", "http://127.0.0.1:9/maven2")
        .env("POMGEN__REPOSITORY__TIMEOUT_SECS", "2")
        .env_remove("RUST_LOG");
    cmd
}

fn with_spec(spec: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("project-specification.json"), spec).unwrap();
    dir
}

#[test]
fn wrong_value_type_is_a_user_error() {
    let dir = with_spec(r#"{"prefix": "com.example"}"#);

    pomgen(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid specification value at 'prefix'"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn missing_source_project_is_not_found() {
    let dir = with_spec(&format!(
        r#"{{
  "prefix": ["com", "example"],
  "name": ["widget"],
  "deployable": false,
  "modules": {{"core": []}},
  "sourceDependencies": [{{"sourceProjectPath": "../no-such-project", "moduleMapping": {{"util": "core"}}}}],
  "versionOverrides": {PINS}
}}"#
    ));

    pomgen(&dir)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Source project not found"))
        .stderr(predicate::str::contains("no-such-project"));
}

#[test]
fn unexported_module_is_a_user_error() {
    let dir = with_spec(&format!(
        r#"{{
  "prefix": ["com", "example"],
  "name": ["widget"],
  "deployable": false,
  "modules": {{"core": []}},
  "sourceDependencies": [{{"sourceProjectPath": "shared", "moduleMapping": {{"util": "core"}}}}],
  "versionOverrides": {PINS}
}}"#
    ));
    fs::create_dir(dir.path().join("shared")).unwrap();
    fs::write(
        dir.path().join("shared/project-specification.json"),
        r#"{"prefix": ["com", "shared"], "name": ["lib"], "modules": {"util": []}}"#,
    )
    .unwrap();

    pomgen(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("util"))
        .stderr(predicate::str::contains("exports"));
}

#[test]
fn unreachable_repository_is_an_internal_error() {
    let dir = with_spec("{}");

    pomgen(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Version lookup failed"))
        .stderr(predicate::str::contains("versionOverrides"));

    // the specification was completed before the first lookup
    let spec = fs::read_to_string(dir.path().join("project-specification.json")).unwrap();
    assert!(spec.contains("\"prefix\""));
}

#[test]
fn missing_settings_file_is_a_configuration_error() {
    let dir = with_spec("{}");

    pomgen(&dir)
        .args(["--config", "absent.toml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn zero_indent_is_rejected() {
    let dir = with_spec("{}");

    pomgen(&dir)
        .env("POMGEN__RENDER__INDENT", "0")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("render.indent"));
}

#[test]
fn conflicting_flags_exit_with_usage_error() {
    let dir = TempDir::new().unwrap();

    pomgen(&dir)
        .args(["--quiet", "--verbose"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}
