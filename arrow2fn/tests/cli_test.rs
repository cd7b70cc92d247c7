//! Integration tests for the command-line entry point.

#![allow(clippy::unwrap_used)]

use anyhow::Result;
use arrow2fn::entry_point::run_with_args_to;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn test_cli_transforms_file() -> Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("app.js");
    let output = temp.path().join("app.out.js");
    fs::write(&input, "const greet = (name) => `hi ${name}`;\ngreet('x');\n")?;

    let mut cmd = Command::cargo_bin("arrow2fn-bin")?;
    cmd.arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rewrote 1 declaration"));

    assert_eq!(
        fs::read_to_string(&output)?,
        "function greet(name) { return `hi ${name}`; }\ngreet('x');\n"
    );
    // Input is never modified
    assert!(fs::read_to_string(&input)?.starts_with("const greet"));
    Ok(())
}

#[test]
fn test_cli_missing_arguments_shows_usage() -> Result<()> {
    let mut cmd = Command::cargo_bin("arrow2fn-bin")?;
    cmd.arg("only-input.js")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn test_cli_missing_input_writes_nothing() -> Result<()> {
    let temp = TempDir::new()?;
    let output = temp.path().join("out.js");

    let mut cmd = Command::cargo_bin("arrow2fn-bin")?;
    cmd.arg(temp.path().join("nope.js"))
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_cli_dry_run_prints_to_stdout() -> Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("app.js");
    fs::write(&input, "let f = () => 1;")?;

    let mut cmd = Command::cargo_bin("arrow2fn-bin")?;
    cmd.arg(&input)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout("function f() { return 1; }");
    Ok(())
}

#[test]
fn test_cli_check_exit_codes() -> Result<()> {
    let temp = TempDir::new()?;
    let dirty = temp.path().join("dirty.js");
    let clean = temp.path().join("clean.js");
    fs::write(&dirty, "const f = () => 1;")?;
    fs::write(&clean, "function f() { return 1; }")?;

    Command::cargo_bin("arrow2fn-bin")?
        .arg(&dirty)
        .arg("--check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Would rewrite"));
    Command::cargo_bin("arrow2fn-bin")?
        .arg(&clean)
        .arg("--check")
        .assert()
        .success();
    Ok(())
}

#[test]
fn test_cli_help_and_version() {
    let mut buffer = Vec::new();
    let code = run_with_args_to(args(&["--help"]), &mut buffer).unwrap();
    assert_eq!(code, 0);
    let help = String::from_utf8(buffer).unwrap();
    assert!(help.contains("<INPUT>"));
    assert!(help.contains(".arrow2fn.toml"));

    let mut buffer = Vec::new();
    let code = run_with_args_to(args(&["--version"]), &mut buffer).unwrap();
    assert_eq!(code, 0);
    assert!(String::from_utf8(buffer).unwrap().contains("arrow2fn"));
}

#[test]
fn test_cli_discovers_config() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".arrow2fn.toml"),
        "[arrow2fn]\nsiblings = \"drop\"\ninclude_var = true\n",
    )
    .unwrap();
    let input = temp.path().join("app.js");
    let output = temp.path().join("out.js");
    fs::write(&input, "var a = 1, f = () => a;").unwrap();

    let mut buffer = Vec::new();
    let code = run_with_args_to(
        args(&[input.to_str().unwrap(), output.to_str().unwrap()]),
        &mut buffer,
    )
    .unwrap();
    assert_eq!(code, 0);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "function f() { return a; }"
    );
}

#[test]
fn test_cli_flags_override_config() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".arrow2fn.toml"),
        "[arrow2fn]\nsiblings = \"drop\"\n",
    )
    .unwrap();
    let input = temp.path().join("app.js");
    let output = temp.path().join("out.js");
    fs::write(&input, "const a = 1, f = () => a;").unwrap();

    let mut buffer = Vec::new();
    let code = run_with_args_to(
        args(&[
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--siblings",
            "preserve",
        ]),
        &mut buffer,
    )
    .unwrap();
    assert_eq!(code, 0);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "const a = 1; function f() { return a; }"
    );
}

#[test]
fn test_cli_explicit_config_errors() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("app.js");
    let output = temp.path().join("out.js");
    fs::write(&input, "const f = () => 1;").unwrap();

    let mut buffer = Vec::new();
    let code = run_with_args_to(
        args(&[
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--config",
            temp.path().join("missing.toml").to_str().unwrap(),
        ]),
        &mut buffer,
    )
    .unwrap();
    assert_eq!(code, 1);
    assert!(!output.exists());
}

#[test]
fn test_cli_json_summary() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("app.js");
    let output = temp.path().join("out.js");
    fs::write(&input, "const f = () => 1;\nconst g = () => 2;\n").unwrap();

    let mut buffer = Vec::new();
    let code = run_with_args_to(
        args(&[
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--json",
        ]),
        &mut buffer,
    )
    .unwrap();
    assert_eq!(code, 0);

    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(value["changed"], true);
    assert_eq!(value["rewrites"].as_array().unwrap().len(), 2);
    assert_eq!(value["output"], output.to_str().unwrap());
}

#[test]
fn test_cli_deeply_nested_input_fails_cleanly() -> Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("deep.js");
    let output = temp.path().join("out.js");
    let depth = 20_000;
    fs::write(
        &input,
        format!("const f = () => {}1{};", "[".repeat(depth), "]".repeat(depth)),
    )?;

    Command::cargo_bin("arrow2fn-bin")?
        .arg(&input)
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nests deeper than"));

    assert!(!output.exists());
    Ok(())
}
