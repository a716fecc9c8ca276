//! CLI integration tests for tq commands.
//!
//! These tests focus on exit codes and the shape of the output.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to run `tq` in `dir` with HOME isolated to the same directory.
fn tq_in(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("tq").unwrap();
    cmd.env("HOME", dir).env_remove("RUST_LOG").current_dir(dir);
    cmd
}

/// Writes a `.textquery.toml` into `dir`.
fn write_config(dir: &Path, contents: &str) {
    fs::write(dir.join(".textquery.toml"), contents).unwrap();
}

mod parse {
    use super::*;

    #[test]
    fn prints_tree() {
        let dir = temp_dir();
        tq_in(dir.path())
            .args(["parse", "(a AND b) OR title[exact]:c"])
            .assert()
            .success()
            .stdout("OR\n  AND\n    a\n    b\n  title[exact]:c\n");
    }

    #[test]
    fn flattens_repeated_operator() {
        let dir = temp_dir();
        tq_in(dir.path())
            .args(["parse", "a OR b OR c"])
            .assert()
            .success()
            .stdout("OR\n  a\n  b\n  c\n");
    }

    #[test]
    fn normalize_prints_query_string() {
        let dir = temp_dir();
        tq_in(dir.path())
            .args(["parse", "--normalize", "  (x AND ((y OR z)))  "])
            .assert()
            .success()
            .stdout("x AND (y OR z)\n");
    }

    #[test]
    fn json_output() {
        let dir = temp_dir();
        let output = tq_in(dir.path())
            .args(["parse", "--json", "(a-1 AND a-2) OR a-3"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        let tree = &json[0]["tree"];
        assert_eq!(json[0]["query"], "(a-1 AND a-2) OR a-3");
        assert_eq!(tree["key"]["kind"], "operator");
        assert_eq!(tree["key"]["value"], "OR");
        assert_eq!(tree["children"][0]["children"].as_array().unwrap().len(), 2);
        assert_eq!(tree["children"][1]["key"]["value"], "a-3");
    }

    #[test]
    fn syntax_error_shows_caret() {
        let dir = temp_dir();
        tq_in(dir.path())
            .args(["parse", "a AND (b"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unbalanced parentheses"))
            .stderr(predicate::str::contains("  a AND (b\n        ^"));
    }

    #[test]
    fn json_reports_errors_per_query() {
        let dir = temp_dir();
        let output = tq_in(dir.path())
            .args(["parse", "--json", "a AND b", "a AND b OR c"])
            .output()
            .unwrap();
        assert!(!output.status.success());

        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json[0]["tree"]["key"]["value"], "AND");
        assert!(json[0].get("error").is_none());
        assert_eq!(
            json[1]["error"]["message"],
            "cannot mix AND and OR without parentheses"
        );
        assert_eq!(json[1]["error"]["position"], 8);
    }

    #[test]
    fn every_query_is_attempted() {
        let dir = temp_dir();
        tq_in(dir.path())
            .args(["parse", "a AND", "b OR c"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("b OR c\nOR\n  b\n  c\n"))
            .stderr(predicate::str::contains("operator AND is missing an operand"));
    }
}

mod scan {
    use super::*;

    #[test]
    fn lists_parts_with_positions() {
        let dir = temp_dir();
        tq_in(dir.path())
            .args(["scan", "(a OR f:b)"])
            .assert()
            .success()
            .stdout(predicate::str::contains("operator"))
            .stdout(predicate::str::contains("   3  operator  OR"))
            .stdout(predicate::str::contains("   6  operand   f:b"));
    }

    #[test]
    fn json_includes_positions() {
        let dir = temp_dir();
        let output = tq_in(dir.path())
            .args(["scan", "--json", "(x AND y)"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        let parts = json.as_array().unwrap();
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[2]["kind"], "operator");
        assert_eq!(parts[2]["value"], "AND");
        assert_eq!(parts[2]["position"], 3);
    }

    #[test]
    fn malformed_field_fails() {
        let dir = temp_dir();
        tq_in(dir.path())
            .args(["scan", "f]:x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("malformed field syntax"));
    }
}

mod config {
    use super::*;

    #[test]
    fn discovered_config_changes_vocabulary() {
        let dir = temp_dir();
        write_config(dir.path(), "[parser]\noperators = [\"AND\", \"OR\", \"NOT\"]\n");
        tq_in(dir.path())
            .args(["parse", "a NOT b"])
            .assert()
            .success()
            .stdout("NOT\n  a\n  b\n");
    }

    #[test]
    fn config_found_in_parent_directory() {
        let dir = temp_dir();
        write_config(
            dir.path(),
            "[parser]\nopen_parenthesis = \"<\"\nclose_parenthesis = \">\"\n",
        );
        let sub = dir.path().join("a/b");
        fs::create_dir_all(&sub).unwrap();
        tq_in(dir.path())
            .current_dir(&sub)
            .args(["parse", "<a AND b> OR c"])
            .assert()
            .success()
            .stdout("OR\n  AND\n    a\n    b\n  c\n");
    }

    #[test]
    fn explicit_config_file() {
        let dir = temp_dir();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[parser]\nfield_delimiter = \"=\"\n").unwrap();
        tq_in(dir.path())
            .args(["--config", path.to_str().unwrap(), "parse", "title=guide"])
            .assert()
            .success()
            .stdout("title=guide\n");
    }

    #[test]
    fn output_uses_configured_syntax() {
        let dir = temp_dir();
        write_config(
            dir.path(),
            "[parser]\nfield_delimiter = \"=\"\nfield_open_parenthesis = \"<\"\nfield_close_parenthesis = \">\"\n",
        );
        tq_in(dir.path())
            .args(["parse", "a OR title<exact>=guide"])
            .assert()
            .success()
            .stdout("OR\n  a\n  title<exact>=guide\n");
        tq_in(dir.path())
            .args(["scan", "title<exact>=guide"])
            .assert()
            .success()
            .stdout(predicate::str::contains("title<exact>=guide"))
            .stdout(predicate::str::contains("[exact]").not());
    }

    #[test]
    fn invalid_settings_fail() {
        let dir = temp_dir();
        write_config(dir.path(), "[parser]\nclose_parenthesis = \"(\"\n");
        tq_in(dir.path())
            .args(["parse", "a"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid parser settings"));
    }

    #[test]
    fn unparsable_file_fails() {
        let dir = temp_dir();
        write_config(dir.path(), "[parser\n");
        tq_in(dir.path())
            .args(["parse", "a"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }

    #[test]
    fn shows_effective_settings() {
        let dir = temp_dir();
        write_config(dir.path(), "[parser]\noperators = [\"OR\"]\n");
        tq_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("[parser]"))
            .stdout(predicate::str::contains("field_delimiter"))
            .stdout(predicate::str::contains("AND").not());
    }
}

mod check {
    use super::*;

    #[test]
    fn defaults_pass() {
        let dir = temp_dir();
        tq_in(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configuration files found"))
            .stdout(predicate::str::contains("No issues found."));
    }

    #[test]
    fn warnings_fail() {
        let dir = temp_dir();
        write_config(dir.path(), "[parser]\noperators = [\"and\", \"or\"]\n");
        tq_in(dir.path())
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Warnings (2):"))
            .stdout(predicate::str::contains("operator 'and' is not upper case"))
            .stdout(predicate::str::contains("Hints:"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();
        tq_in(dir.path()).arg("init").assert().success();

        let contents = fs::read_to_string(dir.path().join(".textquery.toml")).unwrap();
        assert!(contents.contains("# [parser]"));
    }

    #[test]
    fn created_file_keeps_defaults() {
        let dir = temp_dir();
        tq_in(dir.path()).arg("init").assert().success();
        tq_in(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("Operators: AND, OR"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        write_config(dir.path(), "existing");
        tq_in(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites() {
        let dir = temp_dir();
        write_config(dir.path(), "existing");
        tq_in(dir.path()).args(["init", "--force"]).assert().success();

        let contents = fs::read_to_string(dir.path().join(".textquery.toml")).unwrap();
        assert!(!contents.contains("existing"));
    }
}
