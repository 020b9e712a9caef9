//! End-to-end tests for the `rulebook` binary.

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn rulebook(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rulebook").unwrap();
    cmd.current_dir(dir)
        .env_remove("RULEBOOK_FORMAT")
        .env_remove("RULEBOOK_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace(record: &str, rules_name: &str, rules: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("record.json"), record).unwrap();
    fs::write(dir.path().join(rules_name), rules).unwrap();
    dir
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn valid_record_exits_zero() {
    let dir = workspace(
        r#"{"email": " a@b.com "}"#,
        "rules.json",
        r#"[["email", "trim"], ["email", "email"]]"#,
    );

    let output = rulebook(dir.path())
        .args(["check", "--record", "record.json", "--rules", "rules.json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("Record is valid"));
}

#[test]
fn invalid_record_exits_one_and_lists_messages() {
    let dir = workspace(
        r#"{"age": 200}"#,
        "rules.json",
        r#"[["age", "number", {"min": 0, "max": 120}], ["name", "required"]]"#,
    );

    let output = rulebook(dir.path())
        .args(["check", "--record", "record.json", "--rules", "rules.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("age: Поле \"age\" имело неверное значение"));
    assert!(out.contains("name: Поле \"name\" было не заполнено"));
}

#[test]
fn json_report_and_rewritten_record() {
    let dir = workspace(
        r#"{"login": "  Root  ", "tags": "x"}"#,
        "rules.toml",
        r#"
rules = [
    ["login", "trim"],
    ["login", "filter", { mapper = "lowercase" }],
    ["password", "required", { message = ":key is required" }],
]
"#,
    );

    let output = rulebook(dir.path())
        .args([
            "check", "--record", "record.json", "--rules", "rules.toml", "--format", "json", "--write",
            "out.json",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["record"]["login"], "root");
    assert_eq!(report["record"]["password"], "");
    assert_eq!(report["errors"]["password"][0], "password is required");

    let written: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out.json")).unwrap()).unwrap();
    assert_eq!(written, report["record"]);
}

#[test]
fn format_can_come_from_the_environment() {
    let dir = workspace(r#"{"a": "1"}"#, "rules.json", r#"[["a", "integer"]]"#);

    let output = rulebook(dir.path())
        .env("RULEBOOK_FORMAT", "json")
        .args(["check", "--record", "record.json", "--rules", "rules.json"])
        .output()
        .unwrap();

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["errors"]["a"].is_array());
}

#[test]
fn format_can_come_from_a_dotenv_file() {
    let dir = workspace(r#"{"a": ""}"#, "rules.json", r#"[["a", "required"]]"#);
    fs::write(dir.path().join(".env"), "RULEBOOK_FORMAT=json\n").unwrap();

    let output = rulebook(dir.path())
        .args(["check", "--record", "record.json", "--rules", "rules.json"])
        .output()
        .unwrap();

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
}

#[test]
fn unknown_kind_is_an_error() {
    let dir = workspace(r#"{"x": 1}"#, "rules.json", r#"[["x", "bogus"]]"#);

    let output = rulebook(dir.path())
        .args(["check", "--record", "record.json", "--rules", "rules.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("unknown validator kind: bogus"));
}

#[test]
fn missing_record_file_is_an_error() {
    let dir = workspace("{}", "rules.json", "[]");

    rulebook(dir.path())
        .args(["check", "--record", "absent.json", "--rules", "rules.json"])
        .assert()
        .code(2);
}

#[test]
fn kinds_lists_builtins() {
    let dir = tempfile::tempdir().unwrap();

    let output = rulebook(dir.path())
        .args(["kinds", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let listing: Value = serde_json::from_slice(&output.stdout).unwrap();
    let kinds: Vec<&str> = listing["kinds"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    for kind in ["required", "email", "filter_var", "trim", "phone"] {
        assert!(kinds.contains(&kind), "missing {kind}");
    }
    assert!(listing["mappers"]
        .as_array()
        .unwrap()
        .contains(&Value::from("lowercase")));
}
