use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

const FORM: &str = r#"{
  "id": "demo",
  "fields": [
    { "name": "hasDiscount", "kind": "checkbox" },
    { "name": "discountCode", "value": "", "show_if": "hasDiscount=1" },
    {
      "name": "tags",
      "kind": "checkboxes",
      "options": [
        { "value": "a" },
        { "value": "b" }
      ]
    },
    { "name": "note", "value": "", "required_if": "tags.count>=2" }
  ]
}"#;

fn write_form(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let file = dir.child("form.json");
    file.write_str(contents).expect("fixture written");
    file.path().to_path_buf()
}

#[test]
fn eval_reports_initial_state() {
    let dir = TempDir::new().unwrap();
    let form = write_form(&dir, FORM);

    Command::cargo_bin("fieldgate")
        .unwrap()
        .args(["eval", "--form"])
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("discountCode (scalar) hidden"))
        .stdout(predicate::str::contains("hasDiscount (checkbox) visible"));
}

#[test]
fn eval_applies_changes_and_reports_events() {
    let dir = TempDir::new().unwrap();
    let form = write_form(&dir, FORM);

    Command::cargo_bin("fieldgate")
        .unwrap()
        .args(["eval", "--set", "hasDiscount=1", "--form"])
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("discountCode (scalar) visible"))
        .stdout(predicate::str::contains("field_shown discountCode"))
        .stdout(predicate::str::contains("reflow"));
}

#[test]
fn eval_emits_json_when_asked() {
    let dir = TempDir::new().unwrap();
    let form = write_form(&dir, FORM);

    let output = Command::cargo_bin("fieldgate")
        .unwrap()
        .args(["eval", "--format", "json", "--set", "tags=a,b", "--form"])
        .arg(&form)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["form"], "demo");
    let note = report["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["name"] == "note")
        .unwrap();
    assert_eq!(note["required"], true);
}

#[test]
fn lint_is_clean_for_valid_form() {
    let dir = TempDir::new().unwrap();
    let form = write_form(&dir, FORM);

    Command::cargo_bin("fieldgate")
        .unwrap()
        .args(["lint", "--form"])
        .arg(&form)
        .assert()
        .success()
        .stdout(predicate::str::contains("No condition problems"));
}

#[test]
fn lint_flags_bad_selectors_with_nonzero_exit() {
    let dir = TempDir::new().unwrap();
    let form = write_form(
        &dir,
        r#"{
          "id": "broken",
          "fields": [
            { "name": "dep", "value": "", "show_if": "no operator, ghost=1" }
          ]
        }"#,
    );

    Command::cargo_bin("fieldgate")
        .unwrap()
        .args(["lint", "--form"])
        .arg(&form)
        .assert()
        .failure()
        .stdout(predicate::str::contains("skipped_clause"))
        .stdout(predicate::str::contains("unknown_reference"));
}

#[test]
fn schema_prints_document_shape() {
    Command::cargo_bin("fieldgate")
        .unwrap()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fields\""));
}

#[test]
fn missing_form_file_fails_cleanly() {
    Command::cargo_bin("fieldgate")
        .unwrap()
        .args(["eval", "--form", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
