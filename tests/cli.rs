use assert_cmd::prelude::*;
use md_suggest::{EditOperation, Node, NodeKind, Slice};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

mod common;
use common::{doc, p, wrap};

fn write_json<T: serde::Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

#[allow(deprecated)]
fn md_suggest() -> Command {
    Command::cargo_bin("md-suggest").unwrap()
}

fn annotated(dir: &Path) -> PathBuf {
    let source = write_json(dir, "doc.json", &doc(vec![p("Hello World")]));
    let step = write_json(dir, "step.json", &wrap(0, 13, NodeKind::Blockquote));
    let output = md_suggest()
        .args(["annotate", "--id", "1", "--doc"])
        .arg(&source)
        .arg("--step")
        .arg(&step)
        .output()
        .unwrap();
    assert!(output.status.success());
    let path = dir.join("annotated.json");
    fs::write(&path, &output.stdout).unwrap();
    path
}

#[test]
fn test_classify_reports_structural_and_content_ranges() {
    let dir = tempdir().unwrap();
    let source = write_json(dir.path(), "doc.json", &doc(vec![p("ab"), p("cd")]));

    md_suggest()
        .args(["classify", "--from", "3", "--to", "5", "--doc"])
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("structural"));

    md_suggest()
        .args(["classify", "--from", "1", "--to", "5", "--doc"])
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("content"));
}

#[test]
fn test_annotate_then_revert_round_trips() {
    let dir = tempdir().unwrap();
    let path = annotated(dir.path());
    let wrapped: Node = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(wrapped.content().child(0).marks().len(), 4);

    let output = md_suggest()
        .args(["revert", "--id", "1", "--doc"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let reverted: Node = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reverted, doc(vec![p("Hello World")]));
}

#[test]
fn test_revert_json_lists_replayed_steps() {
    let dir = tempdir().unwrap();
    let path = annotated(dir.path());

    let output = md_suggest()
        .args(["revert", "--all", "--json", "--doc"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let replayed: Vec<EditOperation> =
        serde_json::from_value(value["replayed"].clone()).unwrap();
    assert_eq!(
        replayed,
        vec![EditOperation::replace_around(0, 15, 1, 14, Slice::empty(), 0, true)]
    );
    assert_eq!(value["doc"]["content"][0]["type"], "paragraph");
}

#[test]
fn test_groups_and_apply() {
    let dir = tempdir().unwrap();
    let path = annotated(dir.path());

    md_suggest()
        .args(["groups", "--doc"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 replaceAround [0, 15) gap [1, 14)"));

    let output = md_suggest()
        .args(["groups", "--json", "--doc"])
        .arg(&path)
        .output()
        .unwrap();
    let groups: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(groups[0]["gapTo"], 14);
    assert_eq!(groups[0]["type"], "replaceAround");

    let output = md_suggest()
        .args(["apply", "--id", "1", "--doc"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let applied: Node = serde_json::from_slice(&output.stdout).unwrap();
    assert!(applied.content().child(0).marks().is_empty());
    assert_eq!(applied.content().child(0).kind(), NodeKind::Blockquote);
}

#[test]
fn test_content_step_exits_with_code_two() {
    let dir = tempdir().unwrap();
    let source = write_json(dir.path(), "doc.json", &doc(vec![p("ab")]));
    let step = write_json(
        dir.path(),
        "step.json",
        &EditOperation::replace(1, 2, Slice::empty(), false),
    );

    md_suggest()
        .args(["annotate", "--id", "1", "--doc"])
        .arg(&source)
        .arg("--step")
        .arg(&step)
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_errors_exit_with_code_one() {
    let dir = tempdir().unwrap();
    let path = annotated(dir.path());

    md_suggest()
        .args(["revert", "--id", "9", "--doc"])
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Failed to revert suggestion 9"));

    md_suggest()
        .args(["groups", "--doc"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read"));
}
