use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::{tempdir, TempDir};

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn evaluate(score: &Path, groundtruth: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_evaluate"))
        .arg(score)
        .arg(groundtruth)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_end_to_end() {
    let dir = tempdir().unwrap();
    let score = write_file(&dir, "score.txt", "2\n3\n1:0.0,2:0.1,3:0.2,\n4:0.0,5:0.1,6:0.2,\n");
    let gt = write_file(&dir, "gt.txt", "2\n1\n2:0.0,\n5:0.0,\n");

    let output = evaluate(&score, &gt);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Recall@1:\t0.000\nRecall@2:\t1.000\n"
    );
}

#[test]
fn test_prints_one_line_per_qualifying_cutoff() {
    let dir = tempdir().unwrap();
    let row: String = (0..60).map(|id| format!("{id}:0.5,")).collect();
    let score = write_file(&dir, "score.txt", &format!("1\n60\n{row}\n"));
    let gt = write_file(&dir, "gt.txt", "1\n1\n7:0.0,\n");

    let output = evaluate(&score, &gt);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Recall@1:\t0.000",
            "Recall@2:\t0.000",
            "Recall@5:\t0.000",
            "Recall@10:\t1.000",
            "Recall@20:\t1.000",
            "Recall@50:\t1.000",
        ]
    );
}

#[test]
fn test_no_qualifying_cutoff() {
    let dir = tempdir().unwrap();
    let score = write_file(&dir, "score.txt", "1\n0\n\n");
    let gt = write_file(&dir, "gt.txt", "1\n1\n3:0.0,\n");

    let output = evaluate(&score, &gt);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_query_count_mismatch_prints_nothing() {
    let dir = tempdir().unwrap();
    let score = write_file(&dir, "score.txt", "2\n2\n1:0,2:0,\n3:0,4:0,\n");
    let gt = write_file(&dir, "gt.txt", "1\n1\n1:0,\n");

    let output = evaluate(&score, &gt);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_malformed_and_missing_inputs_fail() {
    let dir = tempdir().unwrap();
    let gt = write_file(&dir, "gt.txt", "1\n1\n1:0,\n");

    let ragged = write_file(&dir, "ragged.txt", "2\n2\n1:0,2:0,\n3:0,\n");
    assert!(!evaluate(&ragged, &gt).status.success());

    let garbage = write_file(&dir, "garbage.txt", "1\n2\nx:0,2:0,\n");
    assert!(!evaluate(&garbage, &gt).status.success());

    let missing = dir.path().join("missing.txt");
    let output = evaluate(&missing, &gt);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_argument_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_evaluate"))
        .arg("only-one.txt")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("Usage"));
}
