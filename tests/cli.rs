use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn di_parser() -> Command {
    Command::cargo_bin("di-parser").expect("binary exists")
}

#[test]
fn convert_prints_markdown_by_default() {
    di_parser()
        .arg("convert")
        .arg(fixture("letter.di"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# 函\n## 主旨\n"))
        .stdout(predicate::str::contains("- 正本: 臺北市各級學校"));
}

#[test]
fn convert_text_from_stdin() {
    let markup = fs::read_to_string(fixture("memo.di")).unwrap();
    di_parser()
        .args(["convert", "-", "--format", "text"])
        .write_stdin(markup)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("簽 | 臺北市政府教育局 | 中華民國113年6月3日\n"));
}

#[test]
fn convert_concise_with_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.yaml");
    fs::write(&config, "description_bullet: \"*\"\nextra_redundant_words: [研習]\n").unwrap();
    let output = dir.path().join("memo.md");

    di_parser()
        .arg("convert")
        .arg(fixture("memo.di"))
        .arg("--concise")
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("## 主旨\n校園安全\n"));
    assert!(written.contains("* 預計參加人數120人。"));
}

#[test]
fn convert_rejects_unsupported_documents() {
    di_parser()
        .args(["convert", "<公告><主旨><文字>x</文字></主旨></公告>"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn batch_converts_a_directory() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::copy(fixture("letter.di"), input.path().join("letter.di")).unwrap();
    fs::copy(fixture("memo.di"), input.path().join("memo.di")).unwrap();

    di_parser()
        .arg("batch")
        .arg(input.path())
        .arg(output.path())
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 converted, 0 failed"));

    let json = fs::read_to_string(output.path().join("letter.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kind"], "函");
    assert!(output.path().join("memo.json").exists());
}

#[test]
fn batch_reports_failures() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("broken.di"), "<簽>").unwrap();

    di_parser()
        .arg("batch")
        .arg(input.path())
        .arg(output.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("0 converted, 1 failed"))
        .stderr(predicate::str::contains("broken.di"));
}
