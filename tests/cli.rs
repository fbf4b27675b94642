use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "# Report\n\nIntro with **bold** text.\n\n1. First\n2. Second\n\n| A | B |\n|---|---|\n| 1 | 2 |\n";

fn mdstyle() -> Command {
    Command::cargo_bin("mdstyle").unwrap()
}

fn sample_input(dir: &TempDir) -> std::path::PathBuf {
    let input = dir.path().join("report.md");
    fs::write(&input, SAMPLE).unwrap();
    input
}

#[test]
fn convert_writes_typst_markup() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);
    let output = dir.path().join("report.typ");

    mdstyle()
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let markup = fs::read_to_string(&output).unwrap();
    assert!(markup.starts_with("#set page("));
    assert!(markup.contains("[Report]"));
    assert!(markup.contains("[1\\. First]"));
    assert!(markup.contains("#table("));
}

#[test]
fn profile_flag_changes_page_geometry() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);
    let output = dir.path().join("report.typ");

    mdstyle()
        .args(["convert", "--profile", "official"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let markup = fs::read_to_string(&output).unwrap();
    assert!(markup.contains("margin: (top: 106.00pt"));
}

#[test]
fn config_file_is_honored() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);
    let output = dir.path().join("report.typ");
    let config = dir.path().join("mdstyle.toml");
    fs::write(&config, "[lists]\nnumbering = \"native\"\n[page]\nnumbers = true\n").unwrap();

    mdstyle()
        .arg("convert")
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let markup = fs::read_to_string(&output).unwrap();
    assert!(markup.contains("numbering: \"1\""));
    assert!(markup.contains("[1\\. ]"));
    assert!(!markup.contains("[1\\. First]"));
}

#[test]
fn missing_output_argument_prints_usage() {
    mdstyle()
        .args(["convert", "only-input.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unreadable_input_fails() {
    let dir = TempDir::new().unwrap();
    mdstyle()
        .arg("convert")
        .arg(dir.path().join("absent.md"))
        .arg(dir.path().join("out.typ"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.md"));
}

#[test]
fn unsupported_output_extension_fails() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);
    mdstyle()
        .arg("convert")
        .arg(&input)
        .arg(dir.path().join("report.docx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported output format"));
}

#[test]
fn unknown_profile_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);
    mdstyle()
        .args(["analyze", "--profile", "fancy"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("fancy"));
}

#[test]
fn analyze_prints_report() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);
    mdstyle()
        .arg("analyze")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Font sizes:"))
        .stdout(predicate::str::contains("Times New Roman"))
        .stdout(predicate::str::contains("1.5x"));
}

#[test]
fn convert_writes_single_page_svg() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);
    let output = dir.path().join("report.svg");

    mdstyle()
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("report.svg"));

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
    assert!(!dir.path().join("report-1.svg").exists());
}

#[test]
fn long_svg_output_is_split_into_numbered_pages() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("long.md");
    let body = "A paragraph long enough to take a line of its own on the page.\n\n".repeat(150);
    fs::write(&input, body).unwrap();
    let output = dir.path().join("long.svg");

    mdstyle()
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("long-1.svg"))
        .stdout(predicate::str::contains("long-2.svg"));

    assert!(!output.exists());
    for page in ["long-1.svg", "long-2.svg"] {
        let svg = fs::read_to_string(dir.path().join(page)).unwrap();
        assert!(svg.contains("<svg"));
    }
}

#[test]
fn rust_log_enables_debug_events() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);

    mdstyle()
        .env("RUST_LOG", "mdstyle=debug")
        .arg("analyze")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("ordered list restarts"));

    mdstyle()
        .env_remove("RUST_LOG")
        .arg("analyze")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("ordered list restarts").not());
}
