//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("blogmerge")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_dataset(path: &std::path::Path, variable: &str) -> Vec<serde_json::Value> {
    let text = std::fs::read_to_string(path).unwrap();
    let body = text
        .strip_prefix(&format!("const {} = ", variable))
        .and_then(|rest| rest.strip_suffix(';'))
        .unwrap();
    serde_json::from_str(body).unwrap()
}

#[test]
fn test_cli_export() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("blogger_export.js");

    cmd()
        .args(["export", "--feed", &get_fixture_path("blogger_export.xml")])
        .args(["--posts", &get_fixture_path("posts")])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 4 total entries"));

    let records = read_dataset(&output, "postsData");
    assert_eq!(records.len(), 4);
    assert_eq!(records[1]["title"], "廣州城牆 1921");
    assert!(records.iter().all(|r| r["link"].as_str().is_some_and(|l| !l.is_empty())));
}

#[test]
fn test_cli_export_reports_diagnostics() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("out.js");

    cmd()
        .args(["export", "--feed", &get_fixture_path("blogger_export.xml")])
        .args(["--posts", &get_fixture_path("posts")])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Title without year found"))
        .stderr(predicate::str::contains("No footer found in no-footer.html"));
}

#[test]
fn test_cli_export_custom_variable() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("data.js");

    cmd()
        .args(["export", "--skip-feed", "--var", "mediumPosts", "--script", "none"])
        .args(["--posts", &get_fixture_path("posts")])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    let records = read_dataset(&output, "mediumPosts");
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["link"].as_str().unwrap().starts_with("https://medium.com/p/")));
}

#[test]
fn test_cli_missing_sources_still_writes() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("out.js");

    cmd()
        .args(["export", "--feed", "nonexistent.xml", "--posts", "nonexistent_dir"])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("not found"));

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "const postsData = [];");
}

#[test]
fn test_cli_invalid_variable() {
    cmd()
        .args(["export", "--var", "posts-data", "--skip-feed", "--posts", "nonexistent_dir"])
        .assert()
        .failure();
}

#[test]
fn test_cli_invalid_script() {
    cmd().args(["export", "--script", "klingon"]).assert().failure();
}

#[test]
fn test_cli_unwritable_output() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("missing").join("out.js");

    cmd()
        .args(["export", "--skip-feed", "--posts", &get_fixture_path("posts")])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .failure();

    assert!(!output.exists());
}

#[test]
fn test_cli_pages() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("posts_data.js");

    cmd()
        .args(["pages", "--posts", &get_fixture_path("posts")])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("with 5 posts"));

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.is_ascii());
    assert_eq!(read_dataset(&output, "postsData").len(), 5);
}

#[test]
fn test_cli_pages_missing_dir() {
    cmd().args(["pages", "--posts", "nonexistent_dir"]).assert().failure();
}

#[test]
fn test_cli_verbose() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("out.js");

    cmd()
        .args(["-v", "export", "--skip-feed", "--posts", &get_fixture_path("posts")])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Blogmerge"));
}
