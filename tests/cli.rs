use assert_cmd::Command;
use filetime::FileTime;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn plant_file(root: &Path, rel: &str, age: Duration) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"contents").unwrap();
    let atime = FileTime::from_system_time(SystemTime::now() - age);
    filetime::set_file_atime(&path, atime).unwrap();
}

/// A repository with one artifact well past the default six-month cutoff
/// and one recent artifact.
fn setup_repo() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    plant_file(dir.path(), "com/acme/lib/1.0/lib-1.0.pom", 300 * DAY);
    plant_file(dir.path(), "com/acme/lib/2.0/lib-2.0.pom", 30 * DAY);
    dir
}

#[test]
fn test_reports_stale_candidate() {
    let dir = setup_repo();

    let mut cmd = Command::cargo_bin("m2clean").unwrap();
    let assert = cmd.arg("--repo").arg(dir.path()).assert();

    assert
        .success()
        .stdout(predicate::str::contains("com/acme/lib/1.0"))
        .stdout(predicate::str::contains("Found 1 candidates totalling"));

    // Prompt answered by a closed stdin counts as "no"
    assert!(dir.path().join("com/acme/lib/1.0").exists());
}

#[test]
fn test_fresh_repo_finds_nothing() {
    let dir = tempdir().unwrap();
    plant_file(dir.path(), "com/acme/lib/2.0/lib-2.0.pom", 30 * DAY);

    let mut cmd = Command::cargo_bin("m2clean").unwrap();
    let assert = cmd.arg("--repo").arg(dir.path()).assert();

    assert
        .success()
        .stdout(predicate::str::contains("Found 0 candidates"));
}

#[test]
fn test_missing_repo_is_reported() {
    let mut cmd = Command::cargo_bin("m2clean").unwrap();
    let assert = cmd.arg("--repo").arg("/no/such/repository").assert();

    assert
        .failure()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_ignore_pattern_fails_before_scanning() {
    let dir = setup_repo();

    let mut cmd = Command::cargo_bin("m2clean").unwrap();
    let assert = cmd
        .arg("--repo")
        .arg(dir.path())
        .arg("--ignore")
        .arg("[")
        .assert();

    assert
        .failure()
        .stderr(predicate::str::contains("invalid ignore pattern"));
}

#[test]
fn test_declining_the_prompt_keeps_folders() {
    let dir = setup_repo();

    let mut cmd = Command::cargo_bin("m2clean").unwrap();
    let assert = cmd
        .arg("--repo")
        .arg(dir.path())
        .write_stdin("n\n")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("Nothing deleted."));
    assert!(dir.path().join("com/acme/lib/1.0").exists());
}

#[test]
fn test_confirming_the_prompt_deletes_candidates() {
    let dir = setup_repo();

    let mut cmd = Command::cargo_bin("m2clean").unwrap();
    let assert = cmd
        .arg("--repo")
        .arg(dir.path())
        .write_stdin("y\n")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("Removed 1 folders"));
    assert!(!dir.path().join("com/acme/lib/1.0").exists());
    assert!(dir.path().join("com/acme/lib/2.0").exists());
}

#[test]
fn test_prompt_accepts_yes_in_any_case() {
    let dir = setup_repo();

    let mut cmd = Command::cargo_bin("m2clean").unwrap();
    let assert = cmd
        .arg("--repo")
        .arg(dir.path())
        .write_stdin("  YES \n")
        .assert();

    assert.success();
    assert!(!dir.path().join("com/acme/lib/1.0").exists());
}

#[test]
fn test_prune_reports_emptied_parents() {
    let dir = tempdir().unwrap();
    plant_file(dir.path(), "com/acme/lib/1.0/lib-1.0.pom", 300 * DAY);
    plant_file(dir.path(), "com/acme/lib/2.0/lib-2.0.pom", 300 * DAY);

    let mut cmd = Command::cargo_bin("m2clean").unwrap();
    let assert = cmd
        .arg("--repo")
        .arg(dir.path())
        .arg("--prune")
        .write_stdin("n\n")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("empty after removal"));
}

#[test]
fn test_ignore_pattern_excludes_subtree() {
    let dir = setup_repo();

    let mut cmd = Command::cargo_bin("m2clean").unwrap();
    let assert = cmd
        .arg("--repo")
        .arg(dir.path())
        .arg("--ignore")
        .arg("^com/acme")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("Found 0 candidates"));
}

#[test]
fn test_verbose_lists_file_access_times() {
    let dir = setup_repo();

    let mut cmd = Command::cargo_bin("m2clean").unwrap();
    let assert = cmd
        .arg("--repo")
        .arg(dir.path())
        .arg("--verbose")
        .write_stdin("n\n")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("last accessed"));
}
