//! End-to-end tests for the report command.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn rebuildstat() -> Command {
    Command::cargo_bin("rebuildstat").expect("rebuildstat binary")
}

fn snapshot(packages: &str) -> String {
    format!(r#"{{ "packages": [{packages}] }}"#)
}

fn passing_pkg(name: &str, nvr: &str) -> String {
    format!(
        r#"{{
            "name": "{name}",
            "chroots": {{ "fedora-38-x86_64": {{ "state": "succeeded", "build_id": 1 }} }},
            "latest_build_id": 1,
            "nvr": "{nvr}"
        }}"#
    )
}

fn failing_pkg(name: &str, nvr: &str) -> String {
    format!(
        r#"{{
            "name": "{name}",
            "chroots": {{ "fedora-38-x86_64": {{ "state": "failed", "build_id": 2 }} }},
            "latest_build_id": 2,
            "nvr": "{nvr}"
        }}"#
    )
}

fn create_workdir(baseline: &str, candidate: &str) -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    fs::write(td.path().join("baseline.json"), baseline).unwrap();
    fs::write(td.path().join("candidate.json"), candidate).unwrap();
    td
}

#[test]
fn report_requires_a_subcommand() {
    rebuildstat()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn report_writes_feed_and_markdown() {
    let temp = create_workdir(
        &snapshot(&passing_pkg("bash", "bash-5.2-1.fc38")),
        &snapshot(&failing_pkg("bash", "bash-5.2-1.fc38")),
    );

    rebuildstat()
        .current_dir(temp.path())
        .args([
            "report",
            "--baseline",
            "baseline.json",
            "--candidate",
            "candidate.json",
        ])
        .assert()
        .success();

    let feed = fs::read_to_string(temp.path().join("report/feed.json")).expect("feed.json");
    assert!(feed.contains("rebuildstat.feed.v1"));
    assert!(feed.contains("\"regression\""));

    let report = fs::read_to_string(temp.path().join("report/report.md")).expect("report.md");
    assert!(report.contains("REGRESSION"));
}

#[test]
fn empty_inputs_skip_the_run_with_exit_2() {
    let temp = create_workdir(&snapshot(""), &snapshot(""));

    rebuildstat()
        .current_dir(temp.path())
        .args([
            "report",
            "--baseline",
            "baseline.json",
            "--candidate",
            "candidate.json",
        ])
        .assert()
        .code(2);

    assert!(!temp.path().join("report/feed.json").exists());
}

#[test]
fn missing_snapshot_fails_with_exit_1() {
    let temp = tempfile::tempdir().expect("tempdir");

    rebuildstat()
        .current_dir(temp.path())
        .args([
            "report",
            "--baseline",
            "nope.json",
            "--candidate",
            "also-nope.json",
        ])
        .assert()
        .code(1);
}

#[test]
fn config_file_supplies_defaults() {
    let temp = create_workdir(
        &snapshot(&passing_pkg("bash", "bash-5.2-1.fc38")),
        &snapshot(&passing_pkg("bash", "bash-5.2-1.fc38")),
    );
    fs::write(
        temp.path().join("rebuildstat.toml"),
        r#"
[baseline]
kind = "koji"
snapshot = "baseline.json"
label = "f38"

[candidate]
kind = "copr"
snapshot = "candidate.json"
owner = "@fedora-llvm-team"
project = "clang-built-f38"

[report]
out_dir = "out"
"#,
    )
    .unwrap();

    rebuildstat()
        .current_dir(temp.path())
        .arg("report")
        .assert()
        .success();

    let feed = fs::read_to_string(temp.path().join("out/feed.json")).expect("feed.json");
    assert!(feed.contains("\"pass\""));
    // COPR build links are reconstructed from the config coordinates.
    assert!(feed.contains("coprs/g/fedora-llvm-team/clang-built-f38/build/1/"));
}

#[test]
fn wontfix_notes_suppress_failing_packages() {
    let temp = create_workdir(
        &snapshot(&format!(
            "{},{}",
            passing_pkg("bash", "bash-5.2-1.fc38"),
            passing_pkg("zsh", "zsh-5.9-5.fc38")
        )),
        &snapshot(&format!(
            "{},{}",
            failing_pkg("bash", "bash-5.2-1.fc38"),
            passing_pkg("zsh", "zsh-5.9-5.fc38")
        )),
    );
    fs::write(
        temp.path().join("notes.toml"),
        "[wontfix]\nbash = \"\"\n",
    )
    .unwrap();

    rebuildstat()
        .current_dir(temp.path())
        .args([
            "report",
            "--baseline",
            "baseline.json",
            "--candidate",
            "candidate.json",
            "--notes",
            "notes.toml",
        ])
        .assert()
        .success();

    let feed = fs::read_to_string(temp.path().join("report/feed.json")).expect("feed.json");
    assert!(!feed.contains("\"bash\""));
    assert!(feed.contains("\"zsh\""));
    assert!(feed.contains("\"num_suppressed\": 1"));
}

#[test]
fn missing_notes_file_degrades_instead_of_failing() {
    let temp = create_workdir(
        &snapshot(&passing_pkg("bash", "bash-5.2-1.fc38")),
        &snapshot(&passing_pkg("bash", "bash-5.2-1.fc38")),
    );

    rebuildstat()
        .current_dir(temp.path())
        .args([
            "report",
            "--baseline",
            "baseline.json",
            "--candidate",
            "candidate.json",
            "--notes",
            "absent.toml",
        ])
        .assert()
        .success();

    let feed = fs::read_to_string(temp.path().join("report/feed.json")).expect("feed.json");
    assert!(feed.contains("\"notes_degraded\": true"));
}

#[test]
fn todo_renders_state_transitions_from_pairs() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("packages.json"),
        r#"{
            "bash": {
                "name": "bash",
                "os_version": "fedora-38",
                "builds_a": { "name": "bash", "chroots": { "fedora-38-x86_64": { "state": "succeeded" } } },
                "builds_b": { "name": "bash", "chroots": { "fedora-38-x86_64": { "state": "failed" } } }
            }
        }"#,
    )
    .unwrap();

    rebuildstat()
        .current_dir(temp.path())
        .args(["todo", "--pairs", "packages.json"])
        .assert()
        .success();

    let todo = fs::read_to_string(temp.path().join("report/todo.md")).expect("todo.md");
    assert!(todo.contains("| bash | Regression |"));
    assert!(todo.contains("OS version: fedora-38"));
}

#[test]
fn exclude_flag_drops_packages() {
    let temp = create_workdir(
        &snapshot(&format!(
            "{},{}",
            passing_pkg("clang", "clang-17.0.0-1.fc38"),
            passing_pkg("bash", "bash-5.2-1.fc38")
        )),
        &snapshot(&passing_pkg("bash", "bash-5.2-1.fc38")),
    );

    rebuildstat()
        .current_dir(temp.path())
        .args([
            "report",
            "--baseline",
            "baseline.json",
            "--candidate",
            "candidate.json",
            "--exclude",
            "clang",
        ])
        .assert()
        .success();

    let feed = fs::read_to_string(temp.path().join("report/feed.json")).expect("feed.json");
    assert!(!feed.contains("\"clang\""));
}
