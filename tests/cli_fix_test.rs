//! End-to-end tests for `fencefmt fix` with a scripted editor and piped answers.

#![cfg(unix)]

mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::Project;
use predicates::prelude::*;

const FLAGGED: &str = "# Doc\n\n```yaml\n[error] SyntaxError: unclosed bracket\nlist: [1, 2\n```\n";

/// A project whose editor runs `body` with the temp file as `$1`.
fn project_with_editor(body: &str) -> Project {
    let probe = Project::new("");
    let script = probe.write("editor.sh", &format!("#!/bin/sh\n{body}\n"));
    let command = format!("sh {}", script.display());
    let config = probe.read(".fencefmt.toml");
    probe.write(".fencefmt.toml", &format!("{config}editor = {command:?}\n"));
    probe
}

#[test]
fn test_fix_resolves_block_after_edit() {
    let project = project_with_editor("printf 'list: [1,   2]\\n' > \"$1\"");
    project.write("doc.md", FLAGGED);

    cargo_bin_cmd!("fencefmt")
        .current_dir(project.path())
        .arg("fix")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed 1 blocks in 1 files"));

    assert_eq!(project.read("doc.md"), "# Doc\n\n```yaml\nlist: [1,   2]\n```\n");
}

#[test]
fn test_fix_ignore_removes_marker() {
    let project = project_with_editor("true");
    project.write("doc.md", FLAGGED);

    cargo_bin_cmd!("fencefmt")
        .current_dir(project.path())
        .arg("fix")
        .write_stdin("i\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("block still fails"));

    assert_eq!(project.read("doc.md"), "# Doc\n\n```yaml\nlist: [1, 2\n```\n");
}

#[test]
fn test_fix_skip_keeps_marker() {
    let project = project_with_editor("true");
    project.write("doc.md", FLAGGED);

    cargo_bin_cmd!("fencefmt")
        .current_dir(project.path())
        .arg("fix")
        .write_stdin("x\ns\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid choice 'x'"));

    assert_eq!(
        project.read("doc.md"),
        "# Doc\n\n```yaml\n[error] stdin: SyntaxError: unclosed bracket (1:1)\nlist: [1, 2\n```\n"
    );
}

#[test]
fn test_fix_quit_stops_before_later_files() {
    let project = project_with_editor("true");
    project.write("a.md", FLAGGED);
    project.write("b.md", FLAGGED);

    cargo_bin_cmd!("fencefmt")
        .current_dir(project.path())
        .arg("fix")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("quit early"));

    assert_eq!(project.read("b.md"), FLAGGED);
}

#[test]
fn test_failing_editor_is_a_tool_error() {
    let project = project_with_editor("exit 3");
    project.write("doc.md", FLAGGED);

    cargo_bin_cmd!("fencefmt")
        .current_dir(project.path())
        .arg("fix")
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("edit discarded"));

    assert_eq!(project.read("doc.md"), FLAGGED);
}
