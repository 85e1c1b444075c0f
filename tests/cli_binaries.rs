//! Binary-level checks for the `oc-shuttle` front-end.

use assert_cmd::Command;
use predicates::prelude::*;

fn oc_shuttle() -> Command {
    Command::cargo_bin("oc-shuttle").expect("binary builds")
}

#[test]
fn missing_required_arguments_fail_with_usage() {
    oc_shuttle()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--source-host"));
}

#[test]
fn help_documents_the_flag_surface() {
    oc_shuttle()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--source-directory")
                .and(predicate::str::contains("--destination-directory"))
                .and(predicate::str::contains("--compress"))
                .and(predicate::str::contains("--verify")),
        );
}

#[test]
fn version_flag_succeeds() {
    oc_shuttle()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("oc-shuttle"));
}

#[test]
fn unreachable_source_host_exits_one_with_fetch_diagnostic() {
    let staging = tempfile::tempdir().expect("create tempdir");
    oc_shuttle()
        .args([
            "--source-host",
            "127.0.0.1",
            // A closed port refuses immediately instead of timing out.
            "--source-port",
            "1",
            "--source-username",
            "reader",
            "--source-password",
            "secret",
            "--source-directory",
            "/srv/export",
            "--local-directory",
        ])
        .arg(staging.path().join("mirror"))
        .args([
            "--destination-host",
            "127.0.0.1",
            "--destination-directory",
            "/incoming",
            "--quiet",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("fetch stage failed"));
}
