//! Binary-level behaviour: exit codes, printed diagnostics, artifacts.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn bin() -> Command {
    Command::cargo_bin("stock-barcodes").expect("binary exists")
}

#[test]
fn generate_writes_the_artifact_and_reports_its_path() {
    let dir = tempdir().expect("tempdir");
    let stem = dir.path().join("A100");

    bin()
        .arg("generate")
        .arg("A100")
        .arg(&stem)
        .assert()
        .success()
        .stdout(predicate::str::contains("A100.png"));

    let bytes = std::fs::read(dir.path().join("A100.png")).expect("artifact exists");
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[test]
fn generate_rejects_an_unsupported_identifier() {
    let dir = tempdir().expect("tempdir");
    let stem = dir.path().join("bad");

    bin()
        .arg("generate")
        .arg("caf\u{e9}")
        .arg(&stem)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unsupported"));

    assert!(!dir.path().join("bad.png").exists());
}

#[test]
fn missing_positional_arguments_are_a_usage_error() {
    // Usage errors come from clap with exit code 2, distinct from the
    // encoding failure path's exit code 1.
    bin()
        .arg("generate")
        .arg("A100")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage").or(predicate::str::contains("usage")));
}

#[test]
fn sync_without_configuration_fails_before_processing() {
    let dir = tempdir().expect("tempdir");

    bin()
        .current_dir(dir.path()) // no .env to pick up
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_SERVICE_ROLE_KEY")
        .arg("sync")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("SUPABASE_URL"));

    assert!(
        !dir.path().join("public").exists(),
        "no artifact tree may be created on a configuration error"
    );
}
