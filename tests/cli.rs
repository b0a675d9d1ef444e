// ABOUTME: Integration tests for the terrapin CLI commands.
// ABOUTME: Validates --help output, init scaffolding, envs listing, and gate errors.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn terrapin_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("terrapin"))
}

const MINIMAL_CONFIG: &str = r#"
environments:
  dev:
    tfvars: envs/dev.tfvars
    backend:
      resource_group: rg
      storage_account: sa
      container: tfstate
  prod:
    tfvars: envs/prod.tfvars
    auto_apply_on_push: true
    backend:
      resource_group: rg
      storage_account: sa
      container: tfstate
    approval:
      required: true
      reviewers: [alice]
"#;

#[test]
fn help_shows_commands() {
    terrapin_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("destroy"))
        .stdout(predicate::str::contains("envs"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("terrapin.yml");

    terrapin_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "terrapin.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(
        content.contains("environments:"),
        "Config should have environments section"
    );
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("terrapin.yml");

    fs::write(&config_path, "existing: config").unwrap();

    terrapin_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn envs_lists_registered_environments() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("terrapin.yml"), MINIMAL_CONFIG).unwrap();

    terrapin_cmd()
        .current_dir(temp_dir.path())
        .arg("envs")
        .assert()
        .success()
        .stdout(predicate::str::contains("dev"))
        .stdout(predicate::str::contains("prod"))
        .stdout(predicate::str::contains("auto-apply-on-push"))
        .stdout(predicate::str::contains("alice"));
}

#[test]
fn run_with_unknown_environment_fails_before_any_stage() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("terrapin.yml"), MINIMAL_CONFIG).unwrap();

    terrapin_cmd()
        .current_dir(temp_dir.path())
        .args(["run", "--env", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not registered"));
}

#[test]
fn apply_without_plan_is_rejected_at_the_gate() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("terrapin.yml"), MINIMAL_CONFIG).unwrap();

    terrapin_cmd()
        .current_dir(temp_dir.path())
        .args(["run", "--env", "dev", "--stages", "apply"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("apply requested without plan"));
}

#[test]
fn apply_and_destroy_together_are_rejected_at_the_gate() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("terrapin.yml"), MINIMAL_CONFIG).unwrap();

    terrapin_cmd()
        .current_dir(temp_dir.path())
        .args(["run", "--env", "dev", "--stages", "plan,apply,destroy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot both be requested"));
}

#[test]
fn run_without_config_reports_not_found() {
    let temp_dir = tempfile::tempdir().unwrap();

    terrapin_cmd()
        .current_dir(temp_dir.path())
        .args(["run", "--env", "dev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}
