use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_healthie_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("healthie")
}

#[test]
fn test_find_patient_command_help() {
    let mut cmd = Command::new(get_healthie_bin());
    cmd.arg("find-patient").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Find a patient by name and date of birth",
        ))
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--dob"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_find_patient_requires_name_and_dob() {
    let mut cmd = Command::new(get_healthie_bin());
    cmd.arg("find-patient").arg("--name").arg("John Doe");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--dob"));
}

#[test]
fn test_find_patient_fails_fast_without_credentials() {
    let mut cmd = Command::new(get_healthie_bin());
    cmd.arg("find-patient")
        .arg("--name")
        .arg("John Doe")
        .arg("--dob")
        .arg("1990-01-15")
        .env_remove("HEALTHIE_EMAIL")
        .env_remove("HEALTHIE_PASSWORD");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("HEALTHIE_PASSWORD"));
}
