use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn buildenv(settings_home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("buildenv"));
    cmd.env("XDG_CONFIG_HOME", settings_home);
    cmd.env_remove("RUST_LOG");
    cmd
}

const APP: &str = "\
apiVersion: skaffold/v4beta11
kind: Config
metadata:
  name: app
requires:
- path: lib
build:
  local: {}
profiles:
- name: dev
  build:
    cluster: {}
";

const LIB: &str = "\
apiVersion: skaffold/v4beta11
kind: Config
metadata:
  name: lib
build:
  local: {}
";

#[test]
fn add_gcb_to_default_pipeline_rewrites_only_the_main_file() {
    let tmp = tempdir().unwrap();
    let main = tmp.path().join("skaffold.yaml");
    let lib = tmp.path().join("lib/skaffold.yaml");
    write_file(&main, APP);
    write_file(&lib, LIB);

    buildenv(tmp.path())
        .args(["add", "gcb", "--project-id", "proj-1", "--concurrency", "2", "-f"])
        .arg(&main)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let main_after = fs::read_to_string(&main).unwrap();
    assert!(main_after.contains("googleCloudBuild"), "{main_after}");
    assert!(main_after.contains("projectId: proj-1"), "{main_after}");
    assert!(main_after.contains("concurrency: 2"), "{main_after}");
    assert!(!main_after.contains("local"), "previous executor replaced: {main_after}");
    assert!(main_after.contains("cluster"), "profiles untouched: {main_after}");
    assert_eq!(fs::read_to_string(&lib).unwrap(), LIB);
}

#[test]
fn add_gcb_to_profile_activates_it_in_required_modules() {
    let tmp = tempdir().unwrap();
    let main = tmp.path().join("skaffold.yaml");
    let lib = tmp.path().join("lib/skaffold.yaml");
    write_file(&main, APP);
    write_file(&lib, LIB);

    buildenv(tmp.path())
        .args(["add", "googleCloudBuild", "--profile", "cloud", "--machine-type", "E2_HIGHCPU_8"])
        .arg("--filename")
        .arg(&main)
        .assert()
        .success();

    let main_after = fs::read_to_string(&main).unwrap();
    assert!(main_after.contains("name: cloud"), "{main_after}");
    assert!(main_after.contains("activeProfiles"), "{main_after}");
    assert!(main_after.contains("activatedBy"), "{main_after}");

    let lib_after = fs::read_to_string(&lib).unwrap();
    assert!(lib_after.contains("name: cloud"), "{lib_after}");
    assert!(lib_after.contains("machineType: E2_HIGHCPU_8"), "{lib_after}");
}

#[test]
fn add_gcb_with_missing_config_prints_json_record() {
    let tmp = tempdir().unwrap();

    buildenv(tmp.path())
        .args(["add", "gcb", "-f"])
        .arg(tmp.path().join("skaffold.yaml"))
        .assert()
        .failure()
        .stdout(predicate::str::starts_with(
            "{\"errorCode\":\"CONFIG_FILE_NOT_FOUND_ERR\",\"errorMessage\":\"unable to find configuration file",
        ))
        .stdout(predicate::str::contains("Check that the specified configuration file exists"));
}

#[test]
fn add_gcb_with_unknown_module_prints_text_record() {
    let tmp = tempdir().unwrap();
    let main = tmp.path().join("skaffold.yaml");
    write_file(&main, LIB);

    buildenv(tmp.path())
        .args(["add", "gcb", "--format", "text", "-m", "ghost", "-f"])
        .arg(&main)
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("CONFIG_BAD_FILTER_ERR: "))
        .stdout(predicate::str::contains("ghost"));

    assert_eq!(fs::read_to_string(&main).unwrap(), LIB);
}
