//! End-to-end tests for the `kubeforge` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's config and environment.
fn kubeforge(home: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("kubeforge");
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .arg("--no-color");
    cmd
}

fn init_project(temp: &TempDir) -> PathBuf {
    let root = temp.path().join("frigate-operator");
    kubeforge(temp.path())
        .args(["init", "--owner", "Acme", "-C"])
        .arg(&root)
        .assert()
        .success();
    root
}

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_lays_out_a_project() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("frigate-operator");

    kubeforge(temp.path())
        .args(["init", "--owner", "Acme", "-C"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("src/main.rs"))
        .stdout(predicate::str::contains("$ kubeforge create api"));

    for file in ["Cargo.toml", "Makefile", "Dockerfile", "src/main.rs", "hack/boilerplate.rs.txt"] {
        assert!(root.join(file).is_file(), "{file} missing");
    }
    let manifest = fs::read_to_string(root.join("Cargo.toml")).unwrap();
    assert!(manifest.contains("name = \"frigate-operator\""));
    assert!(fs::read_to_string(root.join("src/main.rs")).unwrap().contains("Acme."));
}

#[test]
fn init_records_the_domain() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("frigate-operator");

    kubeforge(temp.path())
        .args(["init", "--domain", "example.com", "-C"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("PROJECT"));

    let project = fs::read_to_string(root.join("PROJECT")).unwrap();
    assert!(project.contains("domain = \"example.com\""));
    assert!(project.contains("projectName = \"frigate-operator\""));
}

#[test]
fn init_takes_owner_from_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("kubeforge.toml");
    fs::write(&config, "[defaults]\nowner = \"Config Owner\"\nlicense = \"apache2\"\n").unwrap();
    let root = temp.path().join("op");

    kubeforge(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["init", "-C"])
        .arg(&root)
        .assert()
        .success();

    let boilerplate = fs::read_to_string(root.join("hack/boilerplate.rs.txt")).unwrap();
    assert!(boilerplate.contains("Config Owner."));
}

#[test]
fn init_without_license() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("op");

    kubeforge(temp.path())
        .args(["init", "--license", "none", "--project-name", "plain-op", "-C"])
        .arg(&root)
        .assert()
        .success();

    assert!(!root.join("hack/boilerplate.rs.txt").exists());
    let manifest = fs::read_to_string(root.join("Cargo.toml")).unwrap();
    assert!(manifest.contains("name = \"plain-op\""));
}

#[test]
fn create_api_scaffolds_resource_and_controller() {
    let temp = TempDir::new().unwrap();
    let root = init_project(&temp);

    kubeforge(temp.path())
        .args([
            "create", "api", "--group", "ship", "--version", "v1", "--kind", "Frigate", "--yes",
            "--no-fmt", "-C",
        ])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("src/api/frigate_types.rs"))
        .stdout(predicate::str::contains("updated"))
        .stdout(predicate::str::contains("$ make generate-crds"));

    assert!(root.join("src/api/frigate_types.rs").is_file());
    assert!(root.join("src/controller/frigate_controller.rs").is_file());
    let main = fs::read_to_string(root.join("src/main.rs")).unwrap();
    assert!(main.contains("ControllerRunner::run::<FrigateReconciler>()"));
}

#[test]
fn create_api_resource_only() {
    let temp = TempDir::new().unwrap();
    let root = init_project(&temp);

    kubeforge(temp.path())
        .args([
            "create", "api", "--group", "ship", "--version", "v1", "--kind", "Frigate",
            "--resource", "--controller=false", "--no-fmt", "-C",
        ])
        .arg(&root)
        .assert()
        .success();

    assert!(root.join("src/api/frigate_types.rs").is_file());
    assert!(!root.join("src/controller/frigate_controller.rs").exists());
}

#[test]
fn create_api_controller_only_skips_crd_hint() {
    let temp = TempDir::new().unwrap();
    let root = init_project(&temp);

    kubeforge(temp.path())
        .args([
            "create", "api", "--group", "ship", "--version", "v1", "--kind", "Frigate",
            "--resource=false", "--controller", "--no-fmt", "-C",
        ])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("make generate-crds").not());

    assert!(!root.join("src/api/frigate_types.rs").exists());
    assert!(root.join("src/controller/frigate_controller.rs").is_file());
}

#[test]
fn cluster_scoped_resource() {
    let temp = TempDir::new().unwrap();
    let root = init_project(&temp);

    kubeforge(temp.path())
        .args([
            "create", "api", "--group", "ship", "--version", "v1", "--kind", "Fleet",
            "--namespaced=false", "--yes", "--no-fmt", "-C",
        ])
        .arg(&root)
        .assert()
        .success();

    let types = fs::read_to_string(root.join("src/api/fleet_types.rs")).unwrap();
    assert!(!types.contains("namespaced"));
}

#[test]
fn json_report_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("op");

    let assert = kubeforge(temp.path())
        .args(["--output-format", "json", "init", "-C"])
        .arg(&root)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["success"], true);
    let files = report["files"].as_array().unwrap();
    assert!(
        files
            .iter()
            .any(|f| f["path"] == "src/main.rs" && f["action"] == "created")
    );
}

#[test]
fn completions_bash() {
    let temp = TempDir::new().unwrap();
    kubeforge(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kubeforge"));
}

#[test]
fn config_init_then_get() {
    let temp = TempDir::new().unwrap();

    kubeforge(temp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));

    kubeforge(temp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    kubeforge(temp.path())
        .args(["config", "get", "defaults.license"])
        .assert()
        .success()
        .stdout(predicate::str::diff("apache2\n"));
}

#[test]
fn config_path_honours_explicit_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    fs::write(&config, "").unwrap();

    kubeforge(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn environment_overrides_config() {
    let temp = TempDir::new().unwrap();

    kubeforge(temp.path())
        .env("KUBEFORGE__DEFAULTS__OWNER", "Env Owner")
        .args(["config", "get", "defaults.owner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Env Owner"));
}

#[test]
fn log_file_receives_events() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("kubeforge.log");
    let root = temp.path().join("op");

    kubeforge(temp.path())
        .arg("-vv")
        .arg("--log-file")
        .arg(&log)
        .args(["init", "-C"])
        .arg(&root)
        .assert()
        .success();

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Project initialised"));
}
