//! End-to-end tests of the `sceleton` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// `sceleton` running in `dir`, isolated from the user's config.
fn sceleton(dir: &Path, home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("sceleton");
    cmd.current_dir(dir)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SCELETON_DEFAULTS__LICENSE")
        .env_remove("SCELETON_DEFAULTS__PYTHON")
        .env_remove("SCELETON_DEFAULTS__VERSION")
        .env_remove("SCELETON_DEFAULTS__VIRTUALENV");
    cmd
}

struct Sandbox {
    home: TempDir,
    work: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
            work: TempDir::new().unwrap(),
        }
    }

    /// A plain-named project directory inside the work dir.
    fn project(&self, name: &str) -> std::path::PathBuf {
        let dir = self.work.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cmd_in(&self, dir: &Path) -> Command {
        sceleton(dir, &self.home)
    }

    fn cmd(&self) -> Command {
        self.cmd_in(self.work.path())
    }
}

#[test]
fn help_lists_commands() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("classifiers"))
        .stdout(predicate::str::contains("upload"));
}

#[test]
fn version_flag() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn new_quick_creates_layout() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["new", "demo", "--quick"]).assert().success();

    let root = sandbox.work.path().join("demo");
    for file in [
        "setup.py",
        "setup.cfg",
        "README.rst",
        ".gitignore",
        "LICENSE",
        "demo/__init__.py",
    ] {
        assert!(root.join(file).is_file(), "{file} missing");
    }

    let setup = fs::read_to_string(root.join("setup.py")).unwrap();
    assert!(setup.contains("name='demo'") || setup.contains("name=\"demo\""));
}

#[test]
fn second_new_reports_file_exists_and_exits_zero() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["new", "demo", "--quick"]).assert().success();

    sandbox
        .cmd()
        .args(["new", "demo", "--quick"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Something went wrong :("))
        .stderr(predicate::str::contains("File exists"));
}

#[test]
fn debug_flag_sets_exit_code() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["--debug", "new", ".hidden", "--quick"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn init_quick_then_license_reads_mit() {
    let sandbox = Sandbox::new();
    let dir = sandbox.project("legacy");

    sandbox
        .cmd_in(&dir)
        .args(["init", "--quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done. Enjoy :)"));
    assert!(dir.join("setup.py").is_file());
    assert!(dir.join("LICENSE").is_file());

    sandbox
        .cmd_in(&dir)
        .arg("license")
        .assert()
        .success()
        .stdout(predicate::str::contains("MIT License"));
}

#[test]
fn license_as_json() {
    let sandbox = Sandbox::new();
    let dir = sandbox.project("legacy");
    sandbox.cmd_in(&dir).args(["init", "--quick"]).assert().success();

    let out = sandbox
        .cmd_in(&dir)
        .args(["--output-format", "json", "license"])
        .output()
        .unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["license"], "MIT License");
}

#[test]
fn add_and_remove_edit_install_requires() {
    let sandbox = Sandbox::new();
    let dir = sandbox.project("pkg");
    sandbox.cmd_in(&dir).args(["init", "--quick"]).assert().success();

    sandbox
        .cmd_in(&dir)
        .args(["add", "requests", "click>=8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added requests"));
    let setup = fs::read_to_string(dir.join("setup.py")).unwrap();
    assert!(setup.contains("requests"));
    assert!(setup.contains("click>=8"));

    sandbox
        .cmd_in(&dir)
        .args(["remove", "requests"])
        .assert()
        .success();
    let setup = fs::read_to_string(dir.join("setup.py")).unwrap();
    assert!(!setup.contains("requests"));
    assert!(setup.contains("click>=8"));
}

#[test]
fn module_requires_setup_py() {
    let sandbox = Sandbox::new();
    let dir = sandbox.project("pkg");

    sandbox
        .cmd_in(&dir)
        .args(["module", "utils"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Missing required file"));

    sandbox.cmd_in(&dir).args(["init", "--quick"]).assert().success();
    sandbox.cmd_in(&dir).args(["module", "utils"]).assert().success();
    assert!(dir.join("utils/__init__.py").is_file());
}

#[test]
fn build_without_setup_py_is_missing_file() {
    let sandbox = Sandbox::new();
    let dir = sandbox.project("empty");

    sandbox
        .cmd_in(&dir)
        .args(["--debug", "build"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Missing required file"));
    assert!(!dir.join("dist").exists());
}

#[test]
fn config_init_then_get() {
    let sandbox = Sandbox::new();
    let path = sandbox.work.path().join("conf/sceleton.toml");
    let path_arg = path.to_str().unwrap();

    sandbox
        .cmd()
        .args(["--config", path_arg, "config", "init"])
        .assert()
        .success();
    assert!(path.is_file());

    sandbox
        .cmd()
        .args(["--config", path_arg, "config", "get", "defaults.license"])
        .assert()
        .success()
        .stdout(predicate::str::diff("MIT License\n"));

    sandbox
        .cmd()
        .args(["--debug", "--config", path_arg, "config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn env_overrides_config_defaults() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("SCELETON_DEFAULTS__PYTHON", "python3.12")
        .args(["config", "get", "defaults.python"])
        .assert()
        .success()
        .stdout(predicate::str::diff("python3.12\n"));
}

#[test]
fn completions_are_generated() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sceleton"))
        .stdout(predicate::str::contains("Done").not());
}

#[test]
fn numeric_no_color_is_accepted() {
    let sandbox = Sandbox::new();
    for (i, value) in ["1", "0", ""].into_iter().enumerate() {
        let dir = sandbox.project(&format!("nc{i}"));
        sandbox
            .cmd_in(&dir)
            .env("NO_COLOR", value)
            .args(["init", "--quick"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done. Enjoy :)"));
    }
}

#[test]
fn env_version_keeps_trailing_zero() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("SCELETON_DEFAULTS__VERSION", "0.10")
        .args(["config", "get", "defaults.version"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0.10\n"));

    sandbox
        .cmd()
        .env("SCELETON_DEFAULTS__VIRTUALENV", "true")
        .args(["config", "get", "defaults.virtualenv"])
        .assert()
        .success()
        .stdout(predicate::str::diff("true\n"));
}

#[test]
fn env_version_reaches_setup_py() {
    let sandbox = Sandbox::new();
    let dir = sandbox.project("versioned");
    sandbox
        .cmd_in(&dir)
        .env("SCELETON_DEFAULTS__VERSION", "1.0")
        .args(["init", "--quick"])
        .assert()
        .success();

    let setup = fs::read_to_string(dir.join("setup.py")).unwrap();
    assert!(setup.contains("version='1.0'"), "{setup}");
}

#[test]
fn user_edit_rewrites_author_fields() {
    let sandbox = Sandbox::new();
    let dir = sandbox.project("pkg");
    sandbox.cmd_in(&dir).args(["init", "--quick"]).assert().success();

    sandbox
        .cmd_in(&dir)
        .args(["user", "--edit"])
        .write_stdin("Grace Hopper\ngrace@example.com\n")
        .assert()
        .success();

    let setup = fs::read_to_string(dir.join("setup.py")).unwrap();
    assert!(setup.contains("author='Grace Hopper'"), "{setup}");
    assert!(setup.contains("author_email='grace@example.com'"), "{setup}");
    assert!(setup.contains("name='pkg'"));
}

#[test]
fn keywords_edit_joins_with_spaces() {
    let sandbox = Sandbox::new();
    let dir = sandbox.project("pkg");
    sandbox.cmd_in(&dir).args(["init", "--quick"]).assert().success();

    sandbox
        .cmd_in(&dir)
        .args(["keywords", "--edit"])
        .write_stdin("cli, scaffolding tools\n")
        .assert()
        .success();

    let setup = fs::read_to_string(dir.join("setup.py")).unwrap();
    assert!(setup.contains("keywords='cli scaffolding tools'"), "{setup}");
}

#[test]
fn classifiers_edit_replaces_chosen_category_only() {
    let sandbox = Sandbox::new();
    let dir = sandbox.project("pkg");
    sandbox.cmd_in(&dir).args(["init", "--quick"]).assert().success();

    // Out-of-range answer first; the menu is asked again.
    sandbox
        .cmd_in(&dir)
        .args(["classifiers", "--edit"])
        .write_stdin("9999\n1\n\n\n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Please enter numbers between 1 and"));

    let setup = fs::read_to_string(dir.join("setup.py")).unwrap();
    assert!(setup.contains("'Development Status :: 1 - Planning'"), "{setup}");
    assert!(!setup.contains("Development Status :: 3 - Alpha"), "{setup}");
    assert!(setup.contains("License :: OSI Approved :: MIT License"));
}
