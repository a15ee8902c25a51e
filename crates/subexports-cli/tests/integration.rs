//! Integration tests for subexports

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TWO_ENTRIES: &str = r#"
[build]
outdir = "dist"
entry-points = { a = "src/a.ts", b = "src/b.ts" }
"#;

/// A throwaway package directory with its own HOME
struct ProjectHarness {
    _home: TempDir,
    home_path: PathBuf,
    project: TempDir,
}

impl ProjectHarness {
    fn new() -> io::Result<Self> {
        let home = TempDir::new()?;
        let project = TempDir::new()?;
        Ok(Self {
            home_path: home.path().to_path_buf(),
            _home: home,
            project,
        })
    }

    fn with_files(files: &[(&str, &str)]) -> io::Result<Self> {
        let harness = Self::new()?;
        for (name, content) in files {
            harness.write(name, content)?;
        }
        Ok(harness)
    }

    fn root(&self) -> &Path {
        self.project.path()
    }

    fn write(&self, name: &str, content: &str) -> io::Result<()> {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root().join(name)).unwrap_or_default()
    }

    fn package_json(&self) -> Value {
        serde_json::from_str(&self.read("package.json")).unwrap_or(Value::Null)
    }

    fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root())
            .map(|dir| {
                dir.filter_map(Result::ok)
                    .map(|entry| entry.file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("subexports");
        cmd.current_dir(self.root())
            .env("HOME", &self.home_path)
            .env_remove("SUBEXPORTS_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn test_version() {
    cargo_bin_cmd!("subexports")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("subexports"));
}

#[test]
fn test_help() {
    cargo_bin_cmd!("subexports")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("package.json exports"));
}

#[test]
fn test_invalid_command() {
    cargo_bin_cmd!("subexports").arg("invalid").assert().failure();
}

#[test]
fn test_run_two_entries() {
    let env = ProjectHarness::with_files(&[
        ("subexports.toml", TWO_ENTRIES),
        ("package.json", r#"{"name": "pkg", "version": "1.0.0"}"#),
    ])
    .expect("project harness");

    env.command().arg("run").assert().success();

    let manifest = env.package_json();
    assert_eq!(manifest["name"], json!("pkg"));
    assert_eq!(
        manifest["exports"],
        json!({
            "./a": {"types": "./dist/a.d.ts", "import": "./dist/a.mjs", "require": "./dist/a.js"},
            "./b": {"types": "./dist/b.d.ts", "import": "./dist/b.mjs", "require": "./dist/b.js"}
        })
    );

    let files: Vec<&str> = manifest["files"]
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    assert_eq!(files.len(), 10);
    for expected in ["dist/a.js", "dist/a.mjs", "dist/a.d.ts", "a.js", "a.d.ts", "b.js", "b.d.ts"] {
        assert!(files.contains(&expected), "missing {expected}");
    }

    assert_eq!(env.read("a.js"), r#"module.exports = require("./dist/a.js");"#);
    assert_eq!(env.read("a.d.ts"), r#"export type * from "./dist/a.d.ts";"#);
    assert_eq!(env.read("b.js"), r#"module.exports = require("./dist/b.js");"#);
}

#[test]
fn test_run_is_idempotent() {
    let env = ProjectHarness::with_files(&[
        ("subexports.toml", TWO_ENTRIES),
        ("package.json", r#"{"name": "pkg", "files": ["README.md"]}"#),
    ])
    .expect("project harness");

    env.command()
        .arg("run")
        .assert()
        .success()
        .stderr(predicate::str::contains("Updated"));
    let first = env.read("package.json");

    env.command()
        .arg("run")
        .assert()
        .success()
        .stderr(predicate::str::contains("already up to date"));
    assert_eq!(env.read("package.json"), first);
}

#[test]
fn test_whitelist_from_flag() {
    let env = ProjectHarness::with_files(&[
        ("subexports.toml", TWO_ENTRIES),
        ("package.json", "{}"),
    ])
    .expect("project harness");

    env.command().args(["run", "--entry", "a"]).assert().success();

    assert!(env.root().join("a.js").exists());
    assert!(!env.root().join("b.js").exists());
    let manifest = env.package_json();
    assert!(manifest["exports"].get("./a").is_some());
    assert!(manifest["exports"].get("./b").is_none());
}

#[test]
fn test_whitelist_from_config() {
    let config = format!("{}\n[subexports]\nentries = [\"b\"]\n", TWO_ENTRIES);
    let env = ProjectHarness::with_files(&[("subexports.toml", &config), ("package.json", "{}")])
        .expect("project harness");

    env.command().arg("run").assert().success();

    assert!(env.root().join("b.d.ts").exists());
    assert!(!env.root().join("a.d.ts").exists());
}

#[test]
fn test_empty_whitelist_is_noop() {
    let config = format!("{}\n[subexports]\nentries = []\n", TWO_ENTRIES);
    let env = ProjectHarness::with_files(&[
        ("subexports.toml", &config),
        ("package.json", r#"{"name":"pkg"}"#),
    ])
    .expect("project harness");

    env.command().arg("run").assert().success();

    assert_eq!(env.entries(), vec!["package.json", "subexports.toml"]);
    assert_eq!(env.read("package.json"), r#"{"name":"pkg"}"#);
}

#[test]
fn test_list_entry_points_fail_before_writing() {
    let env = ProjectHarness::with_files(&[
        (
            "subexports.toml",
            "[build]\noutdir = \"dist\"\nentry-points = [\"src/a.ts\"]\n",
        ),
        ("package.json", r#"{"name":"pkg"}"#),
    ])
    .expect("project harness");

    env.command()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a mapping"));

    assert_eq!(env.entries(), vec!["package.json", "subexports.toml"]);
    assert_eq!(env.read("package.json"), r#"{"name":"pkg"}"#);
}

#[test]
fn test_missing_outdir_fails() {
    let env = ProjectHarness::with_files(&[
        (
            "subexports.toml",
            "[build]\nentry-points = { a = \"src/a.ts\" }\n",
        ),
        ("package.json", "{}"),
    ])
    .expect("project harness");

    env.command()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("output directory is required"));

    assert!(!env.root().join("a.js").exists());
}

#[test]
fn test_outdir_flag_supplies_missing_outdir() {
    let env = ProjectHarness::with_files(&[
        (
            "subexports.toml",
            "[build]\nentry-points = { a = \"src/a.ts\" }\n",
        ),
        ("package.json", "{}"),
    ])
    .expect("project harness");

    env.command()
        .args(["run", "--outdir", "./lib/"])
        .assert()
        .success();

    assert_eq!(env.read("a.js"), r#"module.exports = require("./lib/a.js");"#);
    assert_eq!(env.package_json()["exports"]["./a"]["import"], json!("./lib/a.mjs"));
}

#[test]
fn test_missing_package_json_warns() {
    let env = ProjectHarness::with_files(&[("subexports.toml", TWO_ENTRIES)])
        .expect("project harness");

    // A package.json above the temp dir would be picked up instead
    if env
        .root()
        .parent()
        .is_some_and(|parent| parent.ancestors().any(|dir| dir.join("package.json").is_file()))
    {
        return;
    }

    env.command()
        .arg("run")
        .assert()
        .success()
        .stderr(predicate::str::contains("could not find package.json"));

    assert!(env.root().join("a.js").exists());
    assert!(!env.root().join("package.json").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let env = ProjectHarness::with_files(&[
        ("subexports.toml", TWO_ENTRIES),
        ("package.json", r#"{"name":"pkg"}"#),
    ])
    .expect("project harness");

    env.command()
        .args(["run", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("./a").and(predicate::str::contains("Would update")));

    assert_eq!(env.entries(), vec!["package.json", "subexports.toml"]);
}

#[test]
fn test_json_config_via_env() {
    let env = ProjectHarness::with_files(&[
        (
            "build/options.json",
            r#"{"build": {"entryPoints": {"a": "src/a.ts"}, "outdir": "dist"}}"#,
        ),
        ("package.json", "{}"),
    ])
    .expect("project harness");

    env.command()
        .env("SUBEXPORTS_CONFIG", "build/options.json")
        .arg("run")
        .assert()
        .success();

    assert!(env.root().join("a.js").exists());
}

#[test]
fn test_init_creates_template() {
    let env = ProjectHarness::new().expect("project harness");

    env.command().arg("init").assert().success();
    assert!(env.read("subexports.toml").contains("[build.entry-points]"));

    env.command().arg("init").assert().failure();
    env.command().args(["init", "--force"]).assert().success();
}

#[test]
fn test_config_path_and_show() {
    let env = ProjectHarness::with_files(&[("subexports.toml", TWO_ENTRIES)])
        .expect("project harness");

    env.command()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("subexports.toml"));

    env.command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:").and(predicate::str::contains("dist")));
}
