//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Package version for testing --version flag
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper to get the compiled binary path
pub fn get_binary_path() -> PathBuf {
    let mut path = env::current_exe().unwrap();
    path.pop(); // test executable name

    // integration tests live in target/<profile>/deps
    if path.ends_with("deps") {
        path.pop();
    }

    path.push(format!("doit{}", env::consts::EXE_SUFFIX));

    if !path.exists() {
        let build_output = Command::new("cargo")
            .args(["build", "--bin", "doit"])
            .output()
            .expect("Failed to build binary");

        assert!(
            build_output.status.success(),
            "Failed to build doit binary: {}",
            String::from_utf8_lossy(&build_output.stderr)
        );
    }

    path
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Helper to create a do.it script in a directory
pub fn create_script(dir: &Path, content: &str) {
    fs::write(dir.join("do.it"), content).unwrap();
}

/// A command running in `dir`, with the script search bounded to it and
/// commands run through `sh`.
pub fn test_command(dir: &Path) -> Command {
    let mut cmd = Command::new(get_binary_path());
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("DOIT_SHELL", "sh")
        .env_remove("RUST_LOG");
    cmd
}

/// Run doit in `dir` with `args`.
pub fn run_doit(dir: &Path, args: &[&str]) -> Output {
    test_command(dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
