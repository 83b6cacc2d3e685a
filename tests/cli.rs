//! CLI flag tests (--version, --help, --nodes, --inspect, --file) and
//! top-level error handling

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use std::fs;

const SCRIPT: &str = r#"@@@
Project tasks
@@@
greeting = "hello"

test {
    @@@
    Run the tests
    @@@
    $ echo testing
}
build: echo building
"#;

#[test]
fn test_version_flag() {
    let temp_dir = create_temp_dir();
    let output = run_doit(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(PKG_VERSION));
}

#[test]
fn test_no_script_found() {
    let temp_dir = create_temp_dir();
    let output = run_doit(temp_dir.path(), &["build"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No do.it file found"));
}

#[test]
fn test_help_without_script_describes_tool() {
    let temp_dir = create_temp_dir();
    let output = run_doit(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("--file"));
    assert!(stdout.contains("--inspect"));
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    let temp_dir = create_temp_dir();
    create_script(temp_dir.path(), SCRIPT);

    let output = run_doit(temp_dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("Usage: doit <target> [args...]"));
}

#[test]
fn test_help_lists_targets_sorted() {
    let temp_dir = create_temp_dir();
    create_script(temp_dir.path(), SCRIPT);

    let output = run_doit(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("       Project tasks\n"));
    assert!(stdout.contains("TARGETS"));
    assert!(stdout.contains("  build  <No help defined>\n"));
    assert!(stdout.contains("   test  Run the tests\n"));
    let build = stdout.find("build").unwrap();
    let test = stdout.find(" test ").unwrap();
    assert!(build < test);
    // piped output carries no escape codes
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn test_help_shows_target_arguments() {
    let temp_dir = create_temp_dir();
    create_script(
        temp_dir.path(),
        "deploy {\n    @@@\n    Ship it\n    @@@\n    <env> \"Where to\"\n    [tag]\n    $ echo $0\n}\nquiet {\n    @@@\n    @@@\n    $ true\n}\n",
    );

    let output = run_doit(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("  deploy <env> [tag]\n"));
    assert!(stdout.contains("          Ship it\n"));
    assert!(stdout.contains("          env  Where to\n"));
    assert!(stdout.contains("          tag  <No help defined>\n"));
    // an empty help block is not the same as no help at all
    assert!(stdout.contains("   quiet\n"));
}

#[test]
fn test_unknown_target_runs_nothing() {
    let temp_dir = create_temp_dir();
    create_script(temp_dir.path(), "build: touch built.txt\n");

    let output = run_doit(temp_dir.path(), &["deploy"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("Invalid target name: deploy"));
    assert!(stderr.contains("Usage: doit <target> [args...]"));
    assert!(!temp_dir.path().join("built.txt").exists());
}

#[test]
fn test_nodes_prints_tree() {
    let temp_dir = create_temp_dir();
    create_script(temp_dir.path(), SCRIPT);

    let output = run_doit(temp_dir.path(), &["--nodes"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.starts_with("ROOT [HAS_HELP]\n"));
    assert!(stdout.contains("├─ASSIGN: greeting = \"hello\""));
    assert!(stdout.contains("├─TARGET [HAS_HELP]: test"));
    assert!(stdout.contains("│ └─SCRIPT: echo testing"));
    assert!(stdout.contains("└─TARGET: build"));
}

#[test]
fn test_inspect_outputs_json() {
    let temp_dir = create_temp_dir();
    create_script(temp_dir.path(), SCRIPT);

    let output = run_doit(temp_dir.path(), &["--inspect"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["help"], "Project tasks");
    assert_eq!(json["targets"][0]["name"], "test");
    assert_eq!(json["targets"][0]["variables"]["greeting"], "hello");
    assert_eq!(json["targets"][1]["commands"][0], "echo building");
}

#[test]
fn test_file_flag_with_file_and_directory() {
    let temp_dir = create_temp_dir();
    let scripts = temp_dir.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    fs::write(scripts.join("tasks.it"), "hello: echo from-file\n").unwrap();
    create_script(&scripts, "hello: echo from-dir\n");

    let output = run_doit(temp_dir.path(), &["-f", "scripts/tasks.it", "hello"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "from-file");

    let output = run_doit(temp_dir.path(), &["--file", "scripts", "hello"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "from-dir");
}

#[test]
fn test_script_found_in_parent_directory() {
    let temp_dir = create_temp_dir();
    create_script(temp_dir.path(), "where: echo parent\n");
    let nested = temp_dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let output = test_command(&nested)
        .env("HOME", temp_dir.path())
        .arg("where")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "parent");
}

#[test]
fn test_parse_error_reports_location() {
    let temp_dir = create_temp_dir();
    create_script(temp_dir.path(), "ok: echo fine\n$ echo stray\n");

    let output = run_doit(temp_dir.path(), &["ok"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("Commands must belong to a target"));
    assert!(stderr.contains("do.it:2:"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_load_error_runs_nothing() {
    let temp_dir = create_temp_dir();
    create_script(temp_dir.path(), "a: touch ran.txt\nx = missing + 1\n");

    let output = run_doit(temp_dir.path(), &["a"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown variable 'missing'"));
    assert!(!temp_dir.path().join("ran.txt").exists());
}
