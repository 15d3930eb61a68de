use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn cr(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cr"));
    cmd.env("HOME", home)
        .env("COMMAND_REMINDER_DIR", home.join("store"))
        .env("XDG_DATA_HOME", home.join("share"))
        .env_remove("RUST_LOG");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    cr(home).args(args).output().expect("Failed to execute cr")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_help_command() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["--help"]);

    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.contains("cr"));
    assert!(help.contains("record"));
    assert!(help.contains("pull"));
}

#[test]
fn test_cli_without_command_fails() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No command provided"));
}

#[test]
fn test_cli_init_prints_fish_path_line() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["init"]);

    assert!(output.status.success(), "{output:?}");
    let main_fish = home
        .path()
        .join("store")
        .join("repositories")
        .join("main")
        .join("fish");
    assert_eq!(
        stdout(&output),
        format!(
            "set -gx fish_function_path $fish_function_path {}\n",
            main_fish.display()
        )
    );
    assert!(main_fish.join("h.fish").is_file());
}

#[test]
fn test_cli_record_then_list() {
    let home = TempDir::new().unwrap();
    let record = run(
        home.path(),
        &[
            "record",
            "--name",
            "mongo login",
            "--command",
            "mongo --user a",
            "--tags",
            "#onduty, #mongo",
        ],
    );
    assert!(record.status.success(), "{record:?}");

    let list = run(home.path(), &["list", "-t", "#mongo #onduty"]);
    assert!(list.status.success());
    assert_eq!(stdout(&list), "mongo_login: mongo --user a\n");

    let tags = run(home.path(), &["tags"]);
    assert_eq!(stdout(&tags), "#mongo\n#onduty\n");
}

#[test]
fn test_cli_remove_unknown_command_fails() {
    let home = TempDir::new().unwrap();
    run(home.path(), &["init"]);
    let output = run(home.path(), &["rm", "-c", "ghost"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Command ghost does not exist."));
}

#[test]
fn test_cli_load_reads_stdin() {
    let home = TempDir::new().unwrap();
    let mut child = cr(home.path())
        .arg("load")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn cr");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"mongo: run mongo\n\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "{output:?}");

    let history =
        fs::read_to_string(home.path().join("share").join("fish").join("fish_history")).unwrap();
    assert!(history.starts_with("- cmd: run mongo\n  when: "));
}

#[test]
fn test_cli_pull_rejects_both_options() {
    let home = TempDir::new().unwrap();
    let output = run(
        home.path(),
        &["pull", "-r", "https://github.com/a/b", "--update-all"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Use only one option --update-all or --repo"));
}

#[test]
fn test_cli_completions() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["completions", "fish"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("complete -c cr"));

    let unknown = run(home.path(), &["completions", "tcsh"]);
    assert!(!unknown.status.success());
}
