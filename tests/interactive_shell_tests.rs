// Integration tests for the interactive shell (stdin piped, not a TTY)

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Shell command with history kept inside a throwaway home directory
fn shell(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pareto").unwrap();
    cmd.arg("--interactive")
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path());
    cmd
}

#[test]
fn test_errors_are_inline_and_session_continues() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("add Jam 5\nadd JAM 3\nadd Leak lots\nadd Leak 1\nsummary\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Jam' (5)"))
        .stdout(predicate::str::contains("Error: Validation error: cause 'JAM' already exists"))
        .stdout(predicate::str::contains("not a number"))
        .stdout(predicate::str::contains("Total number of causes: 2"));
}

#[test]
fn test_empty_dataset_reported_inline() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("show\nadd A 1\nshow\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No causes to analyze"))
        .stdout(predicate::str::contains("* A"));
}

#[test]
fn test_unknown_command_and_help() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("dance\nhelp\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown command 'dance'"))
        .stdout(predicate::str::contains("export xlsx [path]"));
}

#[test]
fn test_shell_import_title_and_export() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let csv = out.path().join("causes.csv");
    std::fs::write(&csv, "Cause,Occurrence\nJam,7\nLeak,3\n").unwrap();
    let docx = out.path().join("report.docx");

    let script = format!(
        "add jam 1\nimport {}\ntitle Press 4\nexport docx {}\nquit\n",
        csv.display(),
        docx.display()
    );
    shell(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 cause(s)"))
        .stdout(predicate::str::contains("1 duplicate(s) skipped"))
        .stdout(predicate::str::contains("Title set to 'Press 4'"))
        .stdout(predicate::str::contains("Report written to"));

    assert!(docx.exists());
}

#[test]
fn test_shell_command_one_shot() {
    Command::cargo_bin("pareto")
        .unwrap()
        .args(["-a", "A=50", "-a", "B=30", "-a", "C=20", "--shell-command", "top"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. A"))
        .stdout(predicate::str::contains("2. B"))
        .stdout(predicate::str::contains("3. C").not());
}
