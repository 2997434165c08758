use std::io::Write;
use std::process::{Command, Stdio};

fn run(fixture: &str) -> (String, String, bool) {
    let path = format!("tests/fixtures/{fixture}");
    let output = Command::new(env!("CARGO_BIN_EXE_ledger-sim"))
        .arg(&path)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn interactive(input: &str) -> (String, bool) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ledger-sim"))
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run binary");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    let output = child.wait_with_output().expect("failed to wait on binary");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    (stdout, output.status.success())
}

#[test]
fn valid_script() {
    let (stdout, stderr, success) = run("valid.csv");

    assert!(success);
    assert!(stderr.is_empty());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "branch,account,holder,balance",
            "0001,1,Ana Souza,75.00",
            "0001,2,Bruno Lima,50.50",
        ]
    );
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run("with_errors.csv");

    assert!(success);
    assert!(stderr.contains("unrecognized command"));
    assert!(stderr.contains("missing amount"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "branch,account,holder,balance");
    assert_eq!(lines[1], "0001,1,Ana Souza,75.00");
    assert_eq!(lines.len(), 2);
}

#[test]
fn missing_script_fails() {
    let (stdout, stderr, success) = run("does_not_exist.csv");

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to open script"));
}

#[test]
fn interactive_session() {
    let input = "nu\n111\nAna Souza\n31-01-1990\nRua A, 1 - Centro\n\
                 na\n111\n\
                 d\n111\n100\n\
                 w\n111\n600\n\
                 w\n111\n40\n\
                 x\n111\n\
                 la\n\
                 q\n";
    let (stdout, success) = interactive(input);

    assert!(success);
    assert!(stdout.contains("User registered."));
    assert!(stdout.contains("Account 1 created."));
    assert!(stdout.contains("Deposit of 100.00 completed."));
    assert!(stdout.contains("! amount 600.00 exceeds the withdrawal limit of 500.00"));
    assert!(stdout.contains("Withdrawal of 40.00 completed."));
    assert!(stdout.contains("Balance:\n\t60.00"));
    assert!(stdout.contains("Holder:\t\tAna Souza"));
}

#[test]
fn interactive_session_ends_on_eof() {
    let (stdout, success) = interactive("x\n404\n");

    assert!(success);
    assert!(stdout.contains("! user 404 not found"));
}
