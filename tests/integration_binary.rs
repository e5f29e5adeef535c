//! Binary integration tests
//!
//! Runs the built `demokit` executable end to end.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

/// A command isolated from the user's config and log directories.
fn demokit(home: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_demokit"));
    command
        .current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    command
}

/// Forward stdout lines over a channel so the test can wait with a deadline.
fn stdout_lines(child: &mut Child) -> mpsc::Receiver<String> {
    let stdout = child.stdout.take().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn wait_for_line(lines: &mpsc::Receiver<String>, needle: &str, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match lines.recv_timeout(remaining) {
            Ok(line) if line.contains(needle) => return true,
            Ok(_) => continue,
            Err(_) => return false,
        }
    }
    false
}

fn wait_for_exit(child: &mut Child, timeout: Duration) -> Option<std::process::ExitStatus> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        thread::sleep(Duration::from_millis(20));
    }
    None
}

/// Ctrl+C in echo mode exits 0 even though stdin stays open
#[cfg(unix)]
#[test]
fn test_echo_worker_exits_after_interrupt() {
    let home = TempDir::new().unwrap();
    let mut child = demokit(home.path())
        .args(["worker", "--mode", "echo"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    // Held open for the whole test so the read never sees end of input
    let stdin = child.stdin.take().unwrap();
    let lines = stdout_lines(&mut child);

    assert!(wait_for_line(&lines, "Echo mode", Duration::from_secs(10)));
    // Give the listener task time to install the signal handler
    thread::sleep(Duration::from_millis(500));

    let killed = Command::new("kill").args(["-INT", &child.id().to_string()]).status().unwrap();
    assert!(killed.success());

    let status = wait_for_exit(&mut child, Duration::from_secs(5));
    if status.is_none() {
        let _ = child.kill();
    }
    drop(stdin);

    assert_eq!(status.and_then(|s| s.code()), Some(0));
    assert!(wait_for_line(&lines, "Worker cancelled.", Duration::from_secs(1)));
}

/// Bad worker arguments exit with code 1
#[test]
fn test_worker_invalid_args_exit_one() {
    let home = TempDir::new().unwrap();
    let output = demokit(home.path())
        .args(["worker", "--interval", "0"])
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--interval"));
}

/// Unknown worker arguments are reported and the mode still runs
#[test]
fn test_worker_unknown_args_warn() {
    let home = TempDir::new().unwrap();
    let output = demokit(home.path())
        .args(["worker", "--mode", "exit", "--exit-after", "1", "--unknown", "value"])
        .stdin(Stdio::null())
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Unknown argument: --unknown"));
    assert!(stdout.contains("Exiting normally."));
}

/// A garbled menu line is rejected and the session continues
#[test]
fn test_menu_survives_invalid_utf8() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("demokit.yml");
    std::fs::write(
        &config,
        "menu:\n  clear_screen_on_header: false\n  pause_after_scenarios: false\n  handle_cancel_key_press: false\n",
    )
    .unwrap();

    let mut child = demokit(home.path())
        .args(["-c", config.to_str().unwrap(), "menu"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"\xff\n1\nq\n").unwrap();

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Invalid selection."));
    assert!(stdout.contains("Hello from DemoKit!"));
}
