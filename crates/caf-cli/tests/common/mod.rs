//! Shared harness for caf-cli integration tests.
//!
//! Runs the compiled `caf` binary with a pinned environment so output does
//! not depend on the caller's shell.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    /// Stdout lines, for commands that print one identifier per line.
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_caf"));
    cmd.args(args)
        .current_dir(dir)
        .env_remove("CAF_HASH_ALGORITHM")
        .env_remove("CAF_LOG")
        .env("LC_ALL", "C");
    cmd
}

fn collect(output: std::process::Output) -> CommandResult {
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// Run `caf` in `dir`.
pub fn caf(dir: &Path, args: &[&str]) -> CommandResult {
    collect(command(dir, args).output().unwrap())
}

/// Run `caf` in `dir` with `input` on stdin.
pub fn caf_stdin(dir: &Path, args: &[&str], input: &str) -> CommandResult {
    let mut child = command(dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    collect(child.wait_with_output().unwrap())
}

/// Run `caf` with one extra environment variable.
pub fn caf_env(dir: &Path, args: &[&str], key: &str, value: &str) -> CommandResult {
    let mut cmd = command(dir, args);
    cmd.env(key, value);
    collect(cmd.output().unwrap())
}

pub fn write_file(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

pub fn assert_success(result: &CommandResult) {
    assert_eq!(
        result.exit_code, 0,
        "command failed\nstdout: {}\nstderr: {}",
        result.stdout, result.stderr
    );
}
