//! Shell and Python command execution

use crate::dispatch::{CommandRunner, Interpreter};
use crate::error::DispatchError;
use std::process::{Command, ExitStatus, Stdio};

/// Environment variable that overrides the shell used for command lines.
pub const SHELL_ENV: &str = "DOIT_SHELL";

/// Runs command lines through a shell, and `>>>` lines through Python, with
/// inherited stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRunner {
    program: String,
    flag: &'static str,
}

impl ShellRunner {
    /// Use `program`, passing the command after the flag it expects.
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        let flag = command_flag(&program);
        Self { program, flag }
    }

    /// Pick the shell from `DOIT_SHELL`, otherwise the platform default.
    #[must_use]
    pub fn from_env() -> Self {
        let shell = if let Ok(custom_shell) = std::env::var(SHELL_ENV) {
            custom_shell
        } else if cfg!(target_os = "windows") {
            // Prefer PowerShell 7+ over Windows PowerShell
            if which::which("pwsh").is_ok() {
                "pwsh".to_string()
            } else {
                "powershell".to_string()
            }
        } else {
            "sh".to_string()
        };
        Self::new(shell)
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, interpreter: Interpreter, command: &str) -> Result<i32, DispatchError> {
        let (program, flag) = match interpreter {
            Interpreter::Shell => (self.program.as_str(), self.flag),
            Interpreter::Python => (python_executable(), "-c"),
        };
        let status = Command::new(program)
            .arg(flag)
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| DispatchError::Spawn {
                command: command.to_string(),
                source,
            })?;
        Ok(status_code(status))
    }
}

/// `python3` when it is on the PATH, otherwise `python`.
fn python_executable() -> &'static str {
    if which::which("python3").is_ok() {
        "python3"
    } else {
        "python"
    }
}

fn command_flag(program: &str) -> &'static str {
    let name = std::path::Path::new(program)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(program)
        .to_ascii_lowercase();
    match name.as_str() {
        "pwsh" | "powershell" => "-Command",
        "cmd" => "/C",
        _ => "-c",
    }
}

#[cfg(unix)]
fn status_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn status_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
