//! External program execution.

use std::fmt;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A program invocation: the program, its arguments, and whether it
/// talks to the user directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or absolute path.
    pub program: String,

    /// Arguments, passed without shell interpretation.
    pub args: Vec<String>,

    /// Inherit stdio instead of capturing it (installers prompt for sudo).
    pub interactive: bool,
}

impl Invocation {
    /// Create a captured invocation.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            interactive: false,
        }
    }

    /// Mark the invocation as interactive.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of running an invocation.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty for interactive invocations).
    pub stdout: String,

    /// Standard error (empty for interactive invocations).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Run an invocation to completion.
///
/// Returns `Err` only when the program could not be spawned or waited on;
/// a non-zero exit is reported through [`CommandResult::success`].
pub fn execute(invocation: &Invocation) -> std::io::Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);

    tracing::debug!("Running: {}", invocation);

    if invocation.interactive {
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        let status = cmd.status()?;
        let duration = start.elapsed();
        return Ok(if status.success() {
            CommandResult::success(String::new(), String::new(), duration)
        } else {
            CommandResult::failure(status.code(), String::new(), String::new(), duration)
        });
    }

    let output = cmd.stdin(Stdio::null()).output()?;
    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}
