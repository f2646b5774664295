//! Process execution for the external formatter.
//!
//! Content goes in on stdin; stdout and stderr are drained on their own threads
//! while stdin is written so a chatty formatter can never deadlock against us.
//! There is no timeout: a call blocks until the formatter exits.

use super::FormatterError;
use std::io::{ErrorKind, Read, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Result of executing a tool.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Standard output from the tool.
    pub stdout: String,
    /// Standard error from the tool.
    pub stderr: String,
    /// Exit code (-1 when terminated by a signal).
    pub exit_code: i32,
    /// Whether the tool exited with status 0.
    pub success: bool,
}

impl ToolOutput {
    /// The line reported to the user when the tool failed.
    ///
    /// First non-blank line of stderr, then of stdout, then the exit code. A
    /// leading `[error]` tag is dropped since the marker adds its own.
    pub fn diagnostic(&self) -> String {
        let first_line = |s: &str| {
            s.lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(|l| l.strip_prefix("[error]").unwrap_or(l).trim_start().to_string())
        };
        first_line(&self.stderr)
            .or_else(|| first_line(&self.stdout))
            .unwrap_or_else(|| format!("formatter exited with code {}", self.exit_code))
    }
}

/// Runs a command with the given input on stdin.
#[derive(Debug, Clone, Default)]
pub struct ToolExecutor;

impl ToolExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Execute `command` followed by `extra_args`, feeding `input` on stdin.
    pub fn execute(
        &self,
        command: &[String],
        extra_args: &[String],
        input: &str,
    ) -> Result<ToolOutput, FormatterError> {
        let (tool_name, base_args) = command.split_first().ok_or(FormatterError::EmptyCommand)?;

        let mut cmd = Command::new(tool_name);
        cmd.args(base_args)
            .args(extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::debug!(
            "Running {tool_name} {}",
            base_args.iter().chain(extra_args).cloned().collect::<Vec<_>>().join(" ")
        );

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => FormatterError::NotFound {
                tool: tool_name.clone(),
            },
            _ => FormatterError::Io {
                tool: tool_name.clone(),
                message: format!("failed to spawn: {e}"),
            },
        })?;

        let stdout_handle = child
            .stdout
            .take()
            .map(|stdout| thread::spawn(move || read_pipe_to_string(stdout)));
        let stderr_handle = child
            .stderr
            .take()
            .map(|stderr| thread::spawn(move || read_pipe_to_string(stderr)));

        // A formatter that bails out early closes its stdin; its exit status
        // and stderr are what matter then.
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(input.as_bytes())
            && e.kind() != ErrorKind::BrokenPipe
        {
            let _ = child.kill();
            let _ = child.wait();
            return Err(FormatterError::Io {
                tool: tool_name.clone(),
                message: format!("failed to write to stdin: {e}"),
            });
        }

        let status = child.wait().map_err(|e| FormatterError::Io {
            tool: tool_name.clone(),
            message: format!("failed to wait: {e}"),
        })?;

        let io_err = |message: String| FormatterError::Io {
            tool: tool_name.clone(),
            message,
        };
        let stdout = join_reader(stdout_handle).map_err(io_err)?;
        let stderr = join_reader(stderr_handle).map_err(io_err)?;

        Ok(ToolOutput {
            stdout,
            stderr,
            exit_code: status.code().unwrap_or(-1),
            success: status.success(),
        })
    }
}

fn read_pipe_to_string<R: Read>(mut pipe: R) -> std::io::Result<String> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).to_string())
}

fn join_reader(handle: Option<thread::JoinHandle<std::io::Result<String>>>) -> Result<String, String> {
    match handle {
        Some(handle) => match handle.join() {
            Ok(res) => res.map_err(|e| format!("failed to read output: {e}")),
            Err(_) => Err("output reader thread panicked".to_string()),
        },
        None => Ok(String::new()),
    }
}
