//! Tool call command builder and runner.

use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_MAX_OUTPUT_BYTES;
use crate::error::{InvokeError, InvokeResult};
use crate::interrupt::{race, Interrupt};

/// Captured result of one external process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProcessOutcome {
    /// Exit code (None if terminated by a signal)
    pub exit_code: Option<i32>,
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl ExternalProcessOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Builder for `<binary> tool call <tool> --server <server> --input <json>`.
#[derive(Debug, Clone)]
pub struct ToolCallCommand {
    /// Tool binary name or path
    binary: String,
    /// Tool identifier
    tool_name: String,
    /// Server identifier
    server_id: String,
    /// Serialized request payload
    input: String,
}

impl ToolCallCommand {
    /// Create a new tool call command.
    pub fn new(
        binary: impl Into<String>,
        tool_name: impl Into<String>,
        server_id: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            binary: binary.into(),
            tool_name: tool_name.into(),
            server_id: server_id.into(),
            input: input.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Build the argv passed to the binary (payload is one argument, unescaped).
    pub fn build_args(&self) -> Vec<String> {
        vec![
            "tool".to_string(),
            "call".to_string(),
            self.tool_name.clone(),
            "--server".to_string(),
            self.server_id.clone(),
            "--input".to_string(),
            self.input.clone(),
        ]
    }

    /// Render the full command line for `sh -c`.
    ///
    /// The payload is always single-quoted; the fixed identifiers are quoted
    /// only when they contain characters the shell would interpret.
    pub fn to_shell_line(&self) -> String {
        format!(
            "{} tool call {} --server {} --input {}",
            quote_if_needed(&self.binary),
            quote_if_needed(&self.tool_name),
            quote_if_needed(&self.server_id),
            shell_quote(&self.input),
        )
    }
}

/// Wrap `value` in single quotes, rewriting each `'` as `'\''`.
///
/// Inside single quotes the shell interprets nothing, so the only way to end
/// the argument early is a literal quote; closing, emitting an escaped quote
/// and reopening keeps the argument intact.
pub fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    quoted.push_str(&value.replace('\'', r"'\''"));
    quoted.push('\'');
    quoted
}

fn quote_if_needed(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | '@' | '+'));
    if plain {
        value.to_string()
    } else {
        shell_quote(value)
    }
}

/// Runner for external processes with bounded capture, timeout and cancellation.
pub struct ProcessRunner {
    /// Per-stream capture limit in bytes
    max_output_bytes: usize,
    /// Deadline for the whole run
    timeout: Option<Duration>,
    /// Cancellation signal receiver
    cancel_rx: Option<watch::Receiver<bool>>,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OUTPUT_BYTES)
    }
}

impl ProcessRunner {
    /// Create a new runner.
    pub fn new(max_output_bytes: usize) -> Self {
        Self {
            max_output_bytes,
            timeout: None,
            cancel_rx: None,
        }
    }

    /// Set timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set cancellation signal.
    pub fn with_cancel(mut self, cancel_rx: Option<watch::Receiver<bool>>) -> Self {
        self.cancel_rx = cancel_rx;
        self
    }

    /// Run `program` with `args` and capture its output.
    ///
    /// A non-zero exit is not an error here; callers decide what it means.
    /// The child is killed if the deadline passes, the run is cancelled, or
    /// either stream exceeds the capture limit.
    pub async fn run(&self, program: &str, args: &[String]) -> InvokeResult<ExternalProcessOutcome> {
        debug!(program, arg_count = args.len(), "Spawning external tool");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("stdout not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("stderr not captured"))?;

        let limit = self.max_output_bytes;
        let raced = {
            let capture = async {
                let (stdout, stderr) = tokio::try_join!(
                    read_capped(stdout, limit, "stdout"),
                    read_capped(stderr, limit, "stderr"),
                )?;
                let status = child.wait().await?;
                Ok::<_, InvokeError>(ExternalProcessOutcome {
                    exit_code: status.code(),
                    stdout,
                    stderr,
                })
            };
            race(capture, self.timeout, self.cancel_rx.clone()).await
        };

        match raced {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(e)) => {
                if let InvokeError::OutputLimit { stream, limit } = &e {
                    warn!(stream, limit, "External tool output exceeded capture limit, killing process");
                }
                let _ = child.kill().await;
                Err(e)
            }
            Err(interrupt) => {
                match interrupt {
                    Interrupt::Timeout => warn!(
                        timeout_secs = self.timeout.map(|d| d.as_secs()).unwrap_or(0),
                        "External tool timed out, killing process"
                    ),
                    Interrupt::Cancelled => info!("External tool cancelled, killing process"),
                }
                let _ = child.kill().await;
                Err(interrupt.into_error(self.timeout))
            }
        }
    }
}

/// Read a stream to EOF, failing once more than `limit` bytes arrive.
async fn read_capped<R>(reader: R, limit: usize, stream: &'static str) -> InvokeResult<String>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let mut limited = reader.take(limit as u64 + 1);
    limited.read_to_end(&mut buf).await?;

    if buf.len() > limit {
        return Err(InvokeError::OutputLimit { stream, limit });
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Check if the tool binary is available.
pub fn check_tool(binary: &str) -> InvokeResult<std::path::PathBuf> {
    which::which(binary).map_err(|_| InvokeError::ToolNotFound(binary.to_string()))
}
