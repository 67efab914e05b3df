//! Invoker configuration.

use std::str::FromStr;
use std::time::Duration;

use crate::error::InvokeError;

/// Default command-line intermediary.
pub const DEFAULT_TOOL_BINARY: &str = "manus-mcp-cli";

/// Default tool identifier on the generation server.
pub const DEFAULT_TOOL_NAME: &str = "generate-video-from-script";

/// Default generation server identifier.
pub const DEFAULT_SERVER_ID: &str = "invideo";

/// Default per-stream output capture limit (10MB).
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Default deadline for one generation call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// How the process transport launches the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// Pass argv straight to the OS.
    #[default]
    Direct,
    /// Run the quoted command line through `sh -c`.
    Shell,
}

impl FromStr for ExecMode {
    type Err = InvokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(ExecMode::Direct),
            "shell" => Ok(ExecMode::Shell),
            other => Err(InvokeError::config(format!("unknown exec mode '{}'", other))),
        }
    }
}

/// Which transport reaches the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransportKind {
    /// Command-line intermediary.
    #[default]
    Process,
    /// HTTP gateway at the given endpoint.
    Http { endpoint: String },
}

/// Video generation invoker configuration.
#[derive(Debug, Clone)]
pub struct InvokerConfig {
    /// Tool binary name or path
    pub tool_binary: String,
    /// Tool identifier passed to `tool call`
    pub tool_name: String,
    /// Server identifier passed to `--server`
    pub server_id: String,
    /// Process launch mode
    pub exec_mode: ExecMode,
    /// Per-stream capture limit in bytes
    pub max_output_bytes: usize,
    /// Deadline for one call (None = wait indefinitely)
    pub timeout: Option<Duration>,
    /// Transport selection
    pub transport: TransportKind,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            tool_binary: DEFAULT_TOOL_BINARY.to_string(),
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            server_id: DEFAULT_SERVER_ID.to_string(),
            exec_mode: ExecMode::Direct,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            transport: TransportKind::Process,
        }
    }
}

impl InvokerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, InvokeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvokeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let exec_mode = match lookup("VGEN_EXEC_MODE") {
            Some(value) => value.parse()?,
            None => defaults.exec_mode,
        };

        let timeout_secs = parse_number(&lookup, "VGEN_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let max_output_bytes =
            parse_number(&lookup, "VGEN_MAX_OUTPUT_BYTES", defaults.max_output_bytes)?;

        let transport = match lookup("VGEN_TRANSPORT")
            .unwrap_or_else(|| "process".to_string())
            .to_lowercase()
            .as_str()
        {
            "process" => TransportKind::Process,
            "http" => {
                let endpoint = lookup("VGEN_HTTP_ENDPOINT").ok_or_else(|| {
                    InvokeError::config("VGEN_HTTP_ENDPOINT is required when VGEN_TRANSPORT=http")
                })?;
                TransportKind::Http { endpoint }
            }
            other => {
                return Err(InvokeError::config(format!("unknown transport '{}'", other)));
            }
        };

        Ok(Self {
            tool_binary: lookup("VGEN_TOOL_BINARY").unwrap_or(defaults.tool_binary),
            tool_name: lookup("VGEN_TOOL_NAME").unwrap_or(defaults.tool_name),
            server_id: lookup("VGEN_SERVER_ID").unwrap_or(defaults.server_id),
            exec_mode,
            max_output_bytes,
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            transport,
        })
    }

    pub fn with_tool_binary(mut self, binary: impl Into<String>) -> Self {
        self.tool_binary = binary.into();
        self
    }

    pub fn with_exec_mode(mut self, mode: ExecMode) -> Self {
        self.exec_mode = mode;
        self
    }

    pub fn with_max_output_bytes(mut self, bytes: usize) -> Self {
        self.max_output_bytes = bytes;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_number<F, T>(lookup: &F, key: &str, default: T) -> Result<T, InvokeError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| {
            InvokeError::config(format!("{} must be a non-negative integer, got '{}'", key, value))
        }),
        None => Ok(default),
    }
}
