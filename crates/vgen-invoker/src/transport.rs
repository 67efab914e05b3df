//! Transports that carry a generation request to the backend.

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use vgen_models::VideoGenerationRequest;

use crate::command::{check_tool, ExternalProcessOutcome, ProcessRunner, ToolCallCommand};
use crate::config::{ExecMode, InvokerConfig};
use crate::error::InvokeResult;

/// A way of reaching the external generation backend.
///
/// Implementations perform exactly one attempt per call and report what the
/// backend produced; interpreting that output is left to the invoker.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// Short transport name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Send the request and capture the backend's raw output.
    async fn call(
        &self,
        request: &VideoGenerationRequest,
        cancel_rx: Option<watch::Receiver<bool>>,
    ) -> InvokeResult<ExternalProcessOutcome>;

    /// Check whether the transport can currently be used.
    fn check_ready(&self) -> InvokeResult<()>;
}

/// Transport that shells out to the tool-call CLI.
#[derive(Debug, Clone)]
pub struct ProcessTransport {
    config: InvokerConfig,
}

impl ProcessTransport {
    pub fn new(config: InvokerConfig) -> Self {
        Self { config }
    }

    /// Build the command for a request.
    pub fn command_for(&self, request: &VideoGenerationRequest) -> InvokeResult<ToolCallCommand> {
        Ok(ToolCallCommand::new(
            &self.config.tool_binary,
            &self.config.tool_name,
            &self.config.server_id,
            request.to_payload()?,
        ))
    }
}

#[async_trait]
impl GenerationTransport for ProcessTransport {
    fn name(&self) -> &'static str {
        "process"
    }

    async fn call(
        &self,
        request: &VideoGenerationRequest,
        cancel_rx: Option<watch::Receiver<bool>>,
    ) -> InvokeResult<ExternalProcessOutcome> {
        let cmd = self.command_for(request)?;
        let runner = ProcessRunner::new(self.config.max_output_bytes)
            .with_timeout(self.config.timeout)
            .with_cancel(cancel_rx);

        match self.config.exec_mode {
            ExecMode::Direct => {
                check_tool(cmd.binary())?;
                debug!(
                    binary = cmd.binary(),
                    tool = %self.config.tool_name,
                    server = %self.config.server_id,
                    "Calling generation tool"
                );
                runner.run(cmd.binary(), &cmd.build_args()).await
            }
            ExecMode::Shell => {
                let line = cmd.to_shell_line();
                debug!(command_len = line.len(), "Calling generation tool through sh");
                runner.run("sh", &["-c".to_string(), line]).await
            }
        }
    }

    fn check_ready(&self) -> InvokeResult<()> {
        check_tool(&self.config.tool_binary).map(|_| ())
    }
}
