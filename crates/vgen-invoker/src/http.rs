//! HTTP transport to an MCP tool gateway.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use vgen_models::VideoGenerationRequest;

use crate::command::ExternalProcessOutcome;
use crate::config::InvokerConfig;
use crate::error::{InvokeError, InvokeResult};
use crate::interrupt::race;
use crate::transport::GenerationTransport;

/// Tool call body posted to the gateway.
#[derive(Debug, Serialize)]
struct ToolCallBody<'a> {
    tool: &'a str,
    server: &'a str,
    input: &'a VideoGenerationRequest,
}

/// Transport that posts tool calls to an HTTP gateway.
///
/// The response body plays the role of the CLI's standard output.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    config: InvokerConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(endpoint: impl Into<String>, config: InvokerConfig) -> InvokeResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(InvokeError::config("HTTP endpoint must not be empty"));
        }

        Ok(Self {
            client: Client::builder().build()?,
            endpoint,
            config,
        })
    }

    async fn post(&self, request: &VideoGenerationRequest) -> InvokeResult<ExternalProcessOutcome> {
        let body = ToolCallBody {
            tool: &self.config.tool_name,
            server: &self.config.server_id,
            input: request,
        };

        debug!(endpoint = %self.endpoint, tool = %self.config.tool_name, "Posting tool call");

        let mut response = self.client.post(&self.endpoint).json(&body).send().await?;

        let limit = self.config.max_output_bytes;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            // Error bodies are truncated rather than rejected so the status still surfaces.
            let (body, _) = read_body(&mut response, limit).await.unwrap_or_default();
            return Err(InvokeError::BackendStatus {
                status,
                body: String::from_utf8_lossy(&body).trim().to_string(),
            });
        }

        let (bytes, truncated) = read_body(&mut response, limit).await?;
        if truncated {
            return Err(InvokeError::OutputLimit {
                stream: "response",
                limit,
            });
        }

        Ok(ExternalProcessOutcome {
            exit_code: Some(0),
            stdout: String::from_utf8_lossy(&bytes).into_owned(),
            stderr: String::new(),
        })
    }
}

/// Read at most `limit` bytes of the body. The flag is set when more was available.
async fn read_body(response: &mut Response, limit: usize) -> InvokeResult<(Vec<u8>, bool)> {
    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - bytes.len();
        if chunk.len() > room {
            bytes.extend_from_slice(&chunk[..room]);
            return Ok((bytes, true));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok((bytes, false))
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn call(
        &self,
        request: &VideoGenerationRequest,
        cancel_rx: Option<watch::Receiver<bool>>,
    ) -> InvokeResult<ExternalProcessOutcome> {
        let timeout = self.config.timeout;
        race(self.post(request), timeout, cancel_rx)
            .await
            .map_err(|interrupt| interrupt.into_error(timeout))?
    }

    fn check_ready(&self) -> InvokeResult<()> {
        Ok(())
    }
}
