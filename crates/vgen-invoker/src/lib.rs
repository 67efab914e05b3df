#![deny(unreachable_patterns)]
//! External video generation CLI wrapper.
//!
//! This crate provides:
//! - Request serialization into a tool-call payload
//! - Shell-safe command building for the tool-call CLI
//! - Bounded output capture with timeout and cancellation
//! - Pluggable transports (process, HTTP gateway)
//! - Response parsing into a tagged result

pub mod command;
pub mod config;
pub mod error;
pub mod http;
mod interrupt;
pub mod invoker;
pub mod metrics;
pub mod response;
pub mod transport;

pub use command::{check_tool, shell_quote, ExternalProcessOutcome, ProcessRunner, ToolCallCommand};
pub use config::{ExecMode, InvokerConfig, TransportKind};
pub use error::{InvokeError, InvokeResult};
pub use http::HttpTransport;
pub use invoker::{VideoJobInvoker, PARSE_FAILURE_REASON, UNKNOWN_ERROR_REASON};
pub use response::{extract_video_url, ResponseError};
pub use transport::{GenerationTransport, ProcessTransport};
