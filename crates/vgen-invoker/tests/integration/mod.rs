//! Integration tests for the invoker against a fake tool-call CLI.

#[cfg(unix)]
pub mod fake_tool;
#[cfg(unix)]
pub mod invoke_tests;
