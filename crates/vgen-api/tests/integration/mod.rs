//! Router-level tests with a stubbed generation transport.

pub mod api_tests;
