//! End-to-end tests for the lead scoring engine.
//!
//! This crate has no library code. Tests live in `tests/` and drive
//! `ls-engine` through its config factory against wiremock model servers.
