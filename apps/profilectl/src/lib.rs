//! # profilectl
//!
//! Library half of the `profilectl` binary: CLI definitions, command
//! implementations and startup configuration, exposed for integration tests.

pub mod cli;
pub mod config;
