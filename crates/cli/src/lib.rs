//! Command-line surface for the order pipeline.
//!
//! Thin layer over the pipeline: parse arguments, resolve configuration,
//! run, report the outcome.

pub mod commands;

pub use commands::{execute, Cli, Commands};
