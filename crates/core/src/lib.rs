//! `ordermill-core` — pipeline foundation building blocks.
//!
//! This crate contains **pure pipeline** primitives (configuration, the typed
//! order model, the error and warning taxonomy); file I/O lives elsewhere.

pub mod config;
pub mod error;
pub mod order;
pub mod warning;

pub use config::{
    ConfigFile, Encoding, PhonePattern, ResolvedConfig, DEFAULT_INDENT, DEFAULT_OUTPUT_CUSTOMERS,
    DEFAULT_OUTPUT_ITEMS, DEFAULT_PHONE_PATTERN,
};
pub use error::{ConfigError, InputError, OutputError, PipelineError, PipelineResult};
pub use order::{ItemLine, LoadedOrder, OrderRecord};
pub use warning::ValidationWarning;
