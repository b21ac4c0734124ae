//! Pipeline error model.
//!
//! Only failures that abort a run live here. Anything scoped to a single
//! input record is a [`ValidationWarning`](crate::warning::ValidationWarning)
//! instead and never stops the batch.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type used across the pipeline layers.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Top-level failure for one pipeline run.
///
/// Each stage has its own error type; this enum exists so the driver can
/// carry any of them with `?` and map all of them to a non-zero exit.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input document could not be loaded.
    #[error(transparent)]
    Input(#[from] InputError),

    /// An output file could not be produced.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Configuration resolution failure.
///
/// A missing config file is not an error (defaults apply); a file that is
/// present but unusable is.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("config file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, or a recognized key has the wrong type.
    #[error("config file {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    /// `phone_pattern` is not a compilable regular expression.
    #[error("phone_pattern {pattern:?}: {source}")]
    BadPhonePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// `encoding` names an encoding this tool cannot read or write.
    #[error("unsupported encoding {0:?} (only utf-8 is supported)")]
    UnsupportedEncoding(String),
}

impl ConfigError {
    pub fn unreadable(path: &Path, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid(path: &Path, message: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Input document failure. Always fatal: there is nothing to aggregate.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input file is missing or could not be opened.
    #[error("input file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not the configured encoding, or not valid JSON.
    #[error("input file {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    /// The top-level JSON value is something other than an array.
    #[error("input file {}: expected a top-level array of orders, found {found}", path.display())]
    NotAnArray { path: PathBuf, found: &'static str },
}

impl InputError {
    pub fn unreadable(path: &Path, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn malformed(path: &Path, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn not_an_array(path: &Path, found: &'static str) -> Self {
        Self::NotAnArray {
            path: path.to_path_buf(),
            found,
        }
    }
}

/// Output file failure.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Serializing an aggregate view failed.
    #[error("serializing {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Writing or replacing an output file failed.
    #[error("output file {}: {source}", path.display())]
    Unwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutputError {
    pub fn unwritable(path: &Path, source: std::io::Error) -> Self {
        Self::Unwritable {
            path: path.to_path_buf(),
            source,
        }
    }
}
