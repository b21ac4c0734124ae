//! Configuration resolution.
//!
//! Behaviour tuning comes from an optional JSON document. Every key is
//! optional; no path, or a path with no file behind it, resolves to the
//! defaults. There is no process-wide configuration: the resolved value is
//! passed explicitly through the pipeline.

use std::io::ErrorKind;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigError;

/// Default file name of the customer directory output.
pub const DEFAULT_OUTPUT_CUSTOMERS: &str = "customers.json";

/// Default file name of the item catalog output.
pub const DEFAULT_OUTPUT_ITEMS: &str = "items.json";

/// Default phone pattern: `xxx-xxx-xxxx` with ASCII digits.
pub const DEFAULT_PHONE_PATTERN: &str = r"^\d{3}-\d{3}-\d{4}$";

/// Default pretty-print indent width.
pub const DEFAULT_INDENT: usize = 4;

/// On-disk configuration document.
///
/// Unrecognized keys are ignored so older builds keep accepting newer files.
/// A recognized key with the wrong JSON type fails the parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub output_customers: Option<String>,
    pub output_items: Option<String>,
    pub phone_pattern: Option<String>,
    pub sort_output: Option<bool>,
    pub encoding: Option<String>,
    pub indent: Option<usize>,
}

impl ConfigFile {
    /// Parse a configuration document from JSON text.
    pub fn from_json(path: &Path, raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::invalid(path, e.to_string()))
    }
}

/// Compiled phone matcher.
///
/// Compiled once at resolution time and reused for every order; an
/// uncompilable pattern surfaces as a [`ConfigError`] before any input is
/// read.
#[derive(Debug, Clone)]
pub struct PhonePattern {
    pattern: String,
    regex: Regex,
}

impl PhonePattern {
    pub fn compile(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::BadPhonePattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Whether a phone value satisfies the pattern.
    pub fn matches(&self, phone: &str) -> bool {
        self.regex.is_match(phone)
    }

    /// The pattern source text.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl Default for PhonePattern {
    fn default() -> Self {
        Self::compile(DEFAULT_PHONE_PATTERN).expect("default phone pattern must compile")
    }
}

impl PartialEq for PhonePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

/// Text encoding for the input and output documents.
///
/// Only UTF-8 is supported. The key is still validated so a misspelled value
/// fails at resolution time instead of being silently ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
}

impl Encoding {
    /// Parse a config-file encoding name (case-insensitive).
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        if name.eq_ignore_ascii_case("utf-8") || name.eq_ignore_ascii_case("utf8") {
            Ok(Self::Utf8)
        } else {
            Err(ConfigError::UnsupportedEncoding(name.to_string()))
        }
    }

    /// Canonical name of the encoding.
    pub fn name(self) -> &'static str {
        "utf-8"
    }
}

/// Fully resolved runtime configuration: every option populated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// File name of the customer directory output.
    pub output_customers: String,
    /// File name of the item catalog output.
    pub output_items: String,
    /// Matcher a phone value must satisfy to enter the customer directory.
    pub phone_pattern: PhonePattern,
    /// Emit output maps in ascending key order instead of first-appearance
    /// order.
    pub sort_output: bool,
    /// Input and output text encoding.
    pub encoding: Encoding,
    /// Pretty-print indent width; `0` writes compact JSON.
    pub indent: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_customers: DEFAULT_OUTPUT_CUSTOMERS.to_string(),
            output_items: DEFAULT_OUTPUT_ITEMS.to_string(),
            phone_pattern: PhonePattern::default(),
            sort_output: true,
            encoding: Encoding::Utf8,
            indent: DEFAULT_INDENT,
        }
    }
}

impl ResolvedConfig {
    /// Resolve configuration from an optional config file path.
    ///
    /// A file that exists but cannot be read or parsed is a [`ConfigError`];
    /// an absent file is not.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no config file at {}; using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::unreadable(path, e)),
        };
        let file = ConfigFile::from_json(path, &raw)?;
        let config = Self::from_file(file)?;
        tracing::debug!(
            "config {}: phone pattern {}, {} encoding",
            path.display(),
            config.phone_pattern.as_str(),
            config.encoding.name()
        );
        Ok(config)
    }

    /// Lay a parsed document over the defaults.
    pub fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let phone_pattern = match file.phone_pattern {
            Some(pattern) => PhonePattern::compile(&pattern)?,
            None => PhonePattern::default(),
        };
        let encoding = match file.encoding {
            Some(name) => Encoding::parse(&name)?,
            None => Encoding::Utf8,
        };
        Ok(Self {
            output_customers: file
                .output_customers
                .unwrap_or_else(|| DEFAULT_OUTPUT_CUSTOMERS.to_string()),
            output_items: file
                .output_items
                .unwrap_or_else(|| DEFAULT_OUTPUT_ITEMS.to_string()),
            phone_pattern,
            sort_output: file.sort_output.unwrap_or(true),
            encoding,
            indent: file.indent.unwrap_or(DEFAULT_INDENT),
        })
    }
}
