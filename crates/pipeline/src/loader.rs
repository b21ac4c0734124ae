//! Input document loading and per-element validation.

use std::path::Path;

use serde_json::Value;

use ordermill_core::{Encoding, InputError, LoadedOrder, OrderRecord, ValidationWarning};

/// Result of loading one input document.
#[derive(Debug)]
pub struct LoadedBatch {
    /// Validated records in input order.
    pub orders: Vec<LoadedOrder>,
    /// Elements rejected by per-element validation.
    pub skipped: usize,
    /// One warning per skipped element.
    pub warnings: Vec<ValidationWarning>,
}

/// Read, parse, and validate the input document.
///
/// Failures of the document itself (unreadable file, wrong encoding,
/// malformed JSON, a non-array top level) are fatal [`InputError`]s. A bad
/// element inside the array is skipped with a warning and the batch keeps
/// going.
pub fn load_orders(path: &Path, encoding: Encoding) -> Result<LoadedBatch, InputError> {
    let bytes = std::fs::read(path).map_err(|e| InputError::unreadable(path, e))?;
    let text = decode(path, bytes, encoding)?;
    let root: Value =
        serde_json::from_str(&text).map_err(|e| InputError::malformed(path, e.to_string()))?;
    let elements = match root {
        Value::Array(elements) => elements,
        other => return Err(InputError::not_an_array(path, json_type_name(&other))),
    };

    let mut orders = Vec::with_capacity(elements.len());
    let mut warnings = Vec::new();
    let mut skipped = 0;
    for (index, element) in elements.iter().enumerate() {
        match OrderRecord::from_element(index, element) {
            Ok(record) => orders.push(LoadedOrder { index, record }),
            Err(warning) => {
                skipped += 1;
                warnings.push(warning);
            }
        }
    }

    Ok(LoadedBatch {
        orders,
        skipped,
        warnings,
    })
}

fn decode(path: &Path, bytes: Vec<u8>, encoding: Encoding) -> Result<String, InputError> {
    match encoding {
        Encoding::Utf8 => String::from_utf8(bytes)
            .map_err(|e| InputError::malformed(path, format!("not valid utf-8: {e}"))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
