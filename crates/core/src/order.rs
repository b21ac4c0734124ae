//! Typed order model and per-element validation.
//!
//! Input documents are duck-shaped JSON; everything downstream works on the
//! typed records produced here. An element that does not validate becomes a
//! [`ValidationWarning`], never a panic or an unchecked field access.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::warning::ValidationWarning;

/// A single item and its price within an order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemLine {
    /// Item name exactly as given.
    pub name: String,
    /// Price in the document's currency units; must be non-negative.
    pub price: f64,
}

/// One customer transaction from the input document.
///
/// Values are kept exactly as given; keying and matching never normalize
/// case or whitespace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecord {
    /// When the order was placed (epoch seconds in the document).
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Customer name.
    pub name: String,
    /// Customer phone, validated downstream against the configured pattern.
    pub phone: String,
    /// Ordered item-lines; an empty list is a valid order.
    pub items: Vec<ItemLine>,
    /// Free-form note.
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderRecord {
    /// Validate one input array element into a typed record.
    ///
    /// `index` is the element's position in the source array and is carried
    /// into the warning when validation fails; the caller skips the element
    /// and keeps going.
    pub fn from_element(index: usize, element: &Value) -> Result<Self, ValidationWarning> {
        if !element.is_object() {
            return Err(ValidationWarning::malformed(index, "not an order object"));
        }
        let record = Self::deserialize(element)
            .map_err(|e| ValidationWarning::malformed(index, e.to_string()))?;
        for line in &record.items {
            if !line.price.is_finite() || line.price < 0.0 {
                return Err(ValidationWarning::malformed(
                    index,
                    format!("item {:?} has a negative or non-finite price", line.name),
                ));
            }
        }
        Ok(record)
    }
}

/// A validated record plus its position in the source array.
///
/// The position travels with the record so warnings raised during
/// aggregation can still name the element a human should look at.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedOrder {
    pub index: usize,
    pub record: OrderRecord,
}
