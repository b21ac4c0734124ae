//! Per-record validation warnings.
//!
//! A warning marks one record (or one item-line) that could not contribute to
//! an output. Warnings are collected during the run and reported at the end;
//! they never fail the process.

use thiserror::Error;

/// One skipped or partially used input record.
///
/// `index` is the record's position in the source array, so a human can find
/// the offending element in the input file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The array element was not a usable order object and was skipped
    /// entirely (missing required field, wrong field type, not an object).
    #[error("order[{index}] skipped: {reason}")]
    MalformedOrder { index: usize, reason: String },

    /// The phone value does not match the configured pattern. The order is
    /// left out of the customer directory; its items still count.
    #[error("order[{index}]: phone {phone:?} does not match the phone pattern")]
    PhoneFormat { index: usize, phone: String },

    /// The customer name is empty. The order is left out of the customer
    /// directory; its items still count.
    #[error("order[{index}]: empty customer name")]
    EmptyCustomerName { index: usize },

    /// A later order spelled an already-known phone's name differently.
    /// The first-seen name stays.
    #[error("order[{index}]: phone {phone} already maps to {kept:?}; ignoring {ignored:?}")]
    NameConflict {
        index: usize,
        phone: String,
        kept: String,
        ignored: String,
    },

    /// An item-line has an empty name and was skipped.
    #[error("order[{index}]: item-line with empty name skipped")]
    EmptyItemName { index: usize },
}

impl ValidationWarning {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedOrder {
            index,
            reason: reason.into(),
        }
    }
}
