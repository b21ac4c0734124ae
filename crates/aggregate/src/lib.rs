//! Aggregation domain module (customer directory and item catalog).
//!
//! This crate folds validated order records into the customer directory and
//! the item catalog, implemented purely as deterministic in-memory logic
//! (no IO). Both views remember first-appearance order so the writer can
//! emit either sorted or insertion-ordered documents.

pub mod customer;
pub mod item;

pub use customer::{build_customer_directory, CustomerDirectory};
pub use item::{build_item_catalog, ItemCatalog, ItemStats};
