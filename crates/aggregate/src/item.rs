//! Item catalog aggregation.

use std::collections::HashMap;

use serde::Serialize;

use ordermill_core::{LoadedOrder, ValidationWarning};

/// Pricing and frequency statistics for one catalog item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStats {
    /// Last-seen price; the most recent order is authoritative.
    pub price: f64,
    /// Item-lines seen for this name across all orders (not distinct orders).
    pub orders: u64,
}

/// Item-name→stats mapping in first-appearance order.
///
/// Names are matched by exact string equality; no case-folding, no trimming.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCatalog {
    /// `(name, stats)` pairs in first-appearance order.
    entries: Vec<(String, ItemStats)>,
    /// name → position in `entries`.
    positions: HashMap<String, usize>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one order's item-lines into the catalog.
    ///
    /// Every line counts, including repeats of the same item within one
    /// order. Lines with an empty name are skipped with a warning.
    pub fn observe(&mut self, order: &LoadedOrder, warnings: &mut Vec<ValidationWarning>) {
        for line in &order.record.items {
            if line.name.is_empty() {
                warnings.push(ValidationWarning::EmptyItemName { index: order.index });
                continue;
            }
            match self.positions.get(&line.name) {
                None => {
                    self.positions.insert(line.name.clone(), self.entries.len());
                    self.entries.push((
                        line.name.clone(),
                        ItemStats {
                            price: line.price,
                            orders: 1,
                        },
                    ));
                }
                Some(&position) => {
                    let stats = &mut self.entries[position].1;
                    if stats.price != line.price {
                        tracing::debug!(
                            "item {:?}: price {} -> {}; keeping the latest",
                            line.name,
                            stats.price,
                            line.price
                        );
                    }
                    stats.price = line.price;
                    stats.orders += 1;
                }
            }
        }
    }

    /// Stats recorded for an item name, if any.
    pub fn stats_for(&self, name: &str) -> Option<&ItemStats> {
        self.positions
            .get(name)
            .map(|&position| &self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, stats)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemStats)> {
        self.entries
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
    }

    /// Total item-lines folded in; equals the sum of every entry's count.
    pub fn total_lines(&self) -> u64 {
        self.entries.iter().map(|(_, stats)| stats.orders).sum()
    }
}

/// Fold a batch of orders into a fresh catalog.
pub fn build_item_catalog(orders: &[LoadedOrder]) -> (ItemCatalog, Vec<ValidationWarning>) {
    let mut catalog = ItemCatalog::new();
    let mut warnings = Vec::new();
    for order in orders {
        catalog.observe(order, &mut warnings);
    }
    (catalog, warnings)
}
