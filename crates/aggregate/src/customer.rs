//! Customer directory aggregation.

use std::collections::HashMap;

use ordermill_core::{LoadedOrder, PhonePattern, ValidationWarning};

/// Phone→name mapping in first-appearance order.
///
/// Keys are unique. The first-seen name for a phone wins; a later order with
/// a different spelling raises a warning and changes nothing. Matching is
/// exact string equality, no normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDirectory {
    /// `(phone, name)` pairs in first-appearance order.
    entries: Vec<(String, String)>,
    /// phone → position in `entries`.
    positions: HashMap<String, usize>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one order into the directory.
    ///
    /// A rejection here is scoped to this output: the same order still
    /// contributes to the item catalog.
    pub fn observe(
        &mut self,
        order: &LoadedOrder,
        pattern: &PhonePattern,
        warnings: &mut Vec<ValidationWarning>,
    ) {
        let record = &order.record;
        if !pattern.matches(&record.phone) {
            warnings.push(ValidationWarning::PhoneFormat {
                index: order.index,
                phone: record.phone.clone(),
            });
            return;
        }
        if record.name.is_empty() {
            warnings.push(ValidationWarning::EmptyCustomerName { index: order.index });
            return;
        }
        match self.positions.get(&record.phone) {
            None => {
                self.positions
                    .insert(record.phone.clone(), self.entries.len());
                self.entries
                    .push((record.phone.clone(), record.name.clone()));
            }
            Some(&position) => {
                let kept = &self.entries[position].1;
                if *kept != record.name {
                    tracing::debug!(
                        "phone {}: name {:?} -> {:?}; keeping the first",
                        record.phone,
                        kept,
                        record.name
                    );
                    warnings.push(ValidationWarning::NameConflict {
                        index: order.index,
                        phone: record.phone.clone(),
                        kept: kept.clone(),
                        ignored: record.name.clone(),
                    });
                }
            }
        }
    }

    /// Name registered for a phone, if any.
    pub fn name_for(&self, phone: &str) -> Option<&str> {
        self.positions
            .get(phone)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(phone, name)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(phone, name)| (phone.as_str(), name.as_str()))
    }
}

/// Fold a batch of orders into a fresh directory.
pub fn build_customer_directory(
    orders: &[LoadedOrder],
    pattern: &PhonePattern,
) -> (CustomerDirectory, Vec<ValidationWarning>) {
    let mut directory = CustomerDirectory::new();
    let mut warnings = Vec::new();
    for order in orders {
        directory.observe(order, pattern, &mut warnings);
    }
    (directory, warnings)
}
