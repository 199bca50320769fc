//! Quota apportionment of procurement items.
//!
//! Items up to the threshold are reserved entirely for micro and small
//! enterprises. Larger items are split: a reserved share (capped at the
//! threshold, rounded down to whole units) and the open-competition
//! remainder.

use tracing::{debug, trace};

use super::item::{Classification, ClassifiedDataset, ClassifiedItem, Item, ItemDataset};
use crate::common::{Error, Result};

/// The apportionment rule.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaRule {
    /// Items valued up to this amount are fully reserved; it also caps the
    /// reserved share of larger items
    pub threshold: f64,
    /// Fraction of a large item's value set aside before capping
    pub reserved_share: f64,
    /// Appended to the description of a reserved split row
    pub legal_basis_suffix: &'static str,
}

impl Default for QuotaRule {
    /// The rule of Lei Complementar nº 123/2006, art. 48.
    fn default() -> Self {
        Self {
            threshold: 80_000.0,
            reserved_share: 0.25,
            legal_basis_suffix: " - Respeitando o limite de até 25% em cumprimento à LEI COMPLEMENTAR Nº 123, DE 14 DE DEZEMBRO DE 2006",
        }
    }
}

/// How a single item was apportioned.
#[derive(Debug, Clone, PartialEq)]
pub enum Apportionment {
    /// The whole item is reserved
    Reserved(ClassifiedItem),
    /// The item was split; the reserved part is absent when it rounds to zero
    Split {
        open: ClassifiedItem,
        reserved: Option<ClassifiedItem>,
    },
}

impl Apportionment {
    /// The output rows, open-competition row first.
    pub fn into_rows(self) -> impl Iterator<Item = ClassifiedItem> {
        let (first, second) = match self {
            Apportionment::Reserved(item) => (item, None),
            Apportionment::Split { open, reserved } => (open, reserved),
        };
        std::iter::once(first).chain(second)
    }
}

impl QuotaRule {
    /// Apportion one item.
    ///
    /// Fails with [`Error::InvalidItem`] if the quantity or value is not
    /// finite, or if an item above the threshold has no positive quantity.
    pub fn apportion(&self, item: &Item) -> Result<Apportionment> {
        let value = item.estimated_value;
        let quantity = item.quantity;

        if !value.is_finite() || !quantity.is_finite() {
            return Err(invalid(item, "quantity and estimated value must be finite numbers"));
        }

        if value <= self.threshold {
            return Ok(Apportionment::Reserved(ClassifiedItem {
                item: item.clone(),
                classification: Classification::ReservedQuota,
            }));
        }

        if quantity <= 0.0 {
            return Err(invalid(
                item,
                format!("quantity must be positive to split the item, got {}", quantity),
            ));
        }

        let mut reserved_value = value * self.reserved_share;
        if reserved_value > self.threshold {
            reserved_value = self.threshold;
        }
        let reserved_quantity = ((quantity * reserved_value) / value).floor();
        let reserved_value = (value / quantity) * reserved_quantity;

        let open = ClassifiedItem {
            item: Item {
                quantity: quantity - reserved_quantity,
                estimated_value: value - reserved_value,
                ..item.clone()
            },
            classification: Classification::OpenCompetition,
        };

        let reserved = (reserved_value != 0.0).then(|| ClassifiedItem {
            item: Item {
                description: format!("{}{}", item.description, self.legal_basis_suffix),
                quantity: reserved_quantity,
                estimated_value: reserved_value,
                ..item.clone()
            },
            classification: Classification::ReservedQuota,
        });

        trace!(
            item = %item.label(),
            reserved_quantity,
            reserved_value,
            "split item"
        );

        Ok(Apportionment::Split { open, reserved })
    }
}

/// Classify every item of a dataset, preserving item order.
///
/// An invalid item rejects the whole dataset.
pub fn classify(dataset: &ItemDataset, rule: &QuotaRule) -> Result<ClassifiedDataset> {
    let mut rows = Vec::with_capacity(dataset.len() * 2);
    for item in dataset.items() {
        rows.extend(rule.apportion(item)?.into_rows());
    }

    debug!(items = dataset.len(), rows = rows.len(), "classified items");
    Ok(ClassifiedDataset::new(dataset.layout(), rows))
}

fn invalid(item: &Item, reason: impl Into<String>) -> Error {
    Error::InvalidItem {
        item: item.label(),
        reason: reason.into(),
    }
}
