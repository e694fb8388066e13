//! Items

use serde::Deserialize;

pub mod groups;

/// A bucket of some kind with a maximum number of units that can be drawn from it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Item {
    /// Kind of the item, unique within a group
    #[serde(rename = "type")]
    kind: String,

    /// Maximum number of units that can be drawn
    amount: i64,
}

impl Item {
    /// Creates a new item with the given kind and maximum amount.
    pub fn new(kind: impl Into<String>, amount: i64) -> Self {
        Self {
            kind: kind.into(),
            amount,
        }
    }

    /// Returns the kind of the item
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the maximum amount that can be drawn from the item.
    ///
    /// This is the raw input value; it is only guaranteed to be non-negative once
    /// the item is part of a validated [`groups::ItemGroup`].
    pub fn amount(&self) -> i64 {
        self.amount
    }
}

/// Returns the total number of units available across a list of items.
///
/// Negative amounts contribute nothing.
pub fn total_available(items: &[Item]) -> u64 {
    items
        .iter()
        .map(|item| u64::try_from(item.amount()).unwrap_or(0))
        .fold(0_u64, u64::saturating_add)
}
