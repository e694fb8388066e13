//! Item Groups

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    items::Item,
    solvers::{Solver, SolverError, SolverResult, tree::TreeSolver},
};

/// Errors related to item group construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemGroupError {
    /// An item declares a negative maximum amount.
    #[error("Item {kind:?} has invalid amount {amount}, amounts must not be negative")]
    InvalidAmount {
        /// Kind of the offending item
        kind: String,

        /// The negative amount
        amount: i64,
    },

    /// Two items share the same kind.
    #[error("Item type {0:?} appears more than once")]
    DuplicateType(String),

    /// An item was not found in the item group.
    #[error("Item {0} not found")]
    ItemNotFound(usize),
}

/// A validated, ordered list of items.
///
/// Every item has a non-negative amount and a kind that is unique within the group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemGroup {
    items: SmallVec<[Item; 8]>,
}

impl ItemGroup {
    /// Create a new item group, validating every item.
    ///
    /// # Errors
    ///
    /// Returns [`ItemGroupError::InvalidAmount`] if any amount is negative, or
    /// [`ItemGroupError::DuplicateType`] if a kind appears more than once.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Result<Self, ItemGroupError> {
        let items: SmallVec<[Item; 8]> = items.into_iter().collect();
        let mut seen = FxHashSet::default();

        for item in &items {
            if item.amount() < 0 {
                return Err(ItemGroupError::InvalidAmount {
                    kind: item.kind().to_string(),
                    amount: item.amount(),
                });
            }

            if !seen.insert(item.kind()) {
                return Err(ItemGroupError::DuplicateType(item.kind().to_string()));
            }
        }

        Ok(Self { items })
    }

    /// Iterate over the items in the group.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Get an item from the group by its index.
    ///
    /// # Errors
    ///
    /// Returns a `ItemGroupError::ItemNotFound` if the item is not found.
    pub fn get_item(&self, item: usize) -> Result<&Item, ItemGroupError> {
        self.items
            .get(item)
            .ok_or(ItemGroupError::ItemNotFound(item))
    }

    /// Get the validated maximum amount of an item.
    ///
    /// # Errors
    ///
    /// Returns a `ItemGroupError::ItemNotFound` if the item is not found.
    pub fn amount_of(&self, item: usize) -> Result<u64, ItemGroupError> {
        let item = self.get_item(item)?;

        // Validated on construction
        Ok(u64::try_from(item.amount()).unwrap_or(0))
    }

    /// Total number of units available across every item.
    pub fn total_available(&self) -> u64 {
        crate::items::total_available(&self.items)
    }

    /// Get the number of items in the group.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the group is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Enumerate every assignment whose amounts sum to `pick` with the default solver.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if `pick` is negative or the search exceeds the
    /// default resource limits.
    pub fn combinations(&self, pick: i64) -> Result<SolverResult<'_>, SolverError> {
        TreeSolver::default().solve(self, pick)
    }
}

impl TryFrom<Vec<Item>> for ItemGroup {
    type Error = ItemGroupError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}
