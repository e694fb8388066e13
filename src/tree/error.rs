//! Decision tree errors

use thiserror::Error;

use crate::{items::groups::ItemGroupError, tree::ChoiceKey};

/// Errors that can occur when building or walking a decision tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Materializing the tree would exceed the configured node ceiling.
    ///
    /// `required` is `None` when the node count does not fit in a `u64`.
    #[error(
        "decision tree needs {} nodes, limit is {limit}",
        .required.map_or_else(|| "more than u64::MAX".to_string(), |count| count.to_string())
    )]
    NodeLimitExceeded {
        /// Number of nodes the full tree would hold
        required: Option<u64>,

        /// Configured ceiling
        limit: u64,
    },

    /// The option space does not cover the same items as the group.
    #[error("option space covers {options} items but the group has {items}")]
    OptionSpaceMismatch {
        /// Items covered by the option space
        options: usize,

        /// Items in the group
        items: usize,
    },

    /// A key did not resolve to a node in the arena.
    #[error("choice node {0:?} not found in the decision tree")]
    MissingNode(ChoiceKey),

    /// Wrapped item group error.
    #[error(transparent)]
    ItemGroup(#[from] ItemGroupError),
}

