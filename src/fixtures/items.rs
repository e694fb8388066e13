//! Item Fixtures

use serde::Deserialize;

use crate::items::Item;

/// Wrapper for items in YAML
///
/// A sequence rather than a map: item order decides the shape of the search
/// and the order of the solutions.
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// Items in search order
    pub items: Vec<Item>,
}
