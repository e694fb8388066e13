//! Option Spaces
//!
//! For every item in a group, the inclusive run of amounts that can be drawn
//! from it: `0, 1, ..., amount`.

use smallvec::SmallVec;

use crate::items::groups::ItemGroup;

/// Amounts selectable from a single item, in ascending order.
pub type AmountOptions = SmallVec<[u64; 8]>;

/// Per-item amount options, indexed identically to the item group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSpace {
    options: Vec<AmountOptions>,
}

impl OptionSpace {
    /// Build the option space for an item group.
    pub fn from_group(group: &ItemGroup) -> Self {
        let options = (0..group.len())
            .map(|idx| {
                let max = group.amount_of(idx).unwrap_or(0);

                (0..=max).collect()
            })
            .collect();

        Self { options }
    }

    /// The selectable amounts for the item at `idx`.
    pub fn options(&self, idx: usize) -> Option<&[u64]> {
        self.options.get(idx).map(SmallVec::as_slice)
    }

    /// Iterate over the option lists in item order.
    pub fn iter(&self) -> impl Iterator<Item = &[u64]> {
        self.options.iter().map(SmallVec::as_slice)
    }

    /// Number of items covered.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the option space covers no items.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Number of nodes a fully materialized decision tree over this space holds.
    ///
    /// Returns `None` if the count does not fit in a `u64`.
    pub fn node_count(&self) -> Option<u64> {
        forest_size(
            self.options
                .iter()
                .map(|options| u64::try_from(options.len()).unwrap_or(u64::MAX)),
        )
    }

    /// Number of nodes the decision tree for `group` would hold, computed from
    /// the item amounts without materializing the option space.
    ///
    /// Returns `None` if the count does not fit in a `u64`.
    pub fn projected_node_count(group: &ItemGroup) -> Option<u64> {
        let widths = (0..group.len())
            .map(|idx| group.amount_of(idx).ok()?.checked_add(1))
            .collect::<Option<SmallVec<[u64; 8]>>>()?;

        forest_size(widths)
    }

    /// Number of complete assignments (leaves) in the space, `None` on overflow.
    ///
    /// An empty space has exactly one assignment: the empty one.
    pub fn assignment_count(&self) -> Option<u64> {
        self.options.iter().try_fold(1_u64, |acc, options| {
            acc.checked_mul(u64::try_from(options.len()).ok()?)
        })
    }
}

/// Size of a forest whose depth `i` fans out into `widths[i]` children per node.
///
/// Depth `i` holds the product of the widths of depths `0..=i`; the total is the
/// sum over every depth.
fn forest_size(widths: impl IntoIterator<Item = u64>) -> Option<u64> {
    let mut layer = 1_u64;
    let mut total = 0_u64;

    for width in widths {
        layer = layer.checked_mul(width)?;
        total = total.checked_add(layer)?;
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::items::Item;

    use super::*;

    #[test]
    fn options_run_from_zero_to_amount_inclusive() -> TestResult {
        let group = ItemGroup::new([Item::new("Apple", 2), Item::new("Banana", 0)])?;
        let space = OptionSpace::from_group(&group);

        assert_eq!(space.len(), 2);
        assert_eq!(space.options(0), Some([0, 1, 2].as_slice()));
        assert_eq!(space.options(1), Some([0].as_slice()));
        assert_eq!(space.options(2), None);

        Ok(())
    }

    #[test]
    fn node_count_sums_prefix_products() -> TestResult {
        let group = ItemGroup::new([
            Item::new("Apple", 1),
            Item::new("Banana", 2),
            Item::new("Cat", 3),
        ])?;
        let space = OptionSpace::from_group(&group);

        // 2 + 2*3 + 2*3*4
        assert_eq!(space.node_count(), Some(32));
        assert_eq!(space.assignment_count(), Some(24));

        Ok(())
    }

    #[test]
    fn empty_space_has_one_assignment_and_no_nodes() {
        let space = OptionSpace::default();

        assert!(space.is_empty());
        assert_eq!(space.node_count(), Some(0));
        assert_eq!(space.assignment_count(), Some(1));
    }

    #[test]
    fn projected_node_count_matches_materialized_count() -> TestResult {
        let group = ItemGroup::new([
            Item::new("Apple", 2),
            Item::new("Banana", 3),
            Item::new("Cat", 2),
            Item::new("Dog", 4),
            Item::new("Egg", 1),
        ])?;

        let space = OptionSpace::from_group(&group);

        assert_eq!(OptionSpace::projected_node_count(&group), space.node_count());
        assert_eq!(space.assignment_count(), Some(3 * 4 * 3 * 5 * 2));

        Ok(())
    }

    #[test]
    fn projected_node_count_reports_overflow() -> TestResult {
        let group = ItemGroup::new([
            Item::new("Apple", i64::MAX),
            Item::new("Banana", i64::MAX),
        ])?;

        assert_eq!(OptionSpace::projected_node_count(&group), None);

        Ok(())
    }
}
