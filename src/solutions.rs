//! Solutions

use std::fmt;

use smallvec::SmallVec;

/// Amount drawn from one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pick<'a> {
    /// Kind of the item drawn from
    pub kind: &'a str,

    /// Number of units drawn
    pub amount: u64,
}

impl<'a> Pick<'a> {
    /// Create a new pick.
    pub fn new(kind: &'a str, amount: u64) -> Self {
        Self { kind, amount }
    }
}

impl fmt::Display for Pick<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.amount)
    }
}

/// A complete assignment: one pick per item, in item order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Solution<'a> {
    picks: SmallVec<[Pick<'a>; 8]>,
}

impl<'a> Solution<'a> {
    /// Create a solution from picks in item order.
    pub fn new(picks: SmallVec<[Pick<'a>; 8]>) -> Self {
        Self { picks }
    }

    /// The picks, one per item.
    pub fn picks(&self) -> &[Pick<'a>] {
        &self.picks
    }

    /// Iterate over the picks.
    pub fn iter(&self) -> impl Iterator<Item = &Pick<'a>> {
        self.picks.iter()
    }

    /// Number of picks (equal to the number of items).
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    /// Whether this is the empty assignment.
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Sum of all picked amounts.
    pub fn total(&self) -> u64 {
        self.picks
            .iter()
            .map(|pick| pick.amount)
            .fold(0_u64, u64::saturating_add)
    }

    /// Amount picked for `kind`, if the kind is part of this solution.
    pub fn amount_of(&self, kind: &str) -> Option<u64> {
        self.picks
            .iter()
            .find(|pick| pick.kind == kind)
            .map(|pick| pick.amount)
    }

    /// Picks with a non-zero amount.
    pub fn nonzero(&self) -> impl Iterator<Item = &Pick<'a>> {
        self.picks.iter().filter(|pick| pick.amount > 0)
    }
}

impl<'a> FromIterator<Pick<'a>> for Solution<'a> {
    fn from_iter<I: IntoIterator<Item = Pick<'a>>>(iter: I) -> Self {
        Self {
            picks: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, pick) in self.picks.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{pick}")?;
        }

        Ok(())
    }
}

/// Concatenate per-root solution lists in root order.
///
/// Within-root order is kept as produced by the search; nothing is sorted or
/// deduplicated.
pub fn assemble<'a>(per_root: impl IntoIterator<Item = Vec<Solution<'a>>>) -> Vec<Solution<'a>> {
    per_root.into_iter().flatten().collect()
}
