//! Decision tree nodes

use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Key identifying a choice node in the decision tree arena.
    pub struct ChoiceKey;
}

/// Child keys of a single choice node.
pub type ChoiceChildren = SmallVec<[ChoiceKey; 8]>;

/// A node in the decision tree: one chosen amount for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceNode<'a> {
    /// Kind of the item this choice is for
    pub kind: &'a str,

    /// Index of the item in the group (equal to the node's depth)
    pub item_idx: usize,

    /// Amount chosen for the item
    pub amount: u64,

    /// Back-reference to the choice made for the previous item, `None` for forest roots
    pub parent: Option<ChoiceKey>,

    /// Choices for the next item, `None` for leaves
    pub children: Option<ChoiceChildren>,
}

impl ChoiceNode<'_> {
    /// Whether this node is a leaf (a choice for the last item).
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether this node is a forest root (a choice for the first item).
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Keys of this node's children, empty for leaves.
    pub fn child_keys(&self) -> &[ChoiceKey] {
        self.children.as_deref().unwrap_or(&[])
    }
}
