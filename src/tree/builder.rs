//! Builder for eagerly materializing decision trees.

use slotmap::SlotMap;
use tracing::debug;

use crate::{
    items::groups::ItemGroup,
    options::OptionSpace,
    tree::{
        error::TreeError,
        node::{ChoiceChildren, ChoiceKey, ChoiceNode},
    },
};

/// Default ceiling on the number of nodes a decision tree may hold.
pub const DEFAULT_MAX_NODES: u64 = 1 << 22;

/// Builder for a [`super::DecisionTree`].
///
/// The tree is built in full before it is returned: one forest root per option
/// of the first item, and below every non-leaf node one freshly built child list
/// holding a node per option of the next item.
#[derive(Debug)]
pub struct DecisionTreeBuilder<'a, 'o> {
    group: &'a ItemGroup,
    options: &'o OptionSpace,
    max_nodes: Option<u64>,
}

impl<'a, 'o> DecisionTreeBuilder<'a, 'o> {
    /// Create a builder over `group` and its option space, with the default node ceiling.
    #[must_use]
    pub fn new(group: &'a ItemGroup, options: &'o OptionSpace) -> Self {
        Self {
            group,
            options,
            max_nodes: Some(DEFAULT_MAX_NODES),
        }
    }

    /// Set the node ceiling, `None` to build without one.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: Option<u64>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Root-to-leaf depth of the tree this builder produces.
    pub(crate) fn depth(&self) -> usize {
        self.group.len()
    }

    /// Build the full tree.
    ///
    /// # Validation rules
    ///
    /// 1. The option space must cover exactly the items in the group
    /// 2. The number of nodes must not exceed the ceiling (checked before allocating)
    ///
    /// # Errors
    ///
    /// Returns a [`TreeError`] if any validation rule is violated.
    pub(crate) fn build(
        self,
    ) -> Result<(SlotMap<ChoiceKey, ChoiceNode<'a>>, ChoiceChildren), TreeError> {
        // 1. Option space matches group
        if self.options.len() != self.group.len() {
            return Err(TreeError::OptionSpaceMismatch {
                options: self.options.len(),
                items: self.group.len(),
            });
        }

        // 2. Node ceiling
        let required = self.options.node_count();

        let exceeded = self
            .max_nodes
            .filter(|&limit| required.is_none_or(|count| count > limit));

        if let Some(limit) = exceeded {
            return Err(TreeError::NodeLimitExceeded { required, limit });
        }

        let capacity = required
            .and_then(|count| usize::try_from(count).ok())
            .unwrap_or_default();

        let mut nodes = SlotMap::with_capacity_and_key(capacity);

        if self.group.is_empty() {
            return Ok((nodes, ChoiceChildren::new()));
        }

        let roots = self.make_nodes(&mut nodes)?;

        debug!(
            nodes = nodes.len(),
            roots = roots.len(),
            "built decision tree"
        );

        Ok((nodes, roots))
    }

    /// Build every layer depth-first, returning the forest roots.
    ///
    /// Each frame holds the child list being filled for one parent, so the
    /// depth of the tree never grows the call stack.
    fn make_nodes(
        &self,
        nodes: &mut SlotMap<ChoiceKey, ChoiceNode<'a>>,
    ) -> Result<ChoiceChildren, TreeError> {
        let mut roots = ChoiceChildren::new();
        let mut stack = Vec::with_capacity(self.options.len());
        stack.push(self.frame(None, 0));

        while let Some(frame) = stack.last_mut() {
            let idx = frame.idx;
            let parent = frame.parent;
            let amounts = self.options.options(idx).unwrap_or_default();

            let Some(&amount) = amounts.get(frame.next) else {
                let Some(done) = stack.pop() else {
                    break;
                };

                match done.parent {
                    Some(owner) => {
                        let node = nodes.get_mut(owner).ok_or(TreeError::MissingNode(owner))?;
                        node.children = Some(done.keys);
                    }
                    None => roots = done.keys,
                }

                continue;
            };

            frame.next += 1;

            let key = nodes.insert(ChoiceNode {
                kind: self.group.get_item(idx)?.kind(),
                item_idx: idx,
                amount,
                parent,
                children: None,
            });

            frame.keys.push(key);

            if idx + 1 < self.options.len() {
                stack.push(self.frame(Some(key), idx + 1));
            }
        }

        Ok(roots)
    }

    fn frame(&self, parent: Option<ChoiceKey>, idx: usize) -> Frame {
        let width = self.options.options(idx).map_or(0, <[u64]>::len);

        Frame {
            parent,
            idx,
            next: 0,
            keys: ChoiceChildren::with_capacity(width),
        }
    }
}

/// Child list under construction for one parent.
struct Frame {
    parent: Option<ChoiceKey>,
    idx: usize,
    next: usize,
    keys: ChoiceChildren,
}
