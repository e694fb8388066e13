//! Decision Tree
//!
//! A forest in which depth `i` holds one node per amount that can be chosen for
//! item `i`. Every root-to-leaf path is one complete assignment of amounts.
//!
//! Nodes live in a slot-map arena; children are owned as key lists by their
//! parent and every node keeps a non-owning key back to its parent, which is
//! used to walk from a leaf to its root.

use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::solutions::{Pick, Solution};

pub mod builder;
pub mod error;
pub mod node;

pub use builder::{DEFAULT_MAX_NODES, DecisionTreeBuilder};
pub use error::TreeError;
pub use node::{ChoiceChildren, ChoiceKey, ChoiceNode};

/// A fully materialized decision tree, read-only once built.
#[derive(Debug)]
pub struct DecisionTree<'a> {
    nodes: SlotMap<ChoiceKey, ChoiceNode<'a>>,
    roots: ChoiceChildren,
    depth: usize,
}

impl<'a> DecisionTree<'a> {
    /// Create a decision tree from a builder.
    ///
    /// # Errors
    ///
    /// Returns a [`TreeError`] if the builder's inputs are inconsistent or the
    /// tree would exceed its node ceiling.
    pub fn from_builder(builder: DecisionTreeBuilder<'a, '_>) -> Result<Self, TreeError> {
        let depth = builder.depth();
        let (nodes, roots) = builder.build()?;

        Ok(Self {
            nodes,
            roots,
            depth,
        })
    }

    /// The forest roots: one node per option of the first item.
    pub fn roots(&self) -> &[ChoiceKey] {
        &self.roots
    }

    /// Look up a node by key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingNode`] if the key is not in this tree.
    pub fn node(&self, key: ChoiceKey) -> Result<&ChoiceNode<'a>, TreeError> {
        self.nodes.get(key).ok_or(TreeError::MissingNode(key))
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes (built over an empty item group).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root-to-leaf depth, equal to the number of items.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of nodes at `depth` across the whole forest (roots are depth 0).
    pub fn nodes_at_depth(&self, depth: usize) -> usize {
        self.nodes
            .values()
            .filter(|node| node.item_idx == depth)
            .count()
    }

    /// Iterate over all leaves in depth-first order.
    pub fn leaves(&self) -> impl Iterator<Item = ChoiceKey> + '_ {
        self.descendants()
            .filter(|key| self.nodes.get(*key).is_some_and(ChoiceNode::is_leaf))
    }

    /// Iterate over every node in depth-first, root-first order.
    pub fn descendants(&self) -> Descendants<'_, 'a> {
        Descendants {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Walk the back-references from `key` up to its forest root, starting with `key`.
    pub fn ancestors(&self, key: ChoiceKey) -> Ancestors<'_, 'a> {
        Ancestors {
            tree: self,
            next: Some(key),
        }
    }

    /// Sum the amounts on the path from `leaf` to its root and collect the
    /// picks made along it, returned in item order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingNode`] if the walk reaches a key that is not
    /// in this tree.
    pub fn path_sum(&self, leaf: ChoiceKey) -> Result<(u64, Solution<'a>), TreeError> {
        let mut sum = 0_u64;
        let mut picks: SmallVec<[Pick<'a>; 8]> = SmallVec::with_capacity(self.depth);
        let mut current = Some(leaf);

        while let Some(key) = current {
            let node = self.node(key)?;

            sum = sum.saturating_add(node.amount);
            picks.push(Pick::new(node.kind, node.amount));

            current = node.parent;
        }

        picks.reverse();

        Ok((sum, Solution::new(picks)))
    }
}

/// Iterator over a node and its ancestors, see [`DecisionTree::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'t, 'a> {
    tree: &'t DecisionTree<'a>,
    next: Option<ChoiceKey>,
}

impl<'t, 'a> Iterator for Ancestors<'t, 'a> {
    type Item = &'t ChoiceNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.nodes.get(self.next?)?;
        self.next = node.parent;

        Some(node)
    }
}

/// Depth-first iterator over node keys, see [`DecisionTree::descendants`].
#[derive(Debug)]
pub struct Descendants<'t, 'a> {
    tree: &'t DecisionTree<'a>,
    stack: Vec<ChoiceKey>,
}

impl Iterator for Descendants<'_, '_> {
    type Item = ChoiceKey;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.stack.pop()?;

        if let Some(node) = self.tree.nodes.get(key) {
            // Reverse so the first child is visited first
            self.stack.extend(node.child_keys().iter().rev().copied());
        }

        Some(key)
    }
}
