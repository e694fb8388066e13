//! Search observers
//!
//! Hooks called while a solver runs, for capturing progress without changing
//! the result.

use crate::{options::OptionSpace, solutions::Solution};

/// Receives callbacks as a search progresses.
///
/// Every method has an empty default so implementors only override what they need.
pub trait SearchObserver {
    /// Called once the option space has been built.
    fn on_option_space(&mut self, _options: &OptionSpace) {}

    /// Called once the decision tree has been materialized.
    fn on_tree_built(&mut self, _nodes: usize, _roots: usize) {}

    /// Called for every leaf assignment evaluated against the target.
    fn on_leaf(&mut self, _solution: &Solution<'_>, _sum: u64, _matched: bool) {}

    /// Called after the subtree under forest root `root_idx` has been searched.
    fn on_root_searched(&mut self, _root_idx: usize, _solutions: usize) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Counters describing the work a solver did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes held by the materialized tree (zero when no tree was built)
    pub nodes_built: usize,

    /// Partial or complete assignments considered
    pub nodes_visited: usize,

    /// Complete assignments whose sum was compared with the target
    pub leaves_evaluated: usize,

    /// Solutions returned
    pub solutions: usize,
}
