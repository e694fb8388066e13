//! Solvers for bounded combination search

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    items::groups::{ItemGroup, ItemGroupError},
    solutions::Solution,
    solvers::{backtrack::BacktrackSolver, tree::TreeSolver},
    tree::{DEFAULT_MAX_NODES, TreeError},
};

pub mod backtrack;
pub mod observer;
pub mod tree;

pub use observer::{NoopObserver, SearchObserver, SearchStats};

/// Solver Errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// The target total is negative.
    #[error("invalid pick {0}, the target total must not be negative")]
    InvalidPick(i64),

    /// Wrapped item group error
    #[error(transparent)]
    ItemGroup(#[from] ItemGroupError),

    /// Wrapped decision tree error
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// What the tree search does once a leaf matches the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Keep scanning every leaf; every qualifying assignment is returned.
    #[default]
    Exhaustive,

    /// Stop scanning a parent's leaf children at the first match and return
    /// only that match for the parent.
    ///
    /// Leaf siblings differ only in the amount chosen for the last item, so at
    /// most one of them can hit the target and this returns the same solutions
    /// as [`MatchPolicy::Exhaustive`] while visiting fewer leaves.
    #[serde(alias = "first_match", alias = "first-match")]
    FirstMatchPerParent,
}

/// Which search algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Materialize the full decision tree, then search it.
    #[default]
    Tree,

    /// Depth-first generate-and-test with remaining-capacity pruning; never
    /// materializes the tree.
    Backtrack,
}

/// Resource limits for a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Ceiling on materialized tree nodes, `None` for no ceiling
    pub max_nodes: Option<u64>,
}

impl SearchLimits {
    /// No ceiling at all.
    pub fn unlimited() -> Self {
        Self { max_nodes: None }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_nodes: Some(DEFAULT_MAX_NODES),
        }
    }
}

/// A complete search configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Algorithm to run
    pub strategy: Strategy,

    /// Leaf match policy (tree strategy only)
    pub policy: MatchPolicy,

    /// Resource limits (tree strategy only)
    pub limits: SearchLimits,
}

impl SearchConfig {
    /// Run the configured solver.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver fails.
    pub fn solve<'g>(
        &self,
        group: &'g ItemGroup,
        pick: i64,
    ) -> Result<SolverResult<'g>, SolverError> {
        match self.strategy {
            Strategy::Tree => TreeSolver::new(self.policy, self.limits).solve(group, pick),
            Strategy::Backtrack => BacktrackSolver.solve(group, pick),
        }
    }
}

/// Result of a search over an item group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverResult<'a> {
    /// Qualifying assignments in traversal order
    pub solutions: Vec<Solution<'a>>,

    /// Counters describing the work done
    pub stats: SearchStats,
}

impl SolverResult<'_> {
    /// Number of solutions found.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether no solution was found.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

/// Trait for enumerating the assignments of an item group that sum to a target
pub trait Solver {
    /// Find every assignment of `group` whose amounts sum to `pick`.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver encounters an error.
    fn solve<'g>(
        &self,
        group: &'g ItemGroup,
        pick: i64,
    ) -> Result<SolverResult<'g>, SolverError>;
}

/// Validate a target total.
///
/// # Errors
///
/// Returns [`SolverError::InvalidPick`] if `pick` is negative.
pub fn target(pick: i64) -> Result<u64, SolverError> {
    u64::try_from(pick).map_err(|_err| SolverError::InvalidPick(pick))
}
