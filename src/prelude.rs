//! Allot prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    fixtures::{Fixture, FixtureError},
    items::{
        Item,
        groups::{ItemGroup, ItemGroupError},
    },
    options::OptionSpace,
    report::{Report, ReportError},
    solutions::{Pick, Solution, assemble},
    solvers::{
        MatchPolicy, NoopObserver, SearchConfig, SearchLimits, SearchObserver, SearchStats,
        Solver, SolverError, SolverResult, Strategy, backtrack::BacktrackSolver,
        tree::TreeSolver,
    },
    tree::{ChoiceKey, ChoiceNode, DecisionTree, DecisionTreeBuilder, TreeError},
};
