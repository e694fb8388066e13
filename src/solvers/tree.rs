//! Tree Solver
//!
//! Builds the option space, materializes the full decision tree, then searches
//! every forest root depth-first. At each leaf the path back to the root is
//! summed and, if it matches the target, recorded as a solution. Per-root
//! results are concatenated in root order.

use tracing::{debug, trace};

use crate::{
    items::groups::ItemGroup,
    options::OptionSpace,
    solutions::{Solution, assemble},
    solvers::{
        MatchPolicy, SearchLimits, Solver, SolverError, SolverResult, target,
        observer::{NoopObserver, SearchObserver, SearchStats},
    },
    tree::{ChoiceKey, DecisionTree, DecisionTreeBuilder, TreeError},
};

/// Solver that searches an eagerly built decision tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeSolver {
    policy: MatchPolicy,
    limits: SearchLimits,
}

impl TreeSolver {
    /// Create a solver with the given match policy and limits.
    pub fn new(policy: MatchPolicy, limits: SearchLimits) -> Self {
        Self { policy, limits }
    }

    /// Replace the match policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the resource limits.
    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The configured match policy.
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// The configured resource limits.
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Solve with an observer receiving callbacks as the search progresses.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if `pick` is negative or the tree would exceed
    /// the node ceiling.
    #[tracing::instrument(
        name = "solvers.tree.solve",
        skip(self, group, observer),
        fields(items = group.len(), policy = ?self.policy),
        err
    )]
    pub fn solve_with_observer<'g>(
        &self,
        group: &'g ItemGroup,
        pick: i64,
        observer: &mut dyn SearchObserver,
    ) -> Result<SolverResult<'g>, SolverError> {
        let target = target(pick)?;

        // Nothing to choose: only the empty assignment exists
        if group.is_empty() {
            return Ok(empty_group_result(target));
        }

        // Check the ceiling before materializing even the option space
        if let Some(limit) = self.limits.max_nodes {
            let required = OptionSpace::projected_node_count(group);

            if required.is_none_or(|count| count > limit) {
                return Err(TreeError::NodeLimitExceeded { required, limit }.into());
            }
        }

        let options = OptionSpace::from_group(group);
        observer.on_option_space(&options);

        let builder =
            DecisionTreeBuilder::new(group, &options).with_max_nodes(self.limits.max_nodes);
        let tree = DecisionTree::from_builder(builder)?;
        observer.on_tree_built(tree.len(), tree.roots().len());

        let mut search = Search {
            tree: &tree,
            target,
            policy: self.policy,
            stats: SearchStats {
                nodes_built: tree.len(),
                ..SearchStats::default()
            },
            observer,
        };

        let mut per_root = Vec::with_capacity(tree.roots().len());

        for (root_idx, &root) in tree.roots().iter().enumerate() {
            let found = search.search_root(root)?;

            debug!(root_idx, solutions = found.len(), "searched forest root");
            search.observer.on_root_searched(root_idx, found.len());

            per_root.push(found);
        }

        let solutions = assemble(per_root);
        let stats = SearchStats {
            solutions: solutions.len(),
            ..search.stats
        };

        debug!(
            solutions = stats.solutions,
            leaves = stats.leaves_evaluated,
            "tree search complete"
        );

        Ok(SolverResult { solutions, stats })
    }

    /// Search the subtree under a single forest root with this solver's match
    /// policy, reporting every evaluated leaf to `observer`.
    ///
    /// A root that is itself a leaf (the group has one item) is evaluated directly.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the tree does not contain `root` or one of its
    /// descendants.
    pub fn search_root<'a>(
        &self,
        tree: &DecisionTree<'a>,
        root: ChoiceKey,
        target: u64,
        observer: &mut dyn SearchObserver,
    ) -> Result<Vec<Solution<'a>>, SolverError> {
        let mut search = Search {
            tree,
            target,
            policy: self.policy,
            stats: SearchStats::default(),
            observer,
        };

        search.search_root(root)
    }
}

impl Solver for TreeSolver {
    fn solve<'g>(
        &self,
        group: &'g ItemGroup,
        pick: i64,
    ) -> Result<SolverResult<'g>, SolverError> {
        self.solve_with_observer(group, pick, &mut NoopObserver)
    }
}

/// State for one depth-first search over a tree.
struct Search<'t, 'a, 'o> {
    tree: &'t DecisionTree<'a>,
    target: u64,
    policy: MatchPolicy,
    stats: SearchStats,
    observer: &'o mut dyn SearchObserver,
}

impl<'a> Search<'_, 'a, '_> {
    fn search_root(&mut self, root: ChoiceKey) -> Result<Vec<Solution<'a>>, SolverError> {
        self.stats.nodes_visited += 1;

        if self.tree.node(root)?.is_leaf() {
            return Ok(self.evaluate_leaf(root)?.into_iter().collect());
        }

        self.find_all_solutions(root)
    }

    /// Depth-first over the subtree below `key`, evaluating leaves in order.
    ///
    /// Frames are `(node, next child index)`; under
    /// [`MatchPolicy::FirstMatchPerParent`] a frame is dropped as soon as one
    /// of its leaf children matches.
    fn find_all_solutions(&mut self, key: ChoiceKey) -> Result<Vec<Solution<'a>>, SolverError> {
        let tree = self.tree;
        let mut result = Vec::new();
        let mut stack: Vec<(ChoiceKey, usize)> = Vec::with_capacity(tree.depth());
        stack.push((key, 0));

        while let Some(frame) = stack.last_mut() {
            let (parent, next) = *frame;

            let Some(&child) = tree.node(parent)?.child_keys().get(next) else {
                stack.pop();
                continue;
            };

            frame.1 += 1;
            self.stats.nodes_visited += 1;

            if !tree.node(child)?.is_leaf() {
                stack.push((child, 0));
                continue;
            }

            let Some(solution) = self.evaluate_leaf(child)? else {
                continue;
            };

            result.push(solution);

            if self.policy == MatchPolicy::FirstMatchPerParent {
                // Remaining leaf siblings are not examined
                stack.pop();
            }
        }

        Ok(result)
    }

    /// Sum the path from `leaf` to its root; returns the assignment if it hits the target.
    fn evaluate_leaf(&mut self, leaf: ChoiceKey) -> Result<Option<Solution<'a>>, SolverError> {
        let (sum, solution) = self.tree.path_sum(leaf)?;

        if solution.len() != self.tree.depth() {
            return Err(SolverError::InvariantViolation {
                message: "leaf path does not cover every item",
            });
        }

        let matched = sum == self.target;

        self.stats.leaves_evaluated += 1;
        self.observer.on_leaf(&solution, sum, matched);

        trace!(sum, matched, "evaluated leaf");

        Ok(matched.then_some(solution))
    }
}

/// Result for a group without items: the empty assignment sums to zero.
fn empty_group_result<'g>(target: u64) -> SolverResult<'g> {
    let solutions = if target == 0 {
        vec![Solution::default()]
    } else {
        Vec::new()
    };

    SolverResult {
        stats: SearchStats {
            leaves_evaluated: 1,
            solutions: solutions.len(),
            ..SearchStats::default()
        },
        solutions,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{items::Item, tree::DEFAULT_MAX_NODES};

    use super::*;

    fn five_items() -> Result<ItemGroup, crate::items::groups::ItemGroupError> {
        ItemGroup::new([
            Item::new("Apple", 2),
            Item::new("Banana", 3),
            Item::new("Cat", 2),
            Item::new("Dog", 4),
            Item::new("Egg", 1),
        ])
    }

    #[derive(Debug, Default)]
    struct Recorder {
        option_lists: usize,
        nodes: usize,
        leaves: usize,
        matches: usize,
        roots: Vec<(usize, usize)>,
    }

    impl SearchObserver for Recorder {
        fn on_option_space(&mut self, options: &OptionSpace) {
            self.option_lists = options.len();
        }

        fn on_tree_built(&mut self, nodes: usize, _roots: usize) {
            self.nodes = nodes;
        }

        fn on_leaf(&mut self, _solution: &Solution<'_>, _sum: u64, matched: bool) {
            self.leaves += 1;

            if matched {
                self.matches += 1;
            }
        }

        fn on_root_searched(&mut self, root_idx: usize, solutions: usize) {
            self.roots.push((root_idx, solutions));
        }
    }

    #[test]
    fn total_available_has_exactly_one_solution() -> TestResult {
        let group = five_items()?;
        let result = TreeSolver::default().solve(&group, 12)?;

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.solutions.first().map(ToString::to_string).as_deref(),
            Some("Apple: 2, Banana: 3, Cat: 2, Dog: 4, Egg: 1")
        );

        Ok(())
    }

    #[test]
    fn pick_over_total_available_has_no_solutions() -> TestResult {
        let group = five_items()?;
        let result = TreeSolver::default().solve(&group, 13)?;

        assert!(result.is_empty());

        Ok(())
    }

    #[test]
    fn observer_sees_every_leaf_and_root() -> TestResult {
        let group = five_items()?;
        let mut recorder = Recorder::default();

        let result = TreeSolver::default().solve_with_observer(&group, 7, &mut recorder)?;

        assert_eq!(recorder.option_lists, 5);
        assert_eq!(recorder.nodes, result.stats.nodes_built);
        assert_eq!(recorder.leaves, 360);
        assert_eq!(recorder.matches, result.len());
        assert_eq!(
            recorder.roots.iter().map(|(idx, _)| *idx).collect::<Vec<_>>(),
            [0, 1, 2]
        );
        assert_eq!(
            recorder.roots.iter().map(|(_, found)| *found).sum::<usize>(),
            result.len()
        );

        Ok(())
    }

    #[test]
    fn first_match_policy_skips_remaining_leaf_siblings() -> TestResult {
        let group = five_items()?;

        let exhaustive = TreeSolver::default().solve(&group, 7)?;
        let first_match = TreeSolver::default()
            .with_policy(MatchPolicy::FirstMatchPerParent)
            .solve(&group, 7)?;

        assert_eq!(first_match.solutions, exhaustive.solutions);
        assert!(
            first_match.stats.leaves_evaluated < exhaustive.stats.leaves_evaluated,
            "short-circuit should evaluate fewer leaves"
        );

        Ok(())
    }

    #[test]
    fn single_item_roots_are_searched_as_leaves() -> TestResult {
        let group = ItemGroup::new([Item::new("Apple", 3)])?;
        let result = TreeSolver::default().solve(&group, 2)?;

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.solutions.first().and_then(|s| s.amount_of("Apple")),
            Some(2)
        );

        Ok(())
    }

    #[test]
    fn empty_group_yields_empty_assignment_only_for_zero() -> TestResult {
        let group = ItemGroup::new(Vec::new())?;

        let zero = TreeSolver::default().solve(&group, 0)?;
        let one = TreeSolver::default().solve(&group, 1)?;

        assert_eq!(zero.solutions, [Solution::default()]);
        assert!(one.is_empty());

        Ok(())
    }

    #[test]
    fn negative_pick_is_rejected() -> TestResult {
        let group = five_items()?;

        assert_eq!(
            TreeSolver::default().solve(&group, -1),
            Err(SolverError::InvalidPick(-1))
        );

        Ok(())
    }

    #[test]
    fn node_ceiling_is_enforced_before_building() -> TestResult {
        let group = five_items()?;
        let solver = TreeSolver::default().with_limits(SearchLimits {
            max_nodes: Some(100),
        });

        let result = solver.solve(&group, 7);

        assert!(
            matches!(
                result,
                Err(SolverError::Tree(TreeError::NodeLimitExceeded {
                    limit: 100,
                    ..
                }))
            ),
            "expected node limit error, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn handles_groups_deeper_than_the_call_stack() -> TestResult {
        let group = ItemGroup::new((0..10_000).map(|idx| Item::new(format!("k{idx}"), 0)))?;

        for policy in [MatchPolicy::Exhaustive, MatchPolicy::FirstMatchPerParent] {
            let solver = TreeSolver::default().with_policy(policy);
            let result = solver.solve(&group, 0)?;

            assert_eq!(result.len(), 1, "{policy:?}");
            assert_eq!(result.solutions.first().map(Solution::len), Some(10_000));
            assert_eq!(result.stats.nodes_built, 10_000);
            assert_eq!(result.stats.nodes_visited, 10_000);

            assert!(solver.solve(&group, 1)?.is_empty(), "{policy:?}");
        }

        Ok(())
    }

    #[test]
    fn node_count_overflow_is_reported_without_a_count() -> TestResult {
        let group = ItemGroup::new([
            Item::new("Apple", i64::MAX),
            Item::new("Banana", i64::MAX),
        ])?;

        let err = TreeSolver::default()
            .solve(&group, 1)
            .err()
            .ok_or("expected the node ceiling to be exceeded")?;

        assert_eq!(
            err,
            SolverError::Tree(TreeError::NodeLimitExceeded {
                required: None,
                limit: DEFAULT_MAX_NODES,
            })
        );
        assert_eq!(
            err.to_string(),
            format!("decision tree needs more than u64::MAX nodes, limit is {DEFAULT_MAX_NODES}")
        );

        Ok(())
    }

    #[test]
    fn search_root_returns_solutions_under_one_root() -> TestResult {
        let group = five_items()?;
        let options = OptionSpace::from_group(&group);
        let tree = DecisionTree::from_builder(DecisionTreeBuilder::new(&group, &options))?;

        let solver = TreeSolver::default();
        let mut recorder = Recorder::default();

        let root = tree.roots().last().copied().unwrap_or_default();
        let found = solver.search_root(&tree, root, 12, &mut recorder)?;

        assert_eq!(found.len(), 1, "only the Apple=2 root reaches 12");
        assert_eq!(recorder.leaves, 120, "every leaf under one root: 4 * 3 * 5 * 2");
        assert_eq!(recorder.matches, 1);

        let first_root = tree.roots().first().copied().unwrap_or_default();
        assert!(
            solver
                .search_root(&tree, first_root, 12, &mut NoopObserver)?
                .is_empty()
        );

        Ok(())
    }
}
