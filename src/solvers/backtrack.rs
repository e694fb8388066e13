//! Backtracking Solver
//!
//! Generate-and-test without materializing the decision tree. Amounts are
//! tried in ascending order with item 0 outermost, so solutions come out in
//! the same order as the exhaustive tree search. A branch is cut as soon as
//! its partial sum overshoots the target or can no longer reach it with the
//! capacity left in the remaining items.

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    items::groups::ItemGroup,
    solutions::{Pick, Solution},
    solvers::{Solver, SolverError, SolverResult, observer::SearchStats, target},
};

/// Branch-and-bound solver; memory use is linear in the number of items.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BacktrackSolver;

impl Solver for BacktrackSolver {
    #[tracing::instrument(
        name = "solvers.backtrack.solve",
        skip(self, group),
        fields(items = group.len()),
        err
    )]
    fn solve<'g>(
        &self,
        group: &'g ItemGroup,
        pick: i64,
    ) -> Result<SolverResult<'g>, SolverError> {
        let target = target(pick)?;

        let mut items: SmallVec<[(&'g str, u64); 8]> = SmallVec::with_capacity(group.len());

        for (idx, item) in group.iter().enumerate() {
            items.push((item.kind(), group.amount_of(idx)?));
        }

        // capacity[i] is the most that items i.. can still contribute
        let mut capacity: SmallVec<[u64; 9]> = SmallVec::with_capacity(items.len() + 1);
        capacity.push(0);

        for &(_, amount) in items.iter().rev() {
            let below = capacity.last().copied().unwrap_or_default();
            capacity.push(below.saturating_add(amount));
        }

        capacity.reverse();

        let mut walk = Walk {
            items: &items,
            capacity: &capacity,
            target,
            picks: SmallVec::with_capacity(items.len()),
            solutions: Vec::new(),
            stats: SearchStats::default(),
        };

        walk.descend()?;

        let Walk {
            solutions,
            mut stats,
            ..
        } = walk;

        stats.solutions = solutions.len();

        debug!(
            solutions = stats.solutions,
            visited = stats.nodes_visited,
            "backtracking search complete"
        );

        Ok(SolverResult { solutions, stats })
    }
}

struct Walk<'w, 'g> {
    items: &'w [(&'g str, u64)],
    capacity: &'w [u64],
    target: u64,
    picks: SmallVec<[Pick<'g>; 8]>,
    solutions: Vec<Solution<'g>>,
    stats: SearchStats,
}

/// Position of the walk at one item: amounts below `next` have been tried.
struct Frame {
    idx: usize,
    partial: u64,
    next: u64,
}

impl Walk<'_, '_> {
    /// Depth-first over every viable amount, one frame per item on the current
    /// path. `picks` always holds one pick per frame below the top.
    fn descend(&mut self) -> Result<(), SolverError> {
        let mut stack = Vec::with_capacity(self.items.len());
        stack.extend(self.enter(0, 0)?);

        while let Some(frame) = stack.last_mut() {
            let (kind, max) = self.items.get(frame.idx).copied().ok_or(
                SolverError::InvariantViolation {
                    message: "frame beyond the item list",
                },
            )?;

            let amount = frame.next;
            let sum = frame.partial.saturating_add(amount);

            if amount > max || sum > self.target {
                stack.pop();
                self.picks.pop();
                continue;
            }

            frame.next += 1;
            let idx = frame.idx;

            self.stats.nodes_visited += 1;
            self.picks.push(Pick::new(kind, amount));

            match self.enter(idx + 1, sum)? {
                Some(child) => stack.push(child),
                None => {
                    self.picks.pop();
                }
            }
        }

        Ok(())
    }

    /// Open a frame for item `idx`, or evaluate the completed assignment when
    /// every item has a pick.
    fn enter(&mut self, idx: usize, partial: u64) -> Result<Option<Frame>, SolverError> {
        if idx == self.items.len() {
            self.stats.leaves_evaluated += 1;

            if partial == self.target {
                self.solutions.push(Solution::new(self.picks.clone()));
            }

            return Ok(None);
        }

        let rest = self
            .capacity
            .get(idx + 1)
            .copied()
            .ok_or(SolverError::InvariantViolation {
                message: "capacity table shorter than item list",
            })?;

        // Smallest amount that still lets the remaining items reach the target
        let needed = self.target.saturating_sub(partial.saturating_add(rest));

        Ok(Some(Frame {
            idx,
            partial,
            next: needed,
        }))
    }
}
