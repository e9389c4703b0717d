//! Generic interval DP engine.
//!
//! The engine fills two tables bottom-up:
//! 1. The main diagonal is seeded with [`IntervalProblem::leaf_cost`].
//! 2. Diagonals of increasing length are solved from the finished shorter
//!    ones; each cell keeps the first split attaining the minimum.
//!
//! Every cell of a diagonal is computed from an immutable view of the tables
//! and the whole diagonal is written back at once, which makes the serial and
//! `parallel` schedules produce identical tables.
//!
//! The engine is completely generic over implementations of [`IntervalProblem`].

use crate::diagonal::Diagonal;
use crate::error::{ChainDefect, ChainError};
use crate::table::IntervalTable;
use crate::traits::IntervalProblem;
use crate::utils::default_parallel_min_width;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Interval DP engine for a given problem instance `P`.
///
/// Typical usage:
/// ```
/// use chain_dp::{IntervalEngine, problems::matrix_chain::MatrixChainProblem};
///
/// let problem = MatrixChainProblem::from_dims(vec![10, 20, 30, 40]).unwrap();
/// let solution = IntervalEngine::new(problem).run().unwrap();
/// assert_eq!(solution.optimal_cost(), 18_000);
/// assert_eq!(solution.split().get(1, 3), Some(2));
/// ```
pub struct IntervalEngine<P: IntervalProblem> {
    problem: P,
    parallel_min_width: usize,
}

/// Completed cost and split tables of one run.
///
/// Both tables are owned by the solution; nothing in the engine refers to
/// them after [`IntervalEngine::run`] returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalSolution<C> {
    cost: IntervalTable<C>,
    split: IntervalTable<usize>,
    optimal: C,
}

impl<C: Copy> IntervalSolution<C> {
    /// Number of items the tables cover.
    pub fn num_items(&self) -> usize {
        self.cost.len()
    }

    /// Optimal cost of the whole sequence, `cost[1][n]`.
    pub fn optimal_cost(&self) -> C {
        self.optimal
    }

    pub fn cost(&self) -> &IntervalTable<C> {
        &self.cost
    }

    pub fn split(&self) -> &IntervalTable<usize> {
        &self.split
    }

    /// Hand both tables to the caller.
    pub fn into_parts(self) -> (IntervalTable<C>, IntervalTable<usize>) {
        (self.cost, self.split)
    }
}

type CellResult<C> = Result<(C, usize), ChainError>;
type DiagonalResult<C> = Result<Vec<(C, usize)>, ChainError>;

impl<P: IntervalProblem> IntervalEngine<P> {
    /// Create a new engine with a heuristic parallel threshold (≈ √n).
    pub fn new(problem: P) -> Self {
        let w = default_parallel_min_width(problem.num_items());
        Self::with_parallel_min_width(problem, w)
    }

    /// Create a new engine with an explicit parallel threshold: diagonals
    /// with fewer cells are always solved serially.
    ///
    /// # Panics
    /// Panics if `parallel_min_width == 0`.
    pub fn with_parallel_min_width(problem: P, parallel_min_width: usize) -> Self {
        assert!(parallel_min_width > 0, "parallel_min_width must be positive");
        Self {
            problem,
            parallel_min_width,
        }
    }

    /// Expose immutable reference to the underlying problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Return the configured parallel threshold.
    pub fn parallel_min_width(&self) -> usize {
        self.parallel_min_width
    }

    /// Consume the engine and return the problem.
    pub fn into_problem(self) -> P {
        self.problem
    }

    /// Fill both tables, delegating each diagonal to `solve`.
    fn run_with<F>(&self, solve: F) -> Result<IntervalSolution<P::Cost>, ChainError>
    where
        F: Fn(&Self, &Diagonal, &IntervalTable<P::Cost>) -> DiagonalResult<P::Cost>,
    {
        let n = self.problem.num_items();

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("interval_run", num_items = n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if n == 0 {
            return Err(ChainDefect::Empty.into());
        }

        let mut cost = IntervalTable::new(n);
        let mut split = IntervalTable::new(n);
        for i in 1..=n {
            cost.set(i, i, self.problem.leaf_cost(i))?;
        }

        for len in 2..=n {
            let diagonal = Diagonal::new(n, len);
            #[cfg(feature = "tracing")]
            let span = tracing::trace_span!("solve_diagonal", len, width = diagonal.width());
            #[cfg(feature = "tracing")]
            let _enter = span.enter();

            let solved = solve(self, &diagonal, &cost)?;
            for ((start, end), (best, k)) in diagonal.cells().zip(solved) {
                cost.set(start, end, best)?;
                split.set(start, end, k)?;
            }
        }

        let optimal = lookup(&cost, 1, n)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(num_items = n, filled = cost.filled(), "interval tables filled");

        Ok(IntervalSolution {
            cost,
            split,
            optimal,
        })
    }

    /// Minimum over all splits of `[start, end]`, first minimal `k` wins.
    fn solve_cell(
        &self,
        cost: &IntervalTable<P::Cost>,
        start: usize,
        end: usize,
    ) -> CellResult<P::Cost> {
        let mut best: Option<(P::Cost, usize)> = None;
        for k in start..end {
            let left = lookup(cost, start, k)?;
            let right = lookup(cost, k + 1, end)?;
            match self.problem.split_cost(start, k, end, left, right) {
                Some(candidate) => {
                    if best.map_or(true, |(current, _)| candidate < current) {
                        best = Some((candidate, k));
                    }
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(start, split = k, end, "candidate not representable");
                }
            }
        }
        best.ok_or(ChainError::ArithmeticOverflow { start, end })
    }

    fn solve_diagonal_serial(
        &self,
        diagonal: &Diagonal,
        cost: &IntervalTable<P::Cost>,
    ) -> DiagonalResult<P::Cost> {
        diagonal
            .cells()
            .map(|(start, end)| self.solve_cell(cost, start, end))
            .collect()
    }
}

/// Read a cell that the fill order guarantees is already computed.
fn lookup<C: Copy>(table: &IntervalTable<C>, start: usize, end: usize) -> Result<C, ChainError> {
    table
        .try_get(start, end)?
        .ok_or(ChainError::IndexOutOfRange {
            start,
            end,
            len: table.len(),
        })
}

#[cfg(feature = "parallel")]
impl<P> IntervalEngine<P>
where
    P: IntervalProblem + Sync,
    P::Cost: Send + Sync,
{
    /// Run the interval DP, solving wide diagonals with rayon.
    ///
    /// Diagonals narrower than [`parallel_min_width`](Self::parallel_min_width)
    /// run serially. The tables are identical to the serial schedule.
    ///
    /// # Errors
    /// - [`ChainError::InvalidChain`] if the problem has no items.
    /// - [`ChainError::ArithmeticOverflow`] if some interval has no
    ///   representable candidate.
    pub fn run(&self) -> Result<IntervalSolution<P::Cost>, ChainError> {
        self.run_with(Self::solve_diagonal_parallel)
    }

    fn solve_diagonal_parallel(
        &self,
        diagonal: &Diagonal,
        cost: &IntervalTable<P::Cost>,
    ) -> DiagonalResult<P::Cost> {
        if diagonal.width() < self.parallel_min_width {
            return self.solve_diagonal_serial(diagonal, cost);
        }
        let len = diagonal.len;
        (1..=diagonal.width())
            .into_par_iter()
            .map(|start| self.solve_cell(cost, start, start + len - 1))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
impl<P: IntervalProblem> IntervalEngine<P> {
    /// Run the interval DP (serial execution).
    ///
    /// # Errors
    /// - [`ChainError::InvalidChain`] if the problem has no items.
    /// - [`ChainError::ArithmeticOverflow`] if some interval has no
    ///   representable candidate.
    pub fn run(&self) -> Result<IntervalSolution<P::Cost>, ChainError> {
        self.run_with(Self::solve_diagonal_serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Merge adjacent piles; merging costs the size of the merged pile.
    struct PileMerge {
        sizes: Vec<u32>,
    }

    impl PileMerge {
        fn total(&self, start: usize, end: usize) -> u32 {
            self.sizes[start - 1..end].iter().sum()
        }
    }

    impl IntervalProblem for PileMerge {
        type Cost = u32;

        fn num_items(&self) -> usize {
            self.sizes.len()
        }
        fn leaf_cost(&self, _index: usize) -> u32 {
            0
        }
        fn split_cost(
            &self,
            start: usize,
            _split: usize,
            end: usize,
            left: u32,
            right: u32,
        ) -> Option<u32> {
            left.checked_add(right)?.checked_add(self.total(start, end))
        }
    }

    /// Every split costs the same, so only the tie-break decides.
    struct Flat(usize);

    impl IntervalProblem for Flat {
        type Cost = u8;

        fn num_items(&self) -> usize {
            self.0
        }
        fn leaf_cost(&self, _index: usize) -> u8 {
            0
        }
        fn split_cost(&self, _s: usize, _k: usize, _e: usize, _l: u8, _r: u8) -> Option<u8> {
            Some(1)
        }
    }

    /// Only the split right before `end` is representable.
    struct LastSplitOnly(usize);

    impl IntervalProblem for LastSplitOnly {
        type Cost = u64;

        fn num_items(&self) -> usize {
            self.0
        }
        fn leaf_cost(&self, _index: usize) -> u64 {
            0
        }
        fn split_cost(&self, _s: usize, k: usize, e: usize, l: u64, r: u64) -> Option<u64> {
            (k + 1 == e).then_some(l + r + 1)
        }
    }

    #[test]
    fn pile_merge_matches_hand_computation() {
        // [3, 1, 2]: merge (1,2)=3 then with 3 -> 6, total 9.
        let engine = IntervalEngine::new(PileMerge {
            sizes: vec![3, 1, 2],
        });
        let solution = engine.run().unwrap();
        assert_eq!(solution.optimal_cost(), 9);
        assert_eq!(solution.split().get(1, 3), Some(1));
        assert_eq!(solution.cost().get(2, 3), Some(3));
    }

    #[test]
    fn ties_keep_smallest_split() {
        let solution = IntervalEngine::new(Flat(5)).run().unwrap();
        for len in 2..=5 {
            for (start, end) in Diagonal::new(5, len).cells() {
                assert_eq!(solution.split().get(start, end), Some(start));
            }
        }
    }

    #[test]
    fn unrepresentable_candidates_are_skipped() {
        let solution = IntervalEngine::new(LastSplitOnly(4)).run().unwrap();
        assert_eq!(solution.split().get(1, 4), Some(3));
        assert_eq!(solution.optimal_cost(), 3);
    }

    #[test]
    fn cell_without_candidates_overflows() {
        struct Never;
        impl IntervalProblem for Never {
            type Cost = u64;
            fn num_items(&self) -> usize {
                3
            }
            fn leaf_cost(&self, _index: usize) -> u64 {
                0
            }
            fn split_cost(&self, _s: usize, _k: usize, _e: usize, _l: u64, _r: u64) -> Option<u64> {
                None
            }
        }
        let err = IntervalEngine::new(Never).run().unwrap_err();
        assert_eq!(err, ChainError::ArithmeticOverflow { start: 1, end: 2 });
    }

    #[test]
    fn zero_items_is_rejected() {
        let err = IntervalEngine::new(Flat(0)).run().unwrap_err();
        assert_eq!(err, ChainError::InvalidChain(ChainDefect::Empty));
    }

    #[test]
    fn single_item_has_no_splits() {
        let solution = IntervalEngine::new(Flat(1)).run().unwrap();
        assert_eq!(solution.optimal_cost(), 0);
        assert_eq!(solution.split().filled(), 0);
        let (cost, split) = solution.into_parts();
        assert_eq!(cost.get(1, 1), Some(0));
        assert_eq!(split.get(1, 1), None);
    }

    #[test]
    fn every_upper_cell_is_filled() {
        let n = 7;
        let solution = IntervalEngine::with_parallel_min_width(Flat(n), 1)
            .run()
            .unwrap();
        assert_eq!(solution.cost().filled(), n * (n + 1) / 2);
        assert_eq!(solution.split().filled(), n * (n - 1) / 2);
    }

    #[test]
    #[should_panic]
    fn with_parallel_min_width_panics_on_zero() {
        let _ = IntervalEngine::with_parallel_min_width(Flat(2), 0);
    }
}
