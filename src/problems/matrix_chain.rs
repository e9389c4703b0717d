//! Matrix-chain multiplication as an interval DP instance.
//!
//! Classic DP:
//! - Given dimensions p[0..n], matrices A_i of size p[i-1] x p[i],
//! - Find the parenthesization minimizing scalar multiplications, where
//!   multiplying an `a x b` by a `b x c` matrix costs `a * b * c`.
//!
//! Costs are `u64` and every product and sum is checked: a candidate that
//! does not fit is never chosen, and an interval with no representable
//! candidate fails the run with [`ChainError::ArithmeticOverflow`].

use std::fmt;

use crate::builder::IntervalEngineBuilder;
use crate::engine::IntervalSolution;
use crate::error::ChainError;
use crate::matrix::{Dimensions, MatrixSpec};
use crate::table::SplitTable;
use crate::traits::IntervalProblem;

/// Matrix-chain DP instance over a validated dimension vector.
#[derive(Clone, Debug)]
pub struct MatrixChainProblem {
    dims: Dimensions,
}

impl MatrixChainProblem {
    /// Build from matrix shapes; rejects empty and non-conformable chains.
    pub fn new(matrices: &[MatrixSpec]) -> Result<Self, ChainError> {
        Dimensions::from_matrices(matrices).map(Self::from)
    }

    /// Build from a raw dimension vector `p[0..=n]`.
    pub fn from_dims(p: Vec<usize>) -> Result<Self, ChainError> {
        Dimensions::from_vec(p).map(Self::from)
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    #[inline]
    fn p(&self, i: usize) -> Option<u64> {
        u64::try_from(self.dims.as_slice()[i]).ok()
    }
}

impl From<Dimensions> for MatrixChainProblem {
    fn from(dims: Dimensions) -> Self {
        Self { dims }
    }
}

impl IntervalProblem for MatrixChainProblem {
    type Cost = u64;

    fn num_items(&self) -> usize {
        self.dims.num_matrices()
    }

    fn leaf_cost(&self, _index: usize) -> u64 {
        0
    }

    fn split_cost(
        &self,
        start: usize,
        split: usize,
        end: usize,
        left: u64,
        right: u64,
    ) -> Option<u64> {
        let product = self
            .p(start - 1)?
            .checked_mul(self.p(split)?)?
            .checked_mul(self.p(end)?)?;
        left.checked_add(right)?.checked_add(product)
    }
}

/// Cost and split tables of an optimized chain.
pub type ChainSolution = IntervalSolution<u64>;

/// One split decision: the product `A_start .. A_end` is computed as
/// `(A_start .. A_split)(A_split+1 .. A_end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitDecision {
    pub start: usize,
    pub end: usize,
    pub split: usize,
}

/// Bracketing of a chain, as a binary tree over matrix positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parenthesization {
    /// The single matrix `A_i` (1-based).
    Matrix(usize),
    /// Product of two adjacent sub-chains.
    Product(Box<Parenthesization>, Box<Parenthesization>),
}

impl Parenthesization {
    /// Number of pairwise multiplications performed.
    pub fn num_products(&self) -> usize {
        match self {
            Parenthesization::Matrix(_) => 0,
            Parenthesization::Product(l, r) => 1 + l.num_products() + r.num_products(),
        }
    }

    /// Scalar multiplications this bracketing performs on `dims`, or `None`
    /// if it references a missing matrix or the count overflows `u64`.
    pub fn evaluate(&self, dims: &Dimensions) -> Option<u64> {
        self.evaluate_shape(dims).map(|(_, cost)| cost)
    }

    fn evaluate_shape(&self, dims: &Dimensions) -> Option<(MatrixSpec, u64)> {
        match self {
            Parenthesization::Matrix(i) => dims.shape(*i).map(|shape| (shape, 0)),
            Parenthesization::Product(l, r) => {
                let (ls, lc) = l.evaluate_shape(dims)?;
                let (rs, rc) = r.evaluate_shape(dims)?;
                let product = u64::try_from(ls.rows)
                    .ok()?
                    .checked_mul(u64::try_from(ls.cols).ok()?)?
                    .checked_mul(u64::try_from(rs.cols).ok()?)?;
                let cost = lc.checked_add(rc)?.checked_add(product)?;
                Some((MatrixSpec::new(ls.rows, rs.cols), cost))
            }
        }
    }
}

impl fmt::Display for Parenthesization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parenthesization::Matrix(i) => write!(f, "A{i}"),
            Parenthesization::Product(l, r) => write!(f, "({l} {r})"),
        }
    }
}

impl<C: Copy> IntervalSolution<C> {
    /// Split decisions of the optimal bracketing in pre-order (outermost
    /// product first, then the left sub-chain, then the right).
    pub fn split_decisions(&self) -> Vec<SplitDecision> {
        let mut decisions = Vec::with_capacity(self.num_items().saturating_sub(1));
        fn collect(out: &mut Vec<SplitDecision>, split: &SplitTable, start: usize, end: usize) {
            if start >= end {
                return;
            }
            let k = split_at(split, start, end);
            out.push(SplitDecision {
                start,
                end,
                split: k,
            });
            collect(out, split, start, k);
            collect(out, split, k + 1, end);
        }
        collect(&mut decisions, self.split(), 1, self.num_items());
        decisions
    }

    /// The optimal bracketing as a tree.
    pub fn parenthesization(&self) -> Parenthesization {
        fn build(split: &SplitTable, start: usize, end: usize) -> Parenthesization {
            if start == end {
                return Parenthesization::Matrix(start);
            }
            let k = split_at(split, start, end);
            Parenthesization::Product(
                Box::new(build(split, start, k)),
                Box::new(build(split, k + 1, end)),
            )
        }
        build(self.split(), 1, self.num_items())
    }
}

fn split_at(split: &SplitTable, start: usize, end: usize) -> usize {
    split
        .get(start, end)
        .expect("engine records a split for every interval of length >= 2")
}

/// Stateless entry point for optimizing matrix chains.
///
/// Each call builds its own tables; nothing is shared between calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChainOptimizer {
    parallel_min_width: Option<usize>,
}

impl ChainOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the diagonal width at which the `parallel` feature kicks in.
    ///
    /// # Panics
    /// [`optimize`](Self::optimize) panics if `width == 0`.
    pub fn with_parallel_min_width(mut self, width: usize) -> Self {
        self.parallel_min_width = Some(width);
        self
    }

    /// Compute the minimum-cost parenthesization of `matrices`.
    ///
    /// # Errors
    /// - [`ChainError::InvalidChain`] if `matrices` is empty or two adjacent
    ///   matrices do not conform; no table is allocated in that case.
    /// - [`ChainError::ArithmeticOverflow`] if some sub-chain's cost does not
    ///   fit in `u64`.
    pub fn optimize(&self, matrices: &[MatrixSpec]) -> Result<ChainSolution, ChainError> {
        self.solve(MatrixChainProblem::new(matrices)?)
    }

    /// Same as [`optimize`](Self::optimize) for a raw dimension vector.
    pub fn optimize_dims(&self, p: &[usize]) -> Result<ChainSolution, ChainError> {
        self.solve(MatrixChainProblem::from_dims(p.to_vec())?)
    }

    fn solve(&self, problem: MatrixChainProblem) -> Result<ChainSolution, ChainError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(matrices = problem.num_items(), "optimizing matrix chain");

        let mut builder = IntervalEngineBuilder::new(problem);
        if let Some(w) = self.parallel_min_width {
            builder = builder.with_parallel_min_width(w);
        }
        builder.build().run()
    }
}

/// Optimize `matrices` with the default configuration.
pub fn optimize(matrices: &[MatrixSpec]) -> Result<ChainSolution, ChainError> {
    ChainOptimizer::new().optimize(matrices)
}
