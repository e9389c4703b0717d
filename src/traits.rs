//! Core trait definition for interval dynamic programs.
//!
//! To plug a recurrence into [`IntervalEngine`](crate::engine::IntervalEngine),
//! implement [`IntervalProblem`] for a struct that captures the instance
//! (dimensions, weights, ...).
//!
//! The trait encodes the classic interval recurrence:
//! - Items `1..=n`, subproblems are contiguous ranges `[i, j]`.
//! - A single item `[i, i]` has a fixed leaf cost.
//! - A range `[i, j]` is solved by choosing a split `k` in `i..j` and combining
//!   the optimal costs of `[i, k]` and `[k+1, j]` with a split-dependent charge.
//!
//! The engine fills ranges in increasing length and keeps the first split that
//! attains the minimum.

/// Trait for an interval DP instance.
///
/// Semantics:
/// - `num_items()` is `n`; the engine fills cells `(i, j)` with `1 <= i <= j <= n`.
/// - `leaf_cost(i)` seeds `(i, i)`.
/// - `split_cost(i, k, j, left, right)` is the cost of solving `[i, j]` by
///   splitting after `k`, given the already-optimal `left = cost(i, k)` and
///   `right = cost(k + 1, j)`.
pub trait IntervalProblem {
    /// Objective / cost type.
    ///
    /// Must support ordering so the engine can pick the minimum.
    type Cost: Copy + Ord;

    /// Number of items `n` in the sequence.
    fn num_items(&self) -> usize;

    /// Cost of the trivial interval `[index, index]`.
    fn leaf_cost(&self, index: usize) -> Self::Cost;

    /// Candidate cost for `[start, end]` split into `[start, split]` and
    /// `[split + 1, end]`.
    ///
    /// Return `None` if the candidate is not representable in `Cost`. Such a
    /// candidate is treated as larger than every representable one.
    fn split_cost(
        &self,
        start: usize,
        split: usize,
        end: usize,
        left: Self::Cost,
        right: Self::Cost,
    ) -> Option<Self::Cost>;
}
