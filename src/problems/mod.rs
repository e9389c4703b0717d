//! Problem implementations for the interval engine.
//!
//! These modules show how to implement
//! [`IntervalProblem`](crate::traits::IntervalProblem) for concrete dynamic
//! programs:
//! - [`matrix_chain`]  : Matrix-chain multiplication.

pub mod matrix_chain;
