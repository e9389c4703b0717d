//! Matrix-chain multiplication on an interval dynamic-programming engine.
//!
//! Given the shapes of matrices `A1 .. An`, this crate computes the minimum
//! number of scalar multiplications needed to form their product and the
//! split points of a parenthesization achieving it.
//!
//! ## Core idea
//! 1. Model your recurrence as an *interval* DP: subproblems are ranges
//!    `[i, j]`, solved by choosing a split `k`.
//! 2. Implement the [`IntervalProblem`] trait for that recurrence.
//! 3. Let [`IntervalEngine`] fill the cost and split tables in order of
//!    increasing range length and hand both back to you.
//!
//! ## Quick start
//! ```
//! use chain_dp::{optimize, MatrixSpec};
//!
//! let chain = [
//!     MatrixSpec::new(30, 35),
//!     MatrixSpec::new(35, 15),
//!     MatrixSpec::new(15, 5),
//!     MatrixSpec::new(5, 10),
//!     MatrixSpec::new(10, 20),
//!     MatrixSpec::new(20, 25),
//! ];
//! let solution = optimize(&chain).unwrap();
//! assert_eq!(solution.optimal_cost(), 15125);
//! assert_eq!(solution.split().get(1, 6), Some(3));
//! assert_eq!(solution.parenthesization().to_string(), "((A1 (A2 A3)) ((A4 A5) A6))");
//! ```
//!
//! ## Features
//! - `parallel`: solve wide diagonals with rayon. Tables are identical to the
//!   serial schedule, including tie-breaks.
//! - `tracing`: emit spans and events through the `tracing` facade.

pub mod builder;
pub mod diagonal;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod problems;
pub mod table;
pub mod traits;
pub mod utils;

pub use crate::builder::IntervalEngineBuilder;
pub use crate::engine::{IntervalEngine, IntervalSolution};
pub use crate::error::{ChainDefect, ChainError};
pub use crate::matrix::{Dimensions, MatrixSpec};
pub use crate::problems::matrix_chain::{optimize, ChainOptimizer, ChainSolution};
pub use crate::table::{CostTable, IntervalTable, SplitTable};
pub use crate::traits::IntervalProblem;
