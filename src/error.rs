//! Error types returned by the interval engine and the matrix-chain optimizer.
//!
//! Every failure is fatal for the call that produced it: there is no partial
//! table to salvage once a chain is rejected or a cell cannot be represented.

use thiserror::Error;

/// Why a chain was rejected before any table was allocated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainDefect {
    /// No matrices were supplied.
    #[error("chain is empty")]
    Empty,

    /// A raw dimension vector needs at least `p[0]` and `p[1]`.
    #[error("dimension vector of length {len} describes no matrix (need at least 2 entries)")]
    TooShort {
        /// Length of the rejected vector
        len: usize,
    },

    /// Matrix `index` (1-based) cannot be multiplied by its successor.
    #[error("A{index} has {cols} columns but A{next} has {next_rows} rows", next = .index + 1)]
    NonConformable {
        /// 1-based position of the left matrix
        index: usize,
        /// Column count of the left matrix
        cols: usize,
        /// Row count of the right matrix
        next_rows: usize,
    },
}

/// Errors produced while building or solving an interval DP.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The input chain is malformed.
    #[error("invalid chain: {0}")]
    InvalidChain(#[from] ChainDefect),

    /// No split of the interval yields a cost representable in the cost type.
    #[error("scalar multiplication cost of A{start}..A{end} overflows the cost type")]
    ArithmeticOverflow {
        /// 1-based first matrix of the interval
        start: usize,
        /// 1-based last matrix of the interval
        end: usize,
    },

    /// A table cell outside `1 <= start <= end <= len` was requested.
    #[error("cell ({start}, {end}) is outside a table over {len} items")]
    IndexOutOfRange {
        /// Requested row
        start: usize,
        /// Requested column
        end: usize,
        /// Number of items covered by the table
        len: usize,
    },
}

impl ChainError {
    /// Returns true if the chain was rejected before computation began.
    pub fn is_invalid_chain(&self) -> bool {
        matches!(self, ChainError::InvalidChain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_conformable_message_names_both_matrices() {
        let err = ChainError::from(ChainDefect::NonConformable {
            index: 1,
            cols: 3,
            next_rows: 4,
        });
        assert!(err.is_invalid_chain());
        assert_eq!(
            err.to_string(),
            "invalid chain: A1 has 3 columns but A2 has 4 rows"
        );
    }

    #[test]
    fn overflow_is_not_an_invalid_chain() {
        let err = ChainError::ArithmeticOverflow { start: 2, end: 5 };
        assert!(!err.is_invalid_chain());
        assert!(err.to_string().contains("A2..A5"));
    }
}
