//! Matrix shapes and the dimension vector derived from a chain of them.
//!
//! A chain `A1 .. An` is fully described by `p[0..=n]`, where `Ai` has shape
//! `p[i-1] x p[i]`. [`Dimensions`] is only ever constructed from a conformable
//! chain, so the optimizer never has to second-guess its input.

use crate::error::{ChainDefect, ChainError};

/// Shape of a single matrix in a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatrixSpec {
    pub rows: usize,
    pub cols: usize,
}

impl MatrixSpec {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// True if `self * next` is defined.
    #[inline]
    pub fn conforms_to(&self, next: &MatrixSpec) -> bool {
        self.cols == next.rows
    }
}

impl From<(usize, usize)> for MatrixSpec {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self::new(rows, cols)
    }
}

/// Dimension vector `p[0..=n]` of a conformable, non-empty chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    p: Vec<usize>,
}

impl Dimensions {
    /// Build `p` from matrix shapes, rejecting empty or non-conformable chains.
    ///
    /// `p[0]` is the row count of the first matrix and `p[i]` the column count
    /// of matrix `i`.
    pub fn from_matrices(matrices: &[MatrixSpec]) -> Result<Self, ChainError> {
        let first = matrices.first().ok_or(ChainDefect::Empty)?;

        if let Some((index, pair)) = matrices
            .windows(2)
            .enumerate()
            .find(|(_, pair)| !pair[0].conforms_to(&pair[1]))
        {
            return Err(ChainDefect::NonConformable {
                index: index + 1,
                cols: pair[0].cols,
                next_rows: pair[1].rows,
            }
            .into());
        }

        let mut p = Vec::with_capacity(matrices.len() + 1);
        p.push(first.rows);
        p.extend(matrices.iter().map(|m| m.cols));
        Ok(Self { p })
    }

    /// Wrap a raw dimension vector. Any vector of length >= 2 is conformable
    /// by construction.
    pub fn from_vec(p: Vec<usize>) -> Result<Self, ChainError> {
        match p.len() {
            0 => Err(ChainDefect::Empty.into()),
            1 => Err(ChainDefect::TooShort { len: 1 }.into()),
            _ => Ok(Self { p }),
        }
    }

    /// Number of matrices `n`.
    #[inline]
    pub fn num_matrices(&self) -> usize {
        self.p.len() - 1
    }

    /// Shape of matrix `i` (1-based), if it exists.
    pub fn shape(&self, i: usize) -> Option<MatrixSpec> {
        if i == 0 || i > self.num_matrices() {
            return None;
        }
        Some(MatrixSpec::new(self.p[i - 1], self.p[i]))
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.p
    }

    /// Shapes of every matrix in order.
    pub fn to_matrices(&self) -> Vec<MatrixSpec> {
        self.p
            .windows(2)
            .map(|w| MatrixSpec::new(w[0], w[1]))
            .collect()
    }
}
