//! Square, 1-indexed DP tables over intervals `[start, end]` of a chain.
//!
//! Cells are explicit `Option`s: a cell is `None` until the engine fills it,
//! and cells below the diagonal (`start > end`) are never filled. Once a
//! solution is returned the table is only reachable through `&self` methods.

use crate::error::ChainError;

/// Table over `1 <= start <= end <= len`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalTable<T> {
    len: usize,
    cells: Vec<Option<T>>,
}

/// Minimal scalar-multiplication cost per interval.
pub type CostTable = IntervalTable<u64>;

/// Optimal split point `k` per interval, absent on the diagonal.
pub type SplitTable = IntervalTable<usize>;

impl<T: Copy> IntervalTable<T> {
    /// Allocate an all-empty table over `len` items.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            len,
            cells: vec![None; len * len],
        }
    }

    #[inline]
    fn offset(&self, start: usize, end: usize) -> Option<usize> {
        if start == 0 || start > end || end > self.len {
            return None;
        }
        Some((start - 1) * self.len + (end - 1))
    }

    /// Number of items (matrices) the table covers.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value of cell `(start, end)`, or `None` if unset or out of range.
    #[inline]
    pub fn get(&self, start: usize, end: usize) -> Option<T> {
        self.offset(start, end).and_then(|idx| self.cells[idx])
    }

    /// Like [`get`](Self::get), but distinguishes an out-of-range request from
    /// an unset cell.
    pub fn try_get(&self, start: usize, end: usize) -> Result<Option<T>, ChainError> {
        self.offset(start, end)
            .map(|idx| self.cells[idx])
            .ok_or(ChainError::IndexOutOfRange {
                start,
                end,
                len: self.len,
            })
    }

    /// Set cell `(start, end)`.
    pub(crate) fn set(&mut self, start: usize, end: usize, value: T) -> Result<(), ChainError> {
        let idx = self.offset(start, end).ok_or(ChainError::IndexOutOfRange {
            start,
            end,
            len: self.len,
        })?;
        self.cells[idx] = Some(value);
        Ok(())
    }

    /// Number of filled cells.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Row `start` as `Option`s for `end` in `1..=len` (entries with `end < start` are `None`).
    pub fn row(&self, start: usize) -> impl Iterator<Item = Option<T>> + '_ {
        (1..=self.len).map(move |end| self.get(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_table_is_unset() {
        let t: IntervalTable<u64> = IntervalTable::new(3);
        assert_eq!(t.len(), 3);
        assert_eq!(t.filled(), 0);
        assert_eq!(t.get(1, 3), None);
        assert_eq!(t.try_get(1, 3), Ok(None));
    }

    #[test]
    fn lower_triangle_and_bounds_are_out_of_range() {
        let mut t: IntervalTable<u64> = IntervalTable::new(3);
        assert!(t.set(2, 1, 5).is_err());
        assert!(t.set(0, 1, 5).is_err());
        assert_eq!(
            t.try_get(1, 4),
            Err(ChainError::IndexOutOfRange {
                start: 1,
                end: 4,
                len: 3
            })
        );
        assert_eq!(t.get(3, 2), None);
    }

    #[test]
    fn set_then_get() {
        let mut t: IntervalTable<usize> = IntervalTable::new(4);
        t.set(2, 4, 3).unwrap();
        t.set(4, 4, 0).unwrap();
        assert_eq!(t.get(2, 4), Some(3));
        assert_eq!(t.filled(), 2);
        let row: Vec<_> = t.row(2).collect();
        assert_eq!(row, vec![None, None, None, Some(3)]);
    }

    #[test]
    fn empty_table() {
        let t: IntervalTable<u64> = IntervalTable::new(0);
        assert!(t.is_empty());
        assert!(t.try_get(1, 1).is_err());
    }
}
