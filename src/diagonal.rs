//! Diagonal-level structure used by the engine.
//!
//! A `Diagonal` is the set of cells `(i, i + len - 1)` sharing one interval
//! length. Every cell on a diagonal depends only on strictly shorter
//! diagonals, so its cells can be solved in any order (or concurrently).

/// All intervals of a fixed length over `num_items` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagonal {
    /// Interval length `L`; `1` is the main diagonal.
    pub len: usize,
    /// Number of items in the chain.
    pub num_items: usize,
}

impl Diagonal {
    pub fn new(num_items: usize, len: usize) -> Self {
        Self { len, num_items }
    }

    /// Number of cells on the diagonal.
    #[inline]
    pub fn width(&self) -> usize {
        if self.len == 0 || self.len > self.num_items {
            0
        } else {
            self.num_items - self.len + 1
        }
    }

    /// Returns true if the diagonal has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    /// Cells `(start, end)` in increasing `start` order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (1..=self.width()).map(move |start| (start, start + self.len - 1))
    }
}
