//! Assorted utilities and helpers.

/// Smallest diagonal width worth solving in parallel.
///
/// Heuristic used by [`crate::engine::IntervalEngine::new`]: roughly `√n`,
/// clamped to `[4, 64]`, so short chains never pay rayon's dispatch cost and
/// long chains start splitting work well before the diagonals thin out.
/// Ignored unless the `parallel` feature is enabled.
#[inline]
pub fn default_parallel_min_width(num_items: usize) -> usize {
    const MIN: usize = 4;
    const MAX: usize = 64;
    if num_items <= 1 {
        MIN
    } else {
        ((num_items as f64).sqrt().ceil() as usize).clamp(MIN, MAX)
    }
}
