//! The recycling rule shared by every vectorized operation.

use std::sync::atomic::{
  AtomicBool,
  Ordering,
};

static WARN_RECYCLING: AtomicBool = AtomicBool::new(true);

/// Whether operations warn about lengths that do not recycle evenly.
#[inline]
#[must_use]
pub fn recycling_warnings() -> bool {
  WARN_RECYCLING.load(Ordering::Relaxed)
}

/// Turns the uneven recycling warning on or off, returning the previous
/// setting.
pub fn set_recycling_warnings(enabled: bool) -> bool {
  WARN_RECYCLING.swap(enabled, Ordering::Relaxed)
}

/// Common length of a vectorized call over arguments of the given lengths.
///
/// Zero if any argument is empty, otherwise the longest length. When the
/// longest length is not a multiple of every other length a warning is
/// emitted (if `warn` is set) and shorter arguments are still recycled.
#[must_use]
pub fn recycle_length(warn: bool, lengths: &[usize]) -> usize {
  if lengths.iter().any(|&n| n == 0) {
    return 0;
  }

  let longest = lengths.iter().copied().max().unwrap_or(0);
  if warn && lengths.iter().any(|&n| longest % n != 0) {
    tracing::warn!(?lengths, "longer object length is not a multiple of shorter object length");
  }
  longest
}
