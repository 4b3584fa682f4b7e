//! Unicode capabilities consumed by the text engine: character classes,
//! display width, line breaking, case mapping, collation and regex.

pub mod casemap;
pub mod chars;
pub mod collator;
pub mod grapheme;
pub mod line_ending;
pub mod properties;
pub mod regex;

/// Half-open `[start, end)` offsets into a haystack, in whatever unit the
/// producer works in (bytes, UTF-16 code units or code points).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
  pub start: usize,
  pub end:   usize,
}

impl Span {
  #[inline]
  #[must_use]
  pub const fn new(start: usize, end: usize) -> Self {
    Self { start, end }
  }

  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.end - self.start
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.start == self.end
  }

  #[inline]
  #[must_use]
  pub fn range(&self) -> std::ops::Range<usize> {
    self.start..self.end
  }
}

impl From<std::ops::Range<usize>> for Span {
  fn from(range: std::ops::Range<usize>) -> Self {
    Self::new(range.start, range.end)
  }
}
