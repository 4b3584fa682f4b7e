//! NA-aware, recycling views over string vectors.
//!
//! # Overview
//!
//! A container holds `n` physical elements and is iterated over a recycled
//! length `R >= n`; logical index `i` reads physical slot `i % n`. The
//! [`Container`] base carries just those two numbers plus the iteration
//! order:
//!
//! - [`Order::Sequential`] visits `0, 1, ..., R - 1`;
//! - [`Order::PatternMajor`] visits `0, n, 2n, ..., 1, n + 1, ...` so every
//!   physical pattern is handled once per residue and its compiled matcher
//!   can be reused.
//!
//! Haystack containers ([`Utf8Container`], [`Utf8Indexable`],
//! [`Utf16Container`]) also implement [`Haystack`], which is what the search
//! algorithms are generic over.
//!
//! # Examples
//!
//! ```ignore
//! use the_text::container::{Container, Order};
//!
//! let base = Container::new(2, 5, Order::PatternMajor);
//! assert_eq!(base.vectorize().collect::<Vec<_>>(), vec![0, 2, 4, 1, 3]);
//! ```

mod utf16;
mod utf8;
mod utf8_indexable;

use std::borrow::Cow;

use the_core::Span;
use the_stdx::{
  buf::StrBuf,
  utf8 as stdx_utf8,
  utf16 as stdx_utf16,
};

pub use self::{
  utf8::Utf8Container,
  utf8_indexable::Utf8Indexable,
  utf16::Utf16Container,
};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
  #[default]
  Sequential,
  PatternMajor,
}

/// Physical length, recycled length and iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
  n:        usize,
  nrecycle: usize,
  order:    Order,
}

impl Container {
  #[must_use]
  pub fn new(n: usize, nrecycle: usize, order: Order) -> Self {
    debug_assert!(n > 0 || nrecycle == 0);
    debug_assert!(nrecycle == 0 || nrecycle >= n);
    Self {
      n,
      nrecycle: if n == 0 { 0 } else { nrecycle },
      order,
    }
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.n
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.n == 0
  }

  #[inline]
  #[must_use]
  pub fn recycle_len(&self) -> usize {
    self.nrecycle
  }

  /// Physical slot of logical index `i`.
  #[inline]
  #[must_use]
  pub fn physical(&self, i: usize) -> usize {
    debug_assert!(i < self.nrecycle, "index {i} out of range {}", self.nrecycle);
    i % self.n
  }

  #[inline]
  #[must_use]
  pub fn vectorize_init(&self) -> usize {
    if self.nrecycle == 0 { self.vectorize_end() } else { 0 }
  }

  #[inline]
  #[must_use]
  pub fn vectorize_end(&self) -> usize {
    self.nrecycle
  }

  #[must_use]
  pub fn vectorize_next(&self, i: usize) -> usize {
    if self.nrecycle == 0 {
      return self.vectorize_end();
    }
    match self.order {
      Order::Sequential => (i + 1).min(self.nrecycle),
      Order::PatternMajor => {
        if i == self.nrecycle - 1 - self.nrecycle % self.n {
          return self.nrecycle;
        }
        let next = i + self.n;
        if next >= self.nrecycle {
          next % self.n + 1
        } else {
          next
        }
      },
    }
  }

  /// Every logical index exactly once, in this container's order.
  pub fn vectorize(&self) -> impl Iterator<Item = usize> + '_ {
    let end = self.vectorize_end();
    let first = Some(self.vectorize_init()).filter(|&i| i != end);
    std::iter::successors(first, move |&i| Some(self.vectorize_next(i)).filter(|&next| next != end))
  }
}

/// A code unit a haystack is stored in.
pub trait CodeUnit: Copy + Eq + std::fmt::Debug {
  /// Index right after the code point starting at `idx`.
  fn next_boundary(units: &[Self], idx: usize) -> usize;

  /// Units as UTF-8 bytes.
  fn to_utf8(units: &[Self]) -> Cow<'_, [u8]>;

  /// Number of UTF-8 bytes `units` occupy once converted.
  fn utf8_len(units: &[Self]) -> usize;

  fn push_utf8(units: &[Self], buf: &mut StrBuf);
}

impl CodeUnit for u8 {
  #[inline]
  fn next_boundary(units: &[u8], idx: usize) -> usize {
    stdx_utf8::next_boundary(units, idx)
  }

  #[inline]
  fn to_utf8(units: &[u8]) -> Cow<'_, [u8]> {
    Cow::Borrowed(units)
  }

  #[inline]
  fn utf8_len(units: &[u8]) -> usize {
    units.len()
  }

  #[inline]
  fn push_utf8(units: &[u8], buf: &mut StrBuf) {
    buf.push_bytes(units);
  }
}

impl CodeUnit for u16 {
  #[inline]
  fn next_boundary(units: &[u16], idx: usize) -> usize {
    stdx_utf16::next_boundary(units, idx)
  }

  fn to_utf8(units: &[u16]) -> Cow<'_, [u8]> {
    Cow::Owned(stdx_utf16::decode(units).into_bytes())
  }

  fn utf8_len(units: &[u16]) -> usize {
    char::decode_utf16(units.iter().copied())
      .map(|c| c.map_or(char::REPLACEMENT_CHARACTER.len_utf8(), char::len_utf8))
      .sum()
  }

  fn push_utf8(units: &[u16], buf: &mut StrBuf) {
    for c in char::decode_utf16(units.iter().copied()) {
      buf.push_char(c.unwrap_or(char::REPLACEMENT_CHARACTER));
    }
  }
}

/// A searchable container of strings.
pub trait Haystack {
  type Unit: CodeUnit;

  fn base(&self) -> &Container;

  fn is_na(&self, i: usize) -> bool;

  /// Element `i`; must not be NA.
  fn get(&self, i: usize) -> &[Self::Unit];

  /// Rewrites spans given in code units of element `i` into code point
  /// offsets.
  fn spans_to_chars(&mut self, i: usize, spans: &mut [Span]) -> Result<()>;

  /// Unit offset lying `chars` code points after the start of element `i`
  /// or, with `from_end`, before its end. Clamped to the element.
  fn char_to_unit(&mut self, i: usize, chars: usize, from_end: bool) -> Result<usize>;
}

/// Translates sorted unit offsets to code point offsets in one pass.
///
/// `offsets` must be sorted ascending; `step` decodes one code point at
/// the given position and returns the index after it.
pub(crate) fn translate_offsets(
  len: usize,
  offsets: &mut [usize],
  mut step: impl FnMut(usize) -> Result<usize>,
) -> Result<()> {
  debug_assert!(offsets.is_sorted());
  let mut pos = 0;
  let mut chars = 0;
  for offset in offsets.iter_mut() {
    while pos < *offset && pos < len {
      pos = step(pos)?;
      chars += 1;
    }
    *offset = chars;
  }
  Ok(())
}

/// Applies [`translate_offsets`] to the starts and ends of `spans`.
pub(crate) fn translate_spans(
  len: usize,
  spans: &mut [Span],
  step: impl FnMut(usize) -> Result<usize>,
) -> Result<()> {
  let mut offsets: Vec<usize> = spans.iter().flat_map(|s| [s.start, s.end]).collect();
  offsets.sort_unstable();
  offsets.dedup();
  let units = offsets.clone();
  translate_offsets(len, &mut offsets, step)?;

  let lookup = |unit: usize| offsets[units.partition_point(|&u| u < unit)];
  for span in spans.iter_mut() {
    *span = Span::new(lookup(span.start), lookup(span.end));
  }
  Ok(())
}
