use the_core::Span;
use the_stdx::utf8;

use super::{
  Container,
  Haystack,
  Order,
  translate_spans,
};
use crate::{
  error::Result,
  strvec::StrVec,
};

/// Read-only view over a [`StrVec`] of UTF-8 strings.
#[derive(Debug, Clone, Copy)]
pub struct Utf8Container<'a> {
  base: Container,
  data: &'a StrVec,
}

impl<'a> Utf8Container<'a> {
  #[must_use]
  pub fn new(data: &'a StrVec, nrecycle: usize) -> Self {
    Self::with_order(data, nrecycle, Order::Sequential)
  }

  #[must_use]
  pub fn with_order(data: &'a StrVec, nrecycle: usize, order: Order) -> Self {
    Self {
      base: Container::new(data.len(), nrecycle, order),
      data,
    }
  }

  #[inline]
  #[must_use]
  pub fn base(&self) -> &Container {
    &self.base
  }

  #[inline]
  #[must_use]
  pub fn is_na(&self, i: usize) -> bool {
    self.data.is_na(self.base.physical(i))
  }

  /// Element `i`. Callers check [`Self::is_na`] first.
  #[inline]
  #[must_use]
  pub fn get(&self, i: usize) -> &'a [u8] {
    let item = self.data.get(self.base.physical(i));
    debug_assert!(item.is_some(), "get() called on NA element {i}");
    item.unwrap_or_default()
  }

  /// Element `i`, `None` when NA.
  #[inline]
  #[must_use]
  pub fn get_opt(&self, i: usize) -> Option<&'a [u8]> {
    self.data.get(self.base.physical(i))
  }

  /// Whether `i` and `j` read the same physical string.
  #[inline]
  #[must_use]
  pub fn same_physical(&self, i: usize, j: usize) -> bool {
    self.base.physical(i) == self.base.physical(j)
  }
}

impl Haystack for Utf8Container<'_> {
  type Unit = u8;

  fn base(&self) -> &Container {
    &self.base
  }

  fn is_na(&self, i: usize) -> bool {
    Utf8Container::is_na(self, i)
  }

  fn get(&self, i: usize) -> &[u8] {
    Utf8Container::get(self, i)
  }

  fn spans_to_chars(&mut self, i: usize, spans: &mut [Span]) -> Result<()> {
    let hay = Utf8Container::get(self, i);
    translate_spans(hay.len(), spans, |mut pos| {
      utf8::next_char(hay, &mut pos)?;
      Ok(pos)
    })
  }

  fn char_to_unit(&mut self, i: usize, chars: usize, from_end: bool) -> Result<usize> {
    let hay = Utf8Container::get(self, i);
    let mut pos = if from_end { hay.len() } else { 0 };
    for _ in 0..chars {
      if from_end && pos > 0 {
        utf8::prev_char(hay, &mut pos)?;
      } else if !from_end && pos < hay.len() {
        utf8::next_char(hay, &mut pos)?;
      } else {
        break;
      }
    }
    Ok(pos)
  }
}
