use the_core::Span;
use the_stdx::{
  utf8,
  utf16,
};

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

/// Owned UTF-16 copy of a [`StrVec`], used where the search engine works
/// on UTF-16 text.
///
/// Elements are converted once at construction; malformed UTF-8 is a hard
/// error. A deep container stores one slot per recycled index so each can
/// be rewritten independently with [`Utf16Container::set`].
#[derive(Debug, Clone)]
pub struct Utf16Container {
  base: Container,
  data: Vec<Option<Vec<u16>>>,
}

impl Utf16Container {
  /// Shallow container: one slot per physical element.
  pub fn new(src: &StrVec, nrecycle: usize) -> Result<Self> {
    Self::with_order(src, nrecycle, Order::Sequential)
  }

  pub fn with_order(src: &StrVec, nrecycle: usize, order: Order) -> Result<Self> {
    let data = src
      .iter()
      .map(|item| item.map(|b| utf8::validate(b).map(utf16::encode)).transpose())
      .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Self {
      base: Container::new(src.len(), nrecycle, order),
      data,
    })
  }

  /// Deep container: every recycled index gets its own writable slot.
  pub fn new_writable(src: &StrVec, nrecycle: usize) -> Result<Self> {
    let shallow = Self::new(src, nrecycle)?;
    let data = (0..shallow.base.recycle_len())
      .map(|i| shallow.data[shallow.base.physical(i)].clone())
      .collect::<Vec<_>>();
    Ok(Self {
      base: Container::new(data.len(), data.len(), Order::Sequential),
      data,
    })
  }

  #[inline]
  #[must_use]
  pub fn base(&self) -> &Container {
    &self.base
  }

  #[inline]
  #[must_use]
  pub fn is_na(&self, i: usize) -> bool {
    self.data[self.base.physical(i)].is_none()
  }

  #[inline]
  #[must_use]
  pub fn get(&self, i: usize) -> &[u16] {
    let item = self.data[self.base.physical(i)].as_deref();
    debug_assert!(item.is_some(), "get() called on NA element {i}");
    item.unwrap_or_default()
  }

  pub fn get_mut(&mut self, i: usize) -> Option<&mut Vec<u16>> {
    let idx = self.base.physical(i);
    self.data[idx].as_mut()
  }

  pub fn set(&mut self, i: usize, value: Option<Vec<u16>>) {
    let idx = self.base.physical(i);
    self.data[idx] = value;
  }

  /// Rewrites UTF-16 spans of element `i` into code point spans; a
  /// surrogate pair counts as one code point.
  pub fn units_to_chars(&self, i: usize, spans: &mut [Span]) {
    let units = self.get(i);
    let translated = translate_spans(units.len(), spans, |idx| Ok(utf16::next_boundary(units, idx)));
    debug_assert!(translated.is_ok());
  }

  /// The physical elements converted back to UTF-8.
  #[must_use]
  pub fn to_strvec(&self) -> StrVec {
    self
      .data
      .iter()
      .map(|item| item.as_deref().map(|u| utf16::decode(u).into_bytes().into_boxed_slice()))
      .collect()
  }
}

impl Haystack for Utf16Container {
  type Unit = u16;

  fn base(&self) -> &Container {
    &self.base
  }

  fn is_na(&self, i: usize) -> bool {
    Utf16Container::is_na(self, i)
  }

  fn get(&self, i: usize) -> &[u16] {
    Utf16Container::get(self, i)
  }

  fn spans_to_chars(&mut self, i: usize, spans: &mut [Span]) -> Result<()> {
    self.units_to_chars(i, spans);
    Ok(())
  }

  fn char_to_unit(&mut self, i: usize, chars: usize, from_end: bool) -> Result<usize> {
    let units = Utf16Container::get(self, i);
    if !from_end {
      let mut pos = 0;
      for _ in 0..chars {
        if pos >= units.len() {
          break;
        }
        pos = utf16::next_boundary(units, pos);
      }
      return Ok(pos);
    }

    let mut pos = units.len();
    for _ in 0..chars {
      if pos == 0 {
        break;
      }
      pos -= 1;
      if !utf16::is_char_boundary(units, pos) {
        pos -= 1;
      }
    }
    Ok(pos)
  }
}
