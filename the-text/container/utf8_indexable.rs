use the_core::Span;
use the_stdx::utf8;

use super::{
  Container,
  Haystack,
  Order,
  Utf8Container,
  translate_spans,
};
use crate::{
  error::Result,
  strvec::StrVec,
};

/// Position remembered between two translations of the same element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
  elem:  usize,
  chars: usize,
  byte:  usize,
}

/// A [`Utf8Container`] that can also translate between code point and
/// byte offsets.
///
/// The last translated position is cached per direction, so monotone
/// queries against one element walk the string only once.
#[derive(Debug, Clone)]
pub struct Utf8Indexable<'a> {
  inner: Utf8Container<'a>,
  fwd:   Option<Cursor>,
  back:  Option<Cursor>,
}

impl<'a> Utf8Indexable<'a> {
  #[must_use]
  pub fn new(data: &'a StrVec, nrecycle: usize) -> Self {
    Self::with_order(data, nrecycle, Order::Sequential)
  }

  #[must_use]
  pub fn with_order(data: &'a StrVec, nrecycle: usize, order: Order) -> Self {
    Self {
      inner: Utf8Container::with_order(data, nrecycle, order),
      fwd:   None,
      back:  None,
    }
  }

  #[inline]
  #[must_use]
  pub fn view(&self) -> &Utf8Container<'a> {
    &self.inner
  }

  #[inline]
  #[must_use]
  pub fn is_na(&self, i: usize) -> bool {
    self.inner.is_na(i)
  }

  #[inline]
  #[must_use]
  pub fn get(&self, i: usize) -> &'a [u8] {
    self.inner.get(i)
  }

  /// Byte offset of the code point at index `chars` in element `i`,
  /// clamped to the string length.
  pub fn char_to_byte_fwd(&mut self, i: usize, chars: usize) -> Result<usize> {
    let hay = self.inner.get(i);
    if hay.is_ascii() {
      return Ok(chars.min(hay.len()));
    }

    let elem = self.inner.base().physical(i);
    let mut cur = match self.fwd {
      Some(c) if c.elem == elem && c.chars <= chars => c,
      _ => {
        Cursor {
          elem,
          chars: 0,
          byte: 0,
        }
      },
    };
    while cur.chars < chars && cur.byte < hay.len() {
      utf8::next_char(hay, &mut cur.byte)?;
      cur.chars += 1;
    }
    self.fwd = Some(cur);
    Ok(cur.byte)
  }

  /// Byte offset that lies `chars` code points before the end of element
  /// `i`, clamped to 0.
  pub fn char_to_byte_back(&mut self, i: usize, chars: usize) -> Result<usize> {
    let hay = self.inner.get(i);
    if hay.is_ascii() {
      return Ok(hay.len().saturating_sub(chars));
    }

    let elem = self.inner.base().physical(i);
    let mut cur = match self.back {
      Some(c) if c.elem == elem && c.chars <= chars => c,
      _ => {
        Cursor {
          elem,
          chars: 0,
          byte: hay.len(),
        }
      },
    };
    while cur.chars < chars && cur.byte > 0 {
      utf8::prev_char(hay, &mut cur.byte)?;
      cur.chars += 1;
    }
    self.back = Some(cur);
    Ok(cur.byte)
  }

  /// Byte offset for a signed code point position: non-negative values
  /// count from the start, negative ones from the end (`-1` is the last
  /// code point).
  pub fn char_to_byte_signed(&mut self, i: usize, pos: i64) -> Result<usize> {
    match usize::try_from(pos) {
      Ok(pos) => self.char_to_byte_fwd(i, pos),
      Err(_) => self.char_to_byte_back(i, pos.unsigned_abs() as usize),
    }
  }

  /// Rewrites byte spans of element `i` into code point spans.
  pub fn bytes_to_chars(&mut self, i: usize, spans: &mut [Span]) -> Result<()> {
    let hay = self.inner.get(i);
    if hay.is_ascii() {
      return Ok(());
    }
    translate_spans(hay.len(), spans, |mut pos| {
      utf8::next_char(hay, &mut pos)?;
      Ok(pos)
    })
  }
}

impl Haystack for Utf8Indexable<'_> {
  type Unit = u8;

  fn base(&self) -> &Container {
    self.inner.base()
  }

  fn is_na(&self, i: usize) -> bool {
    self.inner.is_na(i)
  }

  fn get(&self, i: usize) -> &[u8] {
    self.inner.get(i)
  }

  fn spans_to_chars(&mut self, i: usize, spans: &mut [Span]) -> Result<()> {
    self.bytes_to_chars(i, spans)
  }

  fn char_to_unit(&mut self, i: usize, chars: usize, from_end: bool) -> Result<usize> {
    if from_end {
      self.char_to_byte_back(i, chars)
    } else {
      self.char_to_byte_fwd(i, chars)
    }
  }
}
