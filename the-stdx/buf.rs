//! Reusable output buffer with a two-phase (measure, then write) protocol.
//!
//! # Overview
//!
//! Output strings are assembled in a [`StrBuf`] that is kept alive across
//! the elements of one vectorized call. Producers implement [`Measure`]:
//! [`Measure::measure`] reports the exact byte length of the output and
//! [`Measure::write`] emits it. [`StrBuf::build`] reserves once, writes and
//! checks that both phases agree.
//!
//! # Examples
//!
//! ```ignore
//! use the_stdx::buf::{Measure, StrBuf};
//!
//! struct Twice<'a>(&'a [u8]);
//!
//! impl Measure for Twice<'_> {
//!   fn measure(&self) -> usize { 2 * self.0.len() }
//!   fn write(&self, buf: &mut StrBuf) {
//!     buf.push_bytes(self.0);
//!     buf.push_bytes(self.0);
//!   }
//! }
//!
//! let mut buf = StrBuf::new();
//! assert_eq!(buf.build(&Twice(b"ab")).unwrap(), b"abab");
//! ```

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BufError {
  #[error("buffer overrun: measured {measured} bytes but wrote {written}")]
  Overrun { measured: usize, written: usize },
  #[error("output of {requested} bytes exceeds the {} byte limit", StrBuf::MAX_LEN)]
  TooLong { requested: usize },
}

/// An output that knows its size before it is written.
pub trait Measure {
  fn measure(&self) -> usize;
  fn write(&self, buf: &mut StrBuf);
}

#[derive(Debug, Default, Clone)]
pub struct StrBuf {
  data: Vec<u8>,
}

impl StrBuf {
  /// Longest output a buffer will hold.
  pub const MAX_LEN: usize = i32::MAX as usize;

  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_capacity(size: usize) -> Self {
    Self {
      data: Vec::with_capacity(size),
    }
  }

  /// Ensures room for `size` bytes in total. Never shrinks.
  pub fn reserve_total(&mut self, size: usize) {
    if size > self.data.capacity() {
      self.data.reserve(size - self.data.len());
    }
  }

  /// [`StrBuf::reserve_total`] for sizes computed from caller input: sizes
  /// over [`StrBuf::MAX_LEN`] or that cannot be allocated are an error.
  pub fn try_reserve_total(&mut self, size: usize) -> Result<(), BufError> {
    if size > Self::MAX_LEN {
      return Err(BufError::TooLong { requested: size });
    }
    if size > self.data.capacity() {
      self.data
        .try_reserve(size - self.data.len())
        .map_err(|_| BufError::TooLong { requested: size })?;
    }
    Ok(())
  }

  #[inline]
  pub fn clear(&mut self) {
    self.data.clear();
  }

  #[inline]
  pub fn truncate(&mut self, len: usize) {
    self.data.truncate(len);
  }

  #[inline]
  pub fn push_bytes(&mut self, bytes: &[u8]) {
    self.data.extend_from_slice(bytes);
  }

  #[inline]
  pub fn push_str(&mut self, s: &str) {
    self.push_bytes(s.as_bytes());
  }

  #[inline]
  pub fn push_char(&mut self, ch: char) {
    let mut tmp = [0; 4];
    self.push_bytes(ch.encode_utf8(&mut tmp).as_bytes());
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  #[inline]
  #[must_use]
  pub fn capacity(&self) -> usize {
    self.data.capacity()
  }

  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }

  #[must_use]
  pub fn to_boxed(&self) -> Box<[u8]> {
    self.data.as_slice().into()
  }

  /// Replaces the contents with the output of `item`.
  pub fn build<M: Measure + ?Sized>(&mut self, item: &M) -> Result<&[u8], BufError> {
    let measured = item.measure();
    self.clear();
    self.try_reserve_total(measured)?;
    item.write(self);
    if self.len() != measured {
      return Err(BufError::Overrun {
        measured,
        written: self.len(),
      });
    }
    Ok(self.as_bytes())
  }
}
