//! Strict UTF-8 stepping over raw byte strings.
//!
//! Strings handed to the engine are byte strings that are *supposed* to be
//! UTF-8. Algorithms that must count or iterate code points step through
//! them with [`next_char`] / [`prev_char`], which reject truncated, overlong
//! and surrogate sequences instead of silently replacing them.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid UTF-8 byte sequence at byte {offset}")]
pub struct Utf8Error {
  pub offset: usize,
}

pub type Result<T> = std::result::Result<T, Utf8Error>;

/// Length of the sequence introduced by `lead`, or 0 for bytes that can
/// never start a sequence.
#[inline]
#[must_use]
pub const fn sequence_len(lead: u8) -> usize {
  match lead {
    0x00..=0x7F => 1,
    0xC2..=0xDF => 2,
    0xE0..=0xEF => 3,
    0xF0..=0xF4 => 4,
    _ => 0,
  }
}

#[inline]
#[must_use]
pub const fn is_continuation(byte: u8) -> bool {
  byte & 0xC0 == 0x80
}

/// Decodes the code point starting at `*pos` and advances `pos` past it.
pub fn next_char(bytes: &[u8], pos: &mut usize) -> Result<char> {
  let start = *pos;
  debug_assert!(start < bytes.len());

  let lead = bytes[start];
  if lead < 0x80 {
    *pos = start + 1;
    return Ok(lead as char);
  }

  let err = Utf8Error { offset: start };
  let end = start + sequence_len(lead);
  if end == start || end > bytes.len() {
    return Err(err);
  }

  let ch = std::str::from_utf8(&bytes[start..end])
    .ok()
    .and_then(|s| s.chars().next())
    .ok_or(err)?;
  *pos = end;
  Ok(ch)
}

/// Decodes the code point ending right before `*pos` and moves `pos` back to
/// its first byte.
pub fn prev_char(bytes: &[u8], pos: &mut usize) -> Result<char> {
  let end = *pos;
  debug_assert!(end > 0 && end <= bytes.len());

  let mut start = end - 1;
  if bytes[start] < 0x80 {
    *pos = start;
    return Ok(bytes[start] as char);
  }

  while start > 0 && end - start < 4 && is_continuation(bytes[start]) {
    start -= 1;
  }

  let err = Utf8Error { offset: end - 1 };
  let mut at = start;
  let ch = next_char(bytes, &mut at).map_err(|_| err)?;
  if at != end {
    return Err(err);
  }
  *pos = start;
  Ok(ch)
}

/// Index of the first byte after the (possibly malformed) sequence at `pos`.
///
/// Never fails; used to step over empty matches.
#[inline]
#[must_use]
pub fn next_boundary(bytes: &[u8], pos: usize) -> usize {
  let width = bytes.get(pos).map_or(1, |&b| sequence_len(b).max(1));
  (pos + width).min(bytes.len().max(pos + 1))
}

/// Validates the whole byte string.
pub fn validate(bytes: &[u8]) -> Result<&str> {
  std::str::from_utf8(bytes).map_err(|err| {
    Utf8Error {
      offset: err.valid_up_to(),
    }
  })
}

/// Number of code points in `bytes`.
pub fn count_chars(bytes: &[u8]) -> Result<usize> {
  if bytes.is_ascii() {
    return Ok(bytes.len());
  }
  Ok(validate(bytes)?.chars().count())
}

/// Iterator over `(byte offset, char)` pairs that stops at the first
/// malformed sequence, yielding the error once.
pub struct CharIndices<'a> {
  bytes: &'a [u8],
  pos:   usize,
  done:  bool,
}

#[must_use]
pub fn char_indices(bytes: &[u8]) -> CharIndices<'_> {
  CharIndices {
    bytes,
    pos: 0,
    done: false,
  }
}

impl Iterator for CharIndices<'_> {
  type Item = Result<(usize, char)>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.done || self.pos >= self.bytes.len() {
      return None;
    }
    let start = self.pos;
    match next_char(self.bytes, &mut self.pos) {
      Ok(ch) => Some(Ok((start, ch))),
      Err(err) => {
        self.done = true;
        Some(Err(err))
      },
    }
  }
}

#[cfg(test)]
mod test {
  use quickcheck::quickcheck;

  use super::*;

  #[test]
  fn decodes_forward() {
    let s = "aé€😀".as_bytes();
    let mut pos = 0;
    let mut out = Vec::new();
    while pos < s.len() {
      out.push(next_char(s, &mut pos).unwrap());
    }
    assert_eq!(out, vec!['a', 'é', '€', '😀']);
  }

  #[test]
  fn decodes_backward() {
    let s = "aé€😀".as_bytes();
    let mut pos = s.len();
    let mut out = Vec::new();
    while pos > 0 {
      out.push(prev_char(s, &mut pos).unwrap());
    }
    assert_eq!(out, vec!['😀', '€', 'é', 'a']);
  }

  #[test]
  fn rejects_malformed() {
    // truncated
    assert_eq!(next_char(b"\xE2\x82", &mut 0), Err(Utf8Error { offset: 0 }));
    // overlong '/'
    assert!(next_char(b"\xC0\xAF", &mut 0).is_err());
    // encoded surrogate
    assert!(next_char(b"\xED\xA0\x80", &mut 0).is_err());
    // lone continuation byte seen from behind
    assert_eq!(prev_char(b"a\x80", &mut 2), Err(Utf8Error { offset: 1 }));
    assert_eq!(count_chars(b"ab\xFF"), Err(Utf8Error { offset: 2 }));
  }

  #[test]
  fn char_indices_stop_at_error() {
    let items: Vec<_> = char_indices(b"a\xFFb").collect();
    assert_eq!(items, vec![Ok((0, 'a')), Err(Utf8Error { offset: 1 })]);
  }

  #[test]
  fn boundary_steps_over_sequences() {
    let s = "é!".as_bytes();
    assert_eq!(next_boundary(s, 0), 2);
    assert_eq!(next_boundary(s, 2), 3);
    assert_eq!(next_boundary(s, 3), 4);
  }

  quickcheck! {
    fn forward_matches_std(s: String) -> bool {
      let bytes = s.as_bytes();
      let mut pos = 0;
      let mut out = Vec::new();
      while pos < bytes.len() {
        out.push(next_char(bytes, &mut pos).unwrap());
      }
      out == s.chars().collect::<Vec<_>>()
    }

    fn backward_matches_std(s: String) -> bool {
      let bytes = s.as_bytes();
      let mut pos = bytes.len();
      let mut out = Vec::new();
      while pos > 0 {
        out.push(prev_char(bytes, &mut pos).unwrap());
      }
      out == s.chars().rev().collect::<Vec<_>>()
    }
  }
}
