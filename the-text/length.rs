//! Per-element measurements.

use the_core::grapheme::str_width;
use the_stdx::utf8;

use crate::{
  error::Result,
  strvec::StrVec,
};

/// Number of code points in each string.
///
/// A malformed string is reported with a warning and measured as NA.
#[must_use]
pub fn length(strings: &StrVec) -> Vec<Option<usize>> {
  strings
    .iter()
    .enumerate()
    .map(|(i, item)| {
      let bytes = item?;
      match utf8::count_chars(bytes) {
        Ok(n) => Some(n),
        Err(err) => {
          tracing::warn!(index = i, %err, "invalid UTF-8 byte sequence, length set to NA");
          None
        },
      }
    })
    .collect()
}

/// Number of bytes in each string.
#[must_use]
pub fn numbytes(strings: &StrVec) -> Vec<Option<usize>> {
  strings.iter().map(|item| item.map(<[u8]>::len)).collect()
}

/// Whether each string is empty.
#[must_use]
pub fn is_empty(strings: &StrVec) -> Vec<Option<bool>> {
  strings.iter().map(|item| item.map(<[u8]>::is_empty)).collect()
}

/// Columns each string takes on a terminal.
///
/// Fails on the first malformed string.
pub fn width(strings: &StrVec) -> Result<Vec<Option<usize>>> {
  strings
    .iter()
    .map(|item| item.map(str_width).transpose().map_err(Into::into))
    .collect()
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::error::TextError;

  fn sample() -> StrVec {
    StrVec::from([Some("abc"), Some("żółw"), Some(""), None, Some("中文")])
  }

  #[test]
  fn counts() {
    let strings = sample();
    assert_eq!(length(&strings), vec![Some(3), Some(4), Some(0), None, Some(2)]);
    assert_eq!(numbytes(&strings), vec![Some(3), Some(7), Some(0), None, Some(6)]);
    assert_eq!(is_empty(&strings), vec![Some(false), Some(false), Some(true), None, Some(false)]);
    assert_eq!(width(&strings).unwrap(), vec![Some(3), Some(4), Some(0), None, Some(4)]);
  }

  #[test]
  fn combining_marks_take_no_columns() {
    let strings = StrVec::from(["e\u{0301}", "a\u{200B}b", "\u{1100}\u{1161}"]);
    assert_eq!(width(&strings).unwrap(), vec![Some(1), Some(2), Some(2)]);
  }

  #[test]
  fn malformed_input() {
    let strings = StrVec::from_bytes([Some(&b"ok"[..]), Some(&b"\xffx"[..])]);
    assert_eq!(length(&strings), vec![Some(2), None]);
    assert!(matches!(width(&strings), Err(TextError::InvalidUtf8(_))));
  }
}
