//! Display width of code points and strings.

use the_stdx::utf8::{
  self,
  Utf8Error,
};
use unicode_width::UnicodeWidthChar;

use crate::chars::CategoryMask;

/// Columns taken by a single code point on a terminal.
///
/// Marks, format and control characters take no room, as do the Hangul
/// medial vowels and trailing consonants that combine with a leading jamo.
/// East Asian wide and fullwidth characters take two columns.
#[must_use]
pub fn char_width(c: char) -> usize {
  match c {
    '\u{00AD}' => return 1,
    '\u{200B}' => return 0,
    '\u{1160}'..='\u{11FF}' | '\u{D7B0}'..='\u{D7FF}' => return 0,
    _ => {},
  }

  let zero = CategoryMask::MN | CategoryMask::ME | CategoryMask::CF | CategoryMask::CC;
  if zero.intersects(CategoryMask::of(c)) {
    return 0;
  }

  match UnicodeWidthChar::width(c) {
    Some(2) => 2,
    _ => 1,
  }
}

/// Width of a UTF-8 byte string; fails on malformed input.
pub fn str_width(bytes: &[u8]) -> Result<usize, Utf8Error> {
  if bytes.is_ascii() {
    // Fast-path for ASCII: printable bytes take one column, controls none.
    return Ok(bytes.iter().filter(|b| !b.is_ascii_control()).count());
  }

  let mut width = 0;
  for item in utf8::char_indices(bytes) {
    let (_, c) = item?;
    width += char_width(c);
  }
  Ok(width)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn widths_of_single_chars() {
    assert_eq!(char_width('a'), 1);
    assert_eq!(char_width('\u{200D}'), 0); // zero width joiner
    assert_eq!(char_width('\u{200B}'), 0);
    assert_eq!(char_width('\u{00AD}'), 1);
    assert_eq!(char_width('\u{0301}'), 0);
    assert_eq!(char_width('中'), 2);
    assert_eq!(char_width('Ａ'), 2);
    assert_eq!(char_width('\u{1161}'), 0);
  }

  #[test]
  fn widths_of_strings() {
    assert_eq!(str_width(b"abc").unwrap(), 3);
    assert_eq!(str_width("café".as_bytes()).unwrap(), 4);
    assert_eq!(str_width("cafe\u{301}".as_bytes()).unwrap(), 4);
    assert_eq!(str_width("日本".as_bytes()).unwrap(), 4);
    assert_eq!(str_width(b"a\xFF"), Err(Utf8Error { offset: 1 }));
  }
}
