//! UTF-16 code unit helpers.

#[inline]
#[must_use]
pub const fn is_lead_surrogate(unit: u16) -> bool {
  unit & 0xFC00 == 0xD800
}

#[inline]
#[must_use]
pub const fn is_trail_surrogate(unit: u16) -> bool {
  unit & 0xFC00 == 0xDC00
}

#[must_use]
pub fn encode(s: &str) -> Vec<u16> {
  s.encode_utf16().collect()
}

/// Decodes `units`, replacing unpaired surrogates with U+FFFD.
#[must_use]
pub fn decode(units: &[u16]) -> String {
  String::from_utf16_lossy(units)
}

/// Whether `idx` does not split a surrogate pair.
#[inline]
#[must_use]
pub fn is_char_boundary(units: &[u16], idx: usize) -> bool {
  idx == 0
    || idx >= units.len()
    || !(is_trail_surrogate(units[idx]) && is_lead_surrogate(units[idx - 1]))
}

/// Index right after the code point starting at `idx`.
#[inline]
#[must_use]
pub fn next_boundary(units: &[u16], idx: usize) -> usize {
  match units.get(idx) {
    Some(&u) if is_lead_surrogate(u) && units.get(idx + 1).is_some_and(|&t| is_trail_surrogate(t)) => {
      idx + 2
    },
    _ => idx + 1,
  }
}

/// Decodes the code point starting at `*idx` and advances past it.
/// Unpaired surrogates decode as U+FFFD.
#[inline]
pub fn next_char(units: &[u16], idx: &mut usize) -> char {
  let start = *idx;
  *idx = next_boundary(units, start);
  char::decode_utf16(units[start..*idx].iter().copied())
    .next()
    .and_then(Result::ok)
    .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[must_use]
pub fn count_chars(units: &[u16]) -> usize {
  units
    .iter()
    .enumerate()
    .filter(|&(i, &u)| !(is_trail_surrogate(u) && i > 0 && is_lead_surrogate(units[i - 1])))
    .count()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn surrogate_pairs_count_once() {
    let units = encode("a😀b");
    assert_eq!(units.len(), 4);
    assert_eq!(count_chars(&units), 3);
    assert!(is_char_boundary(&units, 1));
    assert!(!is_char_boundary(&units, 2));
    assert_eq!(next_boundary(&units, 1), 3);
  }

  #[test]
  fn step_through_chars() {
    let units = encode("é😀");
    let mut idx = 0;
    assert_eq!(next_char(&units, &mut idx), 'é');
    assert_eq!(next_char(&units, &mut idx), '😀');
    assert_eq!(idx, units.len());
  }

  #[test]
  fn lone_surrogate_is_replaced() {
    let units = [0x61, 0xD800, 0x62];
    let mut idx = 1;
    assert_eq!(next_char(&units, &mut idx), char::REPLACEMENT_CHARACTER);
    assert_eq!(idx, 2);
    assert_eq!(decode(&units), "a\u{FFFD}b");
  }
}
