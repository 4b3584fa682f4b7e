//! Paragraph wrapping.
//!
//! # Overview
//!
//! A string is cut into "words" at the UAX #14 line break opportunities
//! reported by [`soft_breaks`]. Each word ends with whatever whitespace
//! precedes the next opportunity; that whitespace counts towards the line
//! when the word is followed by another one on the same line, and is
//! dropped when a line ends after the word.
//!
//! Two strategies decide where lines end:
//!
//! - greedy, used when the cost exponent is `<= 0`: fill each line with as
//!   many words as fit;
//! - dynamic, used otherwise: minimise the sum over all lines of
//!   `(width - line_width)^exponent`, which evens out the raggedness of the
//!   right margin.
//!
//! Widths are counted in code points. A word longer than the line width
//! gets a line of its own.
//!
//! # Examples
//!
//! ```ignore
//! use the_text::{StrVec, wrap::wrap};
//!
//! let text = StrVec::from("aaa bb cc dddd");
//! let lines = wrap(&text, 6, 0.0, None)?;
//! assert_eq!(lines[0], StrVec::from(["aaa bb", "cc", "dddd"]));
//!
//! let lines = wrap(&text, 6, 2.0, None)?;
//! assert_eq!(lines[0], StrVec::from(["aaa", "bb cc", "dddd"]));
//! ```

use the_core::{
  line_ending::{
    char_is_line_ending,
    soft_breaks,
  },
  properties::BinaryProperty,
};
use the_stdx::utf8;

use crate::{
  config::resolve_locale,
  error::{
    Result,
    TextError,
  },
  strvec::StrVec,
};

/// Words of one string, as found between consecutive break opportunities.
#[derive(Debug, Default, PartialEq, Eq)]
struct Words {
  /// Byte offset where the word ends, trailing whitespace included.
  end_orig:    Vec<usize>,
  /// Byte offset where the word ends, trailing whitespace excluded.
  end_trim:    Vec<usize>,
  counts_orig: Vec<usize>,
  counts_trim: Vec<usize>,
}

impl Words {
  fn split(text: &str) -> Result<Self> {
    let breaks: Vec<usize> = soft_breaks(text).map(|(pos, _)| pos).filter(|&pos| pos > 0).collect();
    let mut words = Self::default();

    let mut block = 0;
    let mut count = 0;
    let mut trailing = 0;
    let mut end_trim = 0;
    for (idx, c) in text.char_indices() {
      if char_is_line_ending(c) {
        return Err(TextError::NewlineFound);
      }
      let pos = idx + c.len_utf8();
      count += 1;
      if BinaryProperty::WhiteSpace.contains(c) {
        trailing += 1;
      } else {
        trailing = 0;
        end_trim = pos;
      }

      if pos >= text.len() || breaks.get(block).is_none_or(|&end| end <= pos) {
        words.end_orig.push(pos);
        words.end_trim.push(end_trim);
        words.counts_orig.push(count);
        words.counts_trim.push(count - trailing);
        block += 1;
        count = 0;
        trailing = 0;
        end_trim = pos;
      }
    }
    Ok(words)
  }

  fn is_empty(&self) -> bool {
    self.end_orig.is_empty()
  }
}

/// Indices of the words after which a line ends: fill every line as far as
/// it goes.
fn wrap_greedy(width: usize, counts_orig: &[usize], counts_trim: &[usize]) -> Vec<usize> {
  let mut wrap_after = Vec::new();
  let Some(&first) = counts_orig.first() else {
    return wrap_after;
  };

  let mut cur = first;
  for j in 1..counts_orig.len() {
    if cur + counts_trim[j] > width {
      cur = counts_orig[j];
      wrap_after.push(j - 1);
    } else {
      cur += counts_orig[j];
    }
  }
  wrap_after
}

/// Indices of the words after which a line ends, minimising the total
/// cost of the blanks left at the end of each line.
fn wrap_dynamic(width: usize, exponent: f64, counts_orig: &[usize], counts_trim: &[usize]) -> Vec<usize> {
  let n = counts_orig.len();
  if n == 0 {
    return Vec::new();
  }
  let idx = |i: usize, j: usize| i * n + j;
  let width = width as f64;

  // cost[idx(i, j)]: words i..=j on one line, infinite when they do not fit
  let mut cost = vec![f64::INFINITY; n * n];
  for i in 0..n {
    let mut sum = 0usize;
    for j in i..n {
      if j > i {
        if cost[idx(i, j - 1)].is_infinite() {
          break;
        }
        sum += counts_orig[j - 1] - counts_trim[j - 1];
      }
      sum += counts_trim[j];
      let blank = width - sum as f64;
      cost[idx(i, j)] = match (blank < 0.0, j == i) {
        (true, true) => 0.0,
        (true, false) => f64::INFINITY,
        (false, _) => blank.powf(exponent),
      };
    }
  }

  // best[j]: lowest cost of words 0..=j; wrap[idx(k, j)]: a line ends after
  // word k in that arrangement
  let mut best = vec![0.0; n];
  let mut wrap = vec![false; n * n];
  for j in 0..n {
    if cost[idx(0, j)].is_finite() {
      best[j] = cost[idx(0, j)];
      continue;
    }

    // cost[idx(j, j)] is always finite, so this stops before j
    let mut i = 0;
    while i + 1 < j && cost[idx(i + 1, j)].is_infinite() {
      i += 1;
    }
    let mut best_j = best[i] + cost[idx(i + 1, j)];
    for k in i + 1..j {
      let line = cost[idx(k + 1, j)];
      if line.is_infinite() {
        continue;
      }
      if best[k] + line < best_j {
        best_j = best[k] + line;
        i = k;
      }
    }

    for k in 0..i {
      wrap[idx(k, j)] = wrap[idx(k, i)];
    }
    wrap[idx(i, j)] = true;
    best[j] = best_j;
  }

  (0..n).filter(|&k| wrap[idx(k, n - 1)]).collect()
}

/// Lines of `text` ending after the given words.
fn lines(text: &[u8], words: &Words, wrap_after: &[usize]) -> StrVec {
  let mut out = StrVec::with_capacity(wrap_after.len() + 1);
  let mut last = 0;
  for &w in wrap_after {
    out.push(Some(&text[last..words.end_trim[w].max(last)]));
    last = words.end_orig[w];
  }
  let end = words.end_trim.last().copied().unwrap_or(text.len());
  out.push(Some(&text[last..end.max(last)]));
  out
}

/// Breaks every string into lines of at most `width` code points.
///
/// A `cost_exponent <= 0` wraps greedily; a positive one minimises the sum
/// of `(width - line_width)^cost_exponent` over all lines. `locale` only
/// has to be a well-formed identifier: break opportunities follow the
/// default UAX #14 rules.
///
/// NA gives `[NA]`. A string without break opportunities is returned as
/// is. A line terminator inside a string is an error.
pub fn wrap(strings: &StrVec, width: usize, cost_exponent: f64, locale: Option<&str>) -> Result<Vec<StrVec>> {
  if width == 0 {
    return Err(TextError::invalid("width", "expected a positive value"));
  }
  if cost_exponent.is_nan() {
    return Err(TextError::invalid("cost_exponent", "expected a number"));
  }
  let locale = resolve_locale(locale)?;
  tracing::trace!(%locale, "wrapping with the default line break rules");

  let mut out = Vec::with_capacity(strings.len());
  for item in strings.iter() {
    let Some(bytes) = item else {
      out.push(StrVec::na(1));
      continue;
    };
    let text = utf8::validate(bytes)?;
    let words = Words::split(text)?;
    if words.is_empty() {
      out.push(StrVec::from_bytes([Some(bytes)]));
      continue;
    }

    let wrap_after = if cost_exponent <= 0.0 {
      wrap_greedy(width, &words.counts_orig, &words.counts_trim)
    } else {
      wrap_dynamic(width, cost_exponent, &words.counts_orig, &words.counts_trim)
    };
    out.push(lines(bytes, &words, &wrap_after));
  }
  Ok(out)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn words_keep_trailing_blanks() {
    let words = Words::split("aaa  bb\u{3000}c").unwrap();
    assert_eq!(words.counts_orig, vec![5, 3, 1]);
    assert_eq!(words.counts_trim, vec![3, 2, 1]);
    assert_eq!(words.end_trim, vec![3, 7, 11]);
    assert_eq!(words.end_orig, vec![5, 10, 11]);
  }

  #[test]
  fn greedy_fills_lines() {
    let text = StrVec::from("aaa bb cc dddd");
    let lines = wrap(&text, 6, 0.0, None).unwrap();
    assert_eq!(lines, vec![StrVec::from(["aaa bb", "cc", "dddd"])]);
  }

  #[test]
  fn dynamic_evens_out_lines() {
    let text = StrVec::from("aaa bb cc dddd");
    let lines = wrap(&text, 6, 2.0, None).unwrap();
    assert_eq!(lines, vec![StrVec::from(["aaa", "bb cc", "dddd"])]);
  }

  #[test]
  fn long_words_get_their_own_line() {
    let text = StrVec::from("abcdefghij xy");
    for exponent in [0.0, 2.0] {
      let lines = wrap(&text, 4, exponent, None).unwrap();
      assert_eq!(lines, vec![StrVec::from(["abcdefghij", "xy"])]);
    }
  }

  #[test]
  fn counts_code_points() {
    let text = StrVec::from("żółw ćma");
    assert_eq!(wrap(&text, 8, 0.0, None).unwrap(), vec![StrVec::from("żółw ćma")]);
    assert_eq!(wrap(&text, 7, 0.0, None).unwrap(), vec![StrVec::from(["żółw", "ćma"])]);
  }

  #[test]
  fn na_empty_and_trailing_blanks() {
    let text = StrVec::from([None, Some(""), Some("ab   ")]);
    let lines = wrap(&text, 10, 0.0, None).unwrap();
    assert_eq!(lines, vec![StrVec::na(1), StrVec::from(""), StrVec::from("ab")]);
  }

  #[test]
  fn rejects_bad_arguments() {
    let text = StrVec::from("a b");
    assert!(matches!(
      wrap(&text, 0, 0.0, None),
      Err(TextError::InvalidArgument { name: "width", .. })
    ));
    assert!(matches!(
      wrap(&text, 3, 0.0, Some("not a locale")),
      Err(TextError::InvalidArgument { name: "locale", .. })
    ));
    assert_eq!(wrap(&StrVec::from("a\nb"), 3, 0.0, None), Err(TextError::NewlineFound));
    assert_eq!(wrap(&StrVec::from("a\u{2028}b"), 3, 0.0, Some("pl_PL")), Err(TextError::NewlineFound));
  }

  #[test]
  fn greedy_and_dynamic_break_indices() {
    let orig = [4, 3, 3, 4];
    let trim = [3, 2, 2, 4];
    assert_eq!(wrap_greedy(6, &orig, &trim), vec![1, 2]);
    assert_eq!(wrap_dynamic(6, 2.0, &orig, &trim), vec![0, 2]);
    assert_eq!(wrap_dynamic(100, 2.0, &orig, &trim), Vec::<usize>::new());
  }
}
