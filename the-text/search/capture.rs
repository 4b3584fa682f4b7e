use the_core::regex::{
  Groups,
  RegexFlags,
};

use super::{
  Which,
  owned,
};
use crate::{
  container::{
    CodeUnit,
    Haystack,
  },
  error::Result,
  pattern::{
    Matcher,
    Pattern,
    PatternContainer,
    Precheck,
    Search,
    dispatch,
    precheck,
  },
  strvec::StrVec,
};

/// Whole match followed by every capture group; groups that did not
/// participate are NA.
fn row<U: CodeUnit>(text: &[U], groups: &Groups) -> StrVec {
  groups.iter().map(|g| g.map(|span| owned(&text[span.range()]))).collect()
}

/// Row of NAs for element `i`, one per group when the pattern compiles.
fn na_row<P: PatternContainer>(patterns: &mut P, i: usize) -> Result<StrVec> {
  if patterns.is_na(i) || patterns.is_empty(i) {
    return Ok(StrVec::na(1));
  }
  Ok(StrVec::na(patterns.matcher(i)?.group_count() + 1))
}

struct Capture {
  which: Which,
}

impl Search for Capture {
  type Output = Vec<StrVec>;

  fn run<H, P>(self, hay: &mut H, patterns: &mut P) -> Result<Vec<StrVec>>
  where
    H: Haystack,
    P: PatternContainer,
    P::Matcher: Matcher<Unit = H::Unit>,
  {
    let base = *patterns.base();
    let mut out = vec![StrVec::new(); base.recycle_len()];

    for i in base.vectorize() {
      if precheck(hay, patterns, i) != Precheck::Search {
        out[i] = na_row(patterns, i)?;
        continue;
      }
      let text = hay.get(i);
      let matcher = patterns.matcher(i)?;
      let groups = match self.which {
        Which::First => matcher.captures_from(text, 0)?,
        Which::Last => {
          match matcher.find_last(text)? {
            Some(span) => matcher.captures_from(text, span.start)?,
            None => None,
          }
        },
      };
      out[i] = match groups {
        Some(groups) => row(text, &groups),
        None => StrVec::na(matcher.group_count() + 1),
      };
    }
    Ok(out)
  }
}

struct CaptureAll;

impl Search for CaptureAll {
  type Output = Vec<Vec<StrVec>>;

  fn run<H, P>(self, hay: &mut H, patterns: &mut P) -> Result<Self::Output>
  where
    H: Haystack,
    P: PatternContainer,
    P::Matcher: Matcher<Unit = H::Unit>,
  {
    let base = *patterns.base();
    let mut out = vec![Vec::new(); base.recycle_len()];

    for i in base.vectorize() {
      if precheck(hay, patterns, i) != Precheck::Search {
        out[i] = vec![na_row(patterns, i)?];
        continue;
      }
      let text = hay.get(i);
      let matcher = patterns.matcher(i)?;
      let mut rows = Vec::new();
      let mut from = 0;
      while from <= text.len() {
        let Some(groups) = matcher.captures_from(text, from)? else {
          break;
        };
        let Some(span) = groups.first().copied().flatten() else {
          break;
        };
        rows.push(row(text, &groups));
        from = matcher.resume_at(text, span);
      }
      if rows.is_empty() {
        rows.push(StrVec::na(matcher.group_count() + 1));
      }
      out[i] = rows;
    }
    Ok(out)
  }
}

/// Capture groups of the first or last match in each string.
///
/// Each row holds the whole match followed by every group. A string
/// without a match gives a row of NAs.
pub fn match_regex(strings: &StrVec, pattern: &StrVec, flags: RegexFlags, which: Which) -> Result<Vec<StrVec>> {
  dispatch(strings, &Pattern::Regex(pattern, flags), &[], Capture { which })
}

/// Capture groups of every match, one row per match.
pub fn match_all_regex(strings: &StrVec, pattern: &StrVec, flags: RegexFlags) -> Result<Vec<Vec<StrVec>>> {
  dispatch(strings, &Pattern::Regex(pattern, flags), &[], CaptureAll)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn first_and_last_rows() {
    let strings = StrVec::from([Some("a=1, b=22"), Some("nothing"), None]);
    let re = StrVec::from(r"(\w)=(\d+)");
    let first = match_regex(&strings, &re, RegexFlags::empty(), Which::First).unwrap();
    assert_eq!(first[0], StrVec::from(["a=1", "a", "1"]));
    assert_eq!(first[1], StrVec::na(3));
    assert_eq!(first[2], StrVec::na(3));

    let last = match_regex(&strings, &re, RegexFlags::empty(), Which::Last).unwrap();
    assert_eq!(last[0], StrVec::from(["b=22", "b", "22"]));
  }

  #[test]
  fn optional_groups_are_na() {
    let strings = StrVec::from("key");
    let re = StrVec::from(r"(\w+)(?:=(\w+))?");
    let rows = match_regex(&strings, &re, RegexFlags::empty(), Which::First).unwrap();
    assert_eq!(rows[0], StrVec::from([Some("key"), Some("key"), None]));
  }

  #[test]
  fn every_match() {
    let strings = StrVec::from([Some("x1y2"), Some("-"), None]);
    let re = StrVec::from(r"([a-z])(\d)");
    let all = match_all_regex(&strings, &re, RegexFlags::empty()).unwrap();
    assert_eq!(all[0], vec![StrVec::from(["x1", "x", "1"]), StrVec::from(["y2", "y", "2"])]);
    assert_eq!(all[1], vec![StrVec::na(3)]);
    assert_eq!(all[2], vec![StrVec::na(3)]);
  }

  #[test]
  fn na_pattern_gives_single_na() {
    let strings = StrVec::from("abc");
    let re = StrVec::from([None::<&str>]);
    let rows = match_regex(&strings, &re, RegexFlags::empty(), Which::First).unwrap();
    assert_eq!(rows, vec![StrVec::na(1)]);
  }
}
