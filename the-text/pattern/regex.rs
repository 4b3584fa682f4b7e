use the_core::{
  Span,
  regex::{
    Groups,
    Regex,
    RegexFlags,
    Replacement,
  },
};
use the_stdx::utf8;

use super::{
  LastMatcher,
  Matcher,
  PatternContainer,
};
use crate::{
  container::{
    Container,
    Order,
    Utf8Container,
  },
  error::Result,
  strvec::StrVec,
};

#[derive(Debug)]
pub struct RegexMatcher {
  re: Regex,
}

impl RegexMatcher {
  pub fn new(pattern: &[u8], flags: RegexFlags) -> Result<Self> {
    let pattern = utf8::validate(pattern)?;
    Ok(Self {
      re: Regex::new(pattern, flags)?,
    })
  }

  #[inline]
  #[must_use]
  pub fn regex(&self) -> &Regex {
    &self.re
  }
}

impl Matcher for RegexMatcher {
  type Unit = u8;

  fn find_from(&mut self, hay: &[u8], from: usize) -> Result<Option<Span>> {
    Ok(self.re.find_at(hay, from))
  }

  fn starts_at(&mut self, hay: &[u8], at: usize) -> Result<Option<Span>> {
    Ok(self.re.find_anchored(hay, at))
  }

  fn ends_at(&mut self, hay: &[u8], at: usize) -> Result<bool> {
    Ok(self.re.is_match_ending_at(hay, at)?)
  }

  fn group_count(&self) -> usize {
    self.re.group_count()
  }

  fn captures_from(&mut self, hay: &[u8], from: usize) -> Result<Option<Groups>> {
    Ok(self.re.captures_at(hay, from))
  }

  fn replacement(&self, text: &str) -> Result<Replacement> {
    Ok(self.re.replacement(text)?)
  }
}

/// Regular expressions, compiled lazily.
#[derive(Debug)]
pub struct RegexPatterns<'a> {
  cont:  Utf8Container<'a>,
  flags: RegexFlags,
  last:  LastMatcher<RegexMatcher>,
}

impl<'a> RegexPatterns<'a> {
  #[must_use]
  pub fn new(patterns: &'a StrVec, nrecycle: usize, flags: RegexFlags) -> Self {
    Self {
      cont: Utf8Container::with_order(patterns, nrecycle, Order::PatternMajor),
      flags,
      last: LastMatcher::default(),
    }
  }
}

impl PatternContainer for RegexPatterns<'_> {
  type Matcher = RegexMatcher;

  fn base(&self) -> &Container {
    self.cont.base()
  }

  fn is_na(&self, i: usize) -> bool {
    self.cont.is_na(i)
  }

  fn is_empty(&self, i: usize) -> bool {
    self.cont.get(i).is_empty()
  }

  fn matcher(&mut self, i: usize) -> Result<&mut RegexMatcher> {
    let pattern = self.cont.get(i);
    let flags = self.flags;
    self
      .last
      .get_or_try_build(self.cont.base().physical(i), || RegexMatcher::new(pattern, flags))
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{
    error::TextError,
    pattern::find_all,
  };

  fn matcher(pattern: &str) -> RegexMatcher {
    RegexMatcher::new(pattern.as_bytes(), RegexFlags::empty()).unwrap()
  }

  #[test]
  fn last_is_last_of_forward_scan() {
    let mut m = matcher("a+");
    assert_eq!(m.find_last(b"aa-b-aaa").unwrap(), Some(Span::new(5, 8)));
    assert_eq!(find_all(&mut m, b"aa-b-aaa").unwrap().len(), 2);
  }

  #[test]
  fn empty_matches_advance_one_code_point() {
    let mut m = matcher("x*");
    let spans = find_all(&mut m, "ąb".as_bytes()).unwrap();
    assert_eq!(spans, vec![Span::new(0, 0), Span::new(2, 2), Span::new(3, 3)]);
  }

  #[test]
  fn anchored_tests() {
    let mut m = matcher("[0-9]+");
    assert_eq!(m.starts_at(b"ab12", 2).unwrap(), Some(Span::new(2, 4)));
    assert_eq!(m.starts_at(b"ab12", 1).unwrap(), None);
    assert!(m.ends_at(b"12ab", 2).unwrap());
    assert!(!m.ends_at(b"12ab", 3).unwrap());
  }

  #[test]
  fn syntax_errors_are_fatal() {
    let pats = StrVec::from(["(unclosed"]);
    let mut cont = RegexPatterns::new(&pats, 1, RegexFlags::empty());
    assert!(matches!(cont.matcher(0).unwrap_err(), TextError::Regex(_)));
  }

  #[test]
  fn captures_report_missing_groups() {
    let mut m = matcher("(a)|(b)");
    assert_eq!(m.group_count(), 2);
    let groups = m.captures_from(b"xb", 0).unwrap().unwrap();
    assert_eq!(groups.as_slice(), &[Some(Span::new(1, 2)), None, Some(Span::new(1, 2))]);
  }
}
