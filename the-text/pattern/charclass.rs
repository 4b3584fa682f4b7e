use the_core::{
  Span,
  chars::CharClass,
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

/// Matches single code points belonging to a character class.
#[derive(Debug, Clone, Copy)]
pub struct CharClassMatcher {
  class: CharClass,
}

impl CharClassMatcher {
  #[must_use]
  pub fn new(class: CharClass) -> Self {
    Self { class }
  }

  #[inline]
  #[must_use]
  pub fn class(&self) -> &CharClass {
    &self.class
  }
}

impl Matcher for CharClassMatcher {
  type Unit = u8;

  fn find_from(&mut self, hay: &[u8], from: usize) -> Result<Option<Span>> {
    let mut pos = from;
    while pos < hay.len() {
      let start = pos;
      let c = utf8::next_char(hay, &mut pos)?;
      if self.class.test(c) {
        return Ok(Some(Span::new(start, pos)));
      }
    }
    Ok(None)
  }

  /// Scans backwards from the end.
  fn find_last(&mut self, hay: &[u8]) -> Result<Option<Span>> {
    let mut pos = hay.len();
    while pos > 0 {
      let end = pos;
      let c = utf8::prev_char(hay, &mut pos)?;
      if self.class.test(c) {
        return Ok(Some(Span::new(pos, end)));
      }
    }
    Ok(None)
  }

  fn starts_at(&mut self, hay: &[u8], at: usize) -> Result<Option<Span>> {
    if at >= hay.len() {
      return Ok(None);
    }
    let mut end = at;
    let c = utf8::next_char(hay, &mut end)?;
    Ok(self.class.test(c).then_some(Span::new(at, end)))
  }

  fn ends_at(&mut self, hay: &[u8], at: usize) -> Result<bool> {
    if at == 0 {
      return Ok(false);
    }
    let mut start = at;
    let c = utf8::prev_char(hay, &mut start)?;
    Ok(self.class.test(c))
  }
}

/// Character class names, parsed lazily.
#[derive(Debug)]
pub struct CharClassPatterns<'a> {
  cont: Utf8Container<'a>,
  last: LastMatcher<CharClassMatcher>,
}

impl<'a> CharClassPatterns<'a> {
  #[must_use]
  pub fn new(patterns: &'a StrVec, nrecycle: usize) -> Self {
    Self {
      cont: Utf8Container::with_order(patterns, nrecycle, Order::PatternMajor),
      last: LastMatcher::default(),
    }
  }
}

impl PatternContainer for CharClassPatterns<'_> {
  type Matcher = CharClassMatcher;

  fn base(&self) -> &Container {
    self.cont.base()
  }

  fn is_na(&self, i: usize) -> bool {
    self.cont.is_na(i)
  }

  fn is_empty(&self, i: usize) -> bool {
    self.cont.get(i).is_empty()
  }

  fn matcher(&mut self, i: usize) -> Result<&mut CharClassMatcher> {
    let name = self.cont.get(i);
    self.last.get_or_try_build(self.cont.base().physical(i), || {
      let name = utf8::validate(name)?;
      Ok(CharClassMatcher::new(CharClass::parse(name)))
    })
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn matcher(name: &str) -> CharClassMatcher {
    CharClassMatcher::new(CharClass::parse(name))
  }

  #[test]
  fn forward_and_backward() {
    let hay = "ab1ć2d".as_bytes();
    let mut m = matcher("Nd");
    assert_eq!(m.find_first(hay).unwrap(), Some(Span::new(2, 3)));
    assert_eq!(m.find_from(hay, 3).unwrap(), Some(Span::new(5, 6)));
    assert_eq!(m.find_last(hay).unwrap(), Some(Span::new(5, 6)));
    assert_eq!(matcher("Zs").find_last(hay).unwrap(), None);
  }

  #[test]
  fn anchored_tests() {
    let hay = "żab".as_bytes();
    let mut m = matcher("Ll");
    assert_eq!(m.starts_at(hay, 0).unwrap(), Some(Span::new(0, 2)));
    assert!(m.ends_at(hay, 2).unwrap());
    assert!(!m.ends_at(hay, 0).unwrap());
    assert_eq!(matcher("Lu").starts_at(hay, 0).unwrap(), None);
  }

  #[test]
  fn malformed_input_errors_both_ways() {
    let hay = b"a\xFFb";
    let mut m = matcher("Zs");
    assert!(m.find_first(hay).is_err());
    assert!(m.find_last(hay).is_err());
  }

  #[test]
  fn unknown_class_matches_nothing() {
    let mut m = matcher("NOT_A_PROPERTY");
    assert!(m.class().is_na());
    assert_eq!(m.find_first(b"anything").unwrap(), None);
  }

  #[test]
  fn cache_follows_pattern_slot() {
    let pats = StrVec::from(["Lu", "Nd"]);
    let mut cont = CharClassPatterns::new(&pats, 4);
    assert!(cont.matcher(0).unwrap().class().test('A'));
    assert!(cont.matcher(2).unwrap().class().test('B'));
    assert!(cont.matcher(3).unwrap().class().test('7'));
  }
}
