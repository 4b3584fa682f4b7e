use the_core::{
  Span,
  collator::{
    CollationText,
    Collator,
  },
};

use super::{
  LastMatcher,
  Matcher,
  PatternContainer,
};
use crate::{
  container::{
    Container,
    Order,
    Utf16Container,
  },
  error::Result,
  strvec::StrVec,
};

/// Collation-aware search over UTF-16 haystacks.
///
/// The prepared haystack is cached and reused while the matcher is asked
/// about the same text.
#[derive(Debug)]
pub struct CollMatcher<'c> {
  collator: &'c Collator,
  needle:   Vec<u16>,
  text:     Option<CollationText<'c>>,
}

impl<'c> CollMatcher<'c> {
  #[must_use]
  pub fn new(collator: &'c Collator, needle: &[u16]) -> Self {
    Self {
      collator,
      needle: needle.to_vec(),
      text: None,
    }
  }

  fn with_text<T>(&mut self, hay: &[u16], f: impl FnOnce(&CollationText<'c>, &[u16]) -> T) -> T {
    let collator = self.collator;
    let text = match self.text.take() {
      Some(text) if text.units() == hay => text,
      _ => collator.text(hay),
    };
    let out = f(&text, &self.needle);
    self.text = Some(text);
    out
  }
}

impl Matcher for CollMatcher<'_> {
  type Unit = u16;

  fn find_from(&mut self, hay: &[u16], from: usize) -> Result<Option<Span>> {
    Ok(self.with_text(hay, |text, needle| text.find(needle, from)))
  }

  fn find_last(&mut self, hay: &[u16]) -> Result<Option<Span>> {
    Ok(self.with_text(hay, |text, needle| text.rfind(needle)))
  }

  fn starts_at(&mut self, hay: &[u16], at: usize) -> Result<Option<Span>> {
    Ok(self.with_text(hay, |text, needle| text.match_starting_at(needle, at)))
  }

  fn ends_at(&mut self, hay: &[u16], at: usize) -> Result<bool> {
    Ok(self.with_text(hay, |text, needle| text.has_match_ending_at(needle, at)))
  }
}

/// Needles searched with an open collator.
#[derive(Debug)]
pub struct CollPatterns<'c> {
  cont:     Utf16Container,
  collator: &'c Collator,
  last:     LastMatcher<CollMatcher<'c>>,
}

impl<'c> CollPatterns<'c> {
  pub fn new(patterns: &StrVec, nrecycle: usize, collator: &'c Collator) -> Result<Self> {
    Ok(Self {
      cont: Utf16Container::with_order(patterns, nrecycle, Order::PatternMajor)?,
      collator,
      last: LastMatcher::default(),
    })
  }
}

impl<'c> PatternContainer for CollPatterns<'c> {
  type Matcher = CollMatcher<'c>;

  fn base(&self) -> &Container {
    self.cont.base()
  }

  fn is_na(&self, i: usize) -> bool {
    self.cont.is_na(i)
  }

  fn is_empty(&self, i: usize) -> bool {
    self.cont.get(i).is_empty()
  }

  fn matcher(&mut self, i: usize) -> Result<&mut CollMatcher<'c>> {
    let needle = self.cont.get(i);
    let collator = self.collator;
    self
      .last
      .get_or_try_build(self.cont.base().physical(i), || Ok(CollMatcher::new(collator, needle)))
  }
}

#[cfg(test)]
mod test {
  use the_core::collator::{
    CollatorOptions,
    Strength,
  };
  use the_stdx::utf16;

  use super::*;

  fn collator(strength: Strength) -> Collator {
    Collator::open(CollatorOptions {
      locale: Some("en".into()),
      strength,
      ..Default::default()
    })
    .unwrap()
  }

  #[test]
  fn primary_strength_ignores_accents_and_case() {
    let c = collator(Strength::Primary);
    let hay = utf16::encode("Une CAFÉ, un café");
    let mut m = CollMatcher::new(&c, &utf16::encode("cafe"));
    assert_eq!(m.find_first(&hay).unwrap(), Some(Span::new(4, 8)));
    assert_eq!(m.find_last(&hay).unwrap(), Some(Span::new(13, 17)));
    assert_eq!(m.starts_at(&hay, 4).unwrap(), Some(Span::new(4, 8)));
    assert!(m.ends_at(&hay, 17).unwrap());
    assert!(!m.ends_at(&hay, 16).unwrap());
  }

  #[test]
  fn tertiary_strength_is_exact_on_case() {
    let c = collator(Strength::Tertiary);
    let mut m = CollMatcher::new(&c, &utf16::encode("café"));
    assert_eq!(m.find_first(&utf16::encode("CAFÉ")).unwrap(), None);
    assert_eq!(m.find_first(&utf16::encode("a café")).unwrap(), Some(Span::new(2, 6)));
  }

  #[test]
  fn cached_text_follows_the_haystack() {
    let c = collator(Strength::Primary);
    let mut m = CollMatcher::new(&c, &utf16::encode("b"));
    assert_eq!(m.find_first(&utf16::encode("ab")).unwrap(), Some(Span::new(1, 2)));
    assert_eq!(m.find_first(&utf16::encode("bba")).unwrap(), Some(Span::new(0, 1)));
  }

  #[test]
  fn patterns_share_one_collator() {
    let c = collator(Strength::Primary);
    let pats = StrVec::from(["x", "y"]);
    let mut cont = CollPatterns::new(&pats, 2, &c).unwrap();
    let hay = utf16::encode("xy");
    assert_eq!(cont.matcher(1).unwrap().find_first(&hay).unwrap(), Some(Span::new(1, 2)));
    assert_eq!(cont.matcher(0).unwrap().find_first(&hay).unwrap(), Some(Span::new(0, 1)));
  }
}
