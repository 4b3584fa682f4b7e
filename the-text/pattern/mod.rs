//! Search patterns and their compiled matchers.
//!
//! # Overview
//!
//! A [`Pattern`] names a vector of pattern strings and how to interpret
//! them: as character classes, literal bytes, collation-aware needles or
//! regular expressions. Each kind has a pattern container implementing
//! [`PatternContainer`]; it hands out [`Matcher`]s for a recycled index and
//! keeps the most recent one in a [`LastMatcher`] cache.
//!
//! Operations are written once against the two traits and dispatched per
//! kind by [`dispatch`], which also opens (and, on every exit path, drops)
//! the collator for collation patterns.
//!
//! # Matcher cache
//!
//! A cached matcher is valid for one physical pattern. Asking for index `j`
//! reuses it when `j % n` equals the cached slot and rebuilds it otherwise.
//! Pattern containers iterate in pattern-major order so every physical
//! pattern is built once per call.

mod charclass;
mod coll;
mod fixed;
mod regex;

use smallvec::smallvec;
use the_core::{
  Span,
  collator::{
    Collator,
    CollatorOptions,
  },
  regex::{
    Groups,
    RegexFlags,
    Replacement,
  },
};

pub use self::{
  charclass::{
    CharClassMatcher,
    CharClassPatterns,
  },
  coll::{
    CollMatcher,
    CollPatterns,
  },
  fixed::{
    FixedMatcher,
    FixedPatterns,
  },
  regex::{
    RegexMatcher,
    RegexPatterns,
  },
};
use crate::{
  container::{
    CodeUnit,
    Container,
    Haystack,
    Utf8Indexable,
    Utf16Container,
  },
  error::Result,
  recycle::{
    recycle_length,
    recycling_warnings,
  },
  strvec::StrVec,
};

/// Options of literal search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOptions {
  /// Compare code points by their simple uppercase mapping.
  pub case_insensitive: bool,
  /// Resume searching right after the start of the previous match.
  pub overlap:          bool,
}

/// A vector of patterns together with their interpretation.
#[derive(Debug, Clone, Copy)]
pub enum Pattern<'a> {
  CharClass(&'a StrVec),
  Fixed(&'a StrVec, FixedOptions),
  /// Collation-aware search; without options it falls back to literal
  /// search.
  Coll(&'a StrVec, Option<&'a CollatorOptions>),
  Regex(&'a StrVec, RegexFlags),
}

impl<'a> Pattern<'a> {
  #[must_use]
  pub fn strings(&self) -> &'a StrVec {
    match *self {
      Self::CharClass(p) | Self::Fixed(p, _) | Self::Coll(p, _) | Self::Regex(p, _) => p,
    }
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.strings().len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.strings().is_empty()
  }

  #[must_use]
  pub fn is_charclass(&self) -> bool {
    matches!(self, Self::CharClass(_))
  }
}

/// A pattern compiled for searching haystacks of one unit type.
///
/// Spans are in code units of the haystack.
pub trait Matcher {
  type Unit: CodeUnit;

  /// Leftmost match starting at or after `from`.
  fn find_from(&mut self, hay: &[Self::Unit], from: usize) -> Result<Option<Span>>;

  fn find_first(&mut self, hay: &[Self::Unit]) -> Result<Option<Span>> {
    self.find_from(hay, 0)
  }

  /// Last match of a left-to-right scan.
  fn find_last(&mut self, hay: &[Self::Unit]) -> Result<Option<Span>> {
    let mut last = None;
    let mut from = 0;
    while from <= hay.len() {
      let Some(span) = self.find_from(hay, from)? else {
        break;
      };
      last = Some(span);
      from = self.resume_at(hay, span);
    }
    Ok(last)
  }

  /// Where the search after `span` continues; empty matches step over one
  /// code point.
  fn resume_at(&self, hay: &[Self::Unit], span: Span) -> usize {
    if span.is_empty() {
      Self::Unit::next_boundary(hay, span.end)
    } else {
      span.end
    }
  }

  /// Match beginning exactly at `at`.
  fn starts_at(&mut self, hay: &[Self::Unit], at: usize) -> Result<Option<Span>>;

  /// Whether some match ends exactly at `at`.
  fn ends_at(&mut self, hay: &[Self::Unit], at: usize) -> Result<bool>;

  /// Number of capture groups besides the whole match.
  fn group_count(&self) -> usize {
    0
  }

  /// Leftmost match at or after `from` with its capture groups; group 0 is
  /// the whole match.
  fn captures_from(&mut self, hay: &[Self::Unit], from: usize) -> Result<Option<Groups>> {
    Ok(self.find_from(hay, from)?.map(|span| smallvec![Some(span)]))
  }

  /// Parses a replacement string. Only matchers with capture groups read
  /// it as a template.
  fn replacement(&self, text: &str) -> Result<Replacement> {
    Ok(Replacement::literal(text))
  }
}

/// Single-slot matcher cache keyed by physical pattern index.
#[derive(Debug)]
pub struct LastMatcher<M> {
  index:   Option<usize>,
  matcher: Option<M>,
}

impl<M> Default for LastMatcher<M> {
  fn default() -> Self {
    Self {
      index:   None,
      matcher: None,
    }
  }
}

impl<M> LastMatcher<M> {
  /// Index of the cached physical pattern, if any.
  #[must_use]
  pub fn index(&self) -> Option<usize> {
    self.index
  }

  /// The matcher for physical slot `idx`, building it when the cache holds
  /// another one (or none).
  pub fn get_or_try_build(&mut self, idx: usize, build: impl FnOnce() -> Result<M>) -> Result<&mut M> {
    if self.index != Some(idx) || self.matcher.is_none() {
      if let Some(prev) = self.index {
        tracing::trace!(prev, idx, "rebuilding matcher");
      }
      self.matcher = None;
      self.index = None;
      self.matcher = Some(build()?);
      self.index = Some(idx);
    }
    self
      .matcher
      .as_mut()
      .ok_or(crate::error::TextError::Internal("matcher cache is empty"))
  }
}

/// A vectorized pattern argument.
pub trait PatternContainer {
  type Matcher: Matcher;

  fn base(&self) -> &Container;

  fn is_na(&self, i: usize) -> bool;

  /// Whether element `i` is a zero-length (not NA) pattern.
  fn is_empty(&self, i: usize) -> bool;

  fn matcher(&mut self, i: usize) -> Result<&mut Self::Matcher>;
}

/// An operation generic over haystack and pattern container.
pub trait Search {
  type Output;

  fn run<H, P>(self, hay: &mut H, patterns: &mut P) -> Result<Self::Output>
  where
    H: Haystack,
    P: PatternContainer,
    P::Matcher: Matcher<Unit = H::Unit>;
}

/// Builds the containers for `pattern` against `strings` and runs `op`.
///
/// `extra` are the lengths of the remaining vectorized arguments; they take
/// part in the recycling rule.
pub fn dispatch<S: Search>(strings: &StrVec, pattern: &Pattern, extra: &[usize], op: S) -> Result<S::Output> {
  let mut lengths = vec![strings.len(), pattern.len()];
  lengths.extend_from_slice(extra);
  let nrecycle = recycle_length(recycling_warnings(), &lengths);

  match *pattern {
    Pattern::CharClass(p) => {
      let mut hay = Utf8Indexable::new(strings, nrecycle);
      let mut patterns = CharClassPatterns::new(p, nrecycle);
      op.run(&mut hay, &mut patterns)
    },
    Pattern::Fixed(p, opts) => {
      let mut hay = Utf8Indexable::new(strings, nrecycle);
      let mut patterns = FixedPatterns::new(p, nrecycle, opts);
      op.run(&mut hay, &mut patterns)
    },
    Pattern::Coll(p, None) => {
      let mut hay = Utf8Indexable::new(strings, nrecycle);
      let mut patterns = FixedPatterns::new(p, nrecycle, FixedOptions::default());
      op.run(&mut hay, &mut patterns)
    },
    Pattern::Coll(p, Some(opts)) => {
      // opened after argument checks, dropped on every way out of this arm
      let collator = Collator::open(opts.clone())?;
      let mut hay = Utf16Container::new(strings, nrecycle)?;
      let mut patterns = CollPatterns::new(p, nrecycle, &collator)?;
      op.run(&mut hay, &mut patterns)
    },
    Pattern::Regex(p, flags) => {
      let mut hay = Utf8Indexable::new(strings, nrecycle);
      let mut patterns = RegexPatterns::new(p, nrecycle, flags);
      op.run(&mut hay, &mut patterns)
    },
  }
}

/// What to do with element `i` before searching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Precheck {
  /// Missing haystack or pattern, or an empty pattern.
  Na,
  /// Empty haystack: the "no match" result applies.
  EmptyHaystack,
  Search,
}

pub(crate) fn precheck<H: Haystack, P: PatternContainer>(hay: &H, patterns: &P, i: usize) -> Precheck {
  if patterns.is_na(i) {
    return Precheck::Na;
  }
  if patterns.is_empty(i) {
    tracing::warn!(index = i, "empty search patterns are not supported");
    return Precheck::Na;
  }
  if hay.is_na(i) {
    return Precheck::Na;
  }
  if hay.get(i).is_empty() {
    return Precheck::EmptyHaystack;
  }
  Precheck::Search
}

/// Every match in `hay`, left to right, non-overlapping unless the matcher
/// resumes inside the previous match.
pub(crate) fn find_all<M: Matcher>(matcher: &mut M, hay: &[M::Unit]) -> Result<Vec<Span>> {
  let mut spans = Vec::new();
  let mut from = 0;
  while from <= hay.len() {
    let Some(span) = matcher.find_from(hay, from)? else {
      break;
    };
    spans.push(span);
    from = matcher.resume_at(hay, span);
  }
  Ok(spans)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn last_matcher_rebuilds_only_on_new_slot() {
    let mut cache = LastMatcher::<usize>::default();
    let mut builds = 0;
    for idx in [0, 0, 1, 1, 0] {
      let m = cache
        .get_or_try_build(idx, || {
          builds += 1;
          Ok(idx * 10)
        })
        .unwrap();
      assert_eq!(*m, idx * 10);
    }
    assert_eq!(builds, 3);
    assert_eq!(cache.index(), Some(0));
  }

  #[test]
  fn failed_build_leaves_cache_empty() {
    let mut cache = LastMatcher::<usize>::default();
    cache.get_or_try_build(0, || Ok(1)).unwrap();
    let err = cache.get_or_try_build(1, || Err(crate::error::TextError::NewlineFound));
    assert!(err.is_err());
    assert_eq!(cache.index(), None);
  }
}
