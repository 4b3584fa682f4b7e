use the_core::Span;
use the_stdx::utf8;

use super::{
  FixedOptions,
  LastMatcher,
  Matcher,
  PatternContainer,
};
use crate::{
  container::{
    CodeUnit,
    Container,
    Order,
    Utf8Container,
  },
  error::Result,
  strvec::StrVec,
};

/// Simple (single code point) uppercase mapping.
fn simple_upper(c: char) -> char {
  let mut upper = c.to_uppercase();
  match (upper.next(), upper.next()) {
    (Some(u), None) => u,
    _ => c,
  }
}

/// KMP failure table: `table[k]` is the length of the longest proper
/// border of `needle[..=k]`.
fn failure_table(needle: &[u8]) -> Vec<usize> {
  let mut table = vec![0; needle.len()];
  let mut k = 0;
  for i in 1..needle.len() {
    while k > 0 && needle[i] != needle[k] {
      k = table[k - 1];
    }
    if needle[i] == needle[k] {
      k += 1;
    }
    table[i] = k;
  }
  table
}

/// Literal byte search.
#[derive(Debug, Clone)]
pub struct FixedMatcher {
  needle: Box<[u8]>,
  opts:   FixedOptions,
  fwd:    Vec<usize>,
  /// Failure table of the reversed needle.
  back:   Vec<usize>,
  /// Uppercased code points, for case-insensitive search.
  folded: Vec<char>,
}

impl FixedMatcher {
  pub fn new(needle: &[u8], opts: FixedOptions) -> Result<Self> {
    let text = utf8::validate(needle)?;
    let reversed: Vec<u8> = needle.iter().rev().copied().collect();
    Ok(Self {
      needle: needle.into(),
      opts,
      fwd: failure_table(needle),
      back: failure_table(&reversed),
      folded: if opts.case_insensitive {
        text.chars().map(simple_upper).collect()
      } else {
        Vec::new()
      },
    })
  }

  #[must_use]
  pub fn needle(&self) -> &[u8] {
    &self.needle
  }

  fn kmp_from(&self, hay: &[u8], from: usize) -> Option<Span> {
    let needle = &self.needle;
    if let [byte] = **needle {
      return hay
        .get(from..)?
        .iter()
        .position(|&b| b == byte)
        .map(|p| Span::new(from + p, from + p + 1));
    }

    let mut k = 0;
    for (i, &b) in hay.iter().enumerate().skip(from) {
      while k > 0 && b != needle[k] {
        k = self.fwd[k - 1];
      }
      if b == needle[k] {
        k += 1;
      }
      if k == needle.len() {
        return Some(Span::new(i + 1 - k, i + 1));
      }
    }
    None
  }

  fn kmp_last(&self, hay: &[u8]) -> Option<Span> {
    let needle = &self.needle;
    if let [byte] = **needle {
      return hay.iter().rposition(|&b| b == byte).map(|p| Span::new(p, p + 1));
    }

    let n = needle.len();
    let mut k = 0;
    for (i, &b) in hay.iter().enumerate().rev() {
      while k > 0 && b != needle[n - 1 - k] {
        k = self.back[k - 1];
      }
      if b == needle[n - 1 - k] {
        k += 1;
      }
      if k == n {
        return Some(Span::new(i, i + n));
      }
    }
    None
  }

  /// End of a case-insensitive match starting at byte `at`.
  fn folded_at(&self, hay: &[u8], at: usize) -> Result<Option<usize>> {
    let mut pos = at;
    for &want in &self.folded {
      if pos >= hay.len() {
        return Ok(None);
      }
      if simple_upper(utf8::next_char(hay, &mut pos)?) != want {
        return Ok(None);
      }
    }
    Ok(Some(pos))
  }

  /// Start of a case-insensitive match ending at byte `at`.
  fn folded_ending_at(&self, hay: &[u8], at: usize) -> Result<Option<usize>> {
    let mut pos = at;
    for &want in self.folded.iter().rev() {
      if pos == 0 {
        return Ok(None);
      }
      if simple_upper(utf8::prev_char(hay, &mut pos)?) != want {
        return Ok(None);
      }
    }
    Ok(Some(pos))
  }
}

impl Matcher for FixedMatcher {
  type Unit = u8;

  fn find_from(&mut self, hay: &[u8], from: usize) -> Result<Option<Span>> {
    if !self.opts.case_insensitive {
      return Ok(self.kmp_from(hay, from));
    }
    let mut pos = from;
    while pos < hay.len() {
      if let Some(end) = self.folded_at(hay, pos)? {
        return Ok(Some(Span::new(pos, end)));
      }
      utf8::next_char(hay, &mut pos)?;
    }
    Ok(None)
  }

  fn find_last(&mut self, hay: &[u8]) -> Result<Option<Span>> {
    if !self.opts.case_insensitive {
      return Ok(self.kmp_last(hay));
    }
    let mut pos = hay.len();
    while pos > 0 {
      if let Some(start) = self.folded_ending_at(hay, pos)? {
        return Ok(Some(Span::new(start, pos)));
      }
      utf8::prev_char(hay, &mut pos)?;
    }
    Ok(None)
  }

  fn resume_at(&self, hay: &[u8], span: Span) -> usize {
    if self.opts.overlap {
      u8::next_boundary(hay, span.start)
    } else {
      span.end
    }
  }

  fn starts_at(&mut self, hay: &[u8], at: usize) -> Result<Option<Span>> {
    if self.opts.case_insensitive {
      return Ok(self.folded_at(hay, at)?.map(|end| Span::new(at, end)));
    }
    let end = at + self.needle.len();
    Ok((hay.get(at..end) == Some(&*self.needle)).then_some(Span::new(at, end)))
  }

  fn ends_at(&mut self, hay: &[u8], at: usize) -> Result<bool> {
    if self.opts.case_insensitive {
      return Ok(self.folded_ending_at(hay, at)?.is_some());
    }
    Ok(hay[..at].ends_with(&self.needle))
  }
}

/// Literal needles.
#[derive(Debug)]
pub struct FixedPatterns<'a> {
  cont: Utf8Container<'a>,
  opts: FixedOptions,
  last: LastMatcher<FixedMatcher>,
}

impl<'a> FixedPatterns<'a> {
  #[must_use]
  pub fn new(patterns: &'a StrVec, nrecycle: usize, opts: FixedOptions) -> Self {
    Self {
      cont: Utf8Container::with_order(patterns, nrecycle, Order::PatternMajor),
      opts,
      last: LastMatcher::default(),
    }
  }
}

impl PatternContainer for FixedPatterns<'_> {
  type Matcher = FixedMatcher;

  fn base(&self) -> &Container {
    self.cont.base()
  }

  fn is_na(&self, i: usize) -> bool {
    self.cont.is_na(i)
  }

  fn is_empty(&self, i: usize) -> bool {
    self.cont.get(i).is_empty()
  }

  fn matcher(&mut self, i: usize) -> Result<&mut FixedMatcher> {
    let needle = self.cont.get(i);
    let opts = self.opts;
    self
      .last
      .get_or_try_build(self.cont.base().physical(i), || FixedMatcher::new(needle, opts))
  }
}
