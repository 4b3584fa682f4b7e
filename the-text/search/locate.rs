use the_core::Span;

use super::{
  Which,
  merge_adjacent,
};
use crate::{
  container::Haystack,
  error::Result,
  pattern::{
    Matcher,
    Pattern,
    PatternContainer,
    Precheck,
    Search,
    dispatch,
    find_all,
    precheck,
  },
  strvec::StrVec,
};

struct Locate {
  which: Which,
}

impl Search for Locate {
  type Output = Vec<Option<Span>>;

  fn run<H, P>(self, hay: &mut H, patterns: &mut P) -> Result<Self::Output>
  where
    H: Haystack,
    P: PatternContainer,
    P::Matcher: Matcher<Unit = H::Unit>,
  {
    let base = *patterns.base();
    let mut out = vec![None; base.recycle_len()];

    for i in base.vectorize() {
      if precheck(hay, patterns, i) != Precheck::Search {
        continue;
      }
      let text = hay.get(i);
      let matcher = patterns.matcher(i)?;
      let found = match self.which {
        Which::First => matcher.find_first(text)?,
        Which::Last => matcher.find_last(text)?,
      };
      if let Some(span) = found {
        let mut spans = [span];
        hay.spans_to_chars(i, &mut spans)?;
        out[i] = Some(spans[0]);
      }
    }
    Ok(out)
  }
}

struct LocateAll {
  merge: bool,
}

impl Search for LocateAll {
  type Output = Vec<Vec<Option<Span>>>;

  fn run<H, P>(self, hay: &mut H, patterns: &mut P) -> Result<Self::Output>
  where
    H: Haystack,
    P: PatternContainer,
    P::Matcher: Matcher<Unit = H::Unit>,
  {
    let base = *patterns.base();
    let mut out = vec![vec![None]; base.recycle_len()];

    for i in base.vectorize() {
      if precheck(hay, patterns, i) != Precheck::Search {
        continue;
      }
      let mut spans = find_all(patterns.matcher(i)?, hay.get(i))?;
      if spans.is_empty() {
        continue;
      }
      if self.merge {
        merge_adjacent(&mut spans);
      }
      hay.spans_to_chars(i, &mut spans)?;
      out[i] = spans.into_iter().map(Some).collect();
    }
    Ok(out)
  }
}

/// Code point span of the first or last occurrence in each string.
pub fn locate(strings: &StrVec, pattern: &Pattern, which: Which) -> Result<Vec<Option<Span>>> {
  dispatch(strings, pattern, &[], Locate { which })
}

/// Code point spans of every occurrence; `[None]` where there is none.
pub fn locate_all(strings: &StrVec, pattern: &Pattern, merge: bool) -> Result<Vec<Vec<Option<Span>>>> {
  let merge = merge && pattern.is_charclass();
  dispatch(strings, pattern, &[], LocateAll { merge })
}
