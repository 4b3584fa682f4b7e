use super::{
  Which,
  merge_adjacent,
  owned,
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

struct Extract {
  which: Which,
}

impl Search for Extract {
  type Output = StrVec;

  fn run<H, P>(self, hay: &mut H, patterns: &mut P) -> Result<StrVec>
  where
    H: Haystack,
    P: PatternContainer,
    P::Matcher: Matcher<Unit = H::Unit>,
  {
    let base = *patterns.base();
    let mut out = StrVec::na(base.recycle_len());

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
        out.set(i, Some(owned(&text[span.range()])));
      }
    }
    Ok(out)
  }
}

struct ExtractAll {
  merge: bool,
}

impl Search for ExtractAll {
  type Output = Vec<StrVec>;

  fn run<H, P>(self, hay: &mut H, patterns: &mut P) -> Result<Vec<StrVec>>
  where
    H: Haystack,
    P: PatternContainer,
    P::Matcher: Matcher<Unit = H::Unit>,
  {
    let base = *patterns.base();
    let mut out = vec![StrVec::na(1); base.recycle_len()];

    for i in base.vectorize() {
      if precheck(hay, patterns, i) != Precheck::Search {
        continue;
      }
      let text = hay.get(i);
      let mut spans = find_all(patterns.matcher(i)?, text)?;
      if spans.is_empty() {
        continue;
      }
      if self.merge {
        merge_adjacent(&mut spans);
      }
      out[i] = spans.iter().map(|span| Some(owned(&text[span.range()]))).collect();
    }
    Ok(out)
  }
}

/// The first or last occurrence in each string, NA where there is none.
pub fn extract(strings: &StrVec, pattern: &Pattern, which: Which) -> Result<StrVec> {
  dispatch(strings, pattern, &[], Extract { which })
}

/// Every occurrence in each string; a string without any gives `[NA]`.
///
/// With `merge`, runs of adjacent character class hits are extracted as
/// one string. It has no effect on other pattern kinds.
pub fn extract_all(strings: &StrVec, pattern: &Pattern, merge: bool) -> Result<Vec<StrVec>> {
  let merge = merge && pattern.is_charclass();
  dispatch(strings, pattern, &[], ExtractAll { merge })
}
