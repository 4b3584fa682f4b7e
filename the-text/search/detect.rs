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
    precheck,
  },
  strvec::StrVec,
};

pub(crate) struct Detect {
  pub negate:    bool,
  pub max_count: Option<usize>,
}

impl Search for Detect {
  type Output = Vec<Option<bool>>;

  fn run<H, P>(self, hay: &mut H, patterns: &mut P) -> Result<Self::Output>
  where
    H: Haystack,
    P: PatternContainer,
    P::Matcher: Matcher<Unit = H::Unit>,
  {
    let base = *patterns.base();
    let mut out = vec![None; base.recycle_len()];
    let mut budget = self.max_count;

    for i in base.vectorize() {
      if budget == Some(0) {
        continue;
      }
      let found = match precheck(hay, patterns, i) {
        Precheck::Na => continue,
        Precheck::EmptyHaystack => false,
        Precheck::Search => patterns.matcher(i)?.find_first(hay.get(i))?.is_some(),
      };
      let hit = found != self.negate;
      if hit && let Some(budget) = budget.as_mut() {
        *budget -= 1;
      }
      out[i] = Some(hit);
    }
    Ok(out)
  }
}

/// Whether each string contains a match.
///
/// `negate` flips every non-NA result. With `max_count`, only that many
/// positive results are produced; elements visited after the budget runs
/// out are NA.
pub fn detect(strings: &StrVec, pattern: &Pattern, negate: bool, max_count: Option<usize>) -> Result<Vec<Option<bool>>> {
  dispatch(strings, pattern, &[], Detect { negate, max_count })
}

#[cfg(test)]
mod test {
  use the_core::regex::RegexFlags;

  use super::*;
  use crate::pattern::FixedOptions;

  #[test]
  fn na_and_empty_inputs() {
    let strings = StrVec::from([Some("abc"), None, Some("")]);
    let needle = StrVec::from("b");
    let pattern = Pattern::Fixed(&needle, FixedOptions::default());
    assert_eq!(detect(&strings, &pattern, false, None).unwrap(), vec![Some(true), None, Some(false)]);
    assert_eq!(detect(&strings, &pattern, true, None).unwrap(), vec![Some(false), None, Some(true)]);
  }

  #[test]
  fn empty_pattern_is_na() {
    let strings = StrVec::from(["abc"]);
    let needle = StrVec::from([""]);
    let pattern = Pattern::Regex(&needle, RegexFlags::empty());
    assert_eq!(detect(&strings, &pattern, false, None).unwrap(), vec![None]);
  }

  #[test]
  fn budget_counts_positive_results() {
    let strings = StrVec::from(["a1", "b", "c2", "d3"]);
    let class = StrVec::from("Nd");
    let pattern = Pattern::CharClass(&class);
    assert_eq!(
      detect(&strings, &pattern, false, Some(2)).unwrap(),
      vec![Some(true), Some(false), Some(true), None]
    );
    assert_eq!(
      detect(&strings, &pattern, true, Some(1)).unwrap(),
      vec![Some(false), Some(true), None, None]
    );
    assert_eq!(detect(&strings, &pattern, false, Some(0)).unwrap(), vec![None; 4]);
  }
}
