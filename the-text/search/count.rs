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

struct Count;

impl Search for Count {
  type Output = Vec<Option<usize>>;

  fn run<H, P>(self, hay: &mut H, patterns: &mut P) -> Result<Self::Output>
  where
    H: Haystack,
    P: PatternContainer,
    P::Matcher: Matcher<Unit = H::Unit>,
  {
    let base = *patterns.base();
    let mut out = vec![None; base.recycle_len()];

    for i in base.vectorize() {
      out[i] = match precheck(hay, patterns, i) {
        Precheck::Na => None,
        Precheck::EmptyHaystack => Some(0),
        Precheck::Search => {
          let text = hay.get(i);
          let matcher = patterns.matcher(i)?;
          let mut found = 0;
          let mut from = 0;
          while from <= text.len() {
            let Some(span) = matcher.find_from(text, from)? else {
              break;
            };
            found += 1;
            from = matcher.resume_at(text, span);
          }
          Some(found)
        },
      };
    }
    Ok(out)
  }
}

/// Number of occurrences in each string.
pub fn count(strings: &StrVec, pattern: &Pattern) -> Result<Vec<Option<usize>>> {
  dispatch(strings, pattern, &[], Count)
}
