use the_core::Span;

use super::owned;
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

struct Split {
  n_max:      Option<usize>,
  omit_empty: bool,
}

impl Split {
  /// Field spans of `text` between the separators `matcher` finds.
  fn fields<M: Matcher>(&self, matcher: &mut M, text: &[M::Unit]) -> Result<Vec<Span>> {
    let limit = self.n_max.unwrap_or(usize::MAX);
    let mut fields = vec![Span::new(0, 0)];
    let mut from = 0;
    while fields.len() < limit && from <= text.len() {
      let Some(sep) = matcher.find_from(text, from)? else {
        break;
      };
      from = matcher.resume_at(text, sep);
      let Some(field) = fields.last_mut() else {
        break;
      };
      if self.omit_empty && field.start == sep.start {
        // no empty field, the current one starts after the separator
        field.start = sep.end;
        field.end = sep.end;
      } else {
        field.end = sep.start;
        fields.push(Span::new(sep.end, sep.end));
      }
    }

    if let Some(last) = fields.last_mut() {
      last.end = text.len();
      if self.omit_empty && last.is_empty() {
        fields.pop();
      }
    }
    Ok(fields)
  }
}

impl Search for Split {
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
      match precheck(hay, patterns, i) {
        Precheck::Na => {},
        Precheck::EmptyHaystack => {
          let keep = !self.omit_empty && self.n_max != Some(0);
          out[i] = StrVec::empty_strings(usize::from(keep));
        },
        Precheck::Search if self.n_max == Some(0) => out[i] = StrVec::new(),
        Precheck::Search => {
          let text = hay.get(i);
          let fields = self.fields(patterns.matcher(i)?, text)?;
          out[i] = fields.iter().map(|f| Some(owned(&text[f.range()]))).collect();
        },
      }
    }
    Ok(out)
  }
}

/// Splits each string at the occurrences of the pattern.
///
/// At most `n_max` fields are produced, the last one holding the rest of
/// the string; `None` means no limit. With `omit_empty`, zero-length fields
/// are dropped. Each character class hit is a separator of its own.
pub fn split(strings: &StrVec, pattern: &Pattern, n_max: Option<usize>, omit_empty: bool) -> Result<Vec<StrVec>> {
  dispatch(strings, pattern, &[], Split { n_max, omit_empty })
}

#[cfg(test)]
mod test {
  use the_core::regex::RegexFlags;

  use super::*;
  use crate::pattern::FixedOptions;

  fn comma() -> StrVec {
    StrVec::from(",")
  }

  #[test]
  fn keeps_or_omits_empty_fields() {
    let strings = StrVec::from(",a,,b,");
    let sep = comma();
    let pattern = Pattern::Fixed(&sep, FixedOptions::default());
    assert_eq!(
      split(&strings, &pattern, None, false).unwrap(),
      vec![StrVec::from(["", "a", "", "b", ""])]
    );
    assert_eq!(split(&strings, &pattern, None, true).unwrap(), vec![StrVec::from(["a", "b"])]);
  }

  #[test]
  fn field_limit_keeps_the_rest() {
    let strings = StrVec::from("a,b,c,d");
    let sep = comma();
    let pattern = Pattern::Fixed(&sep, FixedOptions::default());
    assert_eq!(
      split(&strings, &pattern, Some(2), false).unwrap(),
      vec![StrVec::from(["a", "b,c,d"])]
    );
    assert_eq!(split(&strings, &pattern, Some(1), false).unwrap(), vec![StrVec::from("a,b,c,d")]);
    assert_eq!(split(&strings, &pattern, Some(0), false).unwrap(), vec![StrVec::new()]);
  }

  #[test]
  fn na_and_empty_strings() {
    let strings = StrVec::from([None, Some("")]);
    let sep = comma();
    let pattern = Pattern::Fixed(&sep, FixedOptions::default());
    assert_eq!(
      split(&strings, &pattern, None, false).unwrap(),
      vec![StrVec::na(1), StrVec::from("")]
    );
    assert_eq!(
      split(&strings, &pattern, None, true).unwrap(),
      vec![StrVec::na(1), StrVec::new()]
    );
  }

  #[test]
  fn class_hits_are_separate_separators() {
    let strings = StrVec::from(" one  two ");
    let class = StrVec::from("Zs");
    let pattern = Pattern::CharClass(&class);
    assert_eq!(
      split(&strings, &pattern, None, false).unwrap(),
      vec![StrVec::from(["", "one", "", "two", ""])]
    );
    assert_eq!(
      split(&strings, &pattern, None, true).unwrap(),
      vec![StrVec::from(["one", "two"])]
    );
  }

  #[test]
  fn regex_separators() {
    let strings = StrVec::from("a1b22c");
    let re = StrVec::from("[0-9]+");
    let pattern = Pattern::Regex(&re, RegexFlags::empty());
    assert_eq!(
      split(&strings, &pattern, None, false).unwrap(),
      vec![StrVec::from(["a", "b", "c"])]
    );
  }
}
