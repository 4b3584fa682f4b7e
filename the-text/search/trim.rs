use super::{
  Side,
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
    precheck,
  },
  strvec::StrVec,
};

struct Trim {
  side: Side,
}

impl Search for Trim {
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
      match precheck(hay, patterns, i) {
        Precheck::Na => continue,
        Precheck::EmptyHaystack => {
          out.set(i, Some(Box::default()));
          continue;
        },
        Precheck::Search => {},
      }
      let text = hay.get(i);
      let matcher = patterns.matcher(i)?;
      let mut start = 0;
      let mut end = text.len();
      if self.side.left() {
        start = matcher.find_first(text)?.map_or(text.len(), |span| span.start);
      }
      if self.side.right() && start < text.len() {
        end = matcher.find_last(text)?.map_or(start, |span| span.end);
      }
      out.set(i, Some(owned(&text[start..end.max(start)])));
    }
    Ok(out)
  }
}

/// Strips the leading and/or trailing code points that do not belong to
/// the character class `pattern`.
pub fn trim(strings: &StrVec, pattern: &StrVec, side: Side) -> Result<StrVec> {
  dispatch(strings, &Pattern::CharClass(pattern), &[], Trim { side })
}

#[cfg(test)]
mod test {
  use super::*;

  fn not_space() -> StrVec {
    StrVec::from("^WHITE_SPACE")
  }

  #[test]
  fn sides() {
    let strings = StrVec::from([Some("\t  zażółć \u{3000}"), Some("   "), None, Some("")]);
    let class = not_space();
    assert_eq!(
      trim(&strings, &class, Side::Both).unwrap(),
      StrVec::from([Some("zażółć"), Some(""), None, Some("")])
    );
    assert_eq!(trim(&strings, &class, Side::Left).unwrap().get_str(0), Some("zażółć \u{3000}"));
    assert_eq!(trim(&strings, &class, Side::Right).unwrap().get_str(0), Some("\t  zażółć"));
  }

  #[test]
  fn keeps_punctuation_when_asked() {
    let strings = StrVec::from("--[x]--");
    let class = StrVec::from("^Pd");
    assert_eq!(trim(&strings, &class, Side::Both).unwrap(), StrVec::from("[x]"));
  }
}
