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

#[derive(Clone, Copy)]
enum Anchor {
  Start,
  End,
}

struct Anchored<'p> {
  anchor:    Anchor,
  positions: &'p [i64],
}

impl Search for Anchored<'_> {
  type Output = Vec<Option<bool>>;

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
        Precheck::EmptyHaystack => Some(false),
        Precheck::Search => {
          let pos = self.positions[i % self.positions.len()];
          let at = match (self.anchor, usize::try_from(pos)) {
            (_, Ok(pos)) => hay.char_to_unit(i, pos, false)?,
            (Anchor::Start, Err(_)) => hay.char_to_unit(i, pos.unsigned_abs() as usize, true)?,
            // -1 is the end of the string
            (Anchor::End, Err(_)) => hay.char_to_unit(i, (pos.unsigned_abs() - 1) as usize, true)?,
          };
          let text = hay.get(i);
          let matcher = patterns.matcher(i)?;
          let found = match self.anchor {
            Anchor::Start => matcher.starts_at(text, at)?.is_some(),
            Anchor::End => matcher.ends_at(text, at)?,
          };
          Some(found)
        },
      };
    }
    Ok(out)
  }
}

/// Whether a match starts at code point `from` of each string; negative
/// positions count from the end, `-1` being the last code point.
pub fn starts_with(strings: &StrVec, pattern: &Pattern, from: &[i64]) -> Result<Vec<Option<bool>>> {
  if from.is_empty() {
    return Ok(Vec::new());
  }
  dispatch(strings, pattern, &[from.len()], Anchored {
    anchor:    Anchor::Start,
    positions: from,
  })
}

/// Whether a match ends right before code point `to` of each string;
/// negative positions count from the end, `-1` being the string end.
pub fn ends_with(strings: &StrVec, pattern: &Pattern, to: &[i64]) -> Result<Vec<Option<bool>>> {
  if to.is_empty() {
    return Ok(Vec::new());
  }
  dispatch(strings, pattern, &[to.len()], Anchored {
    anchor:    Anchor::End,
    positions: to,
  })
}
