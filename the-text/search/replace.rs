use the_core::{
  Span,
  regex::{
    Groups,
    Replacement,
  },
};
use the_stdx::{
  buf::{
    Measure,
    StrBuf,
  },
  utf8,
};

use super::{
  Occurrence,
  owned,
};
use crate::{
  container::{
    CodeUnit,
    Haystack,
    Utf8Container,
  },
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

/// A match together with its capture groups.
pub(crate) struct Hit {
  span:   Span,
  groups: Groups,
}

impl Hit {
  fn new(groups: Groups) -> Option<Self> {
    let span = groups.first().copied().flatten()?;
    Some(Self { span, groups })
  }
}

/// The matches a replacement applies to, left to right and never
/// overlapping.
pub(crate) fn collect_hits<M: Matcher>(matcher: &mut M, hay: &[M::Unit], occurrence: Occurrence) -> Result<Vec<Hit>> {
  match occurrence {
    Occurrence::First => Ok(matcher.captures_from(hay, 0)?.and_then(Hit::new).into_iter().collect()),
    Occurrence::Last => {
      let Some(span) = matcher.find_last(hay)? else {
        return Ok(Vec::new());
      };
      let hit = if matcher.group_count() == 0 {
        Hit::new(smallvec::smallvec![Some(span)])
      } else {
        matcher.captures_from(hay, span.start)?.and_then(Hit::new)
      };
      Ok(hit.into_iter().collect())
    },
    Occurrence::All => {
      let mut hits = Vec::new();
      let mut from = 0;
      while from <= hay.len() {
        let Some(hit) = matcher.captures_from(hay, from)?.and_then(Hit::new) else {
          break;
        };
        from = if hit.span.is_empty() {
          M::Unit::next_boundary(hay, hit.span.end)
        } else {
          hit.span.end
        };
        hits.push(hit);
      }
      Ok(hits)
    },
  }
}

/// A haystack with its matches substituted, written as UTF-8.
pub(crate) struct Spliced<'h, U> {
  pub hay:         &'h [U],
  /// The haystack as UTF-8, read by group references.
  pub bytes:       &'h [u8],
  pub hits:        &'h [Hit],
  pub replacement: &'h Replacement,
}

impl<U: CodeUnit> Measure for Spliced<'_, U> {
  fn measure(&self) -> usize {
    let mut len = 0;
    let mut pos = 0;
    for hit in self.hits {
      len += U::utf8_len(&self.hay[pos..hit.span.start]);
      len += self.replacement.expanded_len(&hit.groups);
      pos = hit.span.end;
    }
    len + U::utf8_len(&self.hay[pos..])
  }

  fn write(&self, buf: &mut StrBuf) {
    let mut pos = 0;
    for hit in self.hits {
      U::push_utf8(&self.hay[pos..hit.span.start], buf);
      self.replacement.expand_into(self.bytes, &hit.groups, buf);
      pos = hit.span.end;
    }
    U::push_utf8(&self.hay[pos..], buf);
  }
}

/// Substitutes `hits` in `hay` into `buf`.
pub(crate) fn splice<'b, U: CodeUnit>(
  hay: &[U],
  hits: &[Hit],
  replacement: &Replacement,
  buf: &'b mut StrBuf,
) -> Result<&'b [u8]> {
  let bytes = if replacement.is_literal() {
    std::borrow::Cow::Borrowed(&[][..])
  } else {
    U::to_utf8(hay)
  };
  let spliced = Spliced {
    hay,
    bytes: &bytes,
    hits,
    replacement,
  };
  Ok(buf.build(&spliced)?)
}

struct Replace<'r> {
  replacement: &'r StrVec,
  occurrence:  Occurrence,
}

impl Search for Replace<'_> {
  type Output = StrVec;

  fn run<H, P>(self, hay: &mut H, patterns: &mut P) -> Result<StrVec>
  where
    H: Haystack,
    P: PatternContainer,
    P::Matcher: Matcher<Unit = H::Unit>,
  {
    let base = *patterns.base();
    let replacements = Utf8Container::new(self.replacement, base.recycle_len());
    let mut out = StrVec::na(base.recycle_len());
    let mut buf = StrBuf::new();

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
      let hits = collect_hits(matcher, text, self.occurrence)?;
      if hits.is_empty() {
        out.set(i, Some(owned(text)));
        continue;
      }
      let Some(template) = replacements.get_opt(i) else {
        continue;
      };
      let replacement = matcher.replacement(utf8::validate(template)?)?;
      let spliced = splice(text, &hits, &replacement, &mut buf)?;
      out.set(i, Some(spliced.into()));
    }
    Ok(out)
  }
}

/// Replaces occurrences of the pattern.
///
/// Strings without a match are returned as they are, even when their
/// replacement is NA. For regular expressions the replacement may refer to
/// capture groups with `$n`, `${n}` or `${name}`.
pub fn replace(strings: &StrVec, pattern: &Pattern, replacement: &StrVec, occurrence: Occurrence) -> Result<StrVec> {
  dispatch(strings, pattern, &[replacement.len()], Replace {
    replacement,
    occurrence,
  })
}
