use the_core::collator::Collator;
use the_stdx::{
  buf::StrBuf,
  utf8,
  utf16,
};

use super::{
  Occurrence,
  replace::{
    collect_hits,
    splice,
  },
};
use crate::{
  container::{
    CodeUnit,
    Utf16Container,
  },
  error::{
    Result,
    TextError,
  },
  pattern::{
    CharClassPatterns,
    CollPatterns,
    FixedOptions,
    FixedPatterns,
    Matcher,
    Pattern,
    PatternContainer,
    RegexPatterns,
  },
  strvec::StrVec,
};

/// Strings rewritten in place, one pattern at a time.
trait Slots {
  type Unit: CodeUnit;

  fn len(&self) -> usize;

  fn slot(&self, j: usize) -> Option<&[Self::Unit]>;

  fn store(&mut self, j: usize, value: Option<&[u8]>) -> Result<()>;
}

impl Slots for StrVec {
  type Unit = u8;

  fn len(&self) -> usize {
    StrVec::len(self)
  }

  fn slot(&self, j: usize) -> Option<&[u8]> {
    self.get(j)
  }

  fn store(&mut self, j: usize, value: Option<&[u8]>) -> Result<()> {
    self.set(j, value.map(Box::from));
    Ok(())
  }
}

impl Slots for Utf16Container {
  type Unit = u16;

  fn len(&self) -> usize {
    self.base().len()
  }

  fn slot(&self, j: usize) -> Option<&[u16]> {
    (!self.is_na(j)).then(|| self.get(j))
  }

  fn store(&mut self, j: usize, value: Option<&[u8]>) -> Result<()> {
    let units = value.map(|bytes| utf8::validate(bytes).map(utf16::encode)).transpose()?;
    self.set(j, units);
    Ok(())
  }
}

fn apply_in_turn<S, P>(slots: &mut S, patterns: &mut P, replacement: &StrVec) -> Result<()>
where
  S: Slots,
  P: PatternContainer,
  P::Matcher: Matcher<Unit = S::Unit>,
{
  let mut buf = StrBuf::new();
  for i in 0..patterns.base().len() {
    let matcher = patterns.matcher(i)?;
    let template = replacement
      .get(i % replacement.len())
      .map(|t| matcher.replacement(utf8::validate(t)?))
      .transpose()?;

    for j in 0..slots.len() {
      let Some(text) = slots.slot(j).filter(|text| !text.is_empty()) else {
        continue;
      };
      let hits = collect_hits(matcher, text, Occurrence::All)?;
      if hits.is_empty() {
        continue;
      }
      match &template {
        Some(template) => {
          let spliced = splice(text, &hits, template, &mut buf)?;
          slots.store(j, Some(spliced))?;
        },
        None => slots.store(j, None)?,
      }
    }
  }
  Ok(())
}

/// Applies every pattern, in order, to every string: the result of
/// replacing pattern `i` is the input of pattern `i + 1`.
///
/// Replacements are recycled over the patterns. Any NA or empty pattern
/// makes the whole result NA.
pub fn replace_sequential(strings: &StrVec, pattern: &Pattern, replacement: &StrVec) -> Result<StrVec> {
  if strings.is_empty() {
    return Ok(StrVec::new());
  }
  if pattern.is_empty() || replacement.is_empty() {
    return Err(TextError::invalid("pattern", "vector has length zero"));
  }
  if pattern.len() < replacement.len() {
    return Err(TextError::invalid("replacement", "more replacements than patterns"));
  }
  if pattern.len() % replacement.len() != 0 {
    tracing::warn!(
      patterns = pattern.len(),
      replacements = replacement.len(),
      "longer object length is not a multiple of shorter object length"
    );
  }

  let strings_of = pattern.strings();
  if strings_of.iter().any(|p| p.is_none_or(<[u8]>::is_empty)) {
    if strings_of.iter().flatten().any(<[u8]>::is_empty) {
      tracing::warn!("empty search patterns are not supported");
    }
    return Ok(StrVec::na(strings.len()));
  }

  let n = pattern.len();
  match *pattern {
    Pattern::CharClass(p) => {
      let mut out = strings.clone();
      apply_in_turn(&mut out, &mut CharClassPatterns::new(p, n), replacement)?;
      Ok(out)
    },
    Pattern::Fixed(p, opts) => {
      let mut out = strings.clone();
      apply_in_turn(&mut out, &mut FixedPatterns::new(p, n, opts), replacement)?;
      Ok(out)
    },
    Pattern::Coll(p, None) => {
      let mut out = strings.clone();
      let mut patterns = FixedPatterns::new(p, n, FixedOptions::default());
      apply_in_turn(&mut out, &mut patterns, replacement)?;
      Ok(out)
    },
    Pattern::Coll(p, Some(opts)) => {
      let collator = Collator::open(opts.clone())?;
      let mut out = Utf16Container::new_writable(strings, strings.len())?;
      apply_in_turn(&mut out, &mut CollPatterns::new(p, n, &collator)?, replacement)?;
      Ok(out.to_strvec())
    },
    Pattern::Regex(p, flags) => {
      let mut out = strings.clone();
      apply_in_turn(&mut out, &mut RegexPatterns::new(p, n, flags), replacement)?;
      Ok(out)
    },
  }
}

#[cfg(test)]
mod test {
  use the_core::{
    collator::{
      CollatorOptions,
      Strength,
    },
    regex::RegexFlags,
  };

  use super::*;

  #[test]
  fn later_patterns_see_earlier_replacements() {
    let strings = StrVec::from([Some("The quick brown fox"), None, Some("")]);
    let patterns = StrVec::from(["quick", "brown", "fox", "slow"]);
    let repl = StrVec::from(["slow", "red", "dog", "lazy"]);
    let pattern = Pattern::Fixed(&patterns, FixedOptions::default());
    assert_eq!(
      replace_sequential(&strings, &pattern, &repl).unwrap(),
      StrVec::from([Some("The lazy red dog"), None, Some("")])
    );
  }

  #[test]
  fn na_replacement_erases_matching_strings() {
    let strings = StrVec::from(["abc", "xyz"]);
    let patterns = StrVec::from(["b"]);
    let repl = StrVec::from([None::<&str>]);
    let pattern = Pattern::Regex(&patterns, RegexFlags::empty());
    assert_eq!(
      replace_sequential(&strings, &pattern, &repl).unwrap(),
      StrVec::from([None, Some("xyz")])
    );
  }

  #[test]
  fn na_or_empty_pattern_gives_all_na() {
    let strings = StrVec::from(["abc", "xyz"]);
    let repl = StrVec::from("-");
    let patterns = StrVec::from([Some("a"), None]);
    let pattern = Pattern::Fixed(&patterns, FixedOptions::default());
    assert_eq!(replace_sequential(&strings, &pattern, &repl).unwrap(), StrVec::na(2));

    let patterns = StrVec::from(["a", ""]);
    let pattern = Pattern::Fixed(&patterns, FixedOptions::default());
    assert_eq!(replace_sequential(&strings, &pattern, &repl).unwrap(), StrVec::na(2));
  }

  #[test]
  fn argument_errors() {
    let strings = StrVec::from("abc");
    let patterns = StrVec::from(["a"]);
    let repl = StrVec::from(["x", "y"]);
    let pattern = Pattern::Fixed(&patterns, FixedOptions::default());
    assert!(replace_sequential(&strings, &pattern, &repl).is_err());
    assert!(replace_sequential(&strings, &pattern, &StrVec::new()).is_err());
    assert_eq!(replace_sequential(&StrVec::new(), &pattern, &repl).unwrap(), StrVec::new());
  }

  #[test]
  fn collation_strings_are_rewritten_in_utf16() {
    let strings = StrVec::from(["Ünïcödé 😀 unicode"]);
    let patterns = StrVec::from(["unicode", "😀"]);
    let repl = StrVec::from(["U", "smile"]);
    let opts = CollatorOptions {
      strength: Strength::Primary,
      ..Default::default()
    };
    let pattern = Pattern::Coll(&patterns, Some(&opts));
    assert_eq!(
      replace_sequential(&strings, &pattern, &repl).unwrap(),
      StrVec::from(["U smile U"])
    );
  }
}
