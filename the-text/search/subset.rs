use super::detect::Detect;
use crate::{
  error::{
    Result,
    TextError,
  },
  pattern::{
    Pattern,
    dispatch,
  },
  strvec::StrVec,
};

/// The strings that contain a match (or, with `negate`, that do not).
///
/// Rows where the outcome is NA are kept as NA unless `omit_na` is set.
pub fn subset(strings: &StrVec, pattern: &Pattern, omit_na: bool, negate: bool) -> Result<StrVec> {
  let hits = dispatch(strings, pattern, &[], Detect {
    negate,
    max_count: None,
  })?;

  let mut out = StrVec::with_capacity(hits.len());
  for (i, hit) in hits.into_iter().enumerate() {
    match hit {
      Some(true) => out.push(strings.get(i % strings.len())),
      Some(false) => {},
      None if omit_na => {},
      None => out.push(None),
    }
  }
  Ok(out)
}

/// Replaces the strings that contain a match with consecutive elements of
/// `value`, recycled.
///
/// The result has the length of `strings`. A row whose pattern is NA keeps
/// its string.
pub fn subset_replace(strings: &StrVec, pattern: &Pattern, negate: bool, value: &StrVec) -> Result<StrVec> {
  if value.is_empty() {
    return Err(TextError::invalid("value", "replacement vector is empty"));
  }
  if pattern.is_empty() {
    return Err(TextError::invalid("pattern", "pattern vector is empty"));
  }
  if strings.is_empty() {
    return Ok(StrVec::new());
  }
  if strings.len() < pattern.len() {
    return Err(TextError::invalid("pattern", "longer than the string vector"));
  }

  let hits = dispatch(strings, pattern, &[], Detect {
    negate,
    max_count: None,
  })?;

  let mut out = strings.clone();
  let mut k = 0;
  for (i, hit) in hits.into_iter().enumerate() {
    if hit == Some(true) {
      out.set(i, value.get(k % value.len()).map(Box::from));
      k += 1;
    }
  }
  if k % value.len() != 0 {
    tracing::warn!(
      replaced = k,
      values = value.len(),
      "number of items to replace is not a multiple of replacement length"
    );
  }
  Ok(out)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::pattern::FixedOptions;

  fn fixed(needle: &StrVec) -> Pattern<'_> {
    Pattern::Fixed(needle, FixedOptions::default())
  }

  #[test]
  fn keeps_matching_rows() {
    let strings = StrVec::from([Some("apple"), Some("kiwi"), None, Some("grape")]);
    let needle = StrVec::from("p");
    assert_eq!(
      subset(&strings, &fixed(&needle), false, false).unwrap(),
      StrVec::from([Some("apple"), None, Some("grape")])
    );
    assert_eq!(
      subset(&strings, &fixed(&needle), true, false).unwrap(),
      StrVec::from(["apple", "grape"])
    );
    assert_eq!(
      subset(&strings, &fixed(&needle), true, true).unwrap(),
      StrVec::from(["kiwi"])
    );
  }

  #[test]
  fn replaces_matching_rows_in_place() {
    let strings = StrVec::from([Some("apple"), Some("kiwi"), None, Some("grape")]);
    let needle = StrVec::from("p");
    let value = StrVec::from(["X", "Y"]);
    assert_eq!(
      subset_replace(&strings, &fixed(&needle), false, &value).unwrap(),
      StrVec::from([Some("X"), Some("kiwi"), None, Some("Y")])
    );
  }

  #[test]
  fn na_pattern_keeps_the_string() {
    let strings = StrVec::from(["ab", "cd"]);
    let needles = StrVec::from([None, Some("c")]);
    let value = StrVec::from("-");
    assert_eq!(
      subset_replace(&strings, &fixed(&needles), false, &value).unwrap(),
      StrVec::from(["ab", "-"])
    );
  }

  #[test]
  fn argument_errors() {
    let strings = StrVec::from(["a"]);
    let needles = StrVec::from(["a", "b"]);
    let value = StrVec::from("x");
    assert!(subset_replace(&strings, &fixed(&needles), false, &StrVec::new()).is_err());
    assert!(subset_replace(&strings, &fixed(&needles), false, &value).is_err());
    assert!(subset_replace(&strings, &fixed(&StrVec::new()), false, &value).is_err());
    assert_eq!(
      subset_replace(&StrVec::new(), &fixed(&needles), false, &value).unwrap(),
      StrVec::new()
    );
  }
}
