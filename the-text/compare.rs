//! Comparing and ordering strings, by code point or by collation.

use std::cmp::Ordering;

use the_core::collator::{
  Collator,
  CollatorOptions,
};
use the_stdx::utf8;

use crate::{
  error::Result,
  recycle::{
    recycle_length,
    recycling_warnings,
  },
  strvec::StrVec,
};

/// Validated view of every element.
fn texts(strings: &StrVec) -> Result<Vec<Option<&str>>> {
  strings.iter().map(|item| item.map(utf8::validate).transpose().map_err(Into::into)).collect()
}

/// Code point order, or the order of a collator opened for the call.
enum Comparator {
  CodePoint,
  Collator(Collator),
}

impl Comparator {
  fn open(opts: Option<&CollatorOptions>) -> Result<Self> {
    Ok(match opts {
      Some(opts) => Self::Collator(Collator::open(opts.clone())?),
      None => Self::CodePoint,
    })
  }

  fn compare(&self, a: &str, b: &str) -> Ordering {
    match self {
      // UTF-8 byte order is code point order
      Self::CodePoint => a.as_bytes().cmp(b.as_bytes()),
      Self::Collator(collator) => collator.compare(a, b),
    }
  }
}

/// Element-wise comparison of `e1` and `e2`, recycled; NA on either side
/// gives NA.
///
/// Without collator options strings compare by code point.
pub fn compare(e1: &StrVec, e2: &StrVec, opts: Option<&CollatorOptions>) -> Result<Vec<Option<Ordering>>> {
  let nrecycle = recycle_length(recycling_warnings(), &[e1.len(), e2.len()]);
  if nrecycle == 0 {
    return Ok(Vec::new());
  }
  let (a, b) = (texts(e1)?, texts(e2)?);
  let cmp = Comparator::open(opts)?;

  Ok(
    (0..nrecycle)
      .map(|i| {
        let (a, b) = (a[i % a.len()]?, b[i % b.len()]?);
        Some(cmp.compare(a, b))
      })
      .collect(),
  )
}

/// Permutation that sorts `strings`, with NAs last in either direction.
///
/// The sort is stable: equal strings keep their relative order.
pub fn order(strings: &StrVec, decreasing: bool, opts: Option<&CollatorOptions>) -> Result<Vec<usize>> {
  let texts = texts(strings)?;
  let cmp = Comparator::open(opts)?;

  let mut perm: Vec<usize> = (0..texts.len()).collect();
  perm.sort_by(|&i, &j| {
    match (texts[i], texts[j]) {
      (Some(a), Some(b)) if decreasing => cmp.compare(b, a),
      (Some(a), Some(b)) => cmp.compare(a, b),
      (Some(_), None) => Ordering::Less,
      (None, Some(_)) => Ordering::Greater,
      (None, None) => Ordering::Equal,
    }
  });
  Ok(perm)
}

#[cfg(test)]
mod test {
  use the_core::collator::Strength;

  use super::*;
  use crate::error::TextError;

  #[test]
  fn code_point_comparison() {
    let e1 = StrVec::from([Some("a"), Some("b"), None, Some("Z")]);
    let e2 = StrVec::from([Some("b"), Some("b"), Some("x"), Some("a")]);
    assert_eq!(compare(&e1, &e2, None).unwrap(), vec![
      Some(Ordering::Less),
      Some(Ordering::Equal),
      None,
      Some(Ordering::Less),
    ]);
    assert_eq!(compare(&e1, &StrVec::new(), None).unwrap(), vec![]);
  }

  #[test]
  fn collated_comparison() {
    let opts = CollatorOptions {
      locale: Some("en".into()),
      strength: Strength::Primary,
      ..Default::default()
    };
    let e1 = StrVec::from(["Z", "résumé"]);
    let e2 = StrVec::from(["a", "RESUME"]);
    assert_eq!(compare(&e1, &e2, Some(&opts)).unwrap(), vec![
      Some(Ordering::Greater),
      Some(Ordering::Equal),
    ]);
  }

  #[test]
  fn locale_order_of_letters_and_symbols() {
    let polish = CollatorOptions {
      locale: Some("pl_PL".into()),
      ..Default::default()
    };
    let e1 = StrVec::from(["łódź", "{x", "ø"]);
    let e2 = StrVec::from(["mama", "ab", "p"]);
    assert_eq!(compare(&e1, &e2, Some(&polish)).unwrap(), vec![Some(Ordering::Less); 3]);

    let swedish = CollatorOptions {
      locale: Some("sv_SE".into()),
      ..Default::default()
    };
    let (a, z) = (StrVec::from("ä"), StrVec::from("z"));
    assert_eq!(compare(&a, &z, Some(&swedish)).unwrap(), vec![Some(Ordering::Greater)]);
    let strings = StrVec::from(["ära", "zon", "apa"]);
    assert_eq!(order(&strings, false, Some(&swedish)).unwrap(), vec![2, 1, 0]);
  }

  #[test]
  fn orders_with_na_last() {
    let strings = StrVec::from([Some("b"), None, Some("a"), Some("c"), Some("a")]);
    assert_eq!(order(&strings, false, None).unwrap(), vec![2, 4, 0, 3, 1]);
    assert_eq!(order(&strings, true, None).unwrap(), vec![3, 0, 2, 4, 1]);
  }

  #[test]
  fn numeric_collation_order() {
    let opts = CollatorOptions {
      locale: Some("en".into()),
      numeric: true,
      ..Default::default()
    };
    let strings = StrVec::from(["file10", "file9", "file100"]);
    assert_eq!(order(&strings, false, Some(&opts)).unwrap(), vec![1, 0, 2]);
    assert_eq!(order(&strings, false, None).unwrap(), vec![0, 2, 1]);
  }

  #[test]
  fn malformed_input_fails() {
    let bad = StrVec::from_bytes([Some(&b"\xff"[..])]);
    assert!(matches!(order(&bad, false, None), Err(TextError::InvalidUtf8(_))));
  }
}
