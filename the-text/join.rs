//! Concatenation: element-wise joins, collapsing and duplication.
//!
//! Outputs are assembled in one [`StrBuf`] reused across elements. Joins
//! measure each output before writing it, so the buffer is grown once per
//! element at most.

use the_stdx::buf::{
  Measure,
  StrBuf,
};

use crate::{
  error::{
    Result,
    TextError,
  },
  recycle::{
    recycle_length,
    recycling_warnings,
  },
  strvec::StrVec,
};

/// How the rows of a join are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapse<'a> {
  /// One output string per row.
  Rows,
  /// Every row joined into a single string with this separator; `None` is
  /// an NA separator.
  With(Option<&'a str>),
}

/// Parts separated by `sep`.
struct Joined<'a> {
  parts: &'a [&'a [u8]],
  sep:   &'a [u8],
}

impl Measure for Joined<'_> {
  fn measure(&self) -> usize {
    let parts: usize = self.parts.iter().map(|p| p.len()).sum();
    parts + self.sep.len() * self.parts.len().saturating_sub(1)
  }

  fn write(&self, buf: &mut StrBuf) {
    for (k, part) in self.parts.iter().enumerate() {
      if k > 0 {
        buf.push_bytes(self.sep);
      }
      buf.push_bytes(part);
    }
  }
}

/// Pairs concatenated, pairs separated by `sep`.
struct Pairs<'a> {
  pairs: &'a [(&'a [u8], &'a [u8])],
  sep:   &'a [u8],
}

impl Measure for Pairs<'_> {
  fn measure(&self) -> usize {
    let parts: usize = self.pairs.iter().map(|(a, b)| a.len() + b.len()).sum();
    parts + self.sep.len() * self.pairs.len().saturating_sub(1)
  }

  fn write(&self, buf: &mut StrBuf) {
    for (k, (a, b)) in self.pairs.iter().enumerate() {
      if k > 0 {
        buf.push_bytes(self.sep);
      }
      buf.push_bytes(a);
      buf.push_bytes(b);
    }
  }
}

/// Joins the vectors of `list` element-wise with `sep`, recycling shorter
/// vectors.
///
/// A row with an NA element is NA. An NA separator makes every row NA. An
/// empty list, or one holding a zero-length vector, gives an empty result.
pub fn join(list: &[StrVec], sep: Option<&str>, collapse: Collapse) -> Result<StrVec> {
  if list.is_empty() || list.iter().any(StrVec::is_empty) {
    return Ok(StrVec::new());
  }
  let Some(sep) = sep else {
    return Ok(match collapse {
      Collapse::Rows => StrVec::na(list.iter().map(StrVec::len).max().unwrap_or(0)),
      Collapse::With(_) => StrVec::na(1),
    });
  };
  if collapse == Collapse::With(None) {
    return Ok(StrVec::na(1));
  }

  match (list, collapse) {
    ([e1, e2], Collapse::Rows) if sep.is_empty() => return Ok(join2(e1, e2)),
    ([e1, e2], Collapse::With(c)) if sep.is_empty() => return join2_collapse(e1, e2, c),
    ([single], Collapse::Rows) => return Ok(single.clone()),
    ([single], Collapse::With(c)) => return flatten(single, c),
    _ => {},
  }

  let lengths: Vec<usize> = list.iter().map(StrVec::len).collect();
  let nrecycle = recycle_length(recycling_warnings(), &lengths);
  let mut rows = StrVec::with_capacity(nrecycle);
  let mut buf = StrBuf::new();
  let mut parts: Vec<&[u8]> = Vec::with_capacity(list.len());
  for i in 0..nrecycle {
    parts.clear();
    let complete = list.iter().all(|v| v.get(i % v.len()).map(|p| parts.push(p)).is_some());
    if !complete {
      if matches!(collapse, Collapse::With(_)) {
        return Ok(StrVec::na(1));
      }
      rows.push(None);
      continue;
    }
    let joined = Joined {
      parts: &parts,
      sep:   sep.as_bytes(),
    };
    rows.push(Some(buf.build(&joined)?));
  }

  match collapse {
    Collapse::Rows => Ok(rows),
    Collapse::With(c) => flatten(&rows, c),
  }
}

/// Element-wise concatenation of two vectors without a separator.
///
/// When consecutive rows read the same element of `e1`, its bytes are kept
/// in the buffer and only the `e2` part is rewritten.
#[must_use]
pub fn join2(e1: &StrVec, e2: &StrVec) -> StrVec {
  let nrecycle = recycle_length(recycling_warnings(), &[e1.len(), e2.len()]);
  let mut out = StrVec::with_capacity(nrecycle);
  let mut buf = StrBuf::new();
  let mut last_e1 = None;

  for i in 0..nrecycle {
    let p = i % e1.len();
    let (Some(a), Some(b)) = (e1.get(p), e2.get(i % e2.len())) else {
      out.push(None);
      continue;
    };
    if last_e1 == Some(p) {
      buf.truncate(a.len());
    } else {
      buf.clear();
      buf.reserve_total(a.len() + b.len());
      buf.push_bytes(a);
      last_e1 = Some(p);
    }
    buf.push_bytes(b);
    out.push(Some(buf.as_bytes()));
  }
  out
}

/// [`join2`] collapsed into one string with `collapse` between rows.
pub fn join2_collapse(e1: &StrVec, e2: &StrVec, collapse: Option<&str>) -> Result<StrVec> {
  let Some(collapse) = collapse else {
    return Ok(StrVec::na(1));
  };
  let nrecycle = recycle_length(recycling_warnings(), &[e1.len(), e2.len()]);
  if nrecycle == 0 {
    return Ok(StrVec::new());
  }

  let mut parts = Vec::with_capacity(nrecycle);
  for i in 0..nrecycle {
    let (Some(a), Some(b)) = (e1.get(i % e1.len()), e2.get(i % e2.len())) else {
      return Ok(StrVec::na(1));
    };
    parts.push((a, b));
  }

  let mut buf = StrBuf::new();
  let out = buf.build(&Pairs {
    pairs: &parts,
    sep:   collapse.as_bytes(),
  })?;
  Ok(StrVec::from_bytes([Some(out)]))
}

/// All elements joined into one string; any NA gives `[NA]`.
pub fn flatten(strings: &StrVec, collapse: Option<&str>) -> Result<StrVec> {
  let Some(collapse) = collapse else {
    return Ok(StrVec::na(1));
  };
  if strings.is_empty() {
    return Ok(StrVec::new());
  }
  let Some(parts) = strings.iter().collect::<Option<Vec<&[u8]>>>() else {
    return Ok(StrVec::na(1));
  };

  let mut buf = StrBuf::new();
  let out = buf.build(&Joined {
    parts: &parts,
    sep:   collapse.as_bytes(),
  })?;
  Ok(StrVec::from_bytes([Some(out)]))
}

/// Each string repeated `times` times, both recycled.
///
/// NA or negative counts give NA. Consecutive rows reading the same string
/// extend the copies already in the buffer. A result longer than
/// [`StrBuf::MAX_LEN`] bytes is an error.
pub fn dup(strings: &StrVec, times: &[Option<i64>]) -> Result<StrVec> {
  let nrecycle = recycle_length(recycling_warnings(), &[strings.len(), times.len()]);
  let mut out = StrVec::with_capacity(nrecycle);
  let mut buf = StrBuf::new();
  let mut last = None;
  let mut filled = 0;

  for i in 0..nrecycle {
    let p = i % strings.len();
    let count = times[i % times.len()].and_then(|t| usize::try_from(t).ok());
    let (Some(s), Some(count)) = (strings.get(p), count) else {
      out.push(None);
      continue;
    };
    if count == 0 || s.is_empty() {
      out.push(Some(&b""[..]));
      continue;
    }
    let total = s
      .len()
      .checked_mul(count)
      .filter(|&total| total <= StrBuf::MAX_LEN)
      .ok_or_else(|| TextError::invalid("times", format!("{count} copies exceed the output limit")))?;
    if last != Some(p) {
      buf.clear();
      filled = 0;
      last = Some(p);
    }
    if filled < count {
      buf.try_reserve_total(total)?;
      for _ in filled..count {
        buf.push_bytes(s);
      }
      filled = count;
    }
    out.push(Some(&buf.as_bytes()[..total]));
  }
  Ok(out)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn joins_rows_with_recycling() {
    let list = [StrVec::from(["a", "b", "c"]), StrVec::from("-"), StrVec::from(["x", "y", "z"])];
    assert_eq!(
      join(&list, Some("."), Collapse::Rows).unwrap(),
      StrVec::from(["a.-.x", "b.-.y", "c.-.z"])
    );
    assert_eq!(
      join(&list, Some(""), Collapse::With(Some("|"))).unwrap(),
      StrVec::from("a-x|b-y|c-z")
    );
  }

  #[test]
  fn na_handling() {
    let list = [StrVec::from([Some("a"), None]), StrVec::from(["x", "y"]), StrVec::from("!")];
    assert_eq!(
      join(&list, Some(""), Collapse::Rows).unwrap(),
      StrVec::from([Some("ax!"), None])
    );
    assert_eq!(join(&list, Some(""), Collapse::With(Some(""))).unwrap(), StrVec::na(1));
    assert_eq!(join(&list, None, Collapse::Rows).unwrap(), StrVec::na(2));
    assert_eq!(join(&list, Some(""), Collapse::With(None)).unwrap(), StrVec::na(1));
  }

  #[test]
  fn degenerate_lists() {
    assert_eq!(join(&[], Some(""), Collapse::Rows).unwrap(), StrVec::new());
    let list = [StrVec::from("a"), StrVec::new()];
    assert_eq!(join(&list, Some(""), Collapse::Rows).unwrap(), StrVec::new());
    let single = [StrVec::from(["a", "b"])];
    assert_eq!(join(&single, Some("?"), Collapse::Rows).unwrap(), StrVec::from(["a", "b"]));
    assert_eq!(
      join(&single, Some("?"), Collapse::With(Some("+"))).unwrap(),
      StrVec::from("a+b")
    );
  }

  #[test]
  fn two_vector_fast_path_reuses_prefix() {
    let e1 = StrVec::from(["ab"]);
    let e2 = StrVec::from(["1", "22", "", "4444"]);
    assert_eq!(join2(&e1, &e2), StrVec::from(["ab1", "ab22", "ab", "ab4444"]));
    let e1 = StrVec::from([Some("p"), None]);
    assert_eq!(join2(&e1, &StrVec::from("q")), StrVec::from([Some("pq"), None]));
    assert_eq!(join2(&StrVec::new(), &e2), StrVec::new());
  }

  #[test]
  fn collapsed_pairs() {
    let e1 = StrVec::from(["a", "b"]);
    let e2 = StrVec::from("1");
    assert_eq!(join2_collapse(&e1, &e2, Some(", ")).unwrap(), StrVec::from("a1, b1"));
    assert_eq!(join2_collapse(&e1, &e2, None).unwrap(), StrVec::na(1));
    let e2 = StrVec::from([None::<&str>]);
    assert_eq!(join2_collapse(&e1, &e2, Some("")).unwrap(), StrVec::na(1));
  }

  #[test]
  fn flattening() {
    let strings = StrVec::from(["zą", "", "b"]);
    assert_eq!(flatten(&strings, Some("/")).unwrap(), StrVec::from("zą//b"));
    assert_eq!(flatten(&strings, None).unwrap(), StrVec::na(1));
    assert_eq!(flatten(&StrVec::from([Some("a"), None]), Some("")).unwrap(), StrVec::na(1));
    assert_eq!(flatten(&StrVec::new(), Some("")).unwrap(), StrVec::new());
  }

  #[test]
  fn duplication() {
    let strings = StrVec::from([Some("ab"), Some(""), None]);
    let times = [Some(3), Some(2), Some(1), Some(0), None, Some(-1)];
    assert_eq!(
      dup(&strings, &times).unwrap(),
      StrVec::from([Some("ababab"), Some(""), None, Some(""), None, None])
    );
  }

  #[test]
  fn oversized_duplication_fails() {
    let strings = StrVec::from(["ab", ""]);
    assert!(matches!(
      dup(&strings, &[Some(i64::MAX)]),
      Err(TextError::InvalidArgument { name: "times", .. })
    ));
    let limit = i64::try_from(StrBuf::MAX_LEN).unwrap();
    assert!(matches!(
      dup(&StrVec::from("ab"), &[Some(limit / 2 + 1)]),
      Err(TextError::InvalidArgument { name: "times", .. })
    ));
    // empty strings never grow
    assert_eq!(dup(&StrVec::from(""), &[Some(i64::MAX)]).unwrap(), StrVec::from(""));
  }

  #[test]
  fn duplication_reuses_the_buffer() {
    let strings = StrVec::from("xy");
    let times = [Some(1), Some(3), Some(2), Some(4)];
    assert_eq!(dup(&strings, &times).unwrap(), StrVec::from(["xy", "xyxyxy", "xyxy", "xyxyxyxy"]));
  }

  quickcheck::quickcheck! {
    fn flatten_measures_exactly(parts: Vec<String>, sep: String) -> bool {
      let strings = StrVec::from(parts.clone());
      let out = flatten(&strings, Some(&sep)).unwrap();
      parts.is_empty() || out.get_str(0) == Some(parts.join(&sep).as_str())
    }
  }
}
