//! Vectors of optional byte strings.
//!
//! Every operation takes and returns [`StrVec`]s. Elements are raw bytes
//! that are expected to be UTF-8; `None` is a missing value (NA).

use std::fmt;

/// An ordered vector of optional strings.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct StrVec {
  items: Vec<Option<Box<[u8]>>>,
}

impl StrVec {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      items: Vec::with_capacity(capacity),
    }
  }

  /// A vector of `len` missing values.
  #[must_use]
  pub fn na(len: usize) -> Self {
    Self {
      items: vec![None; len],
    }
  }

  /// A vector of `len` empty strings.
  #[must_use]
  pub fn empty_strings(len: usize) -> Self {
    Self {
      items: vec![Some(Box::default()); len],
    }
  }

  /// Builds a vector from raw, possibly malformed, byte strings.
  #[must_use]
  pub fn from_bytes<B: AsRef<[u8]>>(items: impl IntoIterator<Item = Option<B>>) -> Self {
    items.into_iter().map(|b| b.map(|b| Box::from(b.as_ref()))).collect()
  }

  /// One row per list entry: the first element of each vector, NA for
  /// empty vectors.
  #[must_use]
  pub fn flatten_lists(lists: &[StrVec]) -> Self {
    lists
      .iter()
      .map(|list| list.items.first().cloned().flatten())
      .collect()
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.items.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  #[inline]
  #[must_use]
  pub fn is_na(&self, idx: usize) -> bool {
    self.items[idx].is_none()
  }

  #[inline]
  #[must_use]
  pub fn get(&self, idx: usize) -> Option<&[u8]> {
    self.items.get(idx).and_then(|item| item.as_deref())
  }

  /// Element `idx` as text, `None` for NA or malformed UTF-8.
  #[must_use]
  pub fn get_str(&self, idx: usize) -> Option<&str> {
    self.get(idx).and_then(|b| std::str::from_utf8(b).ok())
  }

  pub fn push(&mut self, item: Option<&[u8]>) {
    self.items.push(item.map(Box::from));
  }

  pub fn push_boxed(&mut self, item: Option<Box<[u8]>>) {
    self.items.push(item);
  }

  pub fn set(&mut self, idx: usize, item: Option<Box<[u8]>>) {
    self.items[idx] = item;
  }

  pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<&[u8]>> + '_ {
    self.items.iter().map(|item| item.as_deref())
  }

  /// Lossy conversion to owned strings.
  #[must_use]
  pub fn to_strings(&self) -> Vec<Option<String>> {
    self
      .iter()
      .map(|b| b.map(|b| String::from_utf8_lossy(b).into_owned()))
      .collect()
  }
}

impl fmt::Debug for StrVec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list()
      .entries(self.iter().map(|b| b.map(String::from_utf8_lossy)))
      .finish()
  }
}

impl FromIterator<Option<Box<[u8]>>> for StrVec {
  fn from_iter<T: IntoIterator<Item = Option<Box<[u8]>>>>(iter: T) -> Self {
    Self {
      items: iter.into_iter().collect(),
    }
  }
}

impl From<Vec<Option<Box<[u8]>>>> for StrVec {
  fn from(items: Vec<Option<Box<[u8]>>>) -> Self {
    Self { items }
  }
}

impl From<&str> for StrVec {
  fn from(s: &str) -> Self {
    Self {
      items: vec![Some(s.as_bytes().into())],
    }
  }
}

impl From<Vec<&str>> for StrVec {
  fn from(items: Vec<&str>) -> Self {
    items.into_iter().map(|s| Some(s.as_bytes().into())).collect()
  }
}

impl From<Vec<String>> for StrVec {
  fn from(items: Vec<String>) -> Self {
    items.into_iter().map(|s| Some(s.into_bytes().into())).collect()
  }
}

impl From<Vec<Option<&str>>> for StrVec {
  fn from(items: Vec<Option<&str>>) -> Self {
    items.into_iter().map(|s| s.map(|s| s.as_bytes().into())).collect()
  }
}

impl From<Vec<Option<String>>> for StrVec {
  fn from(items: Vec<Option<String>>) -> Self {
    items.into_iter().map(|s| s.map(|s| s.into_bytes().into())).collect()
  }
}

impl<const N: usize> From<[&str; N]> for StrVec {
  fn from(items: [&str; N]) -> Self {
    Self::from(Vec::from(items))
  }
}

impl<const N: usize> From<[Option<&str>; N]> for StrVec {
  fn from(items: [Option<&str>; N]) -> Self {
    Self::from(Vec::from(items))
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn construction_and_access() {
    let v = StrVec::from([Some("a"), None, Some("")]);
    assert_eq!(v.len(), 3);
    assert!(v.is_na(1));
    assert_eq!(v.get(0), Some(&b"a"[..]));
    assert_eq!(v.get(2), Some(&b""[..]));
    assert_eq!(v.to_strings(), vec![Some("a".into()), None, Some(String::new())]);
    assert_eq!(format!("{v:?}"), r#"[Some("a"), None, Some("")]"#);
  }

  #[test]
  fn malformed_bytes_survive() {
    let v = StrVec::from_bytes([Some(&b"a\xFF"[..]), None]);
    assert_eq!(v.get(0), Some(&b"a\xFF"[..]));
    assert_eq!(v.get_str(0), None);
  }

  #[test]
  fn one_row_per_list() {
    let lists = [StrVec::from(["x", "y"]), StrVec::new(), StrVec::from([None, Some("z")])];
    assert_eq!(StrVec::flatten_lists(&lists), StrVec::from([Some("x"), None, None]));
  }
}
