//! Vectorized search operations.
//!
//! # Overview
//!
//! Every operation here is a small [`Search`] implementation run through
//! [`dispatch`]: the operation is written once against a [`Haystack`] and a
//! [`PatternContainer`], and works unchanged for character classes, literal
//! needles, collation-aware needles and regular expressions.
//!
//! Results are indexed by the recycled position. Elements are visited in
//! the pattern container's pattern-major order so each pattern is compiled
//! once, which is why outputs are allocated up front and filled by index.
//!
//! NA in the string or the pattern gives NA (or an NA-shaped row). An empty
//! pattern warns and gives NA as well. An empty string is searched as
//! having no match.
//!
//! # Examples
//!
//! ```ignore
//! use the_text::{
//!   StrVec,
//!   pattern::{FixedOptions, Pattern},
//!   search::{self, Which},
//! };
//!
//! let strings = StrVec::from(["banana", "kiwi"]);
//! let needle = StrVec::from("an");
//! let pattern = Pattern::Fixed(&needle, FixedOptions::default());
//!
//! assert_eq!(search::count(&strings, &pattern)?, vec![Some(2), Some(0)]);
//! let first = search::extract(&strings, &pattern, Which::First)?;
//! assert_eq!(first, StrVec::from([Some("an"), None]));
//! ```
//!
//! [`Search`]: crate::pattern::Search
//! [`dispatch`]: crate::pattern::dispatch
//! [`Haystack`]: crate::container::Haystack
//! [`PatternContainer`]: crate::pattern::PatternContainer

mod anchored;
mod capture;
mod count;
mod detect;
mod extract;
mod locate;
mod replace;
mod sequential;
mod split;
mod subset;
mod trim;

pub use self::{
  anchored::{
    ends_with,
    starts_with,
  },
  capture::{
    match_all_regex,
    match_regex,
  },
  count::count,
  detect::detect,
  extract::{
    extract,
    extract_all,
  },
  locate::{
    locate,
    locate_all,
  },
  replace::replace,
  sequential::replace_sequential,
  split::split,
  subset::{
    subset,
    subset_replace,
  },
  trim::trim,
};
use crate::container::CodeUnit;

/// Which single occurrence to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Which {
  #[default]
  First,
  Last,
}

/// Which occurrences a replacement applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occurrence {
  #[default]
  All,
  First,
  Last,
}

/// Which end of a string an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
  Left,
  Right,
  #[default]
  Both,
}

impl Side {
  #[inline]
  #[must_use]
  pub fn left(self) -> bool {
    matches!(self, Self::Left | Self::Both)
  }

  #[inline]
  #[must_use]
  pub fn right(self) -> bool {
    matches!(self, Self::Right | Self::Both)
  }
}

/// Haystack units as an owned UTF-8 element.
pub(crate) fn owned<U: CodeUnit>(units: &[U]) -> Box<[u8]> {
  U::to_utf8(units).into_owned().into_boxed_slice()
}

/// Coalesces spans that touch each other.
pub(crate) fn merge_adjacent(spans: &mut Vec<the_core::Span>) {
  spans.dedup_by(|next, prev| {
    if prev.end == next.start {
      prev.end = next.end;
      true
    } else {
      false
    }
  });
}

#[cfg(test)]
mod test {
  use the_core::Span;

  use super::*;

  #[test]
  fn merging_joins_touching_spans_only() {
    let mut spans = vec![Span::new(0, 1), Span::new(1, 2), Span::new(3, 4), Span::new(4, 6)];
    merge_adjacent(&mut spans);
    assert_eq!(spans, vec![Span::new(0, 2), Span::new(3, 6)]);
  }

  #[test]
  fn owned_converts_utf16() {
    let units = the_stdx::utf16::encode("żółw");
    assert_eq!(&*owned(&units), "żółw".as_bytes());
  }
}
