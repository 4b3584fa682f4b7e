//! Locale-sensitive comparison and search.
//!
//! # Overview
//!
//! A [`Collator`] wraps an ICU4X collator opened for a locale and a set of
//! [`CollatorOptions`]. Locale identifiers in the `ll_CC@variant` form are
//! turned into BCP 47 tags, and the options ICU4X reads from Unicode
//! extension keywords (numeric ordering, case first, collation type) travel
//! that way; the rest map onto ICU4X collator options.
//!
//! Search works on UTF-16 text. The haystack is turned into a
//! [`CollationText`] once; a match is a range of whole code points that
//! compares equal to the needle, does not start with an ignorable or a
//! combining mark and does not end in front of a combining mark, so
//! decomposed accents are part of the match or rule it out.
//!
//! # Examples
//!
//! ```ignore
//! use the_core::collator::{Collator, CollatorOptions, Strength};
//!
//! let collator = Collator::open(CollatorOptions {
//!   strength: Strength::Primary,
//!   ..Default::default()
//! })?;
//! assert!(collator.compare("résumé", "RESUME").is_eq());
//! ```

use std::{
  cmp::Ordering,
  fmt,
};

use icu_collator::{
  CollatorBorrowed,
  CollatorPreferences,
  options::{
    AlternateHandling,
    CaseLevel,
    CollatorOptions as IcuOptions,
    Strength as IcuStrength,
  },
};
use icu_locale_core::Locale as Bcp47;
use the_stdx::{
  env::{
    self,
    Locale,
  },
  utf16,
};
use thiserror::Error;

use crate::{
  Span,
  chars::CategoryMask,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CollatorError {
  #[error("invalid locale identifier '{0}'")]
  InvalidLocale(String),
  #[error("collation strength must be between 1 and 4, got {0}")]
  InvalidStrength(i64),
  #[error("no collation data for '{locale}': {reason}")]
  Unavailable { locale: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CollatorError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Strength {
  Primary    = 1,
  Secondary  = 2,
  #[default]
  Tertiary   = 3,
  Quaternary = 4,
}

impl Strength {
  pub fn from_level(level: i64) -> Result<Self> {
    match level {
      1 => Ok(Self::Primary),
      2 => Ok(Self::Secondary),
      3 => Ok(Self::Tertiary),
      4 => Ok(Self::Quaternary),
      _ => Err(CollatorError::InvalidStrength(level)),
    }
  }

  fn to_icu(self) -> IcuStrength {
    match self {
      Self::Primary => IcuStrength::Primary,
      Self::Secondary => IcuStrength::Secondary,
      Self::Tertiary => IcuStrength::Tertiary,
      Self::Quaternary => IcuStrength::Quaternary,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollatorOptions {
  /// Locale identifier; `None` uses the process default.
  pub locale:            Option<String>,
  pub strength:          Strength,
  /// Treat whitespace and punctuation as ignorable below quaternary.
  pub alternate_shifted: bool,
  /// Compare secondary weights from the end of the string. Only locales
  /// whose collation data asks for it (Canadian French) do so.
  pub french:            bool,
  /// `Some(true)` sorts uppercase first, `Some(false)` lowercase first,
  /// `None` keeps the locale default.
  pub uppercase_first:   Option<bool>,
  /// Compare case as a separate level even at primary strength.
  pub case_level:        bool,
  /// Input is always normalized, so this only records intent.
  pub normalization:     bool,
  /// Compare runs of digits by numeric value.
  pub numeric:           bool,
}

/// `@variant` names accepted as collation types, with their BCP 47 keys.
const COLLATION_TYPES: [(&str, &str); 10] = [
  ("big5han", "big5han"),
  ("dictionary", "dict"),
  ("emoji", "emoji"),
  ("gb2312", "gb2312"),
  ("phonebook", "phonebk"),
  ("pinyin", "pinyin"),
  ("search", "search"),
  ("standard", "standard"),
  ("stroke", "stroke"),
  ("traditional", "trad"),
];

/// The BCP 47 tag for `locale` carrying the keyword options of `opts`.
///
/// Keywords are emitted in the canonical (alphabetical) order.
fn bcp47_tag(locale: &Locale, opts: &CollatorOptions) -> String {
  let mut tag = if locale.is_root() {
    "und".to_owned()
  } else {
    locale.language().to_owned()
  };
  if !locale.country().is_empty() {
    tag.push('-');
    tag.push_str(locale.country());
  }

  let mut keywords = Vec::new();
  if !locale.variant().is_empty() {
    match COLLATION_TYPES.iter().find(|(name, _)| *name == locale.variant()) {
      Some((_, key)) => keywords.push(format!("co-{key}")),
      None => tracing::debug!(variant = locale.variant(), "ignoring unknown locale variant"),
    }
  }
  match opts.uppercase_first {
    Some(true) => keywords.push("kf-upper".to_owned()),
    Some(false) => keywords.push("kf-lower".to_owned()),
    None => {},
  }
  if opts.numeric {
    keywords.push("kn".to_owned());
  }

  if !keywords.is_empty() {
    tag.push_str("-u-");
    tag.push_str(&keywords.join("-"));
  }
  tag
}

fn icu_options(opts: &CollatorOptions) -> IcuOptions {
  let mut options = IcuOptions::default();
  options.strength = Some(opts.strength.to_icu());
  if opts.alternate_shifted {
    options.alternate_handling = Some(AlternateHandling::Shifted);
  }
  if opts.case_level {
    options.case_level = Some(CaseLevel::On);
  }
  options
}

pub struct Collator {
  locale: Locale,
  opts:   CollatorOptions,
  inner:  CollatorBorrowed<'static>,
}

impl Collator {
  pub fn open(opts: CollatorOptions) -> Result<Self> {
    let locale = match &opts.locale {
      Some(id) => Locale::parse(id).ok_or_else(|| CollatorError::InvalidLocale(id.clone()))?,
      None => {
        env::default_locale().unwrap_or_else(|err| {
          tracing::warn!(%err, "falling back to the root locale");
          Locale::root()
        })
      },
    };

    let tag = bcp47_tag(&locale, &opts);
    let bcp47: Bcp47 = tag.parse().map_err(|_| CollatorError::InvalidLocale(locale.to_string()))?;
    if opts.french {
      tracing::debug!(%locale, "backward secondary order follows the locale's collation data");
    }

    let inner = icu_collator::Collator::try_new(CollatorPreferences::from(bcp47), icu_options(&opts)).map_err(|err| {
      CollatorError::Unavailable {
        locale: tag.clone(),
        reason: err.to_string(),
      }
    })?;
    tracing::debug!(%locale, %tag, strength = ?opts.strength, "opening collator");
    Ok(Self {
      locale,
      opts,
      inner,
    })
  }

  #[must_use]
  pub fn locale(&self) -> &Locale {
    &self.locale
  }

  #[must_use]
  pub fn options(&self) -> &CollatorOptions {
    &self.opts
  }

  #[must_use]
  pub fn compare(&self, a: &str, b: &str) -> Ordering {
    self.inner.compare(a, b)
  }

  #[must_use]
  pub fn compare_utf16(&self, a: &[u16], b: &[u16]) -> Ordering {
    self.inner.compare_utf16(a, b)
  }

  /// Prepares a UTF-16 haystack for repeated searching.
  #[must_use]
  pub fn text(&self, units: &[u16]) -> CollationText<'_> {
    let mut bounds = vec![0];
    let mut ignorable = Vec::new();
    let mut mark = Vec::new();

    let mut idx = 0;
    while idx < units.len() {
      let start = idx;
      let c = utf16::next_char(units, &mut idx);
      ignorable.push(self.compare_utf16(&units[start..idx], &[]).is_eq());
      mark.push(CategoryMask::M.intersects(CategoryMask::of(c)));
      bounds.push(idx);
    }

    CollationText {
      collator: self,
      units: units.to_vec(),
      bounds,
      ignorable,
      mark,
    }
  }
}

impl fmt::Debug for Collator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Collator")
      .field("locale", &self.locale)
      .field("opts", &self.opts)
      .finish_non_exhaustive()
  }
}

impl Drop for Collator {
  fn drop(&mut self) {
    tracing::trace!(locale = %self.locale, "closing collator");
  }
}

/// Code points of haystack text a match may span per code point of the
/// needle; covers decomposed sequences and conjoining jamo.
const MAX_EXPANSION: usize = 4;

/// A UTF-16 haystack split into code points, ready for collation search.
#[derive(Debug, Clone)]
pub struct CollationText<'c> {
  collator:  &'c Collator,
  units:     Vec<u16>,
  /// UTF-16 offset of every code point start, plus the end.
  bounds:    Vec<usize>,
  /// Code points that compare equal to the empty string.
  ignorable: Vec<bool>,
  /// Combining marks: matches never start on one or end right before one.
  mark:      Vec<bool>,
}

impl CollationText<'_> {
  #[must_use]
  pub fn units(&self) -> &[u16] {
    &self.units
  }

  #[inline]
  fn chars(&self) -> usize {
    self.ignorable.len()
  }

  /// Code point index of the first code point starting at or after `unit`.
  fn char_at(&self, unit: usize) -> usize {
    self.bounds[..self.chars()].partition_point(|&u| u < unit)
  }

  fn can_start(&self, cp: usize) -> bool {
    !self.ignorable[cp] && !self.mark[cp]
  }

  fn can_end(&self, cp: usize) -> bool {
    self.mark.get(cp) != Some(&true)
  }

  fn equals(&self, (start, end): (usize, usize), needle: &[u16]) -> bool {
    let range = self.bounds[start]..self.bounds[end];
    self.collator.compare_utf16(&self.units[range], needle).is_eq()
  }

  /// Shortest match of `needle` starting at code point `cp`, as a code
  /// point range.
  fn match_at(&self, needle: &[u16], limit: usize, cp: usize) -> Option<(usize, usize)> {
    if !self.can_start(cp) {
      return None;
    }
    let mut weight = 0;
    for end in cp + 1..=self.chars() {
      if !self.ignorable[end - 1] {
        weight += 1;
        if weight > limit {
          return None;
        }
      }
      if self.can_end(end) && self.equals((cp, end), needle) {
        return Some((cp, end));
      }
    }
    None
  }

  fn span(&self, (start, end): (usize, usize)) -> Span {
    Span::new(self.bounds[start], self.bounds[end])
  }

  /// First match starting at or after UTF-16 offset `from`.
  #[must_use]
  pub fn find(&self, needle: &[u16], from: usize) -> Option<Span> {
    let limit = expansion_limit(needle)?;
    (self.char_at(from)..self.chars())
      .find_map(|cp| self.match_at(needle, limit, cp))
      .map(|m| self.span(m))
  }

  /// Last match in the whole text.
  #[must_use]
  pub fn rfind(&self, needle: &[u16]) -> Option<Span> {
    let limit = expansion_limit(needle)?;
    (0..self.chars())
      .rev()
      .find_map(|cp| self.match_at(needle, limit, cp))
      .map(|m| self.span(m))
  }

  /// Match starting exactly at UTF-16 offset `at`.
  #[must_use]
  pub fn match_starting_at(&self, needle: &[u16], at: usize) -> Option<Span> {
    let limit = expansion_limit(needle)?;
    let cp = self.char_at(at);
    if cp >= self.chars() || self.bounds[cp] != at {
      return None;
    }
    self.match_at(needle, limit, cp).map(|m| self.span(m))
  }

  /// Whether some match ends exactly at UTF-16 offset `at`.
  #[must_use]
  pub fn has_match_ending_at(&self, needle: &[u16], at: usize) -> bool {
    let Some(limit) = expansion_limit(needle) else {
      return false;
    };
    let end = self.char_at(at);
    if self.bounds[end] != at || !self.can_end(end) {
      return false;
    }

    let mut weight = 0;
    for start in (0..end).rev() {
      if !self.ignorable[start] {
        weight += 1;
        if weight > limit {
          return false;
        }
      }
      if self.can_start(start) && self.equals((start, end), needle) {
        return true;
      }
    }
    false
  }
}

/// Most non-ignorable haystack code points a match of `needle` may span;
/// `None` for an empty needle, which matches nowhere.
fn expansion_limit(needle: &[u16]) -> Option<usize> {
  let chars = utf16::count_chars(needle);
  (chars > 0).then_some(chars * MAX_EXPANSION)
}
