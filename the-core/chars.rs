//! Character classes: general categories and binary properties.
//!
//! # Overview
//!
//! A [`CharClass`] is a single code point predicate named either by a
//! General Category (`"Lu"`, `"N"`, `"Zs"`, ...) or by a binary property
//! (`"Alphabetic"`, `"WHITE_SPACE"`, ...). A leading `^` complements it.
//!
//! # Name resolution
//!
//! - Names of at most two characters are categories; letters are matched
//!   case-insensitively, so `"lu"` and `"LU"` both mean `Lu`. A single
//!   letter names the whole major class, `"LC"` the cased letters.
//! - Longer names are binary properties. They are normalized before the
//!   lookup: ASCII letters are uppercased, punctuation and whitespace are
//!   dropped, and any other character turns into a filler that matches no
//!   property. `"White_Space"`, `"white space"` and `"WHITESPACE"` are the
//!   same property.
//!
//! Unknown names do not fail: they produce an NA class that matches
//! nothing, and a warning is logged.
//!
//! # Examples
//!
//! ```ignore
//! use the_core::chars::CharClass;
//!
//! let upper = CharClass::parse("Lu");
//! assert!(upper.test('Ż'));
//!
//! let not_space = CharClass::parse("^WHITE_SPACE");
//! assert!(not_space.test('x'));
//! ```

use bitflags::bitflags;
use thiserror::Error;
use unicode_general_category::{
  GeneralCategory,
  get_general_category,
};

use crate::properties::BinaryProperty;

/// Longest normalized property name accepted.
const MAX_PROPERTY_NAME: usize = 32;

/// Stands in for characters that cannot appear in a property name.
const NAME_FILLER: char = '\u{1A}';

bitflags! {
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct CategoryMask: u32 {
    const LU = 1 << 0;
    const LL = 1 << 1;
    const LT = 1 << 2;
    const LM = 1 << 3;
    const LO = 1 << 4;
    const MN = 1 << 5;
    const MC = 1 << 6;
    const ME = 1 << 7;
    const ND = 1 << 8;
    const NL = 1 << 9;
    const NO = 1 << 10;
    const ZS = 1 << 11;
    const ZL = 1 << 12;
    const ZP = 1 << 13;
    const CC = 1 << 14;
    const CF = 1 << 15;
    const CS = 1 << 16;
    const CO = 1 << 17;
    const CN = 1 << 18;
    const PD = 1 << 19;
    const PS = 1 << 20;
    const PE = 1 << 21;
    const PC = 1 << 22;
    const PO = 1 << 23;
    const PI = 1 << 24;
    const PF = 1 << 25;
    const SM = 1 << 26;
    const SC = 1 << 27;
    const SK = 1 << 28;
    const SO = 1 << 29;

    const L = Self::LU.bits() | Self::LL.bits() | Self::LT.bits() | Self::LM.bits() | Self::LO.bits();
    const LC = Self::LU.bits() | Self::LL.bits() | Self::LT.bits();
    const M = Self::MN.bits() | Self::MC.bits() | Self::ME.bits();
    const N = Self::ND.bits() | Self::NL.bits() | Self::NO.bits();
    const Z = Self::ZS.bits() | Self::ZL.bits() | Self::ZP.bits();
    const C = Self::CC.bits() | Self::CF.bits() | Self::CS.bits() | Self::CO.bits() | Self::CN.bits();
    const P = Self::PD.bits() | Self::PS.bits() | Self::PE.bits() | Self::PC.bits()
      | Self::PO.bits() | Self::PI.bits() | Self::PF.bits();
    const S = Self::SM.bits() | Self::SC.bits() | Self::SK.bits() | Self::SO.bits();
  }
}

impl CategoryMask {
  /// The single-category mask of `ch`.
  #[must_use]
  pub fn of(ch: char) -> Self {
    match get_general_category(ch) {
      GeneralCategory::UppercaseLetter => Self::LU,
      GeneralCategory::LowercaseLetter => Self::LL,
      GeneralCategory::TitlecaseLetter => Self::LT,
      GeneralCategory::ModifierLetter => Self::LM,
      GeneralCategory::OtherLetter => Self::LO,
      GeneralCategory::NonspacingMark => Self::MN,
      GeneralCategory::SpacingMark => Self::MC,
      GeneralCategory::EnclosingMark => Self::ME,
      GeneralCategory::DecimalNumber => Self::ND,
      GeneralCategory::LetterNumber => Self::NL,
      GeneralCategory::OtherNumber => Self::NO,
      GeneralCategory::SpaceSeparator => Self::ZS,
      GeneralCategory::LineSeparator => Self::ZL,
      GeneralCategory::ParagraphSeparator => Self::ZP,
      GeneralCategory::Control => Self::CC,
      GeneralCategory::Format => Self::CF,
      GeneralCategory::Surrogate => Self::CS,
      GeneralCategory::PrivateUse => Self::CO,
      GeneralCategory::Unassigned => Self::CN,
      GeneralCategory::DashPunctuation => Self::PD,
      GeneralCategory::OpenPunctuation => Self::PS,
      GeneralCategory::ClosePunctuation => Self::PE,
      GeneralCategory::ConnectorPunctuation => Self::PC,
      GeneralCategory::OtherPunctuation => Self::PO,
      GeneralCategory::InitialPunctuation => Self::PI,
      GeneralCategory::FinalPunctuation => Self::PF,
      GeneralCategory::MathSymbol => Self::SM,
      GeneralCategory::CurrencySymbol => Self::SC,
      GeneralCategory::ModifierSymbol => Self::SK,
      GeneralCategory::OtherSymbol => Self::SO,
      _ => Self::CN,
    }
  }

  /// Parses a one- or two-letter category name, ignoring ASCII case.
  #[must_use]
  pub fn from_category_name(name: &str) -> Option<Self> {
    let mut chars = name.chars().map(|c| c.to_ascii_uppercase());
    let major = chars.next()?;
    let minor = chars.next();
    if chars.next().is_some() {
      return None;
    }

    let mask = match (major, minor) {
      ('L', None) => Self::L,
      ('L', Some('U')) => Self::LU,
      ('L', Some('L')) => Self::LL,
      ('L', Some('T')) => Self::LT,
      ('L', Some('M')) => Self::LM,
      ('L', Some('O')) => Self::LO,
      ('L', Some('C')) => Self::LC,
      ('M', None) => Self::M,
      ('M', Some('N')) => Self::MN,
      ('M', Some('C')) => Self::MC,
      ('M', Some('E')) => Self::ME,
      ('N', None) => Self::N,
      ('N', Some('D')) => Self::ND,
      ('N', Some('L')) => Self::NL,
      ('N', Some('O')) => Self::NO,
      ('Z', None) => Self::Z,
      ('Z', Some('S')) => Self::ZS,
      ('Z', Some('L')) => Self::ZL,
      ('Z', Some('P')) => Self::ZP,
      ('C', None) => Self::C,
      ('C', Some('C')) => Self::CC,
      ('C', Some('F')) => Self::CF,
      ('C', Some('S')) => Self::CS,
      ('C', Some('O')) => Self::CO,
      ('C', Some('N')) => Self::CN,
      ('P', None) => Self::P,
      ('P', Some('D')) => Self::PD,
      ('P', Some('S')) => Self::PS,
      ('P', Some('E')) => Self::PE,
      ('P', Some('C')) => Self::PC,
      ('P', Some('O')) => Self::PO,
      ('P', Some('I')) => Self::PI,
      ('P', Some('F')) => Self::PF,
      ('S', None) => Self::S,
      ('S', Some('M')) => Self::SM,
      ('S', Some('C')) => Self::SC,
      ('S', Some('K')) => Self::SK,
      ('S', Some('O')) => Self::SO,
      _ => return None,
    };
    Some(mask)
  }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CharClassError {
  #[error("empty character class name")]
  Empty,
  #[error("unknown general category '{0}'")]
  UnknownCategory(String),
  #[error("unknown binary property '{0}'")]
  UnknownProperty(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ClassKind {
  Property(BinaryProperty),
  Category(CategoryMask),
  Na,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharClass {
  kind:       ClassKind,
  complement: bool,
}

impl CharClass {
  /// The class that matches nothing.
  pub const NA: CharClass = CharClass {
    kind:       ClassKind::Na,
    complement: false,
  };

  #[must_use]
  pub const fn from_category(mask: CategoryMask, complement: bool) -> Self {
    Self {
      kind: ClassKind::Category(mask),
      complement,
    }
  }

  #[must_use]
  pub const fn from_property(property: BinaryProperty, complement: bool) -> Self {
    Self {
      kind: ClassKind::Property(property),
      complement,
    }
  }

  /// Parses a class name; unknown names warn and give [`CharClass::NA`].
  #[must_use]
  pub fn parse(name: &str) -> Self {
    Self::try_parse(name).unwrap_or_else(|err| {
      tracing::warn!(%err, "unknown character class, matching nothing");
      Self::NA
    })
  }

  pub fn try_parse(name: &str) -> Result<Self, CharClassError> {
    let (name, complement) = match name.strip_prefix('^') {
      Some(rest) => (rest, true),
      None => (name, false),
    };

    if name.is_empty() {
      return Err(CharClassError::Empty);
    }

    if name.chars().count() <= 2 {
      return CategoryMask::from_category_name(name)
        .map(|mask| Self::from_category(mask, complement))
        .ok_or_else(|| CharClassError::UnknownCategory(name.to_string()));
    }

    normalize_property_name(name)
      .as_deref()
      .and_then(BinaryProperty::from_normalized_name)
      .map(|property| Self::from_property(property, complement))
      .ok_or_else(|| CharClassError::UnknownProperty(name.to_string()))
  }

  #[inline]
  #[must_use]
  pub fn is_na(&self) -> bool {
    self.kind == ClassKind::Na
  }

  #[inline]
  #[must_use]
  pub fn is_complement(&self) -> bool {
    self.complement
  }

  /// Whether `ch` belongs to the class. The NA class contains nothing.
  #[inline]
  #[must_use]
  pub fn test(&self, ch: char) -> bool {
    let hit = match self.kind {
      ClassKind::Property(property) => property.contains(ch),
      ClassKind::Category(mask) => mask.intersects(CategoryMask::of(ch)),
      ClassKind::Na => return false,
    };
    hit != self.complement
  }
}

/// Normalizes a binary property name for lookup, or `None` when it is too
/// long to name any property.
#[must_use]
pub fn normalize_property_name(name: &str) -> Option<String> {
  let mut out = String::with_capacity(name.len());
  for c in name.chars() {
    if c.is_ascii_alphabetic() {
      out.push(c.to_ascii_uppercase());
    } else if c.is_whitespace() || c.is_ascii_punctuation() || CategoryMask::P.intersects(CategoryMask::of(c)) {
      continue;
    } else {
      out.push(NAME_FILLER);
    }
    if out.len() > MAX_PROPERTY_NAME {
      return None;
    }
  }
  Some(out)
}
