//! Functions for working with the host environment.

use std::fmt;

use eyre::{
  Result,
  WrapErr,
  eyre,
};
use parking_lot::RwLock;

// Read once, then served from here so every call sees the same snapshot
// until it is replaced explicitly.
static DEFAULT_LOCALE: RwLock<Option<Locale>> = RwLock::new(None);

/// Environment variables consulted for the collation locale, in order.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_COLLATE", "LANG"];

/// A parsed locale identifier such as `en_US` or `de_DE@phonebook`.
///
/// The root locale (`C`, `POSIX`, empty) has all parts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locale {
  language: String,
  country:  String,
  variant:  String,
}

impl Locale {
  #[must_use]
  pub fn root() -> Self {
    Self::default()
  }

  /// Parses `ll[_CC][.encoding][@variant]`; `-` works as a separator too.
  #[must_use]
  pub fn parse(id: &str) -> Option<Self> {
    let id = id.trim();
    let (id, variant) = match id.split_once('@') {
      Some((id, variant)) => (id, variant),
      None => (id, ""),
    };
    let id = id.split_once('.').map_or(id, |(id, _encoding)| id);

    if id.is_empty() || id == "C" || id == "POSIX" {
      return Some(Self::root());
    }

    let mut parts = id.split(['_', '-']);
    let language = parts.next().unwrap_or_default();
    if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
      return None;
    }

    let country = parts.next().unwrap_or_default();
    let country_ok = country.is_empty()
      || (country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic()))
      || (country.len() == 3 && country.chars().all(|c| c.is_ascii_digit()));
    if !country_ok {
      return None;
    }

    let mut rest: Vec<&str> = parts.collect();
    if !variant.is_empty() {
      rest.push(variant);
    }
    if rest.iter().any(|part| part.is_empty() || !part.chars().all(|c| c.is_ascii_alphanumeric())) {
      return None;
    }

    Some(Self {
      language: language.to_ascii_lowercase(),
      country:  country.to_ascii_uppercase(),
      variant:  rest.join("_").to_ascii_lowercase(),
    })
  }

  #[must_use]
  pub fn is_root(&self) -> bool {
    self.language.is_empty()
  }

  #[must_use]
  pub fn language(&self) -> &str {
    &self.language
  }

  #[must_use]
  pub fn country(&self) -> &str {
    &self.country
  }

  #[must_use]
  pub fn variant(&self) -> &str {
    &self.variant
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.language)?;
    if !self.country.is_empty() {
      write!(f, "_{}", self.country)?;
    }
    if !self.variant.is_empty() {
      write!(f, "@{}", self.variant)?;
    }
    Ok(())
  }
}

/// Resolves the locale from the process environment.
pub fn locale_from_env() -> Result<Locale> {
  locale_from_vars(|var| std::env::var(var).ok())
}

fn locale_from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Locale> {
  let Some((var, value)) = LOCALE_VARS
    .iter()
    .find_map(|&var| lookup(var).filter(|v| !v.is_empty()).map(|v| (var, v)))
  else {
    return Ok(Locale::root());
  };

  Locale::parse(&value)
    .ok_or_else(|| eyre!("unrecognized locale identifier '{value}'"))
    .wrap_err_with(|| format!("failed to read locale from {var}"))
}

/// Get the default locale snapshot, reading the environment on first use.
pub fn default_locale() -> Result<Locale> {
  if let Some(locale) = &*DEFAULT_LOCALE.read() {
    return Ok(locale.clone());
  }

  let locale = locale_from_env()?;
  let mut dst = DEFAULT_LOCALE.write();
  *dst = Some(locale.clone());
  Ok(locale)
}

/// Replace the default locale snapshot, returning the previous one.
pub fn set_default_locale(locale: Locale) -> Option<Locale> {
  DEFAULT_LOCALE.write().replace(locale)
}
