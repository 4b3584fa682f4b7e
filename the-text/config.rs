//! Engine settings and option tables.
//!
//! # Overview
//!
//! [`EngineConfig`] is read from TOML and carries the process-wide
//! defaults: the locale used when an operation is given none, and whether
//! uneven recycling is reported. Collator and regex options arrive as
//! untyped tables (from the same file or from a caller) and are turned into
//! typed options by [`collator_options`] and [`regex_flags`]. Unknown keys
//! are reported and skipped; values of the wrong type are errors.
//!
//! # Examples
//!
//! ```ignore
//! use the_text::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml(r#"
//!   locale = "pl_PL"
//!   warn-recycling = false
//!
//!   [collator]
//!   strength = 1
//!
//!   [regex]
//!   case_insensitive = true
//! "#)?;
//! config.apply()?;
//! let opts = config.collator_options()?;
//! ```

use serde::{
  Deserialize,
  Serialize,
};
use the_core::{
  collator::{
    CollatorOptions,
    Strength,
  },
  regex::RegexFlags,
};
use the_stdx::env::{
  self,
  Locale,
};

use crate::{
  error::{
    Result,
    TextError,
  },
  recycle::set_recycling_warnings,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct EngineConfig {
  /// Locale identifier installed as the process default.
  pub locale:         Option<String>,
  pub warn_recycling: bool,
  pub collator:       toml::Table,
  pub regex:          toml::Table,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      locale:         None,
      warn_recycling: true,
      collator:       toml::Table::new(),
      regex:          toml::Table::new(),
    }
  }
}

impl EngineConfig {
  pub fn from_toml(source: &str) -> Result<Self> {
    toml::from_str(source).map_err(|err| TextError::Config(err.to_string()))
  }

  /// Installs the default locale and the recycling warning switch.
  pub fn apply(&self) -> Result<()> {
    if let Some(id) = &self.locale {
      let locale = parse_locale(id)?;
      tracing::debug!(%locale, "installing default locale");
      env::set_default_locale(locale);
    }
    set_recycling_warnings(self.warn_recycling);
    Ok(())
  }

  pub fn collator_options(&self) -> Result<CollatorOptions> {
    collator_options(&self.collator)
  }

  pub fn regex_flags(&self) -> Result<RegexFlags> {
    regex_flags(&self.regex)
  }
}

fn parse_locale(id: &str) -> Result<Locale> {
  Locale::parse(id).ok_or_else(|| TextError::invalid("locale", format!("unrecognized identifier '{id}'")))
}

/// `id` parsed, or the default locale when `None`.
///
/// A default that cannot be read from the environment falls back to the
/// root locale with a warning.
pub fn resolve_locale(id: Option<&str>) -> Result<Locale> {
  match id {
    Some(id) => parse_locale(id),
    None => {
      Ok(env::default_locale().unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to the root locale");
        Locale::root()
      }))
    },
  }
}

fn expect_bool(key: &str, value: &toml::Value) -> Result<bool> {
  value
    .as_bool()
    .ok_or_else(|| TextError::Config(format!("option '{key}' expects a boolean, got {}", value.type_str())))
}

/// Collator options from a table such as
/// `{ locale = "de", strength = 1, numeric = true }`.
pub fn collator_options(table: &toml::Table) -> Result<CollatorOptions> {
  let mut opts = CollatorOptions::default();
  for (key, value) in table {
    match key.as_str() {
      "locale" => {
        let id = value
          .as_str()
          .ok_or_else(|| TextError::Config(format!("option 'locale' expects a string, got {}", value.type_str())))?;
        opts.locale = Some(parse_locale(id)?.to_string());
      },
      "strength" => {
        let level = value
          .as_integer()
          .ok_or_else(|| TextError::Config(format!("option 'strength' expects an integer, got {}", value.type_str())))?;
        opts.strength = Strength::from_level(level)?;
      },
      "alternate_shifted" => opts.alternate_shifted = expect_bool(key, value)?,
      "french" => opts.french = expect_bool(key, value)?,
      "uppercase_first" => opts.uppercase_first = Some(expect_bool(key, value)?),
      "case_level" => opts.case_level = expect_bool(key, value)?,
      "normalization" => opts.normalization = expect_bool(key, value)?,
      "numeric" => opts.numeric = expect_bool(key, value)?,
      _ => tracing::warn!(option = %key, "unknown collator option, ignoring"),
    }
  }
  Ok(opts)
}

const REGEX_OPTIONS: [(&str, RegexFlags); 8] = [
  ("case_insensitive", RegexFlags::CASE_INSENSITIVE),
  ("comments", RegexFlags::COMMENTS),
  ("dotall", RegexFlags::DOTALL),
  ("literal", RegexFlags::LITERAL),
  ("multiline", RegexFlags::MULTILINE),
  ("unix_lines", RegexFlags::UNIX_LINES),
  ("uword", RegexFlags::UWORD),
  ("error_on_unknown_escapes", RegexFlags::ERROR_ON_UNKNOWN_ESCAPES),
];

/// Regex flags from a table of booleans such as
/// `{ case_insensitive = true, multiline = true }`.
pub fn regex_flags(table: &toml::Table) -> Result<RegexFlags> {
  let mut flags = RegexFlags::empty();
  for (key, value) in table {
    let Some(&(_, flag)) = REGEX_OPTIONS.iter().find(|(name, _)| *name == key.as_str()) else {
      tracing::warn!(option = %key, "unknown regex option, ignoring");
      continue;
    };
    flags.set(flag, expect_bool(key, value)?);
  }
  Ok(flags)
}

#[cfg(test)]
mod test {
  use super::*;

  fn table(source: &str) -> toml::Table {
    toml::from_str(source).unwrap()
  }

  #[test]
  fn collator_table() {
    let opts = collator_options(&table(
      r#"
      locale = "de-de"
      strength = 1
      numeric = true
      uppercase_first = false
      unknown = 3
      "#,
    ))
    .unwrap();
    assert_eq!(opts.locale.as_deref(), Some("de_DE"));
    assert_eq!(opts.strength, Strength::Primary);
    assert!(opts.numeric);
    assert_eq!(opts.uppercase_first, Some(false));
    assert!(!opts.french);
  }

  #[test]
  fn collator_table_errors() {
    assert!(matches!(
      collator_options(&table("numeric = 1")),
      Err(TextError::Config(_))
    ));
    assert!(matches!(
      collator_options(&table("strength = 7")),
      Err(TextError::Collator(_))
    ));
    assert!(matches!(
      collator_options(&table(r#"locale = "??""#)),
      Err(TextError::InvalidArgument { name: "locale", .. })
    ));
  }

  #[test]
  fn regex_table() {
    let flags = regex_flags(&table("case_insensitive = true\nmultiline = true\nliteral = false\nbogus = true")).unwrap();
    assert_eq!(flags, RegexFlags::CASE_INSENSITIVE | RegexFlags::MULTILINE);
    assert!(matches!(regex_flags(&table(r#"dotall = "yes""#)), Err(TextError::Config(_))));
  }

  #[test]
  fn engine_config_from_toml() {
    let config = EngineConfig::from_toml(
      r#"
      warn-recycling = false

      [collator]
      strength = 2

      [regex]
      comments = true
      "#,
    )
    .unwrap();
    assert!(!config.warn_recycling);
    assert_eq!(config.locale, None);
    assert_eq!(config.collator_options().unwrap().strength, Strength::Secondary);
    assert_eq!(config.regex_flags().unwrap(), RegexFlags::COMMENTS);

    assert_eq!(EngineConfig::from_toml("").unwrap(), EngineConfig::default());
    assert!(matches!(EngineConfig::from_toml("colour = 1"), Err(TextError::Config(_))));
  }

  #[test]
  fn explicit_locales_are_parsed() {
    assert_eq!(resolve_locale(Some("tr_TR")).unwrap().language(), "tr");
    assert!(resolve_locale(Some("1234567")).is_err());
  }
}
