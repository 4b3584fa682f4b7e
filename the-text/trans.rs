//! Case mapping of whole vectors.

use the_core::casemap::{
  self,
  CaseLocale,
};
use the_stdx::utf8;

use crate::{
  config::resolve_locale,
  error::Result,
  strvec::StrVec,
};

fn map_with(strings: &StrVec, locale: Option<&str>, map: fn(&str, CaseLocale, &mut String)) -> Result<StrVec> {
  let locale = resolve_locale(locale)?;
  let case = CaseLocale::from_language(locale.language());

  let mut out = StrVec::with_capacity(strings.len());
  let mut buf = String::new();
  for item in strings.iter() {
    let Some(bytes) = item else {
      out.push(None);
      continue;
    };
    buf.clear();
    map(utf8::validate(bytes)?, case, &mut buf);
    out.push(Some(buf.as_bytes()));
  }
  Ok(out)
}

/// Full Unicode uppercase mapping; `locale` of `None` uses the default.
pub fn to_upper(strings: &StrVec, locale: Option<&str>) -> Result<StrVec> {
  map_with(strings, locale, casemap::to_upper_case_with)
}

pub fn to_lower(strings: &StrVec, locale: Option<&str>) -> Result<StrVec> {
  map_with(strings, locale, casemap::to_lower_case_with)
}

/// Uppercases the first cased letter of every word and lowercases the
/// rest of it.
pub fn to_title(strings: &StrVec, locale: Option<&str>) -> Result<StrVec> {
  map_with(strings, locale, casemap::to_title_case_with)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::error::TextError;

  #[test]
  fn maps_every_element() {
    let strings = StrVec::from([Some("Straße"), None, Some(""), Some("żółw")]);
    assert_eq!(
      to_upper(&strings, Some("en")).unwrap(),
      StrVec::from([Some("STRASSE"), None, Some(""), Some("ŻÓŁW")])
    );
    assert_eq!(
      to_lower(&strings, Some("en")).unwrap(),
      StrVec::from([Some("straße"), None, Some(""), Some("żółw")])
    );
    assert_eq!(
      to_title(&StrVec::from("hello wORLD"), Some("en")).unwrap(),
      StrVec::from("Hello World")
    );
  }

  #[test]
  fn turkish_locale() {
    let strings = StrVec::from("kilim");
    assert_eq!(to_upper(&strings, Some("tr_TR")).unwrap(), StrVec::from("KİLİM"));
    assert_eq!(to_upper(&strings, Some("pl")).unwrap(), StrVec::from("KILIM"));
  }

  #[test]
  fn errors() {
    let bad = StrVec::from_bytes([Some(&b"\xc3"[..])]);
    assert!(matches!(to_lower(&bad, Some("en")), Err(TextError::InvalidUtf8(_))));
    assert!(matches!(
      to_lower(&StrVec::from("a"), Some("!!")),
      Err(TextError::InvalidArgument { name: "locale", .. })
    ));
  }
}
