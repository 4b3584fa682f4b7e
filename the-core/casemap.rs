//! Full Unicode case mapping with the few locale tailorings that matter
//! for running text.

use unicode_normalization::char::canonical_combining_class;
use unicode_segmentation::UnicodeSegmentation;

const COMBINING_DOT_ABOVE: char = '\u{0307}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseLocale {
  #[default]
  Root,
  /// Turkish and Azeri: dotted and dotless i are distinct letters.
  Turkic,
}

impl CaseLocale {
  #[must_use]
  pub fn from_language(language: &str) -> Self {
    match language {
      "tr" | "az" => Self::Turkic,
      _ => Self::Root,
    }
  }
}

pub fn to_upper_case(text: &str, locale: CaseLocale) -> String {
  let mut res = String::with_capacity(text.len());
  to_upper_case_with(text, locale, &mut res);
  res
}

pub fn to_upper_case_with(text: &str, locale: CaseLocale, buf: &mut String) {
  match locale {
    CaseLocale::Root => buf.push_str(&text.to_uppercase()),
    CaseLocale::Turkic => {
      text.chars().for_each(|c| {
        match c {
          'i' => buf.push('İ'),
          c => buf.extend(c.to_uppercase()),
        }
      })
    },
  }
}

pub fn to_lower_case(text: &str, locale: CaseLocale) -> String {
  let mut res = String::with_capacity(text.len());
  to_lower_case_with(text, locale, &mut res);
  res
}

pub fn to_lower_case_with(text: &str, locale: CaseLocale, buf: &mut String) {
  match locale {
    // std takes care of the context-sensitive final sigma
    CaseLocale::Root => buf.push_str(&text.to_lowercase()),
    CaseLocale::Turkic => buf.push_str(&turkic_dotless(text).to_lowercase()),
  }
}

/// Rewrites the capital i's to the lowercase letters they map to in Turkic
/// locales. Both results are cased, so the final sigma context that std
/// looks at is unchanged.
///
/// `I` followed by a combining dot above (possibly after other marks that
/// do not sit above) is a dotted `i`, and the dot is dropped.
fn turkic_dotless(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut chars = text.chars().peekable();
  while let Some(c) = chars.next() {
    match c {
      'I' => {
        let mut marks = String::new();
        while let Some(&m) = chars.peek().filter(|&&m| !matches!(canonical_combining_class(m), 0 | 230)) {
          marks.push(m);
          chars.next();
        }
        if chars.next_if_eq(&COMBINING_DOT_ABOVE).is_some() {
          out.push('i');
        } else {
          out.push('ı');
        }
        out.push_str(&marks);
      },
      'İ' => out.push('i'),
      c => out.push(c),
    }
  }
  out
}

pub fn to_title_case(text: &str, locale: CaseLocale) -> String {
  let mut res = String::with_capacity(text.len());
  to_title_case_with(text, locale, &mut res);
  res
}

/// Uppercases the first cased letter of every word and lowercases the rest.
pub fn to_title_case_with(text: &str, locale: CaseLocale, buf: &mut String) {
  for word in text.split_word_bounds() {
    let mut chars = word.char_indices();
    let head = chars.find(|(_, c)| c.is_lowercase() || c.is_uppercase() || is_titlecase(*c));
    let Some((idx, first)) = head else {
      buf.push_str(word);
      continue;
    };

    buf.push_str(&word[..idx]);
    push_title(first, locale, buf);
    to_lower_case_with(&word[idx + first.len_utf8()..], locale, buf);
  }
}

fn push_title(c: char, locale: CaseLocale, buf: &mut String) {
  match c {
    '\u{01C4}'..='\u{01C6}' => buf.push('\u{01C5}'),
    '\u{01C7}'..='\u{01C9}' => buf.push('\u{01C8}'),
    '\u{01CA}'..='\u{01CC}' => buf.push('\u{01CB}'),
    '\u{01F1}'..='\u{01F3}' => buf.push('\u{01F2}'),
    'i' if locale == CaseLocale::Turkic => buf.push('İ'),
    // titlecase keeps the tail of ligature-like expansions lowercase: ß -> Ss
    c => {
      let mut upper = c.to_uppercase();
      if let Some(first) = upper.next() {
        buf.push(first);
      }
      buf.extend(upper.flat_map(char::to_lowercase));
    },
  }
}

fn is_titlecase(c: char) -> bool {
  matches!(
    c,
    '\u{01C5}' | '\u{01C8}' | '\u{01CB}' | '\u{01F2}' | '\u{1F88}'..='\u{1F8F}'
      | '\u{1F98}'..='\u{1F9F}' | '\u{1FA8}'..='\u{1FAF}' | '\u{1FBC}' | '\u{1FCC}' | '\u{1FFC}'
  )
}
